// ============================================================
// Layer 2 — Pipeline Configuration
// ============================================================
// Which columns to keep, which one to predict, how to encode
// the categorical ones, and how to split.
//
// Two built-in presets cover the two classic analyses:
//
//   grades    — prior grades, study habits, family education,
//               school encoded GP→0 / MS→1
//   lifestyle — demographics, support and leisure flags, all
//               two-valued categories encoded as booleans
//
// Any preset can be replaced by a JSON file:
//
//   {
//     "fields": ["school", "G1", "G2", "G3"],
//     "target": "G3",
//     "encodings": { "school": { "GP": 0, "MS": 1 } },
//     "holdout_fraction": 0.2,
//     "seed": 42,
//     "delimiter": ","
//   }

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::data::preparer::DataPreparer;
use crate::data::splitter::DEFAULT_HOLDOUT_FRACTION;
use crate::domain::encoding::{Code, EncodingTable, EncodingTables};

/// Built-in pipeline settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    Grades,
    Lifestyle,
}

const GRADES_FIELDS: [&str; 11] = [
    "G1", "G2", "G3", "failures", "studytime", "age", "absences", "Medu", "Fedu", "health",
    "school",
];

const LIFESTYLE_FIELDS: [&str; 23] = [
    "sex", "age", "address", "Pstatus", "absences", "traveltime", "studytime", "schoolsup",
    "famsup", "activities", "paid", "higher", "internet", "romantic", "famrel", "freetime",
    "goout", "Dalc", "Walc", "health", "G1", "G2", "G3",
];

const YES_NO_FIELDS: [&str; 7] = [
    "schoolsup", "famsup", "paid", "activities", "higher", "internet", "romantic",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub fields: Vec<String>,
    pub target: String,
    #[serde(default)]
    pub encodings: EncodingTables,
    #[serde(default = "default_holdout_fraction")]
    pub holdout_fraction: f64,
    #[serde(default)]
    pub seed: u64,
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

fn default_holdout_fraction() -> f64 {
    DEFAULT_HOLDOUT_FRACTION
}

fn default_delimiter() -> char {
    ','
}

impl PipelineConfig {
    pub fn from_preset(preset: Preset) -> Self {
        match preset {
            Preset::Grades => {
                let mut encodings = EncodingTables::new();
                encodings.insert(
                    "school".into(),
                    EncodingTable::from_pairs([("GP", Code::Int(0)), ("MS", Code::Int(1))]),
                );
                Self {
                    fields:           GRADES_FIELDS.map(String::from).to_vec(),
                    target:           "G3".into(),
                    encodings,
                    holdout_fraction: DEFAULT_HOLDOUT_FRACTION,
                    seed:             42,
                    delimiter:        ',',
                }
            }
            Preset::Lifestyle => {
                let mut encodings = EncodingTables::new();
                encodings.insert("sex".into(), EncodingTable::boolean("F", "M"));
                encodings.insert("address".into(), EncodingTable::boolean("U", "R"));
                encodings.insert("Pstatus".into(), EncodingTable::boolean("A", "T"));
                for field in YES_NO_FIELDS {
                    encodings.insert(field.into(), EncodingTable::yes_no());
                }
                Self {
                    fields:           LIFESTYLE_FIELDS.map(String::from).to_vec(),
                    target:           "G3".into(),
                    encodings,
                    holdout_fraction: DEFAULT_HOLDOUT_FRACTION,
                    seed:             69,
                    delimiter:        ',',
                }
            }
        }
    }

    /// Read a pipeline config from JSON and validate it.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Cannot read pipeline config '{}'", path.display()))?;
        let cfg: Self = serde_json::from_str(&json)
            .with_context(|| format!("Invalid pipeline config '{}'", path.display()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Structural checks that do not need the data file.
    pub fn validate(&self) -> Result<()> {
        if !self.fields.iter().any(|f| f == &self.target) {
            bail!("target field '{}' is not among the selected fields", self.target);
        }
        if let Some(field) = self.encodings.keys().find(|k| !self.fields.contains(k)) {
            bail!("encoding table for '{field}' but the field is not selected");
        }
        if let Some(field) = self.encodings.iter().find(|(_, t)| t.is_empty()).map(|(f, _)| f) {
            bail!("encoding table for '{field}' is empty");
        }
        self.delimiter_byte()?;
        Ok(())
    }

    pub fn delimiter_byte(&self) -> Result<u8> {
        ascii_delimiter(self.delimiter)
    }

    /// Fields fed to the model, in schema order.
    pub fn feature_fields(&self) -> Vec<String> {
        self.fields.iter().filter(|f| **f != self.target).cloned().collect()
    }

    pub fn preparer(&self) -> DataPreparer {
        DataPreparer::new(self.fields.clone(), self.target.clone())
            .with_encodings(self.encodings.clone())
            .with_holdout_fraction(self.holdout_fraction)
            .with_seed(self.seed)
    }
}

/// The csv reader and writer take the delimiter as one byte.
pub fn ascii_delimiter(c: char) -> Result<u8> {
    u8::try_from(c)
        .ok()
        .filter(u8::is_ascii)
        .with_context(|| format!("delimiter {c:?} must be a single ASCII character"))
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::from_preset(Preset::Grades)
    }
}
