// ============================================================
// Layer 4 — DataPreparer
// ============================================================
// Composes the pipeline stages in a fixed order:
//
//   load → select_fields → drop_incomplete → encode_categorical
//        → split → project_features_target
//
// Missing rows are dropped before encoding so a blank
// categorical cell never surfaces as an unmapped value.
//
// The preparer owns nothing but its settings; each call reads
// the source afresh and returns immutable results.

use crate::data::{
    encoder::encode_categorical,
    features::{project_features, project_features_target},
    preprocessor::{drop_incomplete, select_fields},
    splitter::{split, Split, DEFAULT_HOLDOUT_FRACTION},
};
use crate::domain::dataset::Dataset;
use crate::domain::encoding::EncodingTables;
use crate::domain::error::PrepareResult;
use crate::domain::features::{FeatureMatrix, TargetVector};
use crate::domain::traits::RecordSource;

/// Output of a full preparation run.
#[derive(Debug, Clone)]
pub struct PreparedData {
    pub split:   Split,
    pub train_x: FeatureMatrix,
    pub train_y: TargetVector,
    pub test_x:  FeatureMatrix,
    pub test_y:  TargetVector,
}

/// Cleaned prediction inputs. `records` keeps each row's source
/// line so predictions can be matched back to the file.
#[derive(Debug, Clone)]
pub struct PredictionInput {
    pub records:  Dataset,
    pub features: FeatureMatrix,
    pub skipped:  usize,
}

#[derive(Debug, Clone)]
pub struct DataPreparer {
    fields:           Vec<String>,
    target:           String,
    encodings:        EncodingTables,
    holdout_fraction: f64,
    seed:             u64,
}

impl DataPreparer {
    /// Keep `fields` (which must include `target`); no encodings,
    /// default holdout fraction, seed 0.
    pub fn new(fields: Vec<String>, target: impl Into<String>) -> Self {
        Self {
            fields,
            target:           target.into(),
            encodings:        EncodingTables::new(),
            holdout_fraction: DEFAULT_HOLDOUT_FRACTION,
            seed:             0,
        }
    }

    pub fn with_encodings(mut self, encodings: EncodingTables) -> Self {
        self.encodings = encodings;
        self
    }

    pub fn with_holdout_fraction(mut self, fraction: f64) -> Self {
        self.holdout_fraction = fraction;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    /// load → select → drop incomplete → encode
    pub fn clean(&self, source: &impl RecordSource) -> PrepareResult<Dataset> {
        let raw      = source.load()?;
        let selected = select_fields(&raw, &self.fields)?;
        let complete = drop_incomplete(&selected);
        let encoded  = encode_categorical(&complete, &self.encodings)?;

        tracing::info!(
            "Prepared {} complete records ({} fields, {} encoded)",
            encoded.len(),
            encoded.fields().len(),
            self.encodings.len()
        );
        Ok(encoded)
    }

    /// clean + seeded split, no projection
    pub fn clean_and_split(&self, source: &impl RecordSource) -> PrepareResult<Split> {
        let cleaned = self.clean(source)?;
        split(&cleaned, self.holdout_fraction, self.seed)
    }

    /// The full pipeline.
    pub fn run(&self, source: &impl RecordSource) -> PrepareResult<PreparedData> {
        let split = self.clean_and_split(source)?;

        let (train_x, train_y) = project_features_target(&split.training, &self.target)?;
        let (test_x, test_y)   = project_features_target(&split.holdout, &self.target)?;

        tracing::info!(
            "Split: {} training, {} holdout rows, {} features",
            train_x.rows(),
            test_x.rows(),
            train_x.cols()
        );

        Ok(PreparedData { split, train_x, train_y, test_x, test_y })
    }

    /// Prepare records for prediction: select `feature_names`
    /// (in that order), drop incomplete rows and encode with the
    /// tables that cover the selected fields. The target column
    /// is not required.
    pub fn features_for_prediction(
        &self,
        source:        &impl RecordSource,
        feature_names: &[String],
    ) -> PrepareResult<PredictionInput> {
        let raw      = source.load()?;
        let selected = select_fields(&raw, feature_names)?;
        let complete = drop_incomplete(&selected);
        let skipped  = selected.len() - complete.len();

        if skipped > 0 {
            tracing::warn!("Skipping {skipped} incomplete records with no prediction");
        }

        let tables: EncodingTables = self
            .encodings
            .iter()
            .filter(|(field, _)| complete.has_field(field))
            .map(|(field, table)| (field.clone(), table.clone()))
            .collect();
        let encoded = encode_categorical(&complete, &tables)?;

        let features = project_features(&encoded)?;
        Ok(PredictionInput { records: encoded, features, skipped })
    }
}
