// ============================================================
// Layer 2 — PrepareUseCase
// ============================================================
// Runs only the data preparation and writes both halves of
// the split next to each other:
//
//   Step 1: Load + clean + encode     (Layer 4 - data)
//   Step 2: Seeded split              (Layer 4 - data)
//   Step 3: Write train/holdout CSVs  (Layer 6 - infra)
//
// Encoded values are written as they are held in memory, so
// booleans come out as `true`/`false` and integer codes as
// plain numbers.

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};

use crate::application::config::PipelineConfig;
use crate::data::loader::CsvLoader;
use crate::infra::report::write_dataset;

const TRAIN_FILE:   &str = "train.csv";
const HOLDOUT_FILE: &str = "holdout.csv";

#[derive(Debug, Clone)]
pub struct PrepareConfig {
    pub data_path: PathBuf,
    pub out_dir:   PathBuf,
    pub pipeline:  PipelineConfig,
}

/// Where the split went and how large each side is.
#[derive(Debug, Clone, PartialEq)]
pub struct PrepareSummary {
    pub train_path:   PathBuf,
    pub holdout_path: PathBuf,
    pub n_training:   usize,
    pub n_holdout:    usize,
}

pub struct PrepareUseCase {
    config: PrepareConfig,
}

impl PrepareUseCase {
    pub fn new(config: PrepareConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<PrepareSummary> {
        let cfg = &self.config;
        cfg.pipeline.validate()?;

        let delimiter = cfg.pipeline.delimiter_byte()?;

        let loader = CsvLoader::new(&cfg.data_path).with_delimiter(delimiter);
        let split  = cfg
            .pipeline
            .preparer()
            .clean_and_split(&loader)
            .with_context(|| format!("Cannot prepare '{}'", cfg.data_path.display()))?;

        fs::create_dir_all(&cfg.out_dir)
            .with_context(|| format!("Cannot create '{}'", cfg.out_dir.display()))?;

        let train_path   = cfg.out_dir.join(TRAIN_FILE);
        let holdout_path = cfg.out_dir.join(HOLDOUT_FILE);
        write_dataset(&train_path, &split.training, delimiter)?;
        write_dataset(&holdout_path, &split.holdout, delimiter)?;

        Ok(PrepareSummary {
            train_path,
            holdout_path,
            n_training: split.training.len(),
            n_holdout:  split.holdout.len(),
        })
    }
}
