// ============================================================
// Layer 2 — Predict Use Case
// ============================================================
//   1. Load pipeline_config.json and the fitted model
//   2. Prepare the input file with the saved field selection
//      and encodings; the target column may be absent
//   3. Predict one value per complete input record, keyed by
//      the line it was read from; incomplete rows are skipped

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::application::config::PipelineConfig;
use crate::data::loader::CsvLoader;
use crate::domain::dataset::Dataset;
use crate::domain::traits::Predictor;
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::inferencer::FittedRegressor;

/// Prepared inputs and the prediction for each of them.
#[derive(Debug, Clone)]
pub struct PredictionBatch {
    pub inputs:      Dataset,
    pub predictions: Vec<f32>,
    /// Incomplete input rows that got no prediction
    pub skipped:     usize,
}

impl PredictionBatch {
    /// (source line, prediction) pairs in input order.
    pub fn rows(&self) -> impl Iterator<Item = (Option<u64>, f32)> + '_ {
        self.inputs
            .records()
            .iter()
            .map(|r| r.line())
            .zip(self.predictions.iter().copied())
    }
}

pub struct PredictUseCase {
    pipeline:  PipelineConfig,
    regressor: FittedRegressor,
}

impl PredictUseCase {
    pub fn new(artifact_dir: impl Into<PathBuf>) -> Result<Self> {
        let artifact_dir = artifact_dir.into();
        let ckpt         = CheckpointManager::new(&artifact_dir);
        let pipeline     = ckpt.load_config()?;
        let regressor    = FittedRegressor::from_checkpoint(&ckpt)?;
        Ok(Self { pipeline, regressor })
    }

    pub fn target(&self) -> &str {
        &self.pipeline.target
    }

    /// `delimiter` overrides the one saved with the model.
    pub fn predict(&self, data_path: &Path, delimiter: Option<u8>) -> Result<PredictionBatch> {
        let delimiter = match delimiter {
            Some(d) => d,
            None    => self.pipeline.delimiter_byte()?,
        };
        let loader = CsvLoader::new(data_path).with_delimiter(delimiter);

        let input = self
            .pipeline
            .preparer()
            .features_for_prediction(&loader, self.regressor.feature_names())
            .with_context(|| format!("Cannot prepare '{}'", data_path.display()))?;

        let predictions = self.regressor.predict(&input.features)?;
        tracing::info!(
            "Predicted {} for {} records ({} skipped)",
            self.pipeline.target,
            predictions.len(),
            input.skipped
        );

        Ok(PredictionBatch { inputs: input.records, predictions, skipped: input.skipped })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::config::Preset;
    use crate::application::train_use_case::{TrainConfig, TrainUseCase};
    use crate::ml::trainer::TrainerConfig;
    use std::fs;

    fn train_into(dir: &Path) -> PathBuf {
        let data = dir.join("train.csv");
        let mut csv = String::from("school,G1,G2,G3,failures,studytime,age,absences,Medu,Fedu,health\n");
        for i in 0..20 {
            let g2 = 6 + i % 10;
            csv.push_str(&format!("GP,{g2},{g2},{},0,2,16,{},2,2,3\n", g2 + 1, i % 5));
        }
        fs::write(&data, csv).unwrap();

        let artifacts = dir.join("artifacts");
        TrainUseCase::new(TrainConfig {
            data_path:    data,
            artifact_dir: artifacts.clone(),
            pipeline:     PipelineConfig::from_preset(Preset::Grades),
            trainer:      TrainerConfig { epochs: 3, batch_size: 4, ..TrainerConfig::default() },
        })
        .execute()
        .unwrap();
        artifacts
    }

    #[test]
    fn test_predict_without_target_column() {
        let dir       = tempfile::tempdir().unwrap();
        let artifacts = train_into(dir.path());

        // Columns reordered, no G3, one incomplete row
        let input = dir.path().join("new.csv");
        fs::write(
            &input,
            "health,Fedu,Medu,absences,age,studytime,failures,G2,G1,school\n\
             3,2,2,4,17,2,0,12,11,MS\n\
             3,2,2,,17,2,0,12,11,GP\n\
             4,1,1,0,15,3,1,8,9,GP\n",
        )
        .unwrap();

        let use_case = PredictUseCase::new(&artifacts).unwrap();
        assert_eq!(use_case.target(), "G3");

        let batch = use_case.predict(&input, None).unwrap();
        assert_eq!(batch.predictions.len(), 2);
        assert_eq!(batch.inputs.len(), 2);
        assert_eq!(batch.skipped, 1);
        assert!(batch.predictions.iter().all(|p| p.is_finite()));

        let lines: Vec<Option<u64>> = batch.rows().map(|(line, _)| line).collect();
        assert_eq!(lines, vec![Some(2), Some(4)]);
    }

    #[test]
    fn test_missing_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let err = PredictUseCase::new(dir.path().join("nothing-here")).err().unwrap();
        assert!(format!("{err:#}").contains("train"));
    }
}
