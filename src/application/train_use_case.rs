// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the full training pipeline in order:
//
//   Step 1: Load, clean, encode, split  (Layer 4 - data)
//   Step 2: Save pipeline config        (Layer 6 - infra)
//   Step 3: Fit the regressor           (Layer 5 - ml)
//   Step 4: Save weights + model meta   (Layer 6 - infra)
//   Step 5: Predict the holdout         (Layer 5 - ml)
//   Step 6: Score and write reports     (Layer 6 - infra)
//
// Everything lands in one artifact directory so `predict`
// can pick it up later. Steps 2 to 6 write into a staging
// directory that replaces the artifact files only after the
// last step succeeds.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::application::config::PipelineConfig;
use crate::data::loader::CsvLoader;
use crate::domain::traits::{Predictor, Regressor};
use crate::infra::{
    checkpoint::{ArtifactStage, CheckpointManager},
    metrics::{MetricsLogger, RegressionMetrics},
    report::{write_evaluation, write_predictions, EvaluationReport},
};
use crate::ml::trainer::{MlpRegressor, TrainerConfig};

const PREDICTIONS_FILE: &str = "predictions.csv";
const EVALUATION_FILE:  &str = "evaluation.json";

// ─── Training Configuration ──────────────────────────────────────────────────
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub data_path:    PathBuf,
    pub artifact_dir: PathBuf,
    pub pipeline:     PipelineConfig,
    pub trainer:      TrainerConfig,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            data_path:    PathBuf::from("data/student-mat.csv"),
            artifact_dir: PathBuf::from("artifacts"),
            pipeline:     PipelineConfig::default(),
            trainer:      TrainerConfig::default(),
        }
    }
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Prepare, fit, evaluate on the holdout and persist everything.
    pub fn execute(&self) -> Result<EvaluationReport> {
        let cfg = &self.config;

        // ── Step 1: Prepare the data ──────────────────────────────────────────
        cfg.pipeline.validate()?;
        cfg.trainer.validate().context("Invalid trainer settings")?;
        tracing::info!("Preparing '{}'", cfg.data_path.display());
        let loader   = CsvLoader::new(&cfg.data_path).with_delimiter(cfg.pipeline.delimiter_byte()?);
        let prepared = cfg
            .pipeline
            .preparer()
            .run(&loader)
            .with_context(|| format!("Cannot prepare '{}'", cfg.data_path.display()))?;

        // ── Step 2: Save the pipeline config for predict ──────────────────────
        let stage = ArtifactStage::begin(&cfg.artifact_dir)?;
        let out   = stage.dir();
        let ckpt  = CheckpointManager::new(out);
        ckpt.save_config(&cfg.pipeline)?;

        // ── Step 3: Fit ───────────────────────────────────────────────────────
        let logger    = MetricsLogger::new(out)?;
        let regressor = MlpRegressor::new(cfg.trainer.clone()).with_metrics_logger(logger);
        let fitted    = regressor.fit(&prepared.train_x, &prepared.train_y)?;

        // ── Step 4: Persist the fitted model ──────────────────────────────────
        ckpt.save_model(fitted.model())?;
        ckpt.save_meta(fitted.meta())?;

        // ── Step 5: Predict the holdout ───────────────────────────────────────
        let predicted = fitted.predict(&prepared.test_x)?;
        let actual    = prepared.test_y.values();

        // ── Step 6: Score + reports ───────────────────────────────────────────
        let metrics = RegressionMetrics::compute(actual, &predicted)?;
        write_predictions(&out.join(PREDICTIONS_FILE), actual, &predicted)?;

        let report = EvaluationReport {
            target:     cfg.pipeline.target.clone(),
            n_training: prepared.train_y.len(),
            n_holdout:  prepared.test_y.len(),
            metrics,
        };
        write_evaluation(&out.join(EVALUATION_FILE), &report)?;

        stage.commit()?;
        tracing::info!("Artifacts saved to '{}'", cfg.artifact_dir.display());

        tracing::info!(
            "Holdout: MAE={:.4} RMSE={:.4} R²={:.4}",
            metrics.mae, metrics.rmse, metrics.r2
        );
        Ok(report)
    }
}
