// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The application layer talks to the data source and the
// learning step only through these traits.
//
// Implementations:
//   - CsvLoader       → RecordSource   (data/loader.rs)
//   - MlpRegressor    → Regressor      (ml/trainer.rs)
//   - FittedRegressor → Predictor      (ml/inferencer.rs)

use anyhow::Result;

use crate::domain::dataset::Dataset;
use crate::domain::error::PrepareResult;
use crate::domain::features::{FeatureMatrix, TargetVector};

// ─── RecordSource ─────────────────────────────────────────────────────────────
/// Anything that can produce a raw Dataset, header row as schema.
pub trait RecordSource {
    fn load(&self) -> PrepareResult<Dataset>;
}

// ─── Regressor ────────────────────────────────────────────────────────────────
/// A learning step that fits a predictor on a training subset.
pub trait Regressor {
    type Fitted: Predictor;

    fn fit(&self, features: &FeatureMatrix, target: &TargetVector) -> Result<Self::Fitted>;
}

// ─── Predictor ────────────────────────────────────────────────────────────────
/// A fitted model: one prediction per feature row.
pub trait Predictor {
    fn predict(&self, features: &FeatureMatrix) -> Result<Vec<f32>>;
}
