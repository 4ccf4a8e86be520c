// ============================================================
// Layer 5 — ML / Model Layer (burn)
// ============================================================
// All burn-specific code lives here. The rest of the crate
// only sees the Regressor / Predictor traits and plain
// FeatureMatrix / TargetVector values.
//
//   model.rs      — GradeRegressor: Linear → ReLU → Linear
//   scaler.rs     — per-column standardisation
//   trainer.rs    — Adam + MSE training loop (MlpRegressor)
//   inferencer.rs — FittedRegressor: predicts, reloads from disk
//
// Reference: Burn Book §3 (Building Blocks), §5 (Training)

/// Regression network architecture
pub mod model;

/// Feature standardisation fitted on the training split
pub mod scaler;

/// Training loop
pub mod trainer;

/// Fitted model: prediction and checkpoint loading
pub mod inferencer;
