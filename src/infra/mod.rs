// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// File output shared by the use cases:
//
//   checkpoint.rs — model weights (burn CompactRecorder),
//                   model metadata and pipeline config as JSON
//
//   metrics.rs    — per-epoch loss CSV and the holdout
//                   evaluation metrics (MAE, MSE, RMSE, R²)
//
//   report.rs     — console metrics block, predictions CSV,
//                   evaluation JSON, prepared-split CSVs

/// Model and config persistence
pub mod checkpoint;

/// Training loss log and regression metrics
pub mod metrics;

/// Reports and CSV exports
pub mod report;
