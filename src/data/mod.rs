// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between the raw CSV file and the numeric
// matrices handed to the learning step.
//
//   student-mat.csv
//       │
//       ▼
//   CsvLoader          → header row becomes the schema
//       │
//       ▼
//   select_fields      → keep the configured columns
//       │
//       ▼
//   drop_incomplete    → remove rows with any missing cell
//       │
//       ▼
//   encode_categorical → "F"/"M", "yes"/"no", "GP"/"MS" → codes
//       │
//       ▼
//   split              → seeded train / holdout partition
//       │
//       ▼
//   project_features_target → FeatureMatrix + TargetVector
//
// Each stage takes a Dataset by reference and returns a new
// one, so stages can be tested and reordered independently.
// DataPreparer wires them together.

/// Reads delimited files into a Dataset
pub mod loader;

/// Column selection and the missing-data filter
pub mod preprocessor;

/// Categorical encoding through EncodingTables
pub mod encoder;

/// Seeded train/holdout partitioning
pub mod splitter;

/// Numeric feature/target projection
pub mod features;

/// Composes the stages above
pub mod preparer;
