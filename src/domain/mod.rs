// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust types describing student records and how their
// categorical columns are encoded.
//
// Rules for this layer:
//   - NO burn types
//   - NO file I/O
//   - Only plain structs, enums, errors and traits
//
//   value.rs    — Value (one cell) and Record (one row)
//   dataset.rs  — Dataset: schema + ordered records
//   encoding.rs — Code and EncodingTable
//   features.rs — FeatureMatrix / TargetVector projections
//   error.rs    — PrepareError, the data pipeline's error kinds
//   traits.rs   — seams implemented by the data and ml layers

pub mod value;

pub mod dataset;

pub mod encoding;

pub mod features;

pub mod error;

pub mod traits;
