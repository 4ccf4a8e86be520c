// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Orchestrates the other layers to accomplish one goal per
// subcommand.
//
// Rules for this layer:
//   - No ML math or model code here
//   - No printing here (that's Layer 1)
//   - File access goes through Layer 4 loaders and Layer 6
//     writers
//   - Only workflow coordination

// Field selection, target, encodings and split settings
pub mod config;

// Clean + split + write train.csv / holdout.csv
pub mod prepare_use_case;

// Prepare, fit, evaluate, persist
pub mod train_use_case;

// Reload a fitted model and predict new records
pub mod predict_use_case;
