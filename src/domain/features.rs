// ============================================================
// Layer 3 — FeatureMatrix / TargetVector
// ============================================================
// Read-only numeric projections of a Dataset handed to the
// learning step. Rows are stored flat in row-major order:
//
//   [r0_c0, r0_c1, ..., r0_cN, r1_c0, ...]
//
// which is the layout burn's TensorData expects.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureMatrix {
    names: Vec<String>,
    data:  Vec<f32>,
    rows:  usize,
}

impl FeatureMatrix {
    /// `data.len()` must equal `rows * names.len()`.
    pub fn new(names: Vec<String>, data: Vec<f32>, rows: usize) -> Self {
        debug_assert_eq!(data.len(), rows * names.len());
        Self { names, data, rows }
    }

    /// Build from row vectors. Every row must have `names.len()` cells.
    pub fn from_rows(names: Vec<String>, rows: &[Vec<f32>]) -> Self {
        let data = rows.iter().flat_map(|r| r.iter().copied()).collect();
        Self::new(names, data, rows.len())
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.names.len()
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn row(&self, index: usize) -> &[f32] {
        let cols = self.cols();
        &self.data[index * cols..(index + 1) * cols]
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetVector {
    name:   String,
    values: Vec<f32>,
}

impl TargetVector {
    pub fn new(name: impl Into<String>, values: Vec<f32>) -> Self {
        Self { name: name.into(), values }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
