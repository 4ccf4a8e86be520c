// ============================================================
// Layer 5 — Feature Standardisation
// ============================================================
// Grades (0-20), ages (15-22) and absence counts (0-93) live
// on very different scales. Each column is shifted to zero
// mean and scaled to unit population std before it reaches
// the network. Statistics come from the training split only
// and are persisted with the model so prediction inputs are
// scaled identically.

use serde::{Deserialize, Serialize};

use crate::domain::features::FeatureMatrix;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Standardizer {
    pub mean: Vec<f32>,
    pub std:  Vec<f32>,
}

impl Standardizer {
    /// Column means and population stds. A constant column gets
    /// std 1 so it maps to zero instead of dividing by zero.
    pub fn fit(x: &FeatureMatrix) -> Self {
        let (rows, cols) = (x.rows(), x.cols());
        let n = rows.max(1) as f32;

        let mut mean = vec![0.0f32; cols];
        for r in 0..rows {
            for (m, v) in mean.iter_mut().zip(x.row(r)) {
                *m += v;
            }
        }
        mean.iter_mut().for_each(|m| *m /= n);

        let mut std = vec![0.0f32; cols];
        for r in 0..rows {
            for ((s, v), m) in std.iter_mut().zip(x.row(r)).zip(&mean) {
                *s += (v - m) * (v - m);
            }
        }
        for s in std.iter_mut() {
            *s = (*s / n).sqrt();
            if *s <= f32::EPSILON {
                *s = 1.0;
            }
        }

        Self { mean, std }
    }

    /// Scaled copy of `x`, row-major.
    pub fn transform(&self, x: &FeatureMatrix) -> Vec<f32> {
        x.data()
            .chunks(x.cols().max(1))
            .flat_map(|row| {
                row.iter()
                    .zip(self.mean.iter().zip(&self.std))
                    .map(|(v, (m, s))| (v - m) / s)
            })
            .collect()
    }
}
