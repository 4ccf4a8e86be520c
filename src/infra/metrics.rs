// ============================================================
// Layer 6 — Metrics
// ============================================================
// Two kinds of numbers come out of a training run:
//
//   EpochMetrics       — mean training loss per epoch, appended
//                        to metrics.csv by MetricsLogger
//   RegressionMetrics  — holdout evaluation: MAE, MSE, RMSE, R²
//
// Example metrics.csv:
//   epoch,train_loss
//   1,98.412300
//   2,71.005122
//   ...

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

// ─── Training curve ───────────────────────────────────────────────────────────

/// One row of metrics.csv
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochMetrics {
    /// 1-based epoch number
    pub epoch:      usize,
    /// Mean of the per-batch MSE losses over the epoch, in
    /// squared target units
    pub train_loss: f64,
}

impl EpochMetrics {
    pub fn new(epoch: usize, train_loss: f64) -> Self {
        Self { epoch, train_loss }
    }

    /// True if this epoch beat the best loss seen so far
    pub fn is_improvement(&self, best_loss: f64) -> bool {
        self.train_loss < best_loss
    }
}

/// Appends epoch metrics to `<dir>/metrics.csv`. Each row is
/// written and closed as soon as the epoch ends, so the file
/// can be followed while training runs.
pub struct MetricsLogger {
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Starts a fresh metrics.csv with its header row,
    /// truncating any earlier file in `dir`.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;

        let csv_path = dir.join("metrics.csv");
        let mut f = fs::File::create(&csv_path)?;
        writeln!(f, "epoch,train_loss")?;
        tracing::debug!("Created metrics CSV: '{}'", csv_path.display());

        Ok(Self { csv_path })
    }

    /// Append one `epoch,train_loss` row, loss to six decimals.
    pub fn log(&self, m: &EpochMetrics) -> Result<()> {
        let mut f = OpenOptions::new().append(true).open(&self.csv_path)?;
        writeln!(f, "{},{:.6}", m.epoch, m.train_loss)?;
        Ok(())
    }

    /// Location of metrics.csv
    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }
}

// ─── Holdout evaluation ───────────────────────────────────────────────────────

/// Holdout scores, written to evaluation.json.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionMetrics {
    /// Mean absolute error, in grade points
    pub mae:  f64,
    /// Mean squared error
    pub mse:  f64,
    /// Square root of `mse`, back in grade points
    pub rmse: f64,
    /// Coefficient of determination; 1.0 is a perfect fit and
    /// values below 0.0 are worse than predicting the mean
    pub r2:   f64,
}

impl RegressionMetrics {
    /// Compare ground truth with predictions.
    ///
    /// R² is 1 - SS_res / SS_tot. With a constant ground truth
    /// (SS_tot = 0) it is 1.0 for exact predictions, else 0.0.
    pub fn compute(actual: &[f32], predicted: &[f32]) -> Result<Self> {
        ensure!(
            actual.len() == predicted.len(),
            "length mismatch: {} actual vs {} predicted values",
            actual.len(),
            predicted.len()
        );
        ensure!(!actual.is_empty(), "cannot evaluate an empty holdout set");

        let n = actual.len() as f64;
        let mean = actual.iter().map(|&a| a as f64).sum::<f64>() / n;

        let mut abs_sum = 0.0;
        let mut ss_res  = 0.0;
        let mut ss_tot  = 0.0;
        for (&a, &p) in actual.iter().zip(predicted) {
            let (a, p) = (a as f64, p as f64);
            abs_sum += (a - p).abs();
            ss_res  += (a - p) * (a - p);
            ss_tot  += (a - mean) * (a - mean);
        }

        let mse = ss_res / n;
        let r2 = if ss_tot > 0.0 {
            1.0 - ss_res / ss_tot
        } else if ss_res == 0.0 {
            1.0
        } else {
            0.0
        };

        Ok(Self { mae: abs_sum / n, mse, rmse: mse.sqrt(), r2 })
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_is_improvement() {
        let m = EpochMetrics::new(2, 2.3);
        assert!(m.is_improvement(3.0));
        assert!(!m.is_improvement(2.0));
    }

    #[test]
    fn test_known_values() {
        let actual    = [3.0, -0.5, 2.0, 7.0];
        let predicted = [2.5, 0.0, 2.0, 8.0];
        let m = RegressionMetrics::compute(&actual, &predicted).unwrap();
        assert!(close(m.mae, 0.5));
        assert!(close(m.mse, 0.375));
        assert!(close(m.rmse, 0.375f64.sqrt()));
        // SS_tot = 29.1875, SS_res = 1.5
        assert!(close(m.r2, 1.0 - 1.5 / 29.1875));
    }

    #[test]
    fn test_perfect_predictions() {
        let y = [10.0, 12.0, 15.0];
        let m = RegressionMetrics::compute(&y, &y).unwrap();
        assert_eq!(m.mse, 0.0);
        assert_eq!(m.r2, 1.0);
    }

    #[test]
    fn test_constant_truth() {
        let m = RegressionMetrics::compute(&[5.0, 5.0], &[4.0, 6.0]).unwrap();
        assert_eq!(m.r2, 0.0);
    }

    #[test]
    fn test_length_mismatch() {
        assert!(RegressionMetrics::compute(&[1.0, 2.0], &[1.0]).is_err());
        assert!(RegressionMetrics::compute(&[], &[]).is_err());
    }

    #[test]
    fn test_logger_appends_rows() {
        let dir = tempfile::tempdir().unwrap();
        let logger = MetricsLogger::new(dir.path()).unwrap();
        logger.log(&EpochMetrics::new(1, 4.5)).unwrap();
        logger.log(&EpochMetrics::new(2, 3.25)).unwrap();

        let text = fs::read_to_string(logger.csv_path()).unwrap();
        assert_eq!(text, "epoch,train_loss\n1,4.500000\n2,3.250000\n");
    }
}
