// ============================================================
// Layer 6 — Reports
// ============================================================
// predictions.csv holds one `actual,predicted` pair per
// holdout row, ready for an actual-vs-predicted scatter plot.
// evaluation.json keeps the headline numbers of a run.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::domain::dataset::Dataset;
use crate::infra::metrics::RegressionMetrics;

/// Summary of one train + evaluate run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub target:     String,
    pub n_training: usize,
    pub n_holdout:  usize,
    pub metrics:    RegressionMetrics,
}

/// The console block printed after training.
pub fn format_metrics(m: &RegressionMetrics) -> String {
    format!(
        "Performance Metrics:\n\
         Mean Absolute Error (MAE): {:.4}\n\
         Mean Squared Error (MSE): {:.4}\n\
         Root Mean Squared Error (RMSE): {:.4}\n\
         R-squared (R²): {:.4}",
        m.mae, m.mse, m.rmse, m.r2
    )
}

pub fn write_predictions(path: &Path, actual: &[f32], predicted: &[f32]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Cannot create '{}'", path.display()))?;

    writer.write_record(["actual", "predicted"])?;
    for (a, p) in actual.iter().zip(predicted) {
        writer.write_record([a.to_string(), format!("{p:.4}")])?;
    }
    writer.flush()?;

    tracing::debug!("Wrote {} predictions to '{}'", actual.len(), path.display());
    Ok(())
}

pub fn write_evaluation(path: &Path, report: &EvaluationReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    fs::write(path, json).with_context(|| format!("Cannot write '{}'", path.display()))
}

/// Write a Dataset back out as delimited text, header first.
pub fn write_dataset(path: &Path, dataset: &Dataset, delimiter: u8) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_path(path)
        .with_context(|| format!("Cannot create '{}'", path.display()))?;

    writer.write_record(dataset.fields())?;
    for record in dataset.records() {
        writer.write_record(record.values().iter().map(|v| v.to_string()))?;
    }
    writer.flush()?;

    tracing::info!("Wrote {} rows to '{}'", dataset.len(), path.display());
    Ok(())
}
