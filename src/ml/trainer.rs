// ============================================================
// Layer 5 — Training Loop
// ============================================================
// Fits GradeRegressor on the training split with Adam and an
// MSE loss, on burn's CPU backend.
//
//   - Training runs on Autodiff<NdArray> for gradients
//   - model.valid() strips autodiff for the fitted predictor
//   - Mini-batch order is reshuffled every epoch from a StdRng
//     seeded with the configured seed
//
// Reference: Burn Book §5, Kingma & Ba (2015) Adam

use anyhow::{ensure, Result};
use burn::{
    backend::{ndarray::NdArrayDevice, Autodiff, NdArray},
    module::AutodiffModule,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
    tensor::{ElementConversion, TensorData},
};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::domain::features::{FeatureMatrix, TargetVector};
use crate::domain::traits::Regressor;
use crate::infra::metrics::{EpochMetrics, MetricsLogger};
use crate::ml::inferencer::FittedRegressor;
use crate::ml::model::{GradeRegressor, GradeRegressorConfig};
use crate::ml::scaler::Standardizer;

pub type TrainBackend = Autodiff<NdArray>;

/// Hyperparameters of the fixed regressor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainerConfig {
    pub epochs:        usize,
    pub batch_size:    usize,
    pub learning_rate: f64,
    pub hidden_size:   usize,
    pub seed:          u64,
}

impl TrainerConfig {
    /// Reject settings that would fail or never converge once
    /// training has started.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.epochs > 0, "epochs must be positive");
        ensure!(self.batch_size > 0, "batch size must be positive");
        ensure!(self.hidden_size > 0, "hidden size must be positive");
        ensure!(
            self.learning_rate.is_finite() && self.learning_rate > 0.0,
            "learning rate must be a positive number, got {}",
            self.learning_rate
        );
        Ok(())
    }
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            epochs:        200,
            batch_size:    32,
            learning_rate: 1e-2,
            hidden_size:   16,
            seed:          42,
        }
    }
}

/// Implements Regressor with a small burn network.
pub struct MlpRegressor {
    config:  TrainerConfig,
    metrics: Option<MetricsLogger>,
}

impl MlpRegressor {
    pub fn new(config: TrainerConfig) -> Self {
        Self { config, metrics: None }
    }

    /// Append per-epoch losses to this logger's CSV
    pub fn with_metrics_logger(mut self, logger: MetricsLogger) -> Self {
        self.metrics = Some(logger);
        self
    }
}

impl Regressor for MlpRegressor {
    type Fitted = FittedRegressor;

    fn fit(&self, features: &FeatureMatrix, target: &TargetVector) -> Result<FittedRegressor> {
        let cfg = &self.config;
        ensure!(!features.is_empty(), "cannot fit on an empty feature matrix");
        ensure!(features.cols() > 0, "no feature columns to fit on");
        ensure!(
            features.rows() == target.len(),
            "feature rows ({}) and target values ({}) differ",
            features.rows(),
            target.len()
        );
        cfg.validate()?;

        let device = NdArrayDevice::default();
        let n_rows = features.rows();
        let n_cols = features.cols();

        // ── Scale inputs with training-set statistics ─────────────────────────
        let scaler = Standardizer::fit(features);
        let x = scaler.transform(features);
        let y = target.values();

        // ── Build model + Adam ────────────────────────────────────────────────
        let mut model: GradeRegressor<TrainBackend> = GradeRegressorConfig::new(n_cols)
            .with_hidden_size(cfg.hidden_size)
            .init(&device);
        let mut optim = AdamConfig::new().with_epsilon(1e-8).init();

        tracing::info!(
            "Training regressor: {} rows, {} features, hidden={}, epochs={}",
            n_rows, n_cols, cfg.hidden_size, cfg.epochs
        );

        let mut rng   = StdRng::seed_from_u64(cfg.seed);
        let mut order: Vec<usize> = (0..n_rows).collect();
        let mut best  = f64::INFINITY;

        // ── Epoch loop ────────────────────────────────────────────────────────
        for epoch in 1..=cfg.epochs {
            order.shuffle(&mut rng);

            let mut loss_sum = 0.0f64;
            let mut batches  = 0usize;

            for chunk in order.chunks(cfg.batch_size) {
                let (bx, by) = gather_batch(&x, y, n_cols, chunk);

                let bx = Tensor::<TrainBackend, 2>::from_data(
                    TensorData::new(bx, [chunk.len(), n_cols]),
                    &device,
                );
                let by = Tensor::<TrainBackend, 2>::from_data(
                    TensorData::new(by, [chunk.len(), 1]),
                    &device,
                );

                let loss = model.forward_loss(bx, by);
                loss_sum += loss.clone().into_scalar().elem::<f64>();
                batches  += 1;

                let grads = loss.backward();
                let grads = GradientsParams::from_grads(grads, &model);
                model = optim.step(cfg.learning_rate, model, grads);
            }

            let m = EpochMetrics::new(epoch, loss_sum / batches.max(1) as f64);
            if m.is_improvement(best) {
                best = m.train_loss;
            }
            if epoch == 1 || epoch % 25 == 0 || epoch == cfg.epochs {
                tracing::info!("Epoch {:>4}/{} | train_mse={:.4}", epoch, cfg.epochs, m.train_loss);
            } else {
                tracing::debug!("Epoch {:>4}/{} | train_mse={:.4}", epoch, cfg.epochs, m.train_loss);
            }
            if let Some(logger) = &self.metrics {
                logger.log(&m)?;
            }
        }

        tracing::info!("Training complete (best epoch mse={:.4})", best);

        Ok(FittedRegressor::new(
            model.valid(),
            scaler,
            features.names().to_vec(),
            cfg.hidden_size,
        ))
    }
}

/// Copy the rows named by `indices` out of row-major `x` and `y`.
fn gather_batch(x: &[f32], y: &[f32], cols: usize, indices: &[usize]) -> (Vec<f32>, Vec<f32>) {
    let mut bx = Vec::with_capacity(indices.len() * cols);
    let mut by = Vec::with_capacity(indices.len());
    for &i in indices {
        bx.extend_from_slice(&x[i * cols..(i + 1) * cols]);
        by.push(y[i]);
    }
    (bx, by)
}
