// ============================================================
// Layer 5 — Inferencer
// ============================================================
use anyhow::{anyhow, ensure, Result};
use burn::{
    backend::{ndarray::NdArrayDevice, NdArray},
    prelude::*,
    tensor::TensorData,
};
use serde::{Deserialize, Serialize};

use crate::domain::features::FeatureMatrix;
use crate::domain::traits::Predictor;
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::model::{GradeRegressor, GradeRegressorConfig};
use crate::ml::scaler::Standardizer;

pub type InferBackend = NdArray;

/// Everything besides the weights needed to rebuild a fitted model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMeta {
    pub feature_names: Vec<String>,
    pub hidden_size:   usize,
    pub scaler:        Standardizer,
}

pub struct FittedRegressor {
    model:  GradeRegressor<InferBackend>,
    meta:   ModelMeta,
    device: NdArrayDevice,
}

impl FittedRegressor {
    pub fn new(
        model:         GradeRegressor<InferBackend>,
        scaler:        Standardizer,
        feature_names: Vec<String>,
        hidden_size:   usize,
    ) -> Self {
        Self {
            model,
            meta: ModelMeta { feature_names, hidden_size, scaler },
            device: NdArrayDevice::default(),
        }
    }

    /// Rebuild the architecture from model_meta.json, then load weights.
    pub fn from_checkpoint(ckpt_manager: &CheckpointManager) -> Result<Self> {
        let device = NdArrayDevice::default();
        let meta   = ckpt_manager.load_meta()?;

        let model: GradeRegressor<InferBackend> =
            GradeRegressorConfig::new(meta.feature_names.len())
                .with_hidden_size(meta.hidden_size)
                .init(&device);
        let model = ckpt_manager.load_model(model, &device)?;

        tracing::info!("Model loaded ({} features)", meta.feature_names.len());
        Ok(Self { model, meta, device })
    }

    pub fn model(&self) -> &GradeRegressor<InferBackend> {
        &self.model
    }

    pub fn meta(&self) -> &ModelMeta {
        &self.meta
    }

    pub fn feature_names(&self) -> &[String] {
        &self.meta.feature_names
    }
}

impl Predictor for FittedRegressor {
    fn predict(&self, features: &FeatureMatrix) -> Result<Vec<f32>> {
        ensure!(
            features.names() == self.meta.feature_names.as_slice(),
            "feature columns {:?} do not match the model's {:?}",
            features.names(),
            self.meta.feature_names
        );
        if features.is_empty() {
            return Ok(Vec::new());
        }

        let x = self.meta.scaler.transform(features);
        let input = Tensor::<InferBackend, 2>::from_data(
            TensorData::new(x, [features.rows(), features.cols()]),
            &self.device,
        );

        self.model
            .forward(input)
            .into_data()
            .to_vec::<f32>()
            .map_err(|e| anyhow!("cannot read predictions back from tensor: {e:?}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn untrained(names: &[&str]) -> FittedRegressor {
        let device = NdArrayDevice::default();
        let model = GradeRegressorConfig::new(names.len()).with_hidden_size(4).init(&device);
        FittedRegressor::new(
            model,
            Standardizer { mean: vec![0.0; names.len()], std: vec![1.0; names.len()] },
            names.iter().map(|s| s.to_string()).collect(),
            4,
        )
    }

    #[test]
    fn test_one_prediction_per_row() {
        let fitted = untrained(&["G1", "G2"]);
        let x = FeatureMatrix::from_rows(
            vec!["G1".into(), "G2".into()],
            &[vec![10.0, 11.0], vec![12.0, 13.0], vec![5.0, 5.0]],
        );
        assert_eq!(fitted.predict(&x).unwrap().len(), 3);
    }

    #[test]
    fn test_rejects_reordered_columns() {
        let fitted = untrained(&["G1", "G2"]);
        let x = FeatureMatrix::from_rows(vec!["G2".into(), "G1".into()], &[vec![1.0, 2.0]]);
        assert!(fitted.predict(&x).is_err());
    }
}
