use burn::{
    nn::{
        loss::{MseLoss, Reduction},
        Linear, LinearConfig,
    },
    prelude::*,
    tensor::activation::relu,
};

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize
// internally — do NOT add them again or you get conflicting impls.
#[derive(Config, Debug)]
pub struct GradeRegressorConfig {
    pub n_features: usize,
    #[config(default = 16)]
    pub hidden_size: usize,
}

impl GradeRegressorConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> GradeRegressor<B> {
        let hidden = LinearConfig::new(self.n_features, self.hidden_size).init(device);
        let output = LinearConfig::new(self.hidden_size, 1).init(device);
        GradeRegressor { hidden, output }
    }
}

/// One hidden ReLU layer and a scalar output.
#[derive(Module, Debug)]
pub struct GradeRegressor<B: Backend> {
    pub hidden: Linear<B>,
    pub output: Linear<B>,
}

impl<B: Backend> GradeRegressor<B> {
    /// features: [batch, n_features] → predictions: [batch, 1]
    pub fn forward(&self, features: Tensor<B, 2>) -> Tensor<B, 2> {
        let x = relu(self.hidden.forward(features));
        self.output.forward(x)
    }

    /// Mean squared error against targets shaped [batch, 1]
    pub fn forward_loss(&self, features: Tensor<B, 2>, targets: Tensor<B, 2>) -> Tensor<B, 1> {
        let predictions = self.forward(features);
        MseLoss::new().forward(predictions, targets, Reduction::Mean)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::{ndarray::NdArrayDevice, NdArray};
    use burn::tensor::TensorData;

    #[test]
    fn test_forward_shape() {
        let device = NdArrayDevice::default();
        let model: GradeRegressor<NdArray> = GradeRegressorConfig::new(3)
            .with_hidden_size(4)
            .init(&device);

        let x = Tensor::<NdArray, 2>::from_data(
            TensorData::new(vec![0.0f32; 15], [5, 3]),
            &device,
        );
        assert_eq!(model.forward(x).dims(), [5, 1]);
    }
}
