use serde::{Serialize, Deserialize};

use crate::activation::Activation;
use crate::math::Matrix;

/// A fully-connected layer holding its weights, biases and activation.
///
/// The forward pass caches the batch input and the pre-activation values
/// (z = xW + b); both are needed to compute gradients and are not part of
/// the serialized layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dense {
    pub input_size: usize,
    pub size: usize,
    /// Weight matrix, shape [input_size, size].
    pub weights: Matrix,
    /// Bias row, shape [1, size].
    pub biases: Matrix,
    pub activation: Activation,
    #[serde(skip)]
    inputs: Matrix,
    #[serde(skip)]
    pre_activation: Matrix,
}

impl Dense {
    /// Creates a layer with freshly initialized parameters: He weights
    /// before ReLU, Xavier otherwise, zero biases.
    pub fn new(size: usize, input_size: usize, activation: Activation) -> Dense {
        let weights = match activation {
            Activation::Relu => Matrix::he(input_size, size),
            _ => Matrix::xavier(input_size, size),
        };
        Dense {
            input_size,
            size,
            weights,
            biases: Matrix::zeros(1, size),
            activation,
            inputs: Matrix::default(),
            pre_activation: Matrix::default(),
        }
    }

    /// Forward pass over a batch, shape [batch, input_size] -> [batch, size].
    pub fn forward(&mut self, input: &Matrix) -> Matrix {
        let z = (input * &self.weights).add_row(&self.biases);
        let a = z.map(|x| self.activation.function(x));
        self.inputs = input.clone();
        self.pre_activation = z;
        a
    }

    /// Backward pass for the most recent `forward` call.
    ///
    /// `delta` is dL/da for this layer's activations, shape [batch, size].
    /// Returns (weights_grad, biases_grad, delta_prev) where `delta_prev`
    /// is dL/da of the previous layer, shape [batch, input_size].
    pub fn compute_gradients(&self, delta: &Matrix) -> (Matrix, Matrix, Matrix) {
        // dz = dL/da * act'(z), element-wise over the batch
        let act_derivative = self.pre_activation.map(|x| self.activation.derivative(x));
        let dz = delta.hadamard(&act_derivative);

        let weights_grad = &self.inputs.transpose() * &dz;
        let biases_grad = dz.sum_rows();
        let delta_prev = &dz * &self.weights.transpose();

        (weights_grad, biases_grad, delta_prev)
    }

    /// Applies a descent step: parameters move by minus the given steps.
    pub fn apply_step(&mut self, weight_step: &Matrix, bias_step: &Matrix) {
        self.weights = &self.weights - weight_step;
        self.biases = &self.biases - bias_step;
    }

    /// Number of trainable scalars (weights plus biases).
    pub fn parameter_count(&self) -> usize {
        self.input_size * self.size + self.size
    }
}
