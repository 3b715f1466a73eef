use serde::{Serialize, Deserialize};

use crate::layers::Dense;
use crate::math::Matrix;

/// An ordered stack of fully-connected layers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Network {
    pub layers: Vec<Dense>,
}

impl Network {
    /// Forward pass over a batch; each layer caches what backprop needs.
    pub fn forward(&mut self, input: &Matrix) -> Matrix {
        let mut current = input.clone();
        for layer in &mut self.layers {
            current = layer.forward(&current);
        }
        current
    }

    /// Total number of trainable scalars across all layers.
    pub fn parameter_count(&self) -> usize {
        self.layers.iter().map(Dense::parameter_count).sum()
    }
}
