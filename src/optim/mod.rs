pub mod momentum;
pub mod rmsprop;
pub mod sgd;

pub use momentum::Momentum;
pub use rmsprop::RmsProp;
pub use sgd::Sgd;

use serde::{Serialize, Deserialize};

use crate::layers::Dense;
use crate::math::Matrix;

/// Fixed momentum coefficient used by the momentum and rmsprop rules.
const MOMENTUM_COEFFICIENT: f64 = 0.9;

/// The closed set of optimizers a model config may name.
///
/// Deserializing any other name fails, so an unsupported optimizer is a
/// configuration error raised at decode time, before a model exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizerKind {
    GradientDescent,
    Momentum,
    Rmsprop,
}

impl OptimizerKind {
    /// Instantiates the optimizer with state buffers sized for `layers`.
    pub fn build(self, learning_rate: f64, layers: &[Dense]) -> Optimizer {
        match self {
            OptimizerKind::GradientDescent => Optimizer::GradientDescent(Sgd::new(learning_rate)),
            OptimizerKind::Momentum => {
                Optimizer::Momentum(Momentum::new(learning_rate, MOMENTUM_COEFFICIENT, layers))
            }
            OptimizerKind::Rmsprop => {
                Optimizer::Rmsprop(RmsProp::new(learning_rate, MOMENTUM_COEFFICIENT, layers))
            }
        }
    }
}

/// A configured optimization rule, ready to apply per-layer updates.
#[derive(Debug)]
pub enum Optimizer {
    GradientDescent(Sgd),
    Momentum(Momentum),
    Rmsprop(RmsProp),
}

impl Optimizer {
    /// Applies one update to the layer occupying `slot` in the stack.
    pub fn step(&mut self, slot: usize, layer: &mut Dense, weights_grad: &Matrix, biases_grad: &Matrix) {
        match self {
            Optimizer::GradientDescent(sgd) => sgd.step(layer, weights_grad, biases_grad),
            Optimizer::Momentum(momentum) => momentum.step(slot, layer, weights_grad, biases_grad),
            Optimizer::Rmsprop(rmsprop) => rmsprop.step(slot, layer, weights_grad, biases_grad),
        }
    }
}

/// Clamps every gradient component to [-clip, clip]. A clip bound of zero
/// or below passes the gradient through unmodified.
pub fn clip_gradient(grad: Matrix, clip: f64) -> Matrix {
    if clip > 0.0 {
        grad.map(|g| g.clamp(-clip, clip))
    } else {
        grad
    }
}
