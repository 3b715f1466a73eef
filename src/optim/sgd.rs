use crate::layers::Dense;
use crate::math::Matrix;

/// Plain stochastic gradient descent: theta -= lr * grad.
#[derive(Debug)]
pub struct Sgd {
    pub learning_rate: f64,
}

impl Sgd {
    pub fn new(learning_rate: f64) -> Sgd {
        Sgd { learning_rate }
    }

    /// Applies one update to a layer given its pre-computed gradients.
    pub fn step(&self, layer: &mut Dense, weights_grad: &Matrix, biases_grad: &Matrix) {
        let lr = self.learning_rate;
        layer.apply_step(
            &weights_grad.map(|g| lr * g),
            &biases_grad.map(|g| lr * g),
        );
    }
}
