use crate::layers::Dense;
use crate::math::Matrix;

/// Momentum update: v = beta * v - lr * grad, theta += v.
///
/// One velocity buffer pair (weights, biases) is kept per layer; all
/// buffers start at zero.
#[derive(Debug)]
pub struct Momentum {
    pub learning_rate: f64,
    pub momentum: f64,
    velocity: Vec<(Matrix, Matrix)>,
}

impl Momentum {
    pub fn new(learning_rate: f64, momentum: f64, layers: &[Dense]) -> Momentum {
        let velocity = layers
            .iter()
            .map(|l| (Matrix::zeros(l.input_size, l.size), Matrix::zeros(1, l.size)))
            .collect();
        Momentum {
            learning_rate,
            momentum,
            velocity,
        }
    }

    /// Applies one update to the layer occupying `slot` in the stack.
    pub fn step(&mut self, slot: usize, layer: &mut Dense, weights_grad: &Matrix, biases_grad: &Matrix) {
        let (vw, vb) = &mut self.velocity[slot];
        accumulate(vw, weights_grad, self.learning_rate, self.momentum);
        accumulate(vb, biases_grad, self.learning_rate, self.momentum);
        // theta += v, expressed as a descent step of -v
        layer.apply_step(&vw.map(|v| -v), &vb.map(|v| -v));
    }
}

fn accumulate(velocity: &mut Matrix, grad: &Matrix, lr: f64, momentum: f64) {
    for (v, g) in velocity.iter_mut().zip(grad.iter()) {
        *v = momentum * *v - lr * g;
    }
}
