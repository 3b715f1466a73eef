use crate::layers::Dense;
use crate::math::Matrix;

const DECAY: f64 = 0.9;
const EPSILON: f64 = 1e-10;

/// RMSProp with momentum:
///
///   ms = decay * ms + (1 - decay) * grad^2
///   m  = beta * m + lr * grad / sqrt(ms + eps)
///   theta -= m
///
/// Mean-square and momentum buffers are kept per layer, starting at zero.
#[derive(Debug)]
pub struct RmsProp {
    pub learning_rate: f64,
    pub momentum: f64,
    mean_square: Vec<(Matrix, Matrix)>,
    moment: Vec<(Matrix, Matrix)>,
}

impl RmsProp {
    pub fn new(learning_rate: f64, momentum: f64, layers: &[Dense]) -> RmsProp {
        let shape = |l: &Dense| (Matrix::zeros(l.input_size, l.size), Matrix::zeros(1, l.size));
        RmsProp {
            learning_rate,
            momentum,
            mean_square: layers.iter().map(shape).collect(),
            moment: layers.iter().map(shape).collect(),
        }
    }

    /// Applies one update to the layer occupying `slot` in the stack.
    pub fn step(&mut self, slot: usize, layer: &mut Dense, weights_grad: &Matrix, biases_grad: &Matrix) {
        let (ms_w, ms_b) = &mut self.mean_square[slot];
        let (m_w, m_b) = &mut self.moment[slot];
        accumulate(ms_w, m_w, weights_grad, self.learning_rate, self.momentum);
        accumulate(ms_b, m_b, biases_grad, self.learning_rate, self.momentum);
        layer.apply_step(m_w, m_b);
    }
}

fn accumulate(mean_square: &mut Matrix, moment: &mut Matrix, grad: &Matrix, lr: f64, momentum: f64) {
    for ((s, m), g) in mean_square.iter_mut().zip(moment.iter_mut()).zip(grad.iter()) {
        *s = DECAY * *s + (1.0 - DECAY) * g * g;
        *m = momentum * *m + lr * g / (*s + EPSILON).sqrt();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::Activation;
    use approx::assert_relative_eq;

    #[test]
    fn first_step_normalizes_by_root_mean_square() {
        let mut layer = Dense::new(1, 1, Activation::Tanh);
        layer.weights = Matrix::from_rows(vec![vec![0.0]]);
        layer.biases = Matrix::from_rows(vec![vec![0.0]]);

        let mut opt = RmsProp::new(0.01, 0.9, std::slice::from_ref(&layer));
        let g = Matrix::from_rows(vec![vec![2.0]]);
        let zero = Matrix::zeros(1, 1);
        opt.step(0, &mut layer, &g, &zero);

        // ms = 0.1 * 4 = 0.4; m = 0.01 * 2 / sqrt(0.4)
        let expected = 0.01 * 2.0 / 0.4f64.sqrt();
        assert_relative_eq!(layer.weights[(0, 0)], -expected, epsilon = 1e-9);
    }

    #[test]
    fn update_direction_follows_gradient_sign() {
        let mut layer = Dense::new(1, 1, Activation::Tanh);
        layer.weights = Matrix::from_rows(vec![vec![1.0]]);
        layer.biases = Matrix::from_rows(vec![vec![1.0]]);

        let mut opt = RmsProp::new(0.01, 0.9, std::slice::from_ref(&layer));
        let wg = Matrix::from_rows(vec![vec![3.0]]);
        let bg = Matrix::from_rows(vec![vec![-3.0]]);
        opt.step(0, &mut layer, &wg, &bg);

        assert!(layer.weights[(0, 0)] < 1.0);
        assert!(layer.biases[(0, 0)] > 1.0);
    }
}
