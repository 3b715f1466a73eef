use crate::error::{Result, XornetError};
use crate::loss::MseLoss;
use crate::math::Matrix;
use crate::model::Model;
use crate::optim::clip_gradient;
use crate::train::step_counter::StepCounter;

/// What one training step reports back: the post-increment step number,
/// the batch loss, and the batch predictions.
#[derive(Debug, Clone)]
pub struct StepOutput {
    pub step: i64,
    pub loss: f64,
    pub pred: Matrix,
}

/// Runs one optimization step over a batch: forward pass, loss, backward
/// pass, gradient clipping, optimizer update, step-counter increment.
///
/// `inputs` is [batch, 2], `labels` is [batch, 1]. Fails with
/// `NotTrainable` if the model was built without an optimizer.
pub fn train_step(
    model: &mut Model,
    counter: &StepCounter,
    inputs: &Matrix,
    labels: &Matrix,
) -> Result<StepOutput> {
    let Model {
        network,
        optimizer,
        gradient_clipping,
    } = model;
    let optimizer = optimizer.as_mut().ok_or(XornetError::NotTrainable)?;
    let clip = *gradient_clipping;

    let pred = network.forward(inputs);
    let loss = MseLoss::loss(&pred, labels);

    // Backward pass. Each layer's delta is computed from pre-update
    // weights before that layer's step is applied.
    let mut delta = MseLoss::derivative(&pred, labels);
    for slot in (0..network.layers.len()).rev() {
        let (w_grad, b_grad, delta_prev) = network.layers[slot].compute_gradients(&delta);
        let w_grad = clip_gradient(w_grad, clip);
        let b_grad = clip_gradient(b_grad, clip);
        optimizer.step(slot, &mut network.layers[slot], &w_grad, &b_grad);
        delta = delta_prev;
    }

    Ok(StepOutput {
        step: counter.increment(),
        loss,
        pred,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activation::Nonlinearity;
    use crate::config::ModelConfig;
    use crate::data::xor;
    use crate::optim::OptimizerKind;

    fn trainable_config(clip: f64, learning_rate: f64) -> ModelConfig {
        ModelConfig {
            fc: vec![2],
            fc_nonlinearity: Nonlinearity::Tanh,
            learning_rate,
            optimizer: OptimizerKind::GradientDescent,
            gradient_clipping: clip,
        }
    }

    fn parameters(model: &Model) -> Vec<f64> {
        let mut out = Vec::new();
        for layer in &model.network.layers {
            out.extend(layer.weights.iter().copied());
            out.extend(layer.biases.iter().copied());
        }
        out
    }

    #[test]
    fn untrainable_model_refuses_to_step() {
        let mut model = Model::build(&trainable_config(0.0, 0.1), false).unwrap();
        let counter = StepCounter::new();
        let (inputs, labels) = xor::truth_table();
        let err = train_step(&mut model, &counter, &inputs, &labels).unwrap_err();
        assert!(matches!(err, XornetError::NotTrainable));
        assert_eq!(counter.read(), 0);
    }

    #[test]
    fn steps_are_numbered_from_one() {
        let mut model = Model::build(&trainable_config(0.0, 0.1), true).unwrap();
        let counter = StepCounter::new();
        let (inputs, labels) = xor::truth_table();
        let first = train_step(&mut model, &counter, &inputs, &labels).unwrap();
        let second = train_step(&mut model, &counter, &inputs, &labels).unwrap();
        assert_eq!(first.step, 1);
        assert_eq!(second.step, 2);
        assert_eq!((first.pred.rows, first.pred.cols), (4, 1));
    }

    #[test]
    fn loss_decreases_under_full_batch_training() {
        let mut model = Model::build(&trainable_config(0.0, 0.5), true).unwrap();
        let counter = StepCounter::new();
        let (inputs, labels) = xor::truth_table();
        let initial = train_step(&mut model, &counter, &inputs, &labels).unwrap().loss;
        let mut last = initial;
        for _ in 0..2000 {
            last = train_step(&mut model, &counter, &inputs, &labels).unwrap().loss;
        }
        assert!(last.is_finite());
        assert!(last < initial, "loss did not decrease: {initial} -> {last}");
    }

    // An adversarial label far outside [0, 1] makes the output-layer
    // gradients large; under gradient descent the parameter step equals
    // lr * gradient, which makes clipping directly observable.
    #[test]
    fn clipping_bounds_every_applied_gradient() {
        let mut model = Model::build(&trainable_config(0.5, 1.0), true).unwrap();
        let counter = StepCounter::new();
        let inputs = Matrix::from_rows(vec![vec![1.0, 0.0]]);
        let labels = Matrix::from_rows(vec![vec![-1000.0]]);

        let before = parameters(&model);
        train_step(&mut model, &counter, &inputs, &labels).unwrap();
        let after = parameters(&model);

        for (b, a) in before.iter().zip(after.iter()) {
            assert!((a - b).abs() <= 0.5 + 1e-9, "step {} exceeds clip", a - b);
        }
    }

    #[test]
    fn unclipped_gradients_can_exceed_the_clip_range() {
        let mut model = Model::build(&trainable_config(0.0, 1.0), true).unwrap();
        let counter = StepCounter::new();
        let inputs = Matrix::from_rows(vec![vec![1.0, 0.0]]);
        let labels = Matrix::from_rows(vec![vec![-1000.0]]);

        let before = parameters(&model);
        train_step(&mut model, &counter, &inputs, &labels).unwrap();
        let after = parameters(&model);

        let max_step = before
            .iter()
            .zip(after.iter())
            .map(|(b, a)| (a - b).abs())
            .fold(0.0_f64, f64::max);
        assert!(max_step > 0.5, "expected an unclamped step above 0.5, got {max_step}");
    }
}
