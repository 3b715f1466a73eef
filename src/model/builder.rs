use crate::activation::Activation;
use crate::config::ModelConfig;
use crate::error::{Result, XornetError};
use crate::layers::Dense;
use crate::math::Matrix;
use crate::model::network::Network;
use crate::optim::Optimizer;

/// Number of input features; XOR takes two.
pub const INPUT_WIDTH: usize = 2;

/// The output layer is always a single sigmoid unit.
pub const OUTPUT_WIDTH: usize = 1;

/// A built model: the layer stack plus, when training was requested, a
/// configured optimizer and the clip bound to apply to its gradients.
///
/// Each `build` call returns a fresh, self-contained value; nothing is
/// registered in any shared state, so repeated builds cannot collide.
#[derive(Debug)]
pub struct Model {
    pub network: Network,
    pub optimizer: Option<Optimizer>,
    pub gradient_clipping: f64,
}

impl Model {
    /// Constructs the network described by `config` and, if `trainable`,
    /// the optimizer it names.
    ///
    /// The hidden stack has one layer per `fc` entry, each followed by the
    /// configured non-linearity; a 1-wide sigmoid output layer is appended
    /// implicitly. Value checks the config loader leaves to us happen
    /// here: `fc` must be non-empty with positive widths, and the learning
    /// rate must be positive.
    pub fn build(config: &ModelConfig, trainable: bool) -> Result<Model> {
        if config.fc.is_empty() {
            return Err(XornetError::EmptyHiddenLayers);
        }
        if let Some(index) = config.fc.iter().position(|&w| w == 0) {
            return Err(XornetError::ZeroLayerWidth { index });
        }
        if !(config.learning_rate > 0.0) {
            return Err(XornetError::InvalidLearningRate(config.learning_rate));
        }

        let activation = config.fc_nonlinearity.activation();
        let mut layers = Vec::with_capacity(config.fc.len() + 1);
        let mut input_size = INPUT_WIDTH;
        for &width in &config.fc {
            layers.push(Dense::new(width, input_size, activation));
            input_size = width;
        }
        layers.push(Dense::new(OUTPUT_WIDTH, input_size, Activation::Sigmoid));

        let network = Network { layers };
        let optimizer = if trainable {
            Some(config.optimizer.build(config.learning_rate, &network.layers))
        } else {
            None
        };

        Ok(Model {
            network,
            optimizer,
            gradient_clipping: config.gradient_clipping,
        })
    }

    /// Runs the network on a [batch, 2] input and returns the [batch, 1]
    /// prediction, a probability in [0, 1] per sample.
    pub fn predict(&mut self, inputs: &Matrix) -> Matrix {
        self.network.forward(inputs)
    }
}
