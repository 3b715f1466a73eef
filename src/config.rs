use serde::{Serialize, Deserialize};
use std::path::PathBuf;

use crate::activation::Nonlinearity;
use crate::error::Result;
use crate::optim::OptimizerKind;

/// The `model` section of a configuration blob.
///
/// Fields:
/// - `fc`                - ordered hidden-layer widths; must be non-empty.
///   The 1-wide output layer is appended implicitly and is not configurable.
/// - `fc_nonlinearity`   - activation after each hidden layer
/// - `learning_rate`     - positive step size handed to the optimizer
/// - `optimizer`         - which update rule to build
/// - `gradient_clipping` - symmetric elementwise clip bound; zero or below
///   disables clipping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub fc: Vec<usize>,
    pub fc_nonlinearity: Nonlinearity,
    pub learning_rate: f64,
    pub optimizer: OptimizerKind,
    pub gradient_clipping: f64,
}

/// The full declarative configuration: model topology and training options,
/// plus where and how to export the trained artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub model: ModelConfig,
    pub export_dir: PathBuf,
    /// Ordered metadata tags stamped on the export artifact.
    pub tags: Vec<String>,
}

impl Config {
    /// Decodes a JSON-encoded configuration string.
    ///
    /// Decoding is the only work done here. Unknown non-linearity or
    /// optimizer names fail the decode itself; value checks (layer widths,
    /// learning rate, tags) belong to the components that consume them.
    pub fn from_json(text: &str) -> Result<Config> {
        Ok(serde_json::from_str(text)?)
    }
}
