pub mod activation;
pub mod config;
pub mod data;
pub mod error;
pub mod export;
pub mod layers;
pub mod loss;
pub mod math;
pub mod model;
pub mod optim;
pub mod train;

// Convenience re-exports
pub use activation::{Activation, Nonlinearity};
pub use config::{Config, ModelConfig};
pub use error::{Result, XornetError};
pub use layers::Dense;
pub use loss::MseLoss;
pub use math::Matrix;
pub use model::{Model, Network};
pub use optim::{Optimizer, OptimizerKind};
pub use train::{train_step, StepCounter, StepOutput};
