use thiserror::Error;

#[derive(Debug, Error)]
pub enum XornetError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("model config: `fc` must name at least one hidden layer")]
    EmptyHiddenLayers,

    #[error("model config: hidden layer {index} has width 0")]
    ZeroLayerWidth { index: usize },

    #[error("model config: learning rate must be positive, got {0}")]
    InvalidLearningRate(f64),

    #[error("model was built without an optimizer; training is unavailable")]
    NotTrainable,

    #[error("export requires at least one tag")]
    EmptyTags,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, XornetError>;
