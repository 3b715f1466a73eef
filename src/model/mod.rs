pub mod builder;
pub mod network;

pub use builder::{Model, INPUT_WIDTH, OUTPUT_WIDTH};
pub use network::Network;
