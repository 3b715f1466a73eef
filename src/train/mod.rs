pub mod step_counter;
pub mod trainer;

pub use step_counter::StepCounter;
pub use trainer::{train_step, StepOutput};
