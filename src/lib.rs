pub mod builtin;
pub mod engine;
pub mod matrix;
pub mod regfile;
pub mod simulator;
pub mod top;

pub use simulator::sim::mode::{SimConfig, StepMode};
pub use simulator::utils::log;
pub use top::MatrixAccel;
