//! Host side of the register protocol: the driver program, the pure-software
//! baseline it is checked against, and the comparison of the two.
pub mod benchmark;
pub mod bus;
pub mod driver;
pub mod software;

pub use benchmark::{Benchmark, Mismatch};
pub use bus::RegisterBus;
pub use driver::{HostDriver, HwRun, Operands, Results, SAFE_INPUT_MAX};
