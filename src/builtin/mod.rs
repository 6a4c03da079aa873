//! Building blocks shared by every clocked module
pub mod port;

pub use port::Wire;

/// A synchronous hardware module.
///
/// `run` advances the module by exactly one clock edge; `reset` returns it to
/// its power-on state.
pub trait Module {
  fn run(&mut self);
  fn reset(&mut self);
  fn name(&self) -> &str;
}
