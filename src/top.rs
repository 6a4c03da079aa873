/// Top Module - the peripheral as seen from the host bus
use crate::builtin::{Module, Wire};
use crate::engine::{Engine, State};
use crate::regfile::{ReadReq, RegFile, WriteReq};

/// MatrixAccel - register file and compute engine on one clock
///
/// Host accesses land between clock edges: reads observe the state committed
/// by the previous edge, writes are visible to the next edge.
pub struct MatrixAccel {
  name: String,

  // host-addressable registers
  pub regs: RegFile,

  // FSM + MAC datapath
  pub engine: Engine,

  cycle: u64,
}

impl MatrixAccel {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      regs: RegFile::new(),
      engine: Engine::new(),
      cycle: 0,
    }
  }

  /// Selected bus write.
  pub fn write_word(&mut self, addr: u8, value: i32) {
    self.regs.write_word(addr, value);
  }

  /// Selected bus read.
  pub fn read_word(&self, addr: u8) -> i32 {
    self.regs.read_word(addr)
  }

  /// Bus write gated by the request strobe.
  pub fn bus_write(&mut self, req: &Wire<WriteReq>) {
    self.regs.write(req);
  }

  /// Bus read gated by the request strobe.
  pub fn bus_read(&self, req: &Wire<ReadReq>) -> u32 {
    self.regs.read(req)
  }

  /// Advance one clock edge.
  pub fn tick(&mut self) {
    self.run();
  }

  pub fn state(&self) -> State {
    self.engine.state()
  }

  /// Contraction step counter `k`.
  pub fn step(&self) -> usize {
    self.engine.state().step()
  }

  /// Clock edges since reset.
  pub fn cycles(&self) -> u64 {
    self.cycle
  }
}

impl Default for MatrixAccel {
  fn default() -> Self {
    Self::new("matrix_accel")
  }
}

impl Module for MatrixAccel {
  fn run(&mut self) {
    // 1. evaluate against the pre-edge snapshot
    let next = self.engine.evaluate(&self.regs);

    // 2. commit engine registers and register-file write-back together
    self.engine.commit(next, &mut self.regs);

    self.cycle += 1;
  }

  fn reset(&mut self) {
    self.regs.reset();
    self.engine.reset();
    self.cycle = 0;
  }

  fn name(&self) -> &str {
    &self.name
  }
}
