use crate::top::MatrixAccel;

/// Word-addressed register bus with a free-running clock.
///
/// The seam between the host driver and whatever serves the registers: the
/// functional model, or a traced wrapper around it.
pub trait RegisterBus {
  fn write_word(&mut self, addr: u8, value: i32);
  fn read_word(&mut self, addr: u8) -> i32;
  fn tick(&mut self);
  fn cycles(&self) -> u64;
}

impl RegisterBus for MatrixAccel {
  fn write_word(&mut self, addr: u8, value: i32) {
    MatrixAccel::write_word(self, addr, value);
  }

  fn read_word(&mut self, addr: u8) -> i32 {
    MatrixAccel::read_word(self, addr)
  }

  fn tick(&mut self) {
    MatrixAccel::tick(self);
  }

  fn cycles(&self) -> u64 {
    MatrixAccel::cycles(self)
  }
}
