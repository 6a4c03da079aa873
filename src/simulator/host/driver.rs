// Host driver: loads operands, starts the peripheral, polls, reads results

use super::bus::RegisterBus;
use crate::matrix::{Mat4, CELLS};
use crate::regfile::map::{
  cell_addr, A_OFFSET, B_OFFSET, CONTROL_ADDR, CONTROL_START, DIFF_OFFSET, PROD_OFFSET, STATUS_ADDR,
  STATUS_BUSY, STATUS_DONE, SUM_OFFSET,
};
use log::{debug, info};
use std::io;

/// Largest operand magnitude whose 4-term dot product always fits in 32 bits
/// (4 * 23170^2 < 2^31).
pub const SAFE_INPUT_MAX: i16 = 23170;

/// Two row-major 4x4 operand matrices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operands {
  pub a: Mat4<i16>,
  pub b: Mat4<i16>,
}

impl Operands {
  /// Cells whose magnitude exceeds [`SAFE_INPUT_MAX`], as `(matrix, index, value)`.
  pub fn unsafe_cells(&self) -> Vec<(char, usize, i16)> {
    let outside = |v: i16| v.unsigned_abs() > SAFE_INPUT_MAX as u16;
    let a = self.a.iter().enumerate().map(|(i, &v)| ('A', i, v));
    let b = self.b.iter().enumerate().map(|(i, &v)| ('B', i, v));
    a.chain(b).filter(|&(_, _, v)| outside(v)).collect()
  }
}

/// SUM, DIFF and PROD as read back from the peripheral (or computed in software)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Results {
  pub sum: Mat4<i32>,
  pub diff: Mat4<i32>,
  pub prod: Mat4<i32>,
}

/// Outcome of one driven hardware run
#[derive(Debug, Clone, Copy)]
pub struct HwRun {
  pub results: Results,
  /// Clock edges from the first operand write to the last result read
  pub cycles: u64,
  /// Status reads until done was observed
  pub polls: u32,
}

/// Host-side driver for the register protocol.
///
/// Every bus access occupies one clock cycle: the access is issued, then the
/// clock advances.
pub struct HostDriver {
  max_polls: u32,
}

impl HostDriver {
  pub fn new(max_polls: u32) -> Self {
    Self { max_polls }
  }

  /// Run the full protocol once.
  pub fn run<B: RegisterBus>(&self, bus: &mut B, operands: &Operands) -> io::Result<HwRun> {
    let start_cycle = bus.cycles();

    // Step 1/2: operands, sign-extended to the 32-bit bus word
    info!("[Host] writing operands A and B");
    self.write_matrix(bus, A_OFFSET, &operands.a);
    self.write_matrix(bus, B_OFFSET, &operands.b);

    // Step 3: start
    info!("[Host] asserting start");
    write(bus, CONTROL_ADDR, CONTROL_START as i32);

    // Step 4: poll status until DONE=1 and BUSY=0
    let polls = self.wait_done(bus)?;
    debug!("[Host] done after {} poll(s)", polls);

    // Step 5: results
    let results = Results {
      sum: read_matrix(bus, SUM_OFFSET),
      diff: read_matrix(bus, DIFF_OFFSET),
      prod: read_matrix(bus, PROD_OFFSET),
    };

    let cycles = bus.cycles() - start_cycle;
    info!("[Host] results read back, {} bus cycles", cycles);
    Ok(HwRun {
      results,
      cycles,
      polls,
    })
  }

  fn write_matrix<B: RegisterBus>(&self, bus: &mut B, base: u8, m: &Mat4<i16>) {
    for (i, &v) in m.iter().enumerate() {
      write(bus, cell_addr(base, i), v as i32);
    }
  }

  fn wait_done<B: RegisterBus>(&self, bus: &mut B) -> io::Result<u32> {
    let mut polls = 0;
    loop {
      let status = read(bus, STATUS_ADDR) as u32;
      polls += 1;
      if status & STATUS_DONE != 0 && status & STATUS_BUSY == 0 {
        return Ok(polls);
      }
      if polls >= self.max_polls {
        return Err(io::Error::new(
          io::ErrorKind::TimedOut,
          format!("peripheral not done after {} status polls", polls),
        ));
      }
    }
  }
}

fn write<B: RegisterBus>(bus: &mut B, addr: u8, value: i32) {
  bus.write_word(addr, value);
  bus.tick();
}

fn read<B: RegisterBus>(bus: &mut B, addr: u8) -> i32 {
  let value = bus.read_word(addr);
  bus.tick();
  value
}

fn read_matrix<B: RegisterBus>(bus: &mut B, base: u8) -> Mat4<i32> {
  let mut m = [0; CELLS];
  for (i, cell) in m.iter_mut().enumerate() {
    *cell = read(bus, cell_addr(base, i));
  }
  m
}
