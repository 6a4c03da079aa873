/// Register file - every piece of host-addressable state in the peripheral
use super::map::{Access, Region, CONTROL_START, STATUS_BUSY, STATUS_DONE};
use crate::builtin::Wire;
use crate::matrix::{Mat4, CELLS};
use log::trace;

/// Bus write request
#[derive(Clone, Copy, Debug, Default)]
pub struct WriteReq {
  pub addr: u8,
  pub data: u32,
}

/// Bus read request
#[derive(Clone, Copy, Debug, Default)]
pub struct ReadReq {
  pub addr: u8,
}

/// Operand inputs, result outputs and control/status bits.
///
/// Nothing here ever fails: unmapped or wrong-direction accesses are dropped
/// on write and read back as zero.
#[derive(Clone, Debug)]
pub struct RegFile {
  a: Mat4<i16>,
  b: Mat4<i16>,
  sum: Mat4<i32>,
  diff: Mat4<i32>,
  prod: Mat4<i32>,
  start: bool,
  busy: bool,
  done: bool,
}

impl RegFile {
  pub fn new() -> Self {
    Self {
      a: [0; CELLS],
      b: [0; CELLS],
      sum: [0; CELLS],
      diff: [0; CELLS],
      prod: [0; CELLS],
      start: false,
      busy: false,
      done: false,
    }
  }

  pub fn reset(&mut self) {
    *self = Self::new();
  }

  /// Apply a bus write. Only a selected request reaches the registers.
  pub fn write(&mut self, req: &Wire<WriteReq>) {
    let Some(req) = req.get() else {
      return;
    };
    let region = Region::decode(req.addr);
    trace!("[RegFile] write addr={} data=0x{:08x} -> {:?}", req.addr, req.data, region);

    match region {
      Region::A(i) => self.a[i] = low_half(req.data),
      Region::B(i) => self.b[i] = low_half(req.data),
      Region::Control => self.start = req.data & CONTROL_START != 0,
      _ => {},
    }
  }

  /// Serve a bus read. An unselected request reads as zero.
  pub fn read(&self, req: &Wire<ReadReq>) -> u32 {
    let Some(req) = req.get() else {
      return 0;
    };
    let region = Region::decode(req.addr);
    if region.access() != Access::ReadOnly {
      return 0;
    }

    let data = match region {
      Region::Sum(i) => self.sum[i] as u32,
      Region::Diff(i) => self.diff[i] as u32,
      Region::Prod(i) => self.prod[i] as u32,
      Region::Status => self.status(),
      _ => 0,
    };
    trace!("[RegFile] read addr={} -> 0x{:08x}", req.addr, data);
    data
  }

  /// Selected write of a signed word.
  pub fn write_word(&mut self, addr: u8, value: i32) {
    self.write(&Wire::driven(WriteReq {
      addr,
      data: value as u32,
    }));
  }

  /// Selected read of a signed word.
  pub fn read_word(&self, addr: u8) -> i32 {
    self.read(&Wire::driven(ReadReq { addr })) as i32
  }

  /// STATUS register: `{30'b0, busy, done}`.
  pub fn status(&self) -> u32 {
    let mut status = 0;
    if self.done {
      status |= STATUS_DONE;
    }
    if self.busy {
      status |= STATUS_BUSY;
    }
    status
  }

  pub fn a(&self) -> &Mat4<i16> {
    &self.a
  }

  pub fn b(&self) -> &Mat4<i16> {
    &self.b
  }

  pub fn sum(&self) -> &Mat4<i32> {
    &self.sum
  }

  pub fn diff(&self) -> &Mat4<i32> {
    &self.diff
  }

  pub fn prod(&self) -> &Mat4<i32> {
    &self.prod
  }

  pub fn start(&self) -> bool {
    self.start
  }

  pub fn busy(&self) -> bool {
    self.busy
  }

  pub fn done(&self) -> bool {
    self.done
  }

  // Write-back ports driven by the compute engine at commit time.

  pub(crate) fn load_sum_diff(&mut self, sum: Mat4<i32>, diff: Mat4<i32>) {
    self.sum = sum;
    self.diff = diff;
  }

  pub(crate) fn load_prod(&mut self, prod: Mat4<i32>) {
    self.prod = prod;
  }

  pub(crate) fn set_status(&mut self, busy: bool, done: bool) {
    self.busy = busy;
    self.done = done;
  }

  pub(crate) fn clear_start(&mut self) {
    self.start = false;
  }
}

impl Default for RegFile {
  fn default() -> Self {
    Self::new()
  }
}

/// Keep bits [15:0] of a bus word as a signed 16-bit operand.
fn low_half(data: u32) -> i16 {
  (data & 0xFFFF) as u16 as i16
}
