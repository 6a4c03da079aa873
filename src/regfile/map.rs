/// Address map - word addresses of every host-visible register
use crate::matrix::CELLS;

pub const A_OFFSET: u8 = 0;
pub const B_OFFSET: u8 = 16;
pub const SUM_OFFSET: u8 = 32;
pub const DIFF_OFFSET: u8 = 48;
pub const PROD_OFFSET: u8 = 64;
pub const CONTROL_ADDR: u8 = 80;
pub const STATUS_ADDR: u8 = 81;

/// Number of decoded word addresses (0..=81).
pub const ADDR_SPAN: usize = STATUS_ADDR as usize + 1;

/// CONTROL bit 0
pub const CONTROL_START: u32 = 1 << 0;
/// STATUS bit 0
pub const STATUS_DONE: u32 = 1 << 0;
/// STATUS bit 1
pub const STATUS_BUSY: u32 = 1 << 1;

/// Access direction allowed by a region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
  WriteOnly,
  ReadOnly,
  None,
}

/// Decoded target of a word address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
  A(usize),
  B(usize),
  Sum(usize),
  Diff(usize),
  Prod(usize),
  Control,
  Status,
  Unmapped,
}

impl Region {
  /// Decode a word address. Total over `u8`: anything outside the map is `Unmapped`.
  pub fn decode(addr: u8) -> Self {
    let cell = |base: u8| (addr - base) as usize;
    match addr {
      a if a < B_OFFSET => Region::A(cell(A_OFFSET)),
      a if a < SUM_OFFSET => Region::B(cell(B_OFFSET)),
      a if a < DIFF_OFFSET => Region::Sum(cell(SUM_OFFSET)),
      a if a < PROD_OFFSET => Region::Diff(cell(DIFF_OFFSET)),
      a if a < CONTROL_ADDR => Region::Prod(cell(PROD_OFFSET)),
      CONTROL_ADDR => Region::Control,
      STATUS_ADDR => Region::Status,
      _ => Region::Unmapped,
    }
  }

  pub fn access(self) -> Access {
    match self {
      Region::A(_) | Region::B(_) | Region::Control => Access::WriteOnly,
      Region::Sum(_) | Region::Diff(_) | Region::Prod(_) | Region::Status => Access::ReadOnly,
      Region::Unmapped => Access::None,
    }
  }
}

/// Word address of cell `i` of the matrix starting at `base`.
pub fn cell_addr(base: u8, i: usize) -> u8 {
  debug_assert!(i < CELLS);
  base + i as u8
}
