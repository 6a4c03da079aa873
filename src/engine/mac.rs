// Multiply-accumulate array: one accumulator per output cell

use crate::matrix::{index, Mat4, CELLS, DIM};

/// Bank of 16 signed 64-bit accumulators, one per cell of the product.
///
/// Every step updates all cells at once from the same operand snapshot:
/// `acc[r][c] += A[r][k] * B[k][c]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacArray {
  acc: Mat4<i64>,
}

impl MacArray {
  pub fn new() -> Self {
    Self { acc: [0; CELLS] }
  }

  /// Accumulator values after contraction step `k`. Pure: `self` is untouched.
  pub fn accumulate(&self, a: &Mat4<i16>, b: &Mat4<i16>, k: usize) -> Self {
    debug_assert!(k < DIM);
    let mut next = self.acc;
    for r in 0..DIM {
      let a_rk = a[index(r, k)] as i64;
      for c in 0..DIM {
        let b_kc = b[index(k, c)] as i64;
        let cell = index(r, c);
        next[cell] = next[cell].wrapping_add(a_rk.wrapping_mul(b_kc));
      }
    }
    Self { acc: next }
  }

  /// Narrow every accumulator to its low 32 bits.
  pub fn publish(&self) -> Mat4<i32> {
    self.acc.map(low_word)
  }

  pub fn values(&self) -> &Mat4<i64> {
    &self.acc
  }
}

impl Default for MacArray {
  fn default() -> Self {
    Self::new()
  }
}

/// Bits [31:0] of an accumulator reinterpreted as signed. Truncates, never clamps.
pub fn low_word(acc: i64) -> i32 {
  (acc & 0xFFFF_FFFF) as u32 as i32
}

/// Element-wise `A + B` in 32-bit wrapping arithmetic.
pub fn add(a: &Mat4<i16>, b: &Mat4<i16>) -> Mat4<i32> {
  std::array::from_fn(|i| (a[i] as i32).wrapping_add(b[i] as i32))
}

/// Element-wise `A - B` in 32-bit wrapping arithmetic.
pub fn sub(a: &Mat4<i16>, b: &Mat4<i16>) -> Mat4<i32> {
  std::array::from_fn(|i| (a[i] as i32).wrapping_sub(b[i] as i32))
}
