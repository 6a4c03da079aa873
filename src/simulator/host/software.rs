// Pure-software reference for the three matrix operations

use super::driver::Results;
use crate::matrix::{index, Mat4, CELLS, DIM};

/// Element-wise sum and difference plus the triple-loop product, all in
/// wrapping 32-bit arithmetic.
pub fn matrix_operations(a: &Mat4<i16>, b: &Mat4<i16>) -> Results {
  let mut sum = [0; CELLS];
  let mut diff = [0; CELLS];
  for i in 0..CELLS {
    sum[i] = (a[i] as i32).wrapping_add(b[i] as i32);
    diff[i] = (a[i] as i32).wrapping_sub(b[i] as i32);
  }

  let mut prod = [0; CELLS];
  for i in 0..DIM {
    for j in 0..DIM {
      let mut acc: i32 = 0;
      for k in 0..DIM {
        acc = acc.wrapping_add((a[index(i, k)] as i32).wrapping_mul(b[index(k, j)] as i32));
      }
      prod[index(i, j)] = acc;
    }
  }

  Results { sum, diff, prod }
}
