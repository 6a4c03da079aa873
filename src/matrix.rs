//! Row-major 4×4 matrices as flat fixed-size arrays

/// Rows and columns of every matrix handled by the peripheral.
pub const DIM: usize = 4;
/// Cells per matrix.
pub const CELLS: usize = DIM * DIM;

/// A 4×4 matrix flattened row-major: cell `(r, c)` lives at `r * DIM + c`.
pub type Mat4<T> = [T; CELLS];

/// Flat index of cell `(row, col)`.
pub const fn index(row: usize, col: usize) -> usize {
  row * DIM + col
}

/// The 4×4 identity matrix.
pub fn identity() -> Mat4<i16> {
  let mut m = [0; CELLS];
  for i in 0..DIM {
    m[index(i, i)] = 1;
  }
  m
}

/// Build a matrix from four rows.
pub fn from_rows<T: Copy + Default>(rows: [[T; DIM]; DIM]) -> Mat4<T> {
  let mut m = [T::default(); CELLS];
  for (r, row) in rows.iter().enumerate() {
    m[index(r, 0)..index(r, 0) + DIM].copy_from_slice(row);
  }
  m
}

/// Iterate over the rows of a flat matrix.
pub fn rows<T>(m: &Mat4<T>) -> impl Iterator<Item = &[T]> {
  m.chunks_exact(DIM)
}
