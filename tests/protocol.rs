use matrix_accel::engine::State;
use matrix_accel::matrix::{identity, index, Mat4, CELLS, DIM};
use matrix_accel::regfile::map::{
  A_OFFSET, B_OFFSET, CONTROL_ADDR, DIFF_OFFSET, PROD_OFFSET, STATUS_ADDR, SUM_OFFSET,
};
use matrix_accel::MatrixAccel;

const DONE: i32 = 0b01;
const BUSY: i32 = 0b10;

fn load(accel: &mut MatrixAccel, a: &Mat4<i16>, b: &Mat4<i16>) {
  for i in 0..CELLS {
    accel.write_word(A_OFFSET + i as u8, a[i] as i32);
    accel.write_word(B_OFFSET + i as u8, b[i] as i32);
  }
}

fn read_block(accel: &MatrixAccel, base: u8) -> Mat4<i32> {
  std::array::from_fn(|i| accel.read_word(base + i as u8))
}

/// Start and tick until done; returns the number of ticks taken.
fn start_and_wait(accel: &mut MatrixAccel) -> u32 {
  accel.write_word(CONTROL_ADDR, 1);
  let mut ticks = 0;
  loop {
    accel.tick();
    ticks += 1;
    if accel.read_word(STATUS_ADDR) == DONE {
      return ticks;
    }
    assert!(ticks < 100, "peripheral never finished");
  }
}

fn reference(a: &Mat4<i16>, b: &Mat4<i16>) -> (Mat4<i32>, Mat4<i32>, Mat4<i32>) {
  let sum = std::array::from_fn(|i| (a[i] as i32).wrapping_add(b[i] as i32));
  let diff = std::array::from_fn(|i| (a[i] as i32).wrapping_sub(b[i] as i32));
  let prod = std::array::from_fn(|cell| {
    let (r, c) = (cell / DIM, cell % DIM);
    let exact: i64 = (0..DIM)
      .map(|k| a[index(r, k)] as i64 * b[index(k, c)] as i64)
      .sum();
    (exact & 0xFFFF_FFFF) as u32 as i32
  });
  (sum, diff, prod)
}

/// Deterministic operand generator covering the full 16-bit range.
struct Lcg(u64);

impl Lcg {
  fn matrix(&mut self) -> Mat4<i16> {
    std::array::from_fn(|_| {
      self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
      (self.0 >> 48) as u16 as i16
    })
  }
}

#[test]
fn test_identity_scenario() {
  let a: Mat4<i16> = std::array::from_fn(|i| i as i16 + 1);
  let b = identity();
  let mut accel = MatrixAccel::default();
  load(&mut accel, &a, &b);

  assert_eq!(start_and_wait(&mut accel), 5);
  assert_eq!(read_block(&accel, PROD_OFFSET), a.map(i32::from));
  let (sum, diff, _) = reference(&a, &b);
  assert_eq!(read_block(&accel, SUM_OFFSET), sum);
  assert_eq!(read_block(&accel, DIFF_OFFSET), diff);
}

#[test]
fn test_all_zero_scenario() {
  let mut accel = MatrixAccel::default();
  load(&mut accel, &[0; CELLS], &[0; CELLS]);
  start_and_wait(&mut accel);
  for base in [SUM_OFFSET, DIFF_OFFSET, PROD_OFFSET] {
    assert_eq!(read_block(&accel, base), [0; CELLS]);
  }
}

#[test]
fn test_16_bit_boundary_scenario() {
  let a: Mat4<i16> = std::array::from_fn(|i| if i % 2 == 0 { i16::MAX } else { i16::MIN });
  let b: Mat4<i16> = std::array::from_fn(|i| if i % 3 == 0 { i16::MIN } else { i16::MAX });
  let mut accel = MatrixAccel::default();
  load(&mut accel, &a, &b);
  start_and_wait(&mut accel);

  let (sum, diff, prod) = reference(&a, &b);
  assert_eq!(read_block(&accel, SUM_OFFSET), sum);
  assert_eq!(read_block(&accel, DIFF_OFFSET), diff);
  assert_eq!(read_block(&accel, PROD_OFFSET), prod);
  assert_eq!(accel.read_word(DIFF_OFFSET), 65535);
  assert_eq!(accel.read_word(DIFF_OFFSET + 1), -65535);
}

#[test]
fn test_product_wraps_to_low_32_bits() {
  let a = [i16::MIN; CELLS];
  let mut accel = MatrixAccel::default();
  load(&mut accel, &a, &a);
  start_and_wait(&mut accel);
  // 4 * (-32768)^2 = 2^32
  assert_eq!(read_block(&accel, PROD_OFFSET), [0; CELLS]);
  assert_eq!(accel.read_word(SUM_OFFSET), -65536);
}

#[test]
fn test_random_operands_match_reference() {
  let mut rng = Lcg(0x5eed);
  let mut accel = MatrixAccel::default();
  for _ in 0..64 {
    let (a, b) = (rng.matrix(), rng.matrix());
    load(&mut accel, &a, &b);
    assert_eq!(start_and_wait(&mut accel), 5);

    let (sum, diff, prod) = reference(&a, &b);
    assert_eq!(read_block(&accel, SUM_OFFSET), sum);
    assert_eq!(read_block(&accel, DIFF_OFFSET), diff);
    assert_eq!(read_block(&accel, PROD_OFFSET), prod);
  }
}

#[test]
fn test_cycle_timing() {
  let mut accel = MatrixAccel::default();
  load(&mut accel, &identity(), &identity());
  accel.write_word(CONTROL_ADDR, 1);
  assert_eq!(accel.read_word(STATUS_ADDR), 0);

  accel.tick();
  assert_eq!(accel.read_word(STATUS_ADDR), BUSY);
  assert_eq!(accel.state(), State::Run { k: 0 });

  for k in 1..4 {
    accel.tick();
    assert_eq!(accel.read_word(STATUS_ADDR), BUSY);
    assert_eq!(accel.step(), k);
  }

  accel.tick();
  assert_eq!(accel.read_word(STATUS_ADDR), DONE);
  assert_eq!(accel.state(), State::Done);
  assert_eq!(accel.step(), 0);
  assert_eq!(read_block(&accel, PROD_OFFSET), identity().map(i32::from));
  assert_eq!(accel.cycles(), 5);
}

#[test]
fn test_idle_and_hold() {
  let mut accel = MatrixAccel::default();
  for _ in 0..10 {
    accel.tick();
    assert_eq!(accel.state(), State::Load);
    assert_eq!(accel.read_word(STATUS_ADDR), 0);
  }

  load(&mut accel, &identity(), &identity());
  start_and_wait(&mut accel);
  let prod = read_block(&accel, PROD_OFFSET);
  for _ in 0..10 {
    accel.tick();
    assert_eq!(accel.state(), State::Done);
    assert_eq!(read_block(&accel, PROD_OFFSET), prod);
  }
}

#[test]
fn test_idempotent_reads() {
  let mut rng = Lcg(7);
  let mut accel = MatrixAccel::default();
  load(&mut accel, &rng.matrix(), &rng.matrix());
  accel.write_word(CONTROL_ADDR, 1);
  for _ in 0..6 {
    for addr in 0..=u8::MAX {
      assert_eq!(accel.read_word(addr), accel.read_word(addr));
    }
    accel.tick();
  }
}

#[test]
fn test_writes_to_read_only_addresses_are_invisible() {
  let mut rng = Lcg(11);
  let mut accel = MatrixAccel::default();
  load(&mut accel, &rng.matrix(), &rng.matrix());
  start_and_wait(&mut accel);

  let before: Vec<i32> = (0..=u8::MAX).map(|addr| accel.read_word(addr)).collect();
  for addr in (SUM_OFFSET..CONTROL_ADDR).chain([STATUS_ADDR]).chain(82..=u8::MAX) {
    accel.write_word(addr, -1);
  }
  let after: Vec<i32> = (0..=u8::MAX).map(|addr| accel.read_word(addr)).collect();
  assert_eq!(before, after);
  assert_eq!(accel.state(), State::Done);
}

#[test]
fn test_write_only_addresses_read_zero() {
  let mut accel = MatrixAccel::default();
  load(&mut accel, &[123; CELLS], &[-45; CELLS]);
  accel.write_word(CONTROL_ADDR, 1);
  for addr in A_OFFSET..SUM_OFFSET {
    assert_eq!(accel.read_word(addr), 0);
  }
  assert_eq!(accel.read_word(CONTROL_ADDR), 0);
}

#[test]
fn test_retrigger_from_done() {
  let first: Mat4<i16> = std::array::from_fn(|i| i as i16);
  let mut accel = MatrixAccel::default();
  load(&mut accel, &first, &identity());
  start_and_wait(&mut accel);
  let old_prod = read_block(&accel, PROD_OFFSET);

  let second = [2; CELLS];
  load(&mut accel, &second, &second);
  accel.write_word(CONTROL_ADDR, 1);

  accel.tick();
  assert_eq!(accel.state(), State::Run { k: 0 });
  // SUM/DIFF refresh as the start is accepted
  assert_eq!(read_block(&accel, SUM_OFFSET), [4; CELLS]);
  assert_eq!(read_block(&accel, DIFF_OFFSET), [0; CELLS]);

  for _ in 0..3 {
    assert_eq!(read_block(&accel, PROD_OFFSET), old_prod);
    accel.tick();
  }
  assert_eq!(read_block(&accel, PROD_OFFSET), old_prod);

  accel.tick();
  assert_eq!(accel.read_word(STATUS_ADDR), DONE);
  assert_eq!(read_block(&accel, PROD_OFFSET), [16; CELLS]);
}

#[test]
fn test_start_while_busy_is_ignored() {
  let mut accel = MatrixAccel::default();
  load(&mut accel, &identity(), &identity());
  accel.write_word(CONTROL_ADDR, 1);
  accel.tick();
  accel.tick();

  accel.write_word(CONTROL_ADDR, 1);
  accel.tick();
  accel.tick();
  accel.tick();
  assert_eq!(accel.state(), State::Done);

  // the start written during Run must not launch another computation
  accel.tick();
  assert_eq!(accel.state(), State::Done);
  assert_eq!(accel.read_word(STATUS_ADDR), DONE);
}

#[test]
fn test_operand_writes_during_run_do_not_disturb() {
  let a: Mat4<i16> = std::array::from_fn(|i| i as i16 - 5);
  let b: Mat4<i16> = std::array::from_fn(|i| 3 * i as i16);
  let mut accel = MatrixAccel::default();
  load(&mut accel, &a, &b);
  accel.write_word(CONTROL_ADDR, 1);
  accel.tick();

  load(&mut accel, &[999; CELLS], &[-999; CELLS]);
  while accel.read_word(STATUS_ADDR) != DONE {
    accel.tick();
  }

  let (sum, diff, prod) = reference(&a, &b);
  assert_eq!(read_block(&accel, SUM_OFFSET), sum);
  assert_eq!(read_block(&accel, DIFF_OFFSET), diff);
  assert_eq!(read_block(&accel, PROD_OFFSET), prod);

  // the new operands apply to the next start
  assert_eq!(start_and_wait(&mut accel), 5);
  assert_eq!(accel.read_word(SUM_OFFSET), 0);
  assert_eq!(accel.read_word(PROD_OFFSET), 4 * 999 * -999);
}

#[test]
fn test_wide_bus_words_truncate_to_16_bits() {
  let mut accel = MatrixAccel::default();
  accel.write_word(A_OFFSET, 0x0003_0002);
  accel.write_word(B_OFFSET, 0x7FFF_0005);
  accel.write_word(A_OFFSET + 1, 0x0000_FFFF);
  start_and_wait(&mut accel);
  assert_eq!(accel.read_word(SUM_OFFSET), 7);
  assert_eq!(accel.read_word(DIFF_OFFSET), -3);
  assert_eq!(accel.read_word(SUM_OFFSET + 1), -1);
  assert_eq!(accel.read_word(PROD_OFFSET), 10);
}
