// Software-vs-hardware comparison of one operand set

use super::bus::RegisterBus;
use super::driver::{HostDriver, HwRun, Operands, Results};
use super::software;
use crate::matrix::Mat4;
use log::warn;
use std::io;
use std::time::{Duration, Instant};

/// A cell where the peripheral disagrees with the software baseline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
  pub matrix: &'static str,
  pub index: usize,
  pub software: i32,
  pub hardware: i32,
}

/// Both results plus timing for one operand set
#[derive(Debug, Clone)]
pub struct Benchmark {
  pub operands: Operands,
  pub software: Results,
  pub hardware: HwRun,
  pub sw_elapsed: Duration,
  pub hw_elapsed: Duration,
  pub mismatches: Vec<Mismatch>,
}

impl Benchmark {
  /// Run the software baseline, then drive the same operands through the bus.
  pub fn run<B: RegisterBus>(driver: &HostDriver, bus: &mut B, operands: &Operands) -> io::Result<Self> {
    let t0 = Instant::now();
    let sw = software::matrix_operations(&operands.a, &operands.b);
    let sw_elapsed = t0.elapsed();

    let t0 = Instant::now();
    let hw = driver.run(bus, operands)?;
    let hw_elapsed = t0.elapsed();

    let mismatches = compare(&sw, &hw.results);
    if !mismatches.is_empty() {
      warn!("[Benchmark] {} cell(s) differ between software and hardware", mismatches.len());
    }

    Ok(Self {
      operands: *operands,
      software: sw,
      hardware: hw,
      sw_elapsed,
      hw_elapsed,
      mismatches,
    })
  }

  pub fn matches(&self) -> bool {
    self.mismatches.is_empty()
  }
}

/// Cell-by-cell comparison of two result sets.
pub fn compare(sw: &Results, hw: &Results) -> Vec<Mismatch> {
  let mut out = Vec::new();
  diff_into(&mut out, "SUM", &sw.sum, &hw.sum);
  diff_into(&mut out, "DIFF", &sw.diff, &hw.diff);
  diff_into(&mut out, "PROD", &sw.prod, &hw.prod);
  out
}

fn diff_into(out: &mut Vec<Mismatch>, matrix: &'static str, sw: &Mat4<i32>, hw: &Mat4<i32>) {
  for (index, (&software, &hardware)) in sw.iter().zip(hw.iter()).enumerate() {
    if software != hardware {
      out.push(Mismatch {
        matrix,
        index,
        software,
        hardware,
      });
    }
  }
}
