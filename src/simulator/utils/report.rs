use crate::matrix::{rows, Mat4};
use crate::simulator::host::{Benchmark, Operands};
use std::fmt::Display;

/// Render a matrix as four whitespace-separated rows.
pub fn format_matrix<T: Display>(m: &Mat4<T>) -> String {
  rows(m)
    .map(|row| row.iter().map(|v| format!("{:>11}", v)).collect::<Vec<_>>().join(" "))
    .collect::<Vec<_>>()
    .join("\n")
}

pub fn print_matrix<T: Display>(title: &str, m: &Mat4<T>) {
  println!("\n{}", title);
  println!("{}", format_matrix(m));
}

pub fn print_operands(operands: &Operands) {
  println!("\n--- Input Matrices ---");
  print_matrix("Matrix A:", &operands.a);
  print_matrix("Matrix B:", &operands.b);
}

pub fn print_benchmark(bench: &Benchmark) {
  print_operands(&bench.operands);

  println!("\n--- Software Results ---");
  print_matrix("SW_Prod = A * B", &bench.software.prod);
  print_matrix("SW_Sum = A + B", &bench.software.sum);
  print_matrix("SW_Diff = A - B", &bench.software.diff);

  let hw = &bench.hardware.results;
  println!("\n--- Hardware Results ---");
  print_matrix("HW_Prod = A * B", &hw.prod);
  print_matrix("HW_Sum = A + B", &hw.sum);
  print_matrix("HW_Diff = A - B", &hw.diff);

  println!("\n--- Performance ---");
  println!("Hardware bus cycles:   {}", bench.hardware.cycles);
  println!("Hardware status polls: {}", bench.hardware.polls);
  println!("Software time:         {:?}", bench.sw_elapsed);
  println!("Simulated run time:    {:?}", bench.hw_elapsed);

  if bench.matches() {
    println!("\nHardware matches software.");
  } else {
    println!("\nMISMATCH in {} cell(s):", bench.mismatches.len());
    for m in &bench.mismatches {
      println!("  {}[{}]: sw={} hw={}", m.matrix, m.index, m.software, m.hardware);
    }
  }
}
