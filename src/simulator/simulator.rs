use super::host::{Benchmark, HostDriver, Operands, RegisterBus};
use super::sim::mode::{SimConfig, StepMode};
use super::sim::shell::{Command, Shell};
use super::sim::TraceWriter;
use super::utils::report::print_benchmark;
use crate::builtin::Module;
use crate::regfile::map::STATUS_ADDR;
use crate::top::MatrixAccel;
use log::{info, warn};
use std::io::{self, Result};
use std::path::Path;

/// Drives the peripheral model from the configured host program or the step shell
pub struct Simulator {
  config: SimConfig,
  operands: Operands,
  accel: MatrixAccel,
  driver: HostDriver,
  trace: Option<TraceWriter>,
}

impl Simulator {
  pub fn new(config: SimConfig, operands: Operands) -> Result<Self> {
    let trace = match &config.trace_file {
      Some(path) => {
        info!("Writing cycle trace to {}", path);
        Some(TraceWriter::create(Path::new(path))?)
      },
      None => None,
    };

    for (matrix, index, value) in operands.unsafe_cells() {
      warn!(
        "{}[{}] = {} is outside the safe input range; the product may wrap",
        matrix, index, value
      );
    }

    Ok(Self {
      driver: HostDriver::new(config.max_polls),
      config,
      operands,
      accel: MatrixAccel::new("matrix_accel"),
      trace,
    })
  }

  pub fn accel(&self) -> &MatrixAccel {
    &self.accel
  }

  pub fn run(&mut self) -> Result<()> {
    match self.config.step_mode {
      StepMode::Continuous => self.run_continuous(),
      StepMode::Step => self.run_step_mode(),
    }
  }

  fn run_continuous(&mut self) -> Result<()> {
    info!("Continuous mode");
    let bench = self.benchmark()?;
    print_benchmark(&bench);
    if bench.matches() {
      Ok(())
    } else {
      Err(io::Error::new(
        io::ErrorKind::Other,
        format!("{} result cell(s) differ from software", bench.mismatches.len()),
      ))
    }
  }

  /// Drive the configured operands through the register protocol once.
  pub fn benchmark(&mut self) -> Result<Benchmark> {
    let mut bus = TracedBus::new(&mut self.accel, self.trace.as_mut());
    let bench = Benchmark::run(&self.driver, &mut bus, &self.operands);
    bus.finish()?;
    bench
  }

  fn run_step_mode(&mut self) -> Result<()> {
    println!("Step mode. {}", Shell::help());
    let mut shell = Shell::new()?;
    loop {
      match shell.read_command()? {
        Command::Quit => break,
        Command::Tick(n) => {
          for _ in 0..n {
            self.tick()?;
          }
          self.print_status();
        },
        Command::Write { addr, value } => {
          self.accel.write_word(addr, value);
          println!("[{}] <- {}", addr, value);
        },
        Command::Read { addr } => {
          let value = self.accel.read_word(addr);
          println!("[{}] = {} (0x{:08x})", addr, value, value as u32);
        },
        Command::Status => self.print_status(),
        Command::Run => print_benchmark(&self.benchmark()?),
      }
    }
    if let Some(trace) = self.trace.as_mut() {
      trace.flush()?;
    }
    Ok(())
  }

  fn tick(&mut self) -> Result<()> {
    self.accel.run();
    if let Some(trace) = self.trace.as_mut() {
      trace.record(&self.accel)?;
    }
    Ok(())
  }

  fn print_status(&self) {
    println!(
      "cycle={} state={} k={} status=0b{:02b}",
      self.accel.cycles(),
      self.accel.state(),
      self.accel.step(),
      self.accel.read_word(STATUS_ADDR)
    );
  }
}

/// Register bus that records a trace entry after every clock edge.
///
/// Trace I/O errors cannot surface through `tick`; the first one is kept and
/// returned by `finish`.
struct TracedBus<'a> {
  accel: &'a mut MatrixAccel,
  trace: Option<&'a mut TraceWriter>,
  error: Option<io::Error>,
}

impl<'a> TracedBus<'a> {
  fn new(accel: &'a mut MatrixAccel, trace: Option<&'a mut TraceWriter>) -> Self {
    Self {
      accel,
      trace,
      error: None,
    }
  }

  fn finish(self) -> Result<()> {
    if let Some(e) = self.error {
      return Err(e);
    }
    match self.trace {
      Some(trace) => trace.flush(),
      None => Ok(()),
    }
  }
}

impl RegisterBus for TracedBus<'_> {
  fn write_word(&mut self, addr: u8, value: i32) {
    self.accel.write_word(addr, value);
  }

  fn read_word(&mut self, addr: u8) -> i32 {
    self.accel.read_word(addr)
  }

  fn tick(&mut self) {
    self.accel.run();
    if self.error.is_some() {
      return;
    }
    if let Some(trace) = self.trace.as_mut() {
      if let Err(e) = trace.record(self.accel) {
        self.error = Some(e);
      }
    }
  }

  fn cycles(&self) -> u64 {
    self.accel.cycles()
  }
}
