use clap::Parser;
use matrix_accel::simulator::config::{apply_cli_overrides, load_app_config};
use matrix_accel::simulator::utils::log::init_log;
use matrix_accel::simulator::Simulator;
use matrix_accel::SimConfig;
use std::io;
use std::path::PathBuf;

/// matrix-accel - functional model of a 4x4 matrix add/sub/mul peripheral
#[derive(Parser, Debug)]
#[command(name = "matrix-accel")]
#[command(version = "0.1.0")]
#[command(about = "Cycle-accurate model of a memory-mapped 4x4 matrix accelerator", long_about = None)]
struct Args {
  /// Configuration file (TOML), layered over the built-in defaults
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Enable step mode (interactive register shell)
  #[arg(short, long)]
  step: bool,

  /// Quiet mode (warnings and errors only)
  #[arg(short, long)]
  quiet: bool,

  /// Output trace file path (JSON lines, one entry per cycle)
  #[arg(long, value_name = "FILE")]
  trace_file: Option<String>,

  /// Print the effective configuration as TOML and exit
  #[arg(long)]
  dump_config: bool,
}

fn main() -> io::Result<()> {
  let args = Args::parse();

  let mut config = load_app_config(args.config.as_deref())?;
  apply_cli_overrides(&mut config, args.quiet, args.step, args.trace_file.as_deref());
  init_log(config.simulation.quiet);

  if args.dump_config {
    let text = toml::to_string_pretty(&config)
      .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("serialize config failed: {}", e)))?;
    print!("{}", text);
    return Ok(());
  }

  let operands = config.operands.to_operands()?;
  let sim_config = SimConfig::from(&config.simulation);

  let mut simulator = Simulator::new(sim_config, operands)?;
  simulator.run()
}
