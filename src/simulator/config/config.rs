use crate::matrix::{Mat4, CELLS};
use crate::simulator::host::Operands;
use ::config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;

/// Built-in defaults, always the lowest-priority layer.
const DEFAULT_CONFIG: &str = include_str!("default.toml");

/// Environment prefix, e.g. `MATRIX_ACCEL_SIMULATION__QUIET=true`.
const ENV_PREFIX: &str = "MATRIX_ACCEL";

/// Simulation section
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SimulationSection {
  #[serde(default)]
  pub quiet: bool,
  #[serde(default)]
  pub step_mode: bool,
  #[serde(default)]
  pub trace_file: String,
  #[serde(default = "default_max_polls")]
  pub max_polls: u32,
}

fn default_max_polls() -> u32 {
  1000
}

impl Default for SimulationSection {
  fn default() -> Self {
    Self {
      quiet: false,
      step_mode: false,
      trace_file: String::new(),
      max_polls: default_max_polls(),
    }
  }
}

/// Operand section: two row-major 4x4 matrices as plain integer lists
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OperandSection {
  #[serde(default)]
  pub a: Vec<i64>,
  #[serde(default)]
  pub b: Vec<i64>,
}

impl OperandSection {
  /// Validate and convert to 16-bit operand matrices.
  pub fn to_operands(&self) -> io::Result<Operands> {
    Ok(Operands {
      a: to_matrix("a", &self.a)?,
      b: to_matrix("b", &self.b)?,
    })
  }
}

fn to_matrix(name: &str, values: &[i64]) -> io::Result<Mat4<i16>> {
  if values.len() != CELLS {
    return Err(io::Error::new(
      io::ErrorKind::InvalidData,
      format!("operand {} needs {} values, got {}", name, CELLS, values.len()),
    ));
  }

  let mut m = [0i16; CELLS];
  for (i, &v) in values.iter().enumerate() {
    m[i] = i16::try_from(v).map_err(|_| {
      io::Error::new(
        io::ErrorKind::InvalidData,
        format!("operand {}[{}] = {} does not fit in 16 bits", name, i, v),
      )
    })?;
  }
  Ok(m)
}

/// Unified application configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
  #[serde(default)]
  pub simulation: SimulationSection,
  #[serde(default)]
  pub operands: OperandSection,
}

/// Load the built-in defaults only.
pub fn load_default_config() -> io::Result<AppConfig> {
  toml::from_str::<AppConfig>(DEFAULT_CONFIG)
    .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("parse default config failed: {}", e)))
}

/// Load defaults, then an optional TOML file, then `MATRIX_ACCEL_*` environment overrides.
pub fn load_app_config(path: Option<&Path>) -> io::Result<AppConfig> {
  let mut builder = Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

  if let Some(path) = path {
    if !path.is_file() {
      return Err(io::Error::new(
        io::ErrorKind::NotFound,
        format!("config file {:?} not found", path),
      ));
    }
    builder = builder.add_source(File::new(&path.to_string_lossy(), FileFormat::Toml));
  }

  builder
    .add_source(
      Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true),
    )
    .build()
    .and_then(|settings| settings.try_deserialize::<AppConfig>())
    .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, format!("load config failed: {}", e)))
}

/// Apply CLI flags on top of the loaded configuration
pub fn apply_cli_overrides(config: &mut AppConfig, quiet: bool, step: bool, trace_file: Option<&str>) {
  if quiet {
    config.simulation.quiet = true;
  }
  if step {
    config.simulation.step_mode = true;
  }
  if let Some(file) = trace_file {
    config.simulation.trace_file = file.to_string();
  }
}
