use crate::simulator::config::config::SimulationSection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepMode {
  Continuous,
  Step,
}

#[derive(Debug, Clone)]
pub struct SimConfig {
  pub quiet: bool,
  pub step_mode: StepMode,
  pub trace_file: Option<String>,
  pub max_polls: u32,
}

impl From<&SimulationSection> for SimConfig {
  fn from(section: &SimulationSection) -> Self {
    Self {
      quiet: section.quiet,
      step_mode: if section.step_mode {
        StepMode::Step
      } else {
        StepMode::Continuous
      },
      trace_file: Some(section.trace_file.clone()).filter(|f| !f.is_empty()),
      max_polls: section.max_polls,
    }
  }
}

impl Default for SimConfig {
  fn default() -> Self {
    Self::from(&SimulationSection::default())
  }
}
