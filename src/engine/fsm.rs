// Control FSM: Load -> Run{k} -> Done

use std::fmt;

/// Number of contraction steps in a 4×4 product.
pub const STEPS: usize = 4;

/// Control state of the compute engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
  /// Idle, operands may be loaded
  Load,
  /// Accumulating contraction step `k`
  Run { k: usize },
  /// Results valid and stable
  Done,
}

impl Default for State {
  fn default() -> Self {
    State::Load
  }
}

impl fmt::Display for State {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      State::Load => write!(f, "LOAD"),
      State::Run { k } => write!(f, "RUN(k={})", k),
      State::Done => write!(f, "DONE"),
    }
  }
}

impl State {
  pub fn is_busy(self) -> bool {
    matches!(self, State::Run { .. })
  }

  pub fn is_done(self) -> bool {
    self == State::Done
  }

  /// Step counter; zero outside `Run`.
  pub fn step(self) -> usize {
    match self {
      State::Run { k } => k,
      _ => 0,
    }
  }
}

/// The edge taken on one clock tick, chosen from the current state and `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
  /// Load without start: stay idle.
  Idle,
  /// Start accepted from Load or Done: snapshot operands, publish SUM/DIFF, enter Run.
  Accept,
  /// Accumulate step `k` and stay in Run.
  Accumulate { k: usize },
  /// Accumulate the last step, publish PROD, enter Done.
  Publish { k: usize },
  /// Done without start: hold results.
  Hold,
}

impl Edge {
  /// Select the edge for this tick.
  ///
  /// `start` has no effect while in `Run`.
  pub fn select(state: State, start: bool) -> Self {
    match state {
      State::Load | State::Done if start => Edge::Accept,
      State::Load => Edge::Idle,
      State::Done => Edge::Hold,
      State::Run { k } => {
        debug_assert!(k < STEPS, "step counter out of range: {}", k);
        if k + 1 == STEPS {
          Edge::Publish { k }
        } else {
          Edge::Accumulate { k }
        }
      },
    }
  }

  /// State after this edge.
  pub fn target(self) -> State {
    match self {
      Edge::Idle => State::Load,
      Edge::Accept => State::Run { k: 0 },
      Edge::Accumulate { k } => State::Run { k: k + 1 },
      Edge::Publish { .. } | Edge::Hold => State::Done,
    }
  }

  /// Whether the latched start bit is consumed on this edge.
  pub fn clears_start(self) -> bool {
    matches!(self, Edge::Accept | Edge::Accumulate { .. } | Edge::Publish { .. })
  }
}
