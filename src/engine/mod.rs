//! Compute Engine - control FSM plus the multiply-accumulate datapath
//!
//! Each clock edge is split in two phases, like a register-transfer design:
//! [`Engine::evaluate`] computes everything the edge will change from the
//! current (pre-edge) state without touching it, and [`Engine::commit`]
//! applies the result to the engine and the register file in one step.
pub mod fsm;
pub mod mac;

pub use fsm::{Edge, State, STEPS};
pub use mac::MacArray;

use crate::matrix::{Mat4, CELLS};
use crate::regfile::RegFile;
use log::debug;

/// Values written back to the register file on an edge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Writeback {
  pub sum_diff: Option<(Mat4<i32>, Mat4<i32>)>,
  pub prod: Option<Mat4<i32>>,
  pub clear_start: bool,
  pub busy: bool,
  pub done: bool,
}

/// Everything one edge produces
#[derive(Debug, Clone)]
pub struct Next {
  pub edge: Edge,
  pub state: State,
  pub mac: MacArray,
  pub operands: Option<(Mat4<i16>, Mat4<i16>)>,
  pub writeback: Writeback,
}

/// Engine-private registers
#[derive(Debug, Clone)]
pub struct Engine {
  state: State,
  mac: MacArray,
  // operands latched when start is accepted
  op_a: Mat4<i16>,
  op_b: Mat4<i16>,
}

impl Engine {
  pub fn new() -> Self {
    Self {
      state: State::Load,
      mac: MacArray::new(),
      op_a: [0; CELLS],
      op_b: [0; CELLS],
    }
  }

  pub fn reset(&mut self) {
    *self = Self::new();
  }

  pub fn state(&self) -> State {
    self.state
  }

  pub fn mac(&self) -> &MacArray {
    &self.mac
  }

  /// Compute the next state and register write-back for one edge.
  pub fn evaluate(&self, regs: &RegFile) -> Next {
    let edge = Edge::select(self.state, regs.start());
    let state = edge.target();
    let mut next = Next {
      edge,
      state,
      mac: self.mac,
      operands: None,
      writeback: Writeback {
        sum_diff: None,
        prod: None,
        clear_start: edge.clears_start(),
        busy: state.is_busy(),
        done: state.is_done(),
      },
    };

    match edge {
      Edge::Accept => {
        let (a, b) = (*regs.a(), *regs.b());
        next.writeback.sum_diff = Some((mac::add(&a, &b), mac::sub(&a, &b)));
        next.mac = MacArray::new();
        next.operands = Some((a, b));
      },
      Edge::Accumulate { k } => {
        next.mac = self.mac.accumulate(&self.op_a, &self.op_b, k);
      },
      Edge::Publish { k } => {
        next.mac = self.mac.accumulate(&self.op_a, &self.op_b, k);
        next.writeback.prod = Some(next.mac.publish());
      },
      Edge::Idle | Edge::Hold => {},
    }

    next
  }

  /// Apply an evaluated edge to the engine and the register file.
  pub fn commit(&mut self, next: Next, regs: &mut RegFile) {
    if self.state != next.state {
      debug!("[Engine] {} -> {} via {:?}", self.state, next.state, next.edge);
    }

    self.state = next.state;
    self.mac = next.mac;
    if let Some((a, b)) = next.operands {
      self.op_a = a;
      self.op_b = b;
    }

    let wb = next.writeback;
    if let Some((sum, diff)) = wb.sum_diff {
      regs.load_sum_diff(sum, diff);
    }
    if let Some(prod) = wb.prod {
      regs.load_prod(prod);
    }
    if wb.clear_start {
      regs.clear_start();
    }
    regs.set_status(wb.busy, wb.done);
  }
}

impl Default for Engine {
  fn default() -> Self {
    Self::new()
  }
}
