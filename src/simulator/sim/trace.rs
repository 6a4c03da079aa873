use crate::top::MatrixAccel;
use serde_json::json;
use std::fs::File;
use std::io::{BufWriter, Result, Write};
use std::path::Path;

/// Per-cycle JSON-lines trace of the peripheral's control state
pub struct TraceWriter<W: Write = BufWriter<File>> {
  writer: W,
}

impl TraceWriter {
  pub fn create(path: &Path) -> Result<Self> {
    Ok(Self::new(BufWriter::new(File::create(path)?)))
  }
}

impl<W: Write> TraceWriter<W> {
  pub fn new(writer: W) -> Self {
    Self { writer }
  }

  /// Append one entry describing the state committed by the last edge.
  pub fn record(&mut self, accel: &MatrixAccel) -> Result<()> {
    let entry = json!({
      "cycle": accel.cycles(),
      "state": accel.state().to_string(),
      "k": accel.step(),
      "busy": accel.regs.busy(),
      "done": accel.regs.done(),
    });
    writeln!(self.writer, "{}", entry)
  }

  pub fn flush(&mut self) -> Result<()> {
    self.writer.flush()
  }

  pub fn into_inner(self) -> W {
    self.writer
  }
}
