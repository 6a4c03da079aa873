use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io::{self, Result};

const HELP: &str = "Commands: Enter | t [n] tick, w <addr> <value> write, r <addr> read, \
                    s status, run drive configured operands, q quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
  Tick(u32), // Tick N times
  Write { addr: u8, value: i32 },
  Read { addr: u8 },
  Status,
  Run,
  Quit,
}

/// Parse one shell line. Empty input ticks once.
pub fn parse_command(line: &str) -> std::result::Result<Command, String> {
  let parts: Vec<&str> = line.split_whitespace().collect();
  match parts.as_slice() {
    [] => Ok(Command::Tick(1)),
    ["t"] | ["tick"] => Ok(Command::Tick(1)),
    ["t", n] | ["tick", n] => match n.parse::<u32>() {
      Ok(n) if n > 0 => Ok(Command::Tick(n)),
      Ok(_) => Err("tick count must be greater than 0".to_string()),
      Err(e) => Err(format!("invalid number '{}': {}", n, e)),
    },
    ["w", addr, value] => Ok(Command::Write {
      addr: parse_addr(addr)?,
      value: parse_value(value)?,
    }),
    ["r", addr] => Ok(Command::Read {
      addr: parse_addr(addr)?,
    }),
    ["s"] => Ok(Command::Status),
    ["run"] => Ok(Command::Run),
    ["q"] => Ok(Command::Quit),
    _ => Err(format!("unknown command '{}'. {}", line.trim(), HELP)),
  }
}

fn parse_addr(s: &str) -> std::result::Result<u8, String> {
  let parsed = match s.strip_prefix("0x") {
    Some(hex) => u8::from_str_radix(hex, 16),
    None => s.parse::<u8>(),
  };
  parsed.map_err(|e| format!("invalid address '{}': {}", s, e))
}

fn parse_value(s: &str) -> std::result::Result<i32, String> {
  let parsed = match s.strip_prefix("0x") {
    Some(hex) => u32::from_str_radix(hex, 16).map(|v| v as i32),
    None => s.parse::<i32>(),
  };
  parsed.map_err(|e| format!("invalid value '{}': {}", s, e))
}

/// Line editor for step mode
pub struct Shell {
  editor: DefaultEditor,
}

impl Shell {
  pub fn new() -> Result<Self> {
    let editor = DefaultEditor::new().map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    Ok(Self { editor })
  }

  pub fn help() -> &'static str {
    HELP
  }

  /// Read until a valid command is entered. Ctrl-C and Ctrl-D quit.
  pub fn read_command(&mut self) -> Result<Command> {
    loop {
      match self.editor.readline("(matrix-accel) ") {
        Ok(line) => {
          let trimmed = line.trim();
          if !trimmed.is_empty() {
            let _ = self.editor.add_history_entry(trimmed);
          }
          match parse_command(trimmed) {
            Ok(cmd) => return Ok(cmd),
            Err(msg) => eprintln!("Error: {}", msg),
          }
        },
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => return Ok(Command::Quit),
        Err(err) => return Err(io::Error::new(io::ErrorKind::Other, err)),
      }
    }
  }
}
