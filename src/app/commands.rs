//! Inbound commands and the line-oriented command interpreter.
//!
//! Each completed line selects a [`Command`] by its first byte; the rest of
//! the line is the argument.  Unknown codes and empty lines are ignored
//! without any output.
//!
//! | Code | Argument            | Command                   |
//! |------|---------------------|---------------------------|
//! | `i`  | -                   | report calibration        |
//! | `v`  | number              | set voltage factor        |
//! | `p`  | number              | set power-factor factor   |
//! | `c`  | number              | set current factor        |
//! | `s`  | `v[:c[:pf]]`        | set several factors       |
//! | `h`  | -                   | help text                 |
//! | `d`  | -                   | board info                |
//! | `w`  | -                   | toggle pause              |
//! | `r`  | -                   | restart                   |

use log::debug;

use crate::calibration::CalibrationUpdate;
use crate::protocol::line::LineDecoder;
use crate::protocol::numeric::parse_lenient;

/// Commands the host can send to the monitor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    ReportCalibration,
    SetVoltageFactor(f32),
    SetPowerFactorFactor(f32),
    SetCurrentFactor(f32),
    SetCalibration(CalibrationUpdate),
    Help,
    BoardInfo,
    TogglePause,
    Restart,
}

impl Command {
    /// Decode a completed line (terminator stripped).
    pub fn parse(line: &[u8]) -> Option<Self> {
        let (&code, arg) = line.split_first()?;
        let cmd = match code {
            b'i' => Self::ReportCalibration,
            b'v' => Self::SetVoltageFactor(parse_lenient(arg)),
            b'p' => Self::SetPowerFactorFactor(parse_lenient(arg)),
            b'c' => Self::SetCurrentFactor(parse_lenient(arg)),
            b's' => Self::SetCalibration(parse_calibration_update(arg)),
            b'h' => Self::Help,
            b'd' => Self::BoardInfo,
            b'w' => Self::TogglePause,
            b'r' => Self::Restart,
            _ => return None,
        };
        Some(cmd)
    }
}

/// `voltage[:current[:powerFactor]]`, fields assigned in order.
///
/// Every present segment is assigned, so an empty or malformed one
/// becomes `0.0`; a bare `s` is one empty voltage segment.  Segments past
/// the third are ignored.
fn parse_calibration_update(arg: &[u8]) -> CalibrationUpdate {
    let mut update = CalibrationUpdate::default();
    for (index, segment) in arg.split(|&b| b == b':').take(3).enumerate() {
        let value = Some(parse_lenient(segment));
        match index {
            0 => update.voltage_factor = value,
            1 => update.current_factor = value,
            _ => update.power_factor_factor = value,
        }
    }
    update
}

/// Interpreter counters, for diagnostics only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InterpreterStats {
    /// Completed lines, including empty ones.
    pub lines: u32,
    pub dispatched: u32,
    /// Empty lines and unknown codes.
    pub ignored: u32,
    /// Lines discarded for exceeding the buffer.
    pub overflows: u32,
}

/// Byte-at-a-time command interpreter.
#[derive(Debug, Default)]
pub struct CommandInterpreter {
    decoder: LineDecoder,
    lines: u32,
    dispatched: u32,
    ignored: u32,
}

impl CommandInterpreter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one input byte.  Never blocks; returns a command only when
    /// `byte` completes a line that decodes to one.
    pub fn feed(&mut self, byte: u8) -> Option<Command> {
        let line = self.decoder.feed(byte)?;
        self.lines = self.lines.wrapping_add(1);

        match Command::parse(&line) {
            Some(cmd) => {
                self.dispatched = self.dispatched.wrapping_add(1);
                Some(cmd)
            }
            None => {
                if !line.is_empty() {
                    debug!("ignoring unknown command code 0x{:02x}", line[0]);
                }
                self.ignored = self.ignored.wrapping_add(1);
                None
            }
        }
    }

    pub fn stats(&self) -> InterpreterStats {
        InterpreterStats {
            lines: self.lines,
            dispatched: self.dispatched,
            ignored: self.ignored,
            overflows: self.decoder.overflows(),
        }
    }
}
