//! Application service: the hexagonal core.
//!
//! [`MonitorService`] owns the shared [`MonitorContext`], the command
//! interpreter and the sampling pipeline.  One call to [`poll`] is one
//! iteration of the cooperative loop:
//!
//! ```text
//!  ByteSource ──▶ ┌──────────────────────────┐ ──▶ ByteSink
//!                 │      MonitorService       │
//!      Sensor ──▶ │ interpreter · pipeline    │ ──▶ BlinkIndicator
//!                 └──────────────────────────┘ ──▶ ResetPort
//! ```
//!
//! [`poll`]: MonitorService::poll

use log::{debug, info, warn};

use crate::board::BoardInfo;
use crate::calibration::CalibrationSet;
use crate::config::MonitorConfig;
use crate::context::MonitorContext;
use crate::protocol::record::{HELP_LINES, RESTART_NOTICE, Record, STARTUP_BANNER};
use crate::sampling::{PipelineStats, SamplingPipeline};

use super::commands::{Command, CommandInterpreter, InterpreterStats};
use super::ports::{BlinkIndicator, ByteSink, ByteSource, ResetPort, Sensor};

/// Sampling ticks between diagnostic counter dumps.
const STATS_LOG_TICKS: u32 = 60;

/// What the loop should do after an iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    Continue,
    /// A restart was requested and the reset port returned.
    Restarting,
}

/// The application service orchestrates all domain logic.
pub struct MonitorService {
    ctx: MonitorContext,
    interpreter: CommandInterpreter,
    pipeline: SamplingPipeline,
    board: BoardInfo,
}

impl MonitorService {
    pub fn new(config: &MonitorConfig) -> Self {
        Self {
            ctx: MonitorContext::new(config),
            interpreter: CommandInterpreter::new(),
            pipeline: SamplingPipeline::new(config),
            board: BoardInfo::current(),
        }
    }

    /// Override the identity reported by `d`.
    pub fn with_board(mut self, board: BoardInfo) -> Self {
        self.board = board;
        self
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Announce boot on the host link.
    pub fn start(&mut self, serial: &mut impl ByteSink) {
        write_text(serial, STARTUP_BANNER);
        info!("monitor started (v{}, built {})", self.board.version, self.board.date);
    }

    // ── Per-iteration orchestration ───────────────────────────

    /// Run one loop iteration at monotonic time `now_ms`.
    ///
    /// Drains exactly the bytes `serial` reports available on entry, then
    /// runs one sampling tick if the interval has elapsed and sampling is
    /// not paused.
    pub fn poll(
        &mut self,
        now_ms: u64,
        serial: &mut (impl ByteSource + ByteSink),
        hw: &mut (impl Sensor + BlinkIndicator + ResetPort),
    ) -> PollOutcome {
        let pending = serial.available();
        for _ in 0..pending {
            let Some(byte) = serial.read_byte() else {
                break;
            };
            if let Some(cmd) = self.interpreter.feed(byte) {
                if self.handle_command(cmd, &mut *serial, &mut *hw) == PollOutcome::Restarting {
                    return PollOutcome::Restarting;
                }
            }
        }

        if self.pipeline.is_due(now_ms, &self.ctx.run) {
            if let Some(reading) = self.pipeline.tick(now_ms, &mut self.ctx, &mut *hw) {
                emit(serial, &Record::data(&reading));
            }
            let stats = self.pipeline.stats();
            if stats.ticks % STATS_LOG_TICKS == 0 {
                debug!("pipeline {:?}; interpreter {:?}", stats, self.interpreter.stats());
            }
        }

        PollOutcome::Continue
    }

    // ── Command handling ──────────────────────────────────────

    /// Apply one decoded command and write its response.
    pub fn handle_command(
        &mut self,
        cmd: Command,
        serial: &mut impl ByteSink,
        reset: &mut impl ResetPort,
    ) -> PollOutcome {
        let cal = &mut self.ctx.calibration;
        match cmd {
            Command::ReportCalibration => emit(serial, &Record::coefficients(cal)),
            Command::SetVoltageFactor(v) => {
                cal.voltage_factor = v;
                info!("voltage factor set to {:.3}", v);
                emit(serial, &Record::voltage_coefficient(cal));
            }
            Command::SetPowerFactorFactor(v) => {
                cal.power_factor_factor = v;
                info!("power-factor factor set to {:.3}", v);
                emit(serial, &Record::power_factor_coefficient(cal));
            }
            Command::SetCurrentFactor(v) => {
                cal.current_factor = v;
                info!("current factor set to {:.3}", v);
                emit(serial, &Record::current_coefficient(cal));
            }
            Command::SetCalibration(update) => {
                cal.apply(&update);
                info!("calibration set to {:?}", cal);
                emit(serial, &Record::coefficients(cal));
            }
            Command::Help => {
                for line in HELP_LINES {
                    write_text(serial, line);
                }
            }
            Command::BoardInfo => emit(serial, &Record::info(&self.board)),
            Command::TogglePause => {
                let paused = self.ctx.run.toggle_pause();
                info!("sampling {}", if paused { "paused" } else { "resumed" });
            }
            Command::Restart => {
                write_text(serial, RESTART_NOTICE);
                if let Err(e) = serial.flush() {
                    warn!("flush before restart failed: {}", e);
                }
                warn!("restart requested by host");
                reset.restart();
                return PollOutcome::Restarting;
            }
        }
        PollOutcome::Continue
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn context(&self) -> &MonitorContext {
        &self.ctx
    }

    pub fn calibration(&self) -> CalibrationSet {
        self.ctx.calibration
    }

    pub fn is_paused(&self) -> bool {
        self.ctx.run.paused
    }

    pub fn pipeline_stats(&self) -> PipelineStats {
        self.pipeline.stats()
    }

    pub fn interpreter_stats(&self) -> InterpreterStats {
        self.interpreter.stats()
    }
}

// ── Output helpers ────────────────────────────────────────────

/// Write a record line.  Output failures are logged, never propagated.
fn emit(serial: &mut impl ByteSink, record: &Record) {
    match record.to_line() {
        Ok(line) => write_bytes(serial, line.as_bytes()),
        Err(e) => warn!("dropping {:?}: {}", record, e),
    }
}

fn write_text(serial: &mut impl ByteSink, text: &str) {
    write_bytes(serial, text.as_bytes());
    write_bytes(serial, b"\n");
}

fn write_bytes(serial: &mut impl ByteSink, bytes: &[u8]) {
    if let Err(e) = serial.write_all(bytes) {
        warn!("serial write failed: {}", e);
    }
}
