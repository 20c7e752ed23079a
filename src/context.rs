//! Shared mutable state of the monitor loop.
//!
//! The command interpreter and the sampling pipeline both operate on one
//! [`MonitorContext`] owned by the service and passed by reference into
//! each entry point.  Everything runs on the single cooperative loop, so no
//! locking is involved.

use crate::calibration::CalibrationSet;
use crate::config::MonitorConfig;
use crate::sampling::fallback::FallbackState;

/// Loop control state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunState {
    /// Sampling suspended by the `w` command.
    pub paused: bool,
    /// Monotonic timestamp (ms) of the last sampling tick.
    pub last_sample_ms: u64,
}

impl RunState {
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }
}

#[derive(Debug, Clone)]
pub struct MonitorContext {
    pub calibration: CalibrationSet,
    pub fallback: FallbackState,
    pub run: RunState,
}

impl MonitorContext {
    pub fn new(config: &MonitorConfig) -> Self {
        Self {
            calibration: config.default_calibration,
            fallback: FallbackState::default(),
            run: RunState::default(),
        }
    }
}
