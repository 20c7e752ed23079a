//! System configuration parameters
//!
//! Every tunable constant of the sampling pipeline and command protocol.
//! Nothing is persisted; a restart returns to [`MonitorConfig::default()`]
//! (or whatever the bootstrap loaded from its config file).

use serde::{Deserialize, Serialize};

use crate::calibration::CalibrationSet;
use crate::error::{Error, Result};

/// Minimum elapsed time between two sampling ticks (milliseconds).
pub const SAMPLE_INTERVAL_MS: u64 = 999;

/// Upper plausibility bound for calibrated voltage (volts).
pub const MAX_VOLTAGE: f32 = 400.0;

/// Upper plausibility bound for calibrated current (amperes).
pub const MAX_CURRENT: f32 = 100.0;

/// Frequency band enforced by an earlier firmware variant (hertz).
/// Not applied unless selected through [`MonitorConfig::frequency_bounds`].
pub const LEGACY_FREQUENCY_BOUNDS: (f32, f32) = (45.0, 65.0);

/// Consecutive invalid reads after which fallback degrades to zero.
pub const FALLBACK_WINDOW: u32 = 2;

/// Line buffer capacity including the terminator slot.
pub const LINE_CAPACITY: usize = 20;

/// How invalid-read counters gate the fallback of each channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Only the voltage channel counts invalid reads, and that one counter
    /// gates fallback for voltage, current and frequency alike.
    #[default]
    SharedVoltageCounter,
    /// Each channel counts its own invalid reads.
    PerChannel,
}

/// Core monitor configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    // --- Timing ---
    /// Sampling cadence (milliseconds)
    pub sample_interval_ms: u64,

    // --- Plausibility ---
    /// Maximum accepted calibrated voltage
    pub max_voltage: f32,
    /// Maximum accepted calibrated current
    pub max_current: f32,
    /// Optional inclusive frequency band; `None` leaves frequency unchecked
    pub frequency_bounds: Option<(f32, f32)>,

    // --- Fallback ---
    /// Invalid reads tolerated before a channel degrades to zero
    pub fallback_window: u32,
    pub fallback_policy: FallbackPolicy,

    // --- Calibration ---
    /// Calibration in effect after boot
    pub default_calibration: CalibrationSet,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            sample_interval_ms: SAMPLE_INTERVAL_MS,
            max_voltage: MAX_VOLTAGE,
            max_current: MAX_CURRENT,
            frequency_bounds: None,
            fallback_window: FALLBACK_WINDOW,
            fallback_policy: FallbackPolicy::SharedVoltageCounter,
            default_calibration: CalibrationSet::default(),
        }
    }
}

impl MonitorConfig {
    /// Reject values that would make the plausibility filter meaningless.
    ///
    /// Out-of-range values are rejected, never clamped.
    pub fn validate(&self) -> Result<()> {
        if self.sample_interval_ms == 0 {
            return Err(Error::Config("sample_interval_ms must be non-zero"));
        }
        if !self.max_voltage.is_finite() || self.max_voltage <= 0.0 {
            return Err(Error::Config("max_voltage must be positive and finite"));
        }
        if !self.max_current.is_finite() || self.max_current <= 0.0 {
            return Err(Error::Config("max_current must be positive and finite"));
        }
        if let Some((lo, hi)) = self.frequency_bounds {
            if !lo.is_finite() || !hi.is_finite() || lo < 0.0 || lo > hi {
                return Err(Error::Config("frequency_bounds must be an ordered, finite band"));
            }
        }
        if self.fallback_window == 0 {
            return Err(Error::Config("fallback_window must be non-zero"));
        }
        if !self.default_calibration.is_finite() {
            return Err(Error::Config("default_calibration factors must be finite"));
        }
        Ok(())
    }

    /// Configuration of the earlier firmware variant that bounded frequency.
    pub fn with_legacy_frequency_bounds(mut self) -> Self {
        self.frequency_bounds = Some(LEGACY_FREQUENCY_BOUNDS);
        self
    }
}
