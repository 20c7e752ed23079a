//! Calibration factors applied by the sampling pipeline.
//!
//! Each factor is a plain multiplier on a raw channel.  The command
//! interpreter is the only writer; the pipeline only reads.

use serde::{Deserialize, Serialize};

/// Three independent multiplicative corrections.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationSet {
    pub voltage_factor: f32,
    pub current_factor: f32,
    /// Stored and reported, but the pipeline does not apply it yet.
    pub power_factor_factor: f32,
}

impl CalibrationSet {
    /// Factory calibration of the sensing board.
    pub const FACTORY: Self = Self {
        voltage_factor: 0.92,
        current_factor: 2.52,
        power_factor_factor: 1.0,
    };

    pub fn is_finite(&self) -> bool {
        self.voltage_factor.is_finite()
            && self.current_factor.is_finite()
            && self.power_factor_factor.is_finite()
    }

    /// Overwrite only the fields present in `update`.
    pub fn apply(&mut self, update: &CalibrationUpdate) {
        if let Some(v) = update.voltage_factor {
            self.voltage_factor = v;
        }
        if let Some(c) = update.current_factor {
            self.current_factor = c;
        }
        if let Some(p) = update.power_factor_factor {
            self.power_factor_factor = p;
        }
    }

    #[inline]
    pub fn scale_voltage(&self, raw: f32) -> f32 {
        raw * self.voltage_factor
    }

    #[inline]
    pub fn scale_current(&self, raw: f32) -> f32 {
        raw * self.current_factor
    }
}

impl Default for CalibrationSet {
    fn default() -> Self {
        Self::FACTORY
    }
}

/// A partial calibration change; `None` leaves the factor untouched.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CalibrationUpdate {
    pub voltage_factor: Option<f32>,
    pub current_factor: Option<f32>,
    pub power_factor_factor: Option<f32>,
}

impl CalibrationUpdate {
    pub fn is_empty(&self) -> bool {
        self.voltage_factor.is_none()
            && self.current_factor.is_none()
            && self.power_factor_factor.is_none()
    }
}
