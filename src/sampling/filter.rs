//! Post-calibration plausibility filter.

use core::fmt;

use crate::config::MonitorConfig;

use super::Reading;

/// Why a reading was suppressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    VoltageOutOfRange,
    CurrentOutOfRange,
    /// Exactly one of voltage/current is zero while the other is positive.
    HalfReading,
    FrequencyOutOfRange,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VoltageOutOfRange => write!(f, "voltage out of range"),
            Self::CurrentOutOfRange => write!(f, "current out of range"),
            Self::HalfReading => write!(f, "half reading"),
            Self::FrequencyOutOfRange => write!(f, "frequency out of range"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlausibilityFilter {
    max_voltage: f32,
    max_current: f32,
    frequency_bounds: Option<(f32, f32)>,
}

impl PlausibilityFilter {
    pub fn new(config: &MonitorConfig) -> Self {
        Self {
            max_voltage: config.max_voltage,
            max_current: config.max_current,
            frequency_bounds: config.frequency_bounds,
        }
    }

    /// Bounds are inclusive.  Both voltage and current at zero pass.
    pub fn check(&self, reading: &Reading) -> Result<(), Rejection> {
        if !(0.0..=self.max_voltage).contains(&reading.voltage) {
            return Err(Rejection::VoltageOutOfRange);
        }
        if !(0.0..=self.max_current).contains(&reading.current) {
            return Err(Rejection::CurrentOutOfRange);
        }
        if (reading.voltage == 0.0) != (reading.current == 0.0) {
            return Err(Rejection::HalfReading);
        }
        if let Some((lo, hi)) = self.frequency_bounds {
            if !(lo..=hi).contains(&reading.frequency) {
                return Err(Rejection::FrequencyOutOfRange);
            }
        }
        Ok(())
    }
}
