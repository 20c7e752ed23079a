//! Output records written to the host serial port.
//!
//! Machine-readable records are single-line flat JSON objects with a
//! `type` discriminator:
//!
//! ```text
//! {"type":"data","voltage":230.123,"current":1.500,"frequency":50.000}
//! {"type":"coefficients","voltage":0.920,"current":2.520,"powerFactor":1.000}
//! {"type":"info","version":"3.0.1","date":"2024-05-01 12:00"}
//! ```
//!
//! Every float is printed fixed-point with three decimals.  Help text and
//! the restart notice are plain human-readable lines.

use core::fmt::Write as _;

use serde::ser::Error as _;
use serde::{Serialize, Serializer};
use serde_json::value::RawValue;

use crate::board::BoardInfo;
use crate::calibration::CalibrationSet;
use crate::error::{Error, Result};
use crate::sampling::Reading;

/// Emitted once at boot.
pub const STARTUP_BANNER: &str = "Starting...";

/// Emitted right before a commanded restart.
pub const RESTART_NOTICE: &str = "Resetting...";

/// Response to `h`.
pub const HELP_LINES: &[&str] = &[
    "Usage",
    "i - calibrations values: voltage:current:power factor",
    "v - voltage calibration",
    "p - power factor calibration",
    "c - current calibration",
    "s - set calibrations: voltage:current:power factor",
    "d - build date",
    "w - pause monitor",
    "r - reset board",
];

/// A float that serialises as a fixed-point JSON number with three decimals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fixed3(pub f32);

impl Serialize for Fixed3 {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        if !self.0.is_finite() {
            return Err(S::Error::custom("non-finite value"));
        }
        // -0.0 would print as "-0.000"
        let value = if self.0 == 0.0 { 0.0 } else { self.0 };
        // f32::MAX with three decimals is 43 characters
        let mut text = heapless::String::<48>::new();
        write!(text, "{:.3}", value).map_err(|_| S::Error::custom("number too long"))?;
        let raw = RawValue::from_string(text.as_str().into()).map_err(S::Error::custom)?;
        raw.serialize(serializer)
    }
}

/// Structured output records.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Record {
    Data {
        voltage: Fixed3,
        current: Fixed3,
        frequency: Fixed3,
    },
    Coefficients {
        #[serde(skip_serializing_if = "Option::is_none")]
        voltage: Option<Fixed3>,
        #[serde(skip_serializing_if = "Option::is_none")]
        current: Option<Fixed3>,
        #[serde(rename = "powerFactor", skip_serializing_if = "Option::is_none")]
        power_factor: Option<Fixed3>,
    },
    Info {
        version: &'static str,
        date: &'static str,
    },
}

impl Record {
    pub fn data(reading: &Reading) -> Self {
        Self::Data {
            voltage: Fixed3(reading.voltage),
            current: Fixed3(reading.current),
            frequency: Fixed3(reading.frequency),
        }
    }

    /// All three calibration factors.
    pub fn coefficients(cal: &CalibrationSet) -> Self {
        Self::Coefficients {
            voltage: Some(Fixed3(cal.voltage_factor)),
            current: Some(Fixed3(cal.current_factor)),
            power_factor: Some(Fixed3(cal.power_factor_factor)),
        }
    }

    pub fn voltage_coefficient(cal: &CalibrationSet) -> Self {
        Self::Coefficients {
            voltage: Some(Fixed3(cal.voltage_factor)),
            current: None,
            power_factor: None,
        }
    }

    pub fn current_coefficient(cal: &CalibrationSet) -> Self {
        Self::Coefficients {
            voltage: None,
            current: Some(Fixed3(cal.current_factor)),
            power_factor: None,
        }
    }

    pub fn power_factor_coefficient(cal: &CalibrationSet) -> Self {
        Self::Coefficients {
            voltage: None,
            current: None,
            power_factor: Some(Fixed3(cal.power_factor_factor)),
        }
    }

    pub fn info(board: &BoardInfo) -> Self {
        Self::Info {
            version: board.version,
            date: board.date,
        }
    }

    /// Encode as one newline-terminated JSON line.
    pub fn to_line(&self) -> Result<String> {
        let mut line =
            serde_json::to_string(self).map_err(|_| Error::Encode("record serialisation failed"))?;
        line.push('\n');
        Ok(line)
    }
}
