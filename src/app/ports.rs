//! Port traits: the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ MonitorService (domain)
//! ```
//!
//! Driven adapters (sensor, serial transport, indicator, reset) implement
//! these traits.  The [`MonitorService`](super::service::MonitorService)
//! consumes them via generics, so the domain core never touches hardware
//! directly and every path is testable with mocks.

use crate::error::TransportError;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Voltage / current / frequency sensor.
///
/// Each read returns `None` when the sensor reports an invalid value.
/// Reads are synchronous and expected to return promptly.
pub trait Sensor {
    fn read_voltage(&mut self) -> Option<f32>;
    fn read_current(&mut self) -> Option<f32>;
    fn read_frequency(&mut self) -> Option<f32>;
}

/// Map a driver value that signals failure with NaN into the port's form.
#[inline]
pub fn from_driver(value: f32) -> Option<f32> {
    value.is_finite().then_some(value)
}

// ───────────────────────────────────────────────────────────────
// Serial transport ports (host ↔ domain)
// ───────────────────────────────────────────────────────────────

/// Non-blocking inbound byte stream.
pub trait ByteSource {
    /// Number of bytes that can be read right now without waiting.
    fn available(&mut self) -> usize;

    /// Next buffered byte, if any.  Never blocks.
    fn read_byte(&mut self) -> Option<u8>;
}

/// Outbound byte stream.
pub trait ByteSink {
    fn write_all(&mut self, bytes: &[u8]) -> Result<(), TransportError>;

    fn flush(&mut self) -> Result<(), TransportError> {
        Ok(())
    }
}

// ───────────────────────────────────────────────────────────────
// Board ports (domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Heartbeat indicator, toggled once per sampling tick.
pub trait BlinkIndicator {
    fn toggle(&mut self);
}

/// Platform restart.
///
/// Real implementations do not return.  Test doubles record the call and
/// return, after which the service stops processing the current iteration.
pub trait ResetPort {
    fn restart(&mut self);
}

/// Monotonic millisecond clock.
pub trait Clock {
    fn now_ms(&self) -> u64;
}
