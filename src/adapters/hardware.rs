//! Board adapter: bridges the peripherals to domain port traits.
//!
//! Owns the sensor, the heartbeat LED and the reset primitive, exposing
//! them through [`Sensor`], [`BlinkIndicator`] and [`ResetPort`] as one
//! value, so the service can borrow the whole board once per iteration.

use embedded_hal::digital::OutputPin;

use crate::app::ports::{BlinkIndicator, ResetPort, Sensor};

use super::indicator::LedIndicator;

pub struct BoardAdapter<S, P, R>
where
    S: Sensor,
    P: OutputPin,
    R: ResetPort,
{
    sensor: S,
    led: LedIndicator<P>,
    reset: R,
}

impl<S, P, R> BoardAdapter<S, P, R>
where
    S: Sensor,
    P: OutputPin,
    R: ResetPort,
{
    pub fn new(sensor: S, led: LedIndicator<P>, reset: R) -> Self {
        Self { sensor, led, reset }
    }

    pub fn led(&self) -> &LedIndicator<P> {
        &self.led
    }
}

// ── Sensor implementation ─────────────────────────────────────

impl<S: Sensor, P: OutputPin, R: ResetPort> Sensor for BoardAdapter<S, P, R> {
    fn read_voltage(&mut self) -> Option<f32> {
        self.sensor.read_voltage()
    }

    fn read_current(&mut self) -> Option<f32> {
        self.sensor.read_current()
    }

    fn read_frequency(&mut self) -> Option<f32> {
        self.sensor.read_frequency()
    }
}

// ── Indicator / reset implementations ─────────────────────────

impl<S: Sensor, P: OutputPin, R: ResetPort> BlinkIndicator for BoardAdapter<S, P, R> {
    fn toggle(&mut self) {
        self.led.toggle();
    }
}

impl<S: Sensor, P: OutputPin, R: ResetPort> ResetPort for BoardAdapter<S, P, R> {
    fn restart(&mut self) {
        self.reset.restart();
    }
}
