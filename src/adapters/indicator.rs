//! Heartbeat LED driven through an `embedded-hal` output pin.
//!
//! The board LED is wired active-low: the pin is driven low while the
//! indicator is "on".  On ESP-IDF any `PinDriver<_, Output>` fits; on the
//! host [`LogPin`] stands in and traces level changes.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin};
use log::{trace, warn};

use crate::app::ports::BlinkIndicator;

/// Toggling indicator over any output pin.
pub struct LedIndicator<P: OutputPin> {
    pin: P,
    on: bool,
    active_low: bool,
}

impl<P: OutputPin> LedIndicator<P> {
    /// Active-low LED, initially off.
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            on: false,
            active_low: true,
        }
    }

    pub fn active_high(mut self) -> Self {
        self.active_low = false;
        self
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    pub fn pin(&self) -> &P {
        &self.pin
    }

    fn drive(&mut self) {
        let high = self.on != self.active_low;
        let result = if high {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        if let Err(e) = result {
            warn!("indicator pin write failed: {:?}", e);
        }
    }
}

impl<P: OutputPin> BlinkIndicator for LedIndicator<P> {
    fn toggle(&mut self) {
        self.on = !self.on;
        self.drive();
    }
}

/// Host stand-in for a GPIO output.
#[derive(Debug, Default)]
pub struct LogPin {
    high: bool,
}

impl LogPin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_high(&self) -> bool {
        self.high
    }
}

impl ErrorType for LogPin {
    type Error = Infallible;
}

impl OutputPin for LogPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.high = false;
        trace!("led pin low");
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.high = true;
        trace!("led pin high");
        Ok(())
    }
}
