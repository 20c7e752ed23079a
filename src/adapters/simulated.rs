//! Simulated PZEM-style sensor for host runs.
//!
//! Produces a slowly wandering mains voltage, a load current that steps
//! between a few levels, and a frequency around nominal.  Every
//! `dropout_every`-th read cycle the voltage channel reports invalid,
//! which exercises the fallback path the way a flaky sensor link does.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::app::ports::{Sensor, from_driver};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationProfile {
    pub nominal_voltage: f32,
    pub nominal_frequency: f32,
    /// Load steps cycled through, in amperes (raw, before calibration).
    pub load_steps: [f32; 4],
    /// Voltage dropout period in read cycles; 0 disables dropouts.
    pub dropout_every: u32,
}

impl Default for SimulationProfile {
    fn default() -> Self {
        Self {
            nominal_voltage: 250.0,
            nominal_frequency: 50.0,
            load_steps: [0.4, 1.2, 2.0, 0.8],
            dropout_every: 17,
        }
    }
}

pub struct SimulatedSensor {
    profile: SimulationProfile,
    cycle: u32,
    rng: SmallRng,
}

impl SimulatedSensor {
    pub fn new(profile: SimulationProfile, seed: u32) -> Self {
        Self {
            profile,
            cycle: 0,
            rng: SmallRng::seed_from_u64(u64::from(seed)),
        }
    }

    /// Uniform noise in `[-1, 1)`.
    fn noise(&mut self) -> f32 {
        self.rng.gen_range(-1.0..1.0)
    }

    fn dropout(&self) -> bool {
        self.profile.dropout_every != 0 && self.cycle % self.profile.dropout_every == 0
    }
}

impl Sensor for SimulatedSensor {
    /// Starts a new read cycle.
    fn read_voltage(&mut self) -> Option<f32> {
        self.cycle = self.cycle.wrapping_add(1);
        let t = self.cycle as f32;
        let raw = if self.dropout() {
            f32::NAN
        } else {
            self.profile.nominal_voltage + 4.0 * (t * 0.05).sin() + 0.5 * self.noise()
        };
        from_driver(raw)
    }

    fn read_current(&mut self) -> Option<f32> {
        let step = (self.cycle / 30) as usize % self.profile.load_steps.len();
        let raw = self.profile.load_steps[step] + 0.02 * self.noise();
        from_driver(raw.max(0.0))
    }

    fn read_frequency(&mut self) -> Option<f32> {
        from_driver(self.profile.nominal_frequency + 0.05 * self.noise())
    }
}
