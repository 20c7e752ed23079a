//! Sampling pipeline: sensor read, fallback, calibration, plausibility.
//!
//! ```text
//!  Sensor ──▶ fallback ──▶ calibration ──▶ plausibility ──▶ Reading
//!  (V, I, f)  (per channel)  (V, I only)      filter          or nothing
//! ```
//!
//! A sensor failure never aborts a tick.  It degrades to the last good
//! value, then to zero; a reading that fails the filter is simply not
//! emitted.

pub mod fallback;
pub mod filter;

use log::{debug, trace};

use crate::app::ports::{BlinkIndicator, Sensor};
use crate::config::{FallbackPolicy, MonitorConfig};
use crate::context::{MonitorContext, RunState};
use fallback::{Channel, Resolved};
use filter::PlausibilityFilter;

/// One accepted, calibrated measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub voltage: f32,
    pub current: f32,
    pub frequency: f32,
}

/// Running counters, for diagnostics only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    pub ticks: u32,
    pub emitted: u32,
    pub rejected: u32,
    /// Channel reads replaced by a previous good value.
    pub fallback_substitutions: u32,
    /// Channel reads degraded to zero.
    pub zeroed: u32,
}

pub struct SamplingPipeline {
    interval_ms: u64,
    policy: FallbackPolicy,
    window: u32,
    filter: PlausibilityFilter,
    stats: PipelineStats,
}

impl SamplingPipeline {
    pub fn new(config: &MonitorConfig) -> Self {
        Self {
            interval_ms: config.sample_interval_ms,
            policy: config.fallback_policy,
            window: config.fallback_window,
            filter: PlausibilityFilter::new(config),
            stats: PipelineStats::default(),
        }
    }

    /// Whether a tick should run at `now_ms`.
    pub fn is_due(&self, now_ms: u64, run: &RunState) -> bool {
        !run.paused && now_ms.saturating_sub(run.last_sample_ms) >= self.interval_ms
    }

    /// Run one sampling tick.
    ///
    /// Stamps the tick time and toggles the indicator whether or not a
    /// reading comes out of it.  Calibration and pause state are only read.
    ///
    /// `hw` provides both the sensor and the indicator, which on the board
    /// are one peripheral bundle.
    pub fn tick(
        &mut self,
        now_ms: u64,
        ctx: &mut MonitorContext,
        hw: &mut (impl Sensor + BlinkIndicator),
    ) -> Option<Reading> {
        ctx.run.last_sample_ms = now_ms;
        hw.toggle();
        self.stats.ticks = self.stats.ticks.wrapping_add(1);

        // Voltage first: under the shared policy its counter gates the rest.
        let voltage = self.resolve(ctx, Channel::Voltage, hw.read_voltage());
        let current = self.resolve(ctx, Channel::Current, hw.read_current());
        let frequency = self.resolve(ctx, Channel::Frequency, hw.read_frequency());

        // Power-factor calibration is not applied.
        let reading = Reading {
            voltage: ctx.calibration.scale_voltage(voltage),
            current: ctx.calibration.scale_current(current),
            frequency,
        };

        match self.filter.check(&reading) {
            Ok(()) => {
                self.stats.emitted = self.stats.emitted.wrapping_add(1);
                trace!("reading accepted: {:?}", reading);
                Some(reading)
            }
            Err(reason) => {
                self.stats.rejected = self.stats.rejected.wrapping_add(1);
                debug!(
                    "reading dropped ({}): V={:.3} I={:.3} f={:.3}",
                    reason, reading.voltage, reading.current, reading.frequency
                );
                None
            }
        }
    }

    pub fn stats(&self) -> PipelineStats {
        self.stats
    }

    fn resolve(&mut self, ctx: &mut MonitorContext, channel: Channel, sample: Option<f32>) -> f32 {
        let sample = sample.filter(|v| v.is_finite());
        let resolved = ctx.fallback.resolve(channel, sample, self.policy, self.window);
        match resolved {
            Resolved::Fresh(_) => {}
            Resolved::Substituted(v) => {
                self.stats.fallback_substitutions = self.stats.fallback_substitutions.wrapping_add(1);
                debug!("{:?} invalid, using last good value {:.3}", channel, v);
            }
            Resolved::Zeroed => {
                self.stats.zeroed = self.stats.zeroed.wrapping_add(1);
                debug!("{:?} invalid, fallback exhausted", channel);
            }
        }
        resolved.value()
    }
}
