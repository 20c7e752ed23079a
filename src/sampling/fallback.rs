//! Previous-value fallback for invalid sensor reads.
//!
//! A channel that returns "invalid" is replaced by its last good value
//! while the gating counter stays below the fallback window; past the
//! window the channel reads as zero.
//!
//! Under [`FallbackPolicy::SharedVoltageCounter`] only the voltage channel
//! counts invalid reads (and only a valid voltage read clears the count),
//! yet that single counter gates all three channels.  Voltage is resolved
//! first in every tick, so current and frequency see the updated count.

use crate::config::FallbackPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Voltage,
    Current,
    Frequency,
}

/// Per-channel fallback memory.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ChannelFallback {
    pub last_good: f32,
    pub consecutive_invalid: u32,
}

/// How a channel's effective value was obtained this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolved {
    /// The sensor returned a valid value.
    Fresh(f32),
    /// Invalid read, last good value substituted.
    Substituted(f32),
    /// Invalid read with the fallback window exhausted.
    Zeroed,
}

impl Resolved {
    pub fn value(self) -> f32 {
        match self {
            Self::Fresh(v) | Self::Substituted(v) => v,
            Self::Zeroed => 0.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FallbackState {
    pub voltage: ChannelFallback,
    pub current: ChannelFallback,
    pub frequency: ChannelFallback,
}

impl FallbackState {
    pub fn channel(&self, channel: Channel) -> &ChannelFallback {
        match channel {
            Channel::Voltage => &self.voltage,
            Channel::Current => &self.current,
            Channel::Frequency => &self.frequency,
        }
    }

    fn channel_mut(&mut self, channel: Channel) -> &mut ChannelFallback {
        match channel {
            Channel::Voltage => &mut self.voltage,
            Channel::Current => &mut self.current,
            Channel::Frequency => &mut self.frequency,
        }
    }

    /// Resolve one channel's read into its effective (uncalibrated) value.
    pub fn resolve(
        &mut self,
        channel: Channel,
        sample: Option<f32>,
        policy: FallbackPolicy,
        window: u32,
    ) -> Resolved {
        let owner = counter_owner(channel, policy);

        match sample {
            Some(value) => {
                let slot = self.channel_mut(channel);
                slot.last_good = value;
                if owner == channel {
                    slot.consecutive_invalid = 0;
                }
                Resolved::Fresh(value)
            }
            None => {
                if owner == channel {
                    let slot = self.channel_mut(channel);
                    slot.consecutive_invalid = slot.consecutive_invalid.saturating_add(1);
                }
                if self.channel(owner).consecutive_invalid < window {
                    Resolved::Substituted(self.channel(channel).last_good)
                } else {
                    Resolved::Zeroed
                }
            }
        }
    }
}

/// Channel whose counter gates `channel` under `policy`.
fn counter_owner(channel: Channel, policy: FallbackPolicy) -> Channel {
    match policy {
        FallbackPolicy::SharedVoltageCounter => Channel::Voltage,
        FallbackPolicy::PerChannel => channel,
    }
}
