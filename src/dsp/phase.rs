//! Phase Generators
//!
//! One generator per channel, invoked from that channel's carrier-timer
//! zero-crossing interrupt. The accumulated angle is owned exclusively by
//! the interrupt context; nothing outside this module can read or reset
//! it. A configuration change does not realign accumulators — the new
//! increment simply applies from the next tick, with a phase jump if the
//! modulation frequency moved.

use core::f32::consts::PI;

use crate::config;
use crate::dsp::waveform;
use crate::params::WaveformParams;
use crate::types::Channel;

const TWO_PI: f32 = 2.0 * PI;

/// Per-channel phase accumulator and compare-value pipeline
///
/// `tick` must complete within one carrier period; it never blocks and
/// never allocates.
#[derive(Clone, Copy, Debug)]
pub struct PhaseGenerator {
    /// Which channel's phase lead applies
    channel: Channel,
    /// Accumulated angle in radians, starts at 0
    angle: f32,
}

impl PhaseGenerator {
    /// Create a generator for one channel with the angle at zero
    #[must_use]
    pub const fn new(channel: Channel) -> Self {
        Self {
            channel,
            angle: 0.0,
        }
    }

    /// The channel this generator drives
    #[must_use]
    pub const fn channel(&self) -> Channel {
        self.channel
    }

    /// Current accumulated angle in radians
    #[must_use]
    pub const fn angle(&self) -> f32 {
        self.angle
    }

    /// Advance one carrier period and produce the next compare value
    ///
    /// The angle increment is recomputed from the live parameters on every
    /// invocation, so a committed change is reflected on the very next
    /// tick. A modulation frequency of 0 Hz yields a zero increment
    /// through the float division and freezes the angle. The single-step
    /// wrap assumes `modulation_hz < carrier_hz`, which the validated
    /// ranges guarantee; a carrier/modulation ratio that is not an integer
    /// drifts slightly at each wrap rather than erroring.
    pub fn tick(&mut self, params: &WaveformParams) -> u16 {
        let increment = TWO_PI / (params.carrier_hz() / params.modulation_hz());

        if self.angle > TWO_PI {
            self.angle -= TWO_PI;
        }

        let duty = waveform::duty_cycle(
            self.angle,
            params.phase_lead_deg(self.channel),
            params.depth(),
            params.offset(),
        );
        let compare =
            waveform::compare_value(duty, params.timer_period(), config::COMPARE_POLARITY);

        self.angle += increment;
        compare
    }
}
