//! PWM Bank Contract
//!
//! The register-level interface the generation engine drives. The board
//! layer implements [`PwmBank`] over the advanced-control timer; the
//! library computes the values and dictates when each register may be
//! touched.
//!
//! Hardware contract: compare writes latch through a shadow register
//! (loaded at the counter zero-crossing), so a mid-period write never
//! tears the output. The period and phase registers have no such
//! guarantee, which is why [`reprogram`] is foreground-only and runs only
//! after a committed configuration change.

use crate::dsp::phase::PhaseGenerator;
use crate::params::{ConfigStore, WaveformParams};
use crate::types::Channel;

/// Writable registers of the three-channel carrier timer bank
pub trait PwmBank {
    /// Program the shared up/down counter period
    fn set_period(&mut self, period: u16);

    /// Program one channel's counter phase offset
    fn set_phase(&mut self, channel: Channel, counts: u16);

    /// Latch one channel's compare threshold (shadow-buffered)
    fn set_compare(&mut self, channel: Channel, compare: u16);
}

/// Counter phase offset for a phase lead, in counts
///
/// `counts = (lead / 360) * period`, with the lead normalized into
/// `[0, 360)` so the negative half of the accepted range maps onto the
/// counter correctly.
#[must_use]
pub fn phase_register(lead_deg: f32, period: u16) -> u16 {
    let mut lead = lead_deg % 360.0;
    if lead < 0.0 {
        lead += 360.0;
    }
    (lead / 360.0 * f32::from(period)) as u16
}

/// Reinitialize the bank from a freshly committed record
///
/// Programs the shared period, each channel's phase offset, and zeroes
/// the compare registers; the phase generators refill them from the next
/// zero-crossing on. Callable only from the foreground task, after
/// [`ConfigStore::commit`].
pub fn reprogram<B: PwmBank>(bank: &mut B, params: &WaveformParams) {
    bank.set_period(params.timer_period());
    for channel in Channel::ALL {
        bank.set_phase(
            channel,
            phase_register(params.phase_lead_deg(channel), params.timer_period()),
        );
        bank.set_compare(channel, 0);
    }
}

/// Body of one channel's zero-crossing interrupt
///
/// Snapshots the live record, advances the channel's phase generator, and
/// latches the resulting compare value. Interrupt acknowledgement stays
/// with the board-layer handler that called this.
pub fn service_zero_crossing<B: PwmBank>(
    generator: &mut PhaseGenerator,
    store: &ConfigStore,
    bank: &mut B,
) {
    let params = store.snapshot();
    let compare = generator.tick(&params);
    bank.set_compare(generator.channel(), compare);
}
