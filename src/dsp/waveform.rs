//! Signal Model
//!
//! Pure math mapping a phase angle and a parameter set to a compare value
//! for one channel. No state, no clamping: keeping the result inside
//! `[0, timer_period]` is the offset/modulation-depth invariant's job
//! upstream; an out-of-range compare value is undefined hardware behavior,
//! not a runtime-reported error.

use core::f32::consts::PI;
#[cfg(feature = "embedded")]
use micromath::F32Ext;

use crate::types::Polarity;

/// Degrees-to-radians factor for phase leads
const DEG_TO_RAD: f32 = PI / 180.0;

/// Sinusoidally modulated duty cycle at one phase angle
///
/// `duty = (sin(angle + lead) * depth + 1) * 0.5 - offset`, nominally in
/// `[0, 1]` for parameter sets satisfying `|offset| <= (1 - depth) / 2`.
#[must_use]
pub fn duty_cycle(angle_rad: f32, phase_lead_deg: f32, depth: f32, offset: f32) -> f32 {
    let angle = angle_rad + phase_lead_deg * DEG_TO_RAD;
    (angle.sin() * depth + 1.0) * 0.5 - offset
}

/// Counter compare threshold for a duty cycle
///
/// The polarity encodes the edge convention once for the whole platform;
/// every channel must use the same one or their relative phase is
/// corrupted.
#[must_use]
pub fn compare_value(duty: f32, timer_period: u16, polarity: Polarity) -> u16 {
    let fraction = match polarity {
        Polarity::ActiveHigh => duty,
        Polarity::ActiveLow => 1.0 - duty,
    };
    (fraction * f32::from(timer_period)).round() as u16
}
