//! Shared types used across the modulator firmware
//!
//! This module defines domain-specific types that enforce invariants
//! at compile time and provide type safety throughout the codebase.

/// One of the three PWM output channels
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Channel 1 (phase lead `A1`)
    Ch1,
    /// Channel 2 (phase lead `A2`)
    Ch2,
    /// Channel 3 (phase lead `A3`)
    Ch3,
}

impl Channel {
    /// All channels in hardware order
    pub const ALL: [Self; 3] = [Self::Ch1, Self::Ch2, Self::Ch3];

    /// Zero-based index into per-channel arrays
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Ch1 => 0,
            Self::Ch2 => 1,
            Self::Ch3 => 2,
        }
    }

    /// Channel selected by a protocol digit (`1`, `2`, or `3`)
    #[must_use]
    pub const fn from_digit(digit: char) -> Option<Self> {
        match digit {
            '1' => Some(Self::Ch1),
            '2' => Some(Self::Ch2),
            '3' => Some(Self::Ch3),
            _ => None,
        }
    }

    /// One-based channel number
    #[must_use]
    pub const fn number(self) -> u8 {
        self.index() as u8 + 1
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Channel {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "CH{}", self.number());
    }
}

/// Compare-register edge convention.
///
/// Historically the compare value was computed as `duty * period` on one
/// hardware revision and `(1 - duty) * period` on the next. The convention
/// is now a single crate-wide sign ([`crate::config::COMPARE_POLARITY`]);
/// mixing conventions across channels corrupts their relative phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Polarity {
    /// Output is set above the compare threshold: `compare = duty * period`
    ActiveHigh,
    /// Output is set below the compare threshold: `compare = (1 - duty) * period`
    ActiveLow,
}

#[cfg(feature = "embedded")]
impl defmt::Format for Polarity {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::ActiveHigh => defmt::write!(f, "active-high"),
            Self::ActiveLow => defmt::write!(f, "active-low"),
        }
    }
}
