//! Hardware Abstraction Layer
//!
//! Register-value plumbing for the carrier PWM bank and the serial
//! console. Actual peripheral bring-up (clock tree, pin muxing, timer
//! register field programming) is board-integration territory and stays
//! outside the library; these modules define the contract the core needs
//! from it.

pub mod pwm;

#[cfg(feature = "embedded")]
pub mod serial;
