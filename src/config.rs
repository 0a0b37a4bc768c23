//! System configuration and hardware constants
//!
//! This module defines compile-time constants for the modulator hardware.
//! All pin mappings, clock frequencies, protocol limits, and default
//! waveform parameters are centralized here.

use crate::types::Polarity;

/// System clock frequency.
///
/// The PLL is configured for 90 MHz so that the 16-bit time-base counter
/// resolves the full carrier range: at the 687 Hz floor the up/down period
/// is `0.5 * 90e6 / 687 = 65502`, just inside a 16-bit counter.
pub const SYSTEM_CLOCK_HZ: u32 = 90_000_000;

/// PWM time-base clock (no prescaler between system clock and the timers)
pub const TIMER_CLOCK_HZ: u32 = SYSTEM_CLOCK_HZ;

/// Number of PWM output channels
pub const NUM_CHANNELS: usize = 3;

/// Compare-register polarity, applied identically to all three channels.
///
/// The relative phase between channels is only meaningful if every channel
/// uses the same edge convention.
pub const COMPARE_POLARITY: Polarity = Polarity::ActiveLow;

/// Serial console baud rate
pub const CONSOLE_BAUD: u32 = 9_600;

/// Command line buffer capacity in bytes
pub const LINE_BUFFER_SIZE: usize = 100;

/// Maximum characters in one numeric token (sign, digits, decimal point)
pub const NUMBER_TOKEN_LEN: usize = 8;

/// Byte value that terminates a command line
pub const LINE_TERMINATOR: u8 = 0x00;

/// Default carrier frequency in Hz
pub const DEFAULT_CARRIER_HZ: u32 = 2_500;

/// Default modulation frequency in Hz
pub const DEFAULT_MODULATION_HZ: u32 = 60;

/// Default modulation depth
pub const DEFAULT_DEPTH: f32 = 1.0;

/// Default duty-cycle offset
pub const DEFAULT_OFFSET: f32 = 0.0;

/// Default per-channel phase leads in degrees (balanced three-phase set)
pub const DEFAULT_PHASE_LEAD_DEG: [f32; 3] = [0.0, 120.0, 240.0];

/// Pin assignments for GPIO
pub mod pins {
    //! GPIO pin assignments matching the schematic

    /// Status LED (directly on MCU)
    pub const LED_STATUS: &str = "PA5";

    /// PWM channel 1 output (TIM1 CH1)
    pub const PWM_CH1: &str = "PA8";

    /// PWM channel 2 output (TIM1 CH2)
    pub const PWM_CH2: &str = "PA9";

    /// PWM channel 3 output (TIM1 CH3)
    pub const PWM_CH3: &str = "PA10";

    /// Console UART TX
    pub const CONSOLE_TX: &str = "PA2";

    /// Console UART RX
    pub const CONSOLE_RX: &str = "PA3";
}

/// Timer assignments
pub mod timers {
    //! Hardware timer assignments

    /// Carrier PWM timer (advanced control, up/down counting)
    pub const CARRIER_PWM: u8 = 1;

    /// General purpose timer for delays
    pub const GENERAL: u8 = 6;
}
