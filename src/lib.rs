//! SPWM Modulator Firmware Library
//!
//! This library provides the core functionality for an STM32G474-based
//! three-phase sinusoidal PWM modulator. Three hardware PWM channels each
//! emit a sinusoidally duty-modulated carrier, phase-offset from one
//! another; an operator edits frequency, modulation depth, offset, and
//! per-channel phase over a line-oriented serial protocol with an explicit
//! confirm/reject handshake before anything takes effect.
//!
//! # Architecture
//!
//! The firmware is organized in layers:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    OPERATOR LAYER                            │
//! │  Command Session  │  Line Parser  │  Confirmation Dialogue   │
//! ├─────────────────────────────────────────────────────────────┤
//! │                  CONFIGURATION LAYER                         │
//! │  WaveformParams (live / pending)  │  ConfigStore commit      │
//! ├─────────────────────────────────────────────────────────────┤
//! │                    GENERATION LAYER                          │
//! │  Signal Model  │  Phase Generators (interrupt context)       │
//! ├─────────────────────────────────────────────────────────────┤
//! │                   HAL / RTOS SHELL                           │
//! │  PWM register contract  │  embassy-rs (foreground only)      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Design Principles
//!
//! - **Single-writer records**: `live` is written only by the foreground
//!   commit, `pending` only by the operator session
//! - **Whole-record hand-off**: the one cross-context write happens under a
//!   critical section; field-level writes to `live` are unrepresentable
//! - **Type-driven design**: field ranges live in one data-driven table
//! - **No unsafe anywhere**: interrupt sharing goes through
//!   `critical-section`, not static mut
//! - **Explicit error handling**: every parse failure is a typed, reported
//!   error; the generation path has no error states

#![cfg_attr(feature = "embedded", no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Re-export dependencies needed by applications (only in embedded mode)
#[cfg(feature = "embedded")]
pub use embassy_executor;
#[cfg(feature = "embedded")]
pub use embassy_stm32;
#[cfg(feature = "embedded")]
pub use embassy_time;

/// Hardware Abstraction Layer
///
/// Register-value plumbing for the PWM bank and the serial console.
pub mod hal;

/// Digital Signal Processing
///
/// Signal model and per-channel phase generators.
pub mod dsp;

/// Waveform Configuration
///
/// The live/pending parameter records and the atomic commit store.
pub mod params;

/// Command Protocol
///
/// Line parser, field validation, and operator-facing text formatting.
pub mod protocol;

/// Operator Session
///
/// Byte-fed line accumulation and the confirm/reject dialogue.
pub mod session;

/// Shared types used across modules
pub mod types;

/// System configuration and constants
pub mod config;

/// Prelude module for common imports
#[cfg(feature = "embedded")]
pub mod prelude {
    //! Convenient re-exports for common types and traits.

    pub use crate::config::*;
    pub use crate::params::{ConfigStore, WaveformParams};
    pub use crate::types::*;

    // Embassy
    pub use embassy_time::{Duration, Instant, Timer};

    // Error handling
    pub use core::result::Result;

    // Logging
    pub use defmt::{debug, error, info, trace, warn};
}
