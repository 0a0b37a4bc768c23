//! Waveform Configuration
//!
//! Defines the parameter record consumed by the generation engine and the
//! store that hands an edited record over to interrupt context.
//!
//! Two records exist at any time: **live**, read by the three PWM interrupt
//! contexts through [`ConfigStore::snapshot`], and **pending**, owned by the
//! operator session and mutated field-by-field during parsing. The only way
//! `live` changes is [`ConfigStore::commit`], which replaces the whole
//! record inside a critical section. There is no field-level writer, so an
//! interrupt can never observe a half-updated record (for instance a new
//! carrier frequency paired with the old timer period).

use core::cell::Cell;

use critical_section::Mutex;
#[cfg(feature = "embedded")]
use micromath::F32Ext;

use crate::config;
use crate::types::Channel;

/// Complete waveform parameter set
///
/// `timer_period` is a pure function of `carrier_hz` and the fixed
/// time-base clock; it is recomputed on every commit and cannot be set
/// independently.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WaveformParams {
    /// Carrier (PWM switching) frequency in Hz
    carrier_hz: f32,
    /// Modulating sinusoid frequency in Hz
    modulation_hz: f32,
    /// Modulation depth, 0 = constant 50% duty, 1 = full swing
    depth: f32,
    /// Duty-cycle offset, bounded by `(1 - depth) / 2` in magnitude
    offset: f32,
    /// Per-channel phase lead in degrees
    phase_lead_deg: [f32; 3],
    /// Up/down counter period for one carrier cycle
    timer_period: u16,
}

impl WaveformParams {
    /// Power-on parameter set: 2.5 kHz carrier, 60 Hz modulation, full
    /// depth, balanced 0/120/240 phase leads.
    pub const STARTUP: Self = Self {
        carrier_hz: config::DEFAULT_CARRIER_HZ as f32,
        modulation_hz: config::DEFAULT_MODULATION_HZ as f32,
        depth: config::DEFAULT_DEPTH,
        offset: config::DEFAULT_OFFSET,
        phase_lead_deg: config::DEFAULT_PHASE_LEAD_DEG,
        // Exact for the default carrier; recomputed on every commit.
        timer_period: (config::TIMER_CLOCK_HZ / (2 * config::DEFAULT_CARRIER_HZ)) as u16,
    };

    /// Carrier frequency in Hz
    #[must_use]
    pub const fn carrier_hz(&self) -> f32 {
        self.carrier_hz
    }

    /// Modulation frequency in Hz
    #[must_use]
    pub const fn modulation_hz(&self) -> f32 {
        self.modulation_hz
    }

    /// Modulation depth
    #[must_use]
    pub const fn depth(&self) -> f32 {
        self.depth
    }

    /// Duty-cycle offset
    #[must_use]
    pub const fn offset(&self) -> f32 {
        self.offset
    }

    /// Phase lead for one channel, in degrees
    #[must_use]
    pub const fn phase_lead_deg(&self, channel: Channel) -> f32 {
        self.phase_lead_deg[channel.index()]
    }

    /// Up/down counter period for one carrier cycle
    #[must_use]
    pub const fn timer_period(&self) -> u16 {
        self.timer_period
    }

    /// Largest offset magnitude compatible with a given modulation depth
    ///
    /// Keeps the modulated duty cycle inside `[0, 1]` at every phase angle.
    #[must_use]
    pub fn offset_limit(depth: f32) -> f32 {
        (1.0 - depth) / 2.0
    }

    /// Counter period for a carrier frequency at the fixed time-base clock
    ///
    /// The 0.5 factor accounts for up/down counting: one electrical period
    /// spans two counter sweeps.
    #[must_use]
    pub fn timer_period_for(carrier_hz: f32) -> u16 {
        (0.5 * config::TIMER_CLOCK_HZ as f32 / carrier_hz).round() as u16
    }

    /// Recompute `timer_period` from the current carrier frequency
    pub fn recompute_timer_period(&mut self) {
        self.timer_period = Self::timer_period_for(self.carrier_hz);
    }
}

impl Default for WaveformParams {
    fn default() -> Self {
        Self::STARTUP
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for WaveformParams {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "Waveform(P={}Hz S={}Hz M={} O={} prd={})",
            self.carrier_hz,
            self.modulation_hz,
            self.depth,
            self.offset,
            self.timer_period
        );
    }
}

/// Editable parameter field, selected by a protocol key
///
/// The field table is the single source of truth for key → valid range →
/// target field; the parser dispatches through it instead of duplicating
/// per-field code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    /// `P` — carrier frequency in Hz
    CarrierHz,
    /// `S` — modulation frequency in Hz
    ModulationHz,
    /// `M` — modulation depth
    Depth,
    /// `O` — duty-cycle offset
    Offset,
    /// `A1`/`A2`/`A3` — per-channel phase lead in degrees
    PhaseLead(Channel),
}

impl Field {
    /// Inclusive valid range for this field
    ///
    /// The carrier floor comes from the 16-bit counter: below 687 Hz the
    /// up/down period no longer fits the time-base register. The offset
    /// bounds here are the hard limits; the depth-dependent constraint is
    /// checked separately after the whole line is scanned.
    #[must_use]
    pub const fn range(self) -> (f32, f32) {
        match self {
            Self::CarrierHz => (687.0, 100_000.0),
            Self::ModulationHz => (0.0, 300.0),
            Self::Depth => (0.0, 1.0),
            Self::Offset => (-1.0, 1.0),
            Self::PhaseLead(_) => (-360.0, 360.0),
        }
    }

    /// Operator-facing field name, used in printouts
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::CarrierHz => "PWM frequency",
            Self::ModulationHz => "Sin wave frequency",
            Self::Depth => "Modulation depth",
            Self::Offset => "Offset",
            Self::PhaseLead(Channel::Ch1) => "Angle 1",
            Self::PhaseLead(Channel::Ch2) => "Angle 2",
            Self::PhaseLead(Channel::Ch3) => "Angle 3",
        }
    }

    /// Write a value into the selected field of a parameter record
    pub fn apply(self, params: &mut WaveformParams, value: f32) {
        match self {
            Self::CarrierHz => params.carrier_hz = value,
            Self::ModulationHz => params.modulation_hz = value,
            Self::Depth => params.depth = value,
            Self::Offset => params.offset = value,
            Self::PhaseLead(ch) => params.phase_lead_deg[ch.index()] = value,
        }
    }

    /// Read the selected field from a parameter record
    #[must_use]
    pub fn read(self, params: &WaveformParams) -> f32 {
        match self {
            Self::CarrierHz => params.carrier_hz,
            Self::ModulationHz => params.modulation_hz,
            Self::Depth => params.depth,
            Self::Offset => params.offset,
            Self::PhaseLead(ch) => params.phase_lead_deg[ch.index()],
        }
    }

    /// All fields in printout order
    pub const ALL: [Self; 7] = [
        Self::CarrierHz,
        Self::ModulationHz,
        Self::Depth,
        Self::Offset,
        Self::PhaseLead(Channel::Ch1),
        Self::PhaseLead(Channel::Ch2),
        Self::PhaseLead(Channel::Ch3),
    ];
}

/// The live configuration record, shared with interrupt context
///
/// Written exclusively by the foreground task through [`commit`], read
/// exclusively by the PWM interrupt contexts through [`snapshot`]. The
/// critical section masks all three interrupt sources for the duration of
/// the whole-record copy.
///
/// [`commit`]: ConfigStore::commit
/// [`snapshot`]: ConfigStore::snapshot
pub struct ConfigStore {
    live: Mutex<Cell<WaveformParams>>,
}

impl ConfigStore {
    /// Create a store with an initial live record
    #[must_use]
    pub const fn new(initial: WaveformParams) -> Self {
        Self {
            live: Mutex::new(Cell::new(initial)),
        }
    }

    /// Whole-record read of the live configuration
    ///
    /// Safe from interrupt context; the generator works on the returned
    /// copy so a commit between ticks is picked up atomically on the next
    /// tick.
    pub fn snapshot(&self) -> WaveformParams {
        critical_section::with(|cs| self.live.borrow(cs).get())
    }

    /// Replace the live record with a validated pending record
    ///
    /// Recomputes the derived timer period, then copies the whole record
    /// under the critical section. Returns the record as committed.
    /// Foreground context only.
    pub fn commit(&self, mut params: WaveformParams) -> WaveformParams {
        params.recompute_timer_period();
        critical_section::with(|cs| self.live.borrow(cs).set(params));
        params
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new(WaveformParams::STARTUP)
    }
}
