//! Operator Session
//!
//! Byte-fed state machine tying the pieces together: accumulate a command
//! line, parse it against a pending copy of the live record, walk the
//! operator through the confirm/reject dialogue, and hand a confirmed
//! record to the [`ConfigStore`] for the atomic commit.
//!
//! There is exactly one session and it is strictly sequential: a new
//! exchange cannot start until the previous one ended in a commit, a
//! rejection, or a reported error. The session owns `pending`; interrupt
//! context never sees it.

use core::fmt::Write;

use heapless::Vec;

use crate::config;
use crate::params::{ConfigStore, WaveformParams};
use crate::protocol::{self, NEWLINE};

/// What the caller must do after feeding a byte
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SessionEvent {
    /// Nothing to do; keep feeding bytes
    None,
    /// A new record was committed to the store; reprogram the PWM bank
    /// from it (foreground context only)
    Committed(WaveformParams),
}

/// Dialogue position
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    /// Collecting characters into the line buffer
    Accumulating,
    /// A valid line was parsed; waiting for a Y/N keystroke
    Confirming,
}

/// The one operator-facing command session
pub struct CommandSession<'a> {
    /// Commit target; also the source for pending resets
    store: &'a ConfigStore,
    /// Line accumulation buffer
    line: Vec<u8, { config::LINE_BUFFER_SIZE }>,
    /// The record being edited, initialized from live after every exchange
    pending: WaveformParams,
    state: State,
}

impl<'a> CommandSession<'a> {
    /// Create a session editing against the store's current live record
    #[must_use]
    pub fn new(store: &'a ConfigStore) -> Self {
        Self {
            store,
            line: Vec::new(),
            pending: store.snapshot(),
            state: State::Accumulating,
        }
    }

    /// Write the welcome/help screen; call once after the console opens
    pub fn greet<W: Write>(&self, out: &mut W) {
        let _ = protocol::write_welcome(out);
    }

    /// Whether the session is waiting for a Y/N keystroke
    #[must_use]
    pub fn is_confirming(&self) -> bool {
        self.state == State::Confirming
    }

    /// The record currently being edited
    #[must_use]
    pub fn pending(&self) -> &WaveformParams {
        &self.pending
    }

    /// Feed one received byte; response text is written to `out`
    pub fn feed<W: Write>(&mut self, byte: u8, out: &mut W) -> SessionEvent {
        match self.state {
            State::Accumulating => self.accumulate(byte, out),
            State::Confirming => self.confirm(byte, out),
        }
    }

    fn accumulate<W: Write>(&mut self, byte: u8, out: &mut W) -> SessionEvent {
        if byte == config::LINE_TERMINATOR {
            self.finish_line(out);
        } else if self.line.push(byte).is_err() {
            let _ = write!(
                out,
                "{NEWLINE}{NEWLINE}Error: Input buffer overflow. Buffer reset."
            );
            self.line.clear();
            let _ = protocol::write_welcome(out);
        }
        SessionEvent::None
    }

    fn finish_line<W: Write>(&mut self, out: &mut W) {
        let _ = write!(out, "{NEWLINE}{NEWLINE}You sent: ");
        for &b in &self.line {
            let _ = out.write_char(b as char);
        }

        let live = self.store.snapshot();
        match protocol::apply_line(&self.line, &live, &mut self.pending) {
            Ok(()) => {
                let _ = write!(out, "{NEWLINE}{NEWLINE}PLEASE CONFIRM THE VALUES (Y/N):  ");
                let _ = protocol::write_params(out, &self.pending);
                self.state = State::Confirming;
            }
            Err(errors) => {
                let _ = protocol::write_errors(out, &errors);
                self.reset_exchange(out, &live);
            }
        }
        self.line.clear();
    }

    fn confirm<W: Write>(&mut self, byte: u8, out: &mut W) -> SessionEvent {
        match byte {
            b'Y' | b'y' => {
                let _ = write!(out, "{NEWLINE}{NEWLINE}Values confirmed and set.");
                let committed = self.store.commit(self.pending);
                self.pending = committed;
                self.state = State::Accumulating;
                let _ = protocol::write_welcome(out);
                SessionEvent::Committed(committed)
            }
            b'N' | b'n' => {
                let live = self.store.snapshot();
                self.reset_exchange(out, &live);
                self.state = State::Accumulating;
                SessionEvent::None
            }
            _ => {
                let _ = write!(out, "{NEWLINE}Invalid input. Please enter Y or N.");
                SessionEvent::None
            }
        }
    }

    /// Discard pending, report the unchanged live values, re-prompt
    fn reset_exchange<W: Write>(&mut self, out: &mut W, live: &WaveformParams) {
        let _ = write!(out, "{NEWLINE}{NEWLINE}Values reset to:");
        let _ = protocol::write_params(out, live);
        self.pending = *live;
        let _ = protocol::write_welcome(out);
    }
}
