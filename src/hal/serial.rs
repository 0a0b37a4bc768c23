//! Serial Console Transport
//!
//! Drives the operator session over any async byte transport. The
//! transport is an ordered, unframed byte stream; the line terminator is
//! the only framing the session relies on.

use embedded_io_async::{Read, Write};
use heapless::String;

use crate::hal::pwm::{reprogram, PwmBank};
use crate::session::{CommandSession, SessionEvent};

/// Response buffer capacity; must hold the worst-case exchange step: line
/// echo, error report, parameter printout, and the welcome screen
pub const REPLY_BUFFER: usize = 2048;

/// Operator console bound to one serial port
pub struct Console<T> {
    port: T,
}

impl<T: Read + Write> Console<T> {
    /// Bind the console to a transport
    pub fn new(port: T) -> Self {
        Self { port }
    }

    /// Run the session forever: greet, then feed bytes one at a time
    ///
    /// Commits are applied to the PWM bank here, in foreground context,
    /// right after the session reports them. Transport errors drop the
    /// current byte and keep the session alive; there is no fatal path.
    pub async fn run(mut self, session: &mut CommandSession<'_>, bank: &mut impl PwmBank) -> ! {
        let mut reply: String<REPLY_BUFFER> = String::new();

        session.greet(&mut reply);
        let _ = self.port.write_all(reply.as_bytes()).await;

        loop {
            let mut byte = [0u8; 1];
            if self.port.read_exact(&mut byte).await.is_err() {
                continue;
            }

            reply.clear();
            let event = session.feed(byte[0], &mut reply);
            let _ = self.port.write_all(reply.as_bytes()).await;

            if let SessionEvent::Committed(params) = event {
                reprogram(bank, &params);
                defmt::info!("committed {}", params);
            }
        }
    }
}
