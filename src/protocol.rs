//! Command Protocol
//!
//! Parses one terminated line of operator text into a validated pending
//! parameter record, and formats the status/prompt text sent back over the
//! serial link.
//!
//! Grammar: fields separated by `,`, ` `, or `.` noise characters, each
//! field a key (`P`, `S`, `M`, `O`, `A1`, `A2`, `A3`, case-insensitive)
//! followed by a number. The parser mutates a caller-owned pending record
//! and never touches the live one; a failed line leaves the caller to
//! discard the pending record wholesale.

use core::fmt::{self, Write};

use heapless::String;
#[cfg(feature = "embedded")]
use micromath::F32Ext;

use crate::config;
use crate::params::{Field, WaveformParams};
use crate::types::Channel;

/// Line ending used on the serial console
pub const NEWLINE: &str = "\r\n";

/// A captured numeric token, echoed back in error reports
pub type NumberToken = String<{ config::NUMBER_TOKEN_LEN }>;

/// One scanning or validation failure
///
/// All variants are local errors: the line is dropped, the operator is
/// re-prompted, and nothing propagates into the generation engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// A character that is neither a key, a separator, nor part of a number
    InvalidCharacter(char),
    /// Numeric token longer than the fixed token buffer
    TooManyDigits,
    /// More than one decimal point in a numeric token
    TooManyDecimalPoints,
    /// Token matched the number character class but does not parse
    MalformedNumber(NumberToken),
    /// Numerically valid but outside the field's range
    OutOfRange {
        /// Field whose bound was violated
        field: Field,
        /// Offending token, echoed to the operator
        token: NumberToken,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCharacter(c) => write!(f, "Invalid character: {c}"),
            Self::TooManyDigits => f.write_str("Number input has too many digits"),
            Self::TooManyDecimalPoints => f.write_str("Input has too many decimal points"),
            Self::MalformedNumber(token) => write!(f, "Malformed number: {token}"),
            Self::OutOfRange { token, .. } => write!(f, "Value out of bound: {token}"),
        }
    }
}

/// Everything that went wrong with one line
///
/// A scanning error aborts the rest of the line, but the depth/offset
/// cross-check still runs afterwards, so both can be reported for the same
/// input.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct LineErrors {
    /// First scanning/validation error; fields after it were not parsed
    pub scan: Option<ParseError>,
    /// Offset was incompatible with the modulation depth and has been
    /// restored from the live record
    pub offset_reset: bool,
}

/// Parse one terminated line into the pending record.
///
/// Accepted field values are written into `pending` as they are scanned —
/// including a value that then fails its range check, since the whole
/// record is discarded on failure anyway. On a cross-field violation only
/// the offset is restored from `live`; earlier accepted updates stay in
/// `pending` (and survive if the operator fixes the offset on the next
/// line before confirming).
///
/// Returns `Ok(())` exactly when every field was valid, the caller's cue
/// to enter the confirmation dialogue.
///
/// # Errors
///
/// Returns the collected [`LineErrors`] when any field failed to scan,
/// validate, or satisfy the offset/depth constraint.
pub fn apply_line(
    line: &[u8],
    live: &WaveformParams,
    pending: &mut WaveformParams,
) -> Result<(), LineErrors> {
    let mut scan = None;
    let mut i = 0;

    while i < line.len() && scan.is_none() {
        // One comma or period between fields is noise, as is any run of
        // spaces.
        if line[i] == b',' || line[i] == b'.' {
            i += 1;
        }
        while i < line.len() && line[i] == b' ' {
            i += 1;
        }
        if i >= line.len() {
            break;
        }

        let key = line[i] as char;
        let field = match key.to_ascii_lowercase() {
            'p' => Field::CarrierHz,
            's' => Field::ModulationHz,
            'm' => Field::Depth,
            'o' => Field::Offset,
            'a' => {
                i += 1;
                let digit = line.get(i).map_or('\0', |&b| b as char);
                match Channel::from_digit(digit) {
                    Some(channel) => Field::PhaseLead(channel),
                    None => {
                        scan = Some(ParseError::InvalidCharacter(digit));
                        break;
                    }
                }
            }
            other => {
                scan = Some(ParseError::InvalidCharacter(other));
                break;
            }
        };
        i += 1;

        match scan_number(line, &mut i) {
            Ok((value, token)) => {
                let (min, max) = field.range();
                field.apply(pending, value);
                if value < min || value > max {
                    scan = Some(ParseError::OutOfRange { field, token });
                }
            }
            Err(e) => scan = Some(e),
        }
    }

    // The offset bound depends on the modulation depth, so it can only be
    // checked once the whole line has been scanned. Runs even after a
    // scanning error, exactly so a torn pending offset never lingers.
    let limit = WaveformParams::offset_limit(pending.depth());
    let offset_reset = pending.offset() > limit || pending.offset() < -limit;
    if offset_reset {
        Field::Offset.apply(pending, live.offset());
    }

    if scan.is_some() || offset_reset {
        Err(LineErrors { scan, offset_reset })
    } else {
        Ok(())
    }
}

/// Scan one numeric token starting at `*i`, advancing it past the token.
fn scan_number(line: &[u8], i: &mut usize) -> Result<(f32, NumberToken), ParseError> {
    // A letter right after the key means a run-on like `PP 2500`.
    if let Some(&b) = line.get(*i) {
        if b.is_ascii_alphabetic() {
            return Err(ParseError::InvalidCharacter(b as char));
        }
    }

    while *i < line.len() && line[*i] == b' ' {
        *i += 1;
    }

    let mut token = NumberToken::new();
    let mut periods = 0;
    while let Some(&b) = line.get(*i) {
        if !(b == b'.' || b == b'-' || b.is_ascii_digit()) {
            break;
        }
        if b == b'.' {
            periods += 1;
        }
        if token.push(b as char).is_err() {
            return Err(ParseError::TooManyDigits);
        }
        *i += 1;
    }

    if periods > 1 {
        return Err(ParseError::TooManyDecimalPoints);
    }

    match token.parse::<f32>() {
        Ok(value) => Ok((value, token)),
        Err(_) => Err(ParseError::MalformedNumber(token)),
    }
}

// ============================================================================
// Operator-facing text
// ============================================================================

/// Write a parameter value with up to three decimal places
///
/// Whole values print without a fractional part, matching the console's
/// historical output.
///
/// # Errors
///
/// Propagates the underlying writer's error.
pub fn write_value<W: Write>(out: &mut W, value: f32) -> fmt::Result {
    if value.fract() == 0.0 {
        write!(out, "{}", value as i32)
    } else {
        write!(out, "{value:.3}")
    }
}

/// Write the full parameter record, one `name = value` line per field
///
/// # Errors
///
/// Propagates the underlying writer's error.
pub fn write_params<W: Write>(out: &mut W, params: &WaveformParams) -> fmt::Result {
    out.write_str(NEWLINE)?;
    for field in Field::ALL {
        write!(out, "{NEWLINE}{} = ", field.label())?;
        write_value(out, field.read(params))?;
    }
    Ok(())
}

/// Report every error collected from one line
///
/// # Errors
///
/// Propagates the underlying writer's error.
pub fn write_errors<W: Write>(out: &mut W, errors: &LineErrors) -> fmt::Result {
    if let Some(e) = &errors.scan {
        write!(out, "{NEWLINE}{NEWLINE}{e}")?;
    }
    if errors.offset_reset {
        write!(out, "{NEWLINE}{NEWLINE}Offset out of range")?;
    }
    Ok(())
}

/// Write the welcome/help screen listing keys and acceptable ranges
///
/// # Errors
///
/// Propagates the underlying writer's error.
pub fn write_welcome<W: Write>(out: &mut W) -> fmt::Result {
    out.write_str(concat!(
        "\r\n-------------------------------------------------------------------------------------------------",
        "\r\nPlease enter a string in the format PARAMETER1 VALUE1,PARAMETER2 VALUE2 (for example: P 2500, S 60, M .13)",
        "\r\n",
        "\r\nP = PWM frequency (in Hz, acceptable inputs: 687 - 100000)",
        "\r\nS = Sin wave frequency (in Hz, acceptable inputs: 0 - 300)",
        "\r\nM = Modulation depth (acceptable inputs: 0.0 - 1.0, up to three decimal places)",
        "\r\nO = Offset (acceptable inputs: +-((1-Modulation depth) / 2), up to three decimal places)",
        "\r\nA1 = Angle 1 offset (in degrees, acceptable inputs: -360 to 360)",
        "\r\nA2 = Angle 2 offset (in degrees, acceptable inputs: -360 to 360)",
        "\r\nA3 = Angle 3 offset (in degrees, acceptable inputs: -360 to 360)",
    ))
}
