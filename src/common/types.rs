// src/common/types.rs

use super::error::M9803rError;
use super::units::{MeasurementMode, Unit};
use core::fmt;

// --- Decoded Measurement ---

/// The latest successfully decoded measurement.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct DecodedReading {
    /// Signed value in base units (volts, amperes, ohms, ...).
    pub value: f32,
    pub unit: Unit,
    /// Meter function, `None` for reserved unit codes.
    pub mode: Option<MeasurementMode>,
}

impl DecodedReading {
    pub const fn new(value: f32, unit: Unit, mode: Option<MeasurementMode>) -> Self {
        Self { value, unit, mode }
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    #[inline]
    pub fn unit(&self) -> Unit {
        self.unit
    }

    #[inline]
    pub fn symbol(&self) -> char {
        self.unit.symbol()
    }
}

impl fmt::Display for DecodedReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

// --- Decode Status ---

/// Outcome of the most recent decode cycle, as seen by the caller.
///
/// The first three codes match the status bytes of the original host library.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
#[repr(u8)]
pub enum DecodeStatus {
    #[default]
    Success = 0,
    OverRange = 1,
    FrameMalformed = 2,
    BufferOverflow = 3,
    UnknownUnitOrRange = 4,
}

impl DecodeStatus {
    /// Tries to convert a u8 status code into a DecodeStatus.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(DecodeStatus::Success),
            1 => Some(DecodeStatus::OverRange),
            2 => Some(DecodeStatus::FrameMalformed),
            3 => Some(DecodeStatus::BufferOverflow),
            4 => Some(DecodeStatus::UnknownUnitOrRange),
            _ => None,
        }
    }

    #[inline]
    pub const fn code(&self) -> u8 {
        *self as u8
    }

    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, DecodeStatus::Success)
    }
}

impl From<&M9803rError> for DecodeStatus {
    /// Maps a transport-free decode condition to its status. `Io(())` carries
    /// no transport and is only produced by hand.
    fn from(err: &M9803rError) -> Self {
        match err {
            M9803rError::OverRange => DecodeStatus::OverRange,
            M9803rError::BufferOverflow { .. } => DecodeStatus::BufferOverflow,
            M9803rError::UnknownUnitOrRange { .. } => DecodeStatus::UnknownUnitOrRange,
            M9803rError::FrameMalformed { .. }
            | M9803rError::InvalidDigit { .. }
            | M9803rError::Io(()) => DecodeStatus::FrameMalformed,
        }
    }
}

impl fmt::Display for DecodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use DecodeStatus::*;
        match self {
            Success => write!(f, "Success"),
            OverRange => write!(f, "Over range"),
            FrameMalformed => write!(f, "Frame malformed"),
            BufferOverflow => write!(f, "Buffer overflow"),
            UnknownUnitOrRange => write!(f, "Unknown unit or range"),
        }
    }
}
