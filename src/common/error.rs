// src/common/error.rs

/// Every condition the decoder can report.
///
/// Decode conditions never abort the engine; they are turned into a
/// [`DecodeStatus`](super::types::DecodeStatus) and the engine stays ready for
/// the next frame. Only `Io` is returned as an `Err` by the serial runner.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum M9803rError<E = ()>
where
    E: core::fmt::Debug, // Need Debug for the generic Io error
{
    /// Underlying I/O error from the serial implementation.
    #[error("I/O error: {0:?}")]
    Io(E),

    /// Incoming bytes did not fit into the frame buffer and were dropped.
    #[error("Buffer overflow: needed {needed}, got {got}")]
    BufferOverflow { needed: usize, got: usize },

    /// Terminator found with fewer than 9 payload bytes in front of it.
    #[error("Malformed frame: terminator at offset {terminator}")]
    FrameMalformed { terminator: usize },

    /// A digit byte outside 0..=9.
    #[error("Invalid digit {value:#04x} at position {position}")]
    InvalidDigit { position: usize, value: u8 },

    /// Meter reported over-range (status bit 0).
    #[error("Measurement over range")]
    OverRange,

    /// Unit/range pair has no scale defined by the protocol (strict mode only).
    #[error("Unknown unit {unit} / range {range}")]
    UnknownUnitOrRange { unit: u8, range: u8 },
}
