// src/common/packet.rs

use super::config::DecoderConfig;
use super::error::M9803rError;
use super::frame::PAYLOAD_LEN;
use super::types::DecodedReading;
use super::units::{self, MeasurementMode, Unit};

/// Bit flags carried in the status byte.
pub struct StatusFlags;

impl StatusFlags {
    /// Display shows OL; no value is transmitted.
    pub const OVER_RANGE: u8 = 0x01;
    /// Value is negative.
    pub const NEGATIVE: u8 = 0x08;
}

/// Mask for the selector bits of the unit and range bytes. Bit 7 is reserved.
const SELECTOR_MASK: u8 = 0x7F;

/// The 9 payload bytes of one frame, field by field.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct RawPacket {
    pub status: u8,
    /// Binary digit values, least significant first (`digits[3]` is thousands).
    pub digits: [u8; 4],
    pub unit: u8,
    pub range: u8,
    /// Device-specific flag bytes, not used for decoding.
    pub special: [u8; 2],
}

impl RawPacket {
    pub fn from_payload(p: &[u8; PAYLOAD_LEN]) -> Self {
        RawPacket {
            status: p[0],
            digits: [p[1], p[2], p[3], p[4]],
            unit: p[5],
            range: p[6],
            special: [p[7], p[8]],
        }
    }

    pub fn to_payload(&self) -> [u8; PAYLOAD_LEN] {
        let [d0, d1, d2, d3] = self.digits;
        let [s1, s2] = self.special;
        [self.status, d0, d1, d2, d3, self.unit, self.range, s1, s2]
    }

    #[inline]
    pub fn is_over_range(&self) -> bool {
        self.status & StatusFlags::OVER_RANGE != 0
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.status & StatusFlags::NEGATIVE != 0
    }

    #[inline]
    pub fn unit_code(&self) -> u8 {
        self.unit & SELECTOR_MASK
    }

    #[inline]
    pub fn range_code(&self) -> u8 {
        self.range & SELECTOR_MASK
    }

    /// Position and value of the first digit byte above 9, if any.
    pub fn invalid_digit(&self) -> Option<(usize, u8)> {
        self.digits
            .iter()
            .copied()
            .enumerate()
            .find(|&(_, d)| d > 9)
    }

    /// Unscaled display count: `d0 + 10*d1 + 100*d2 + 1000*d3`.
    pub fn magnitude_counts(&self) -> u32 {
        self.digits
            .iter()
            .rev()
            .fold(0u32, |acc, &d| acc * 10 + u32::from(d))
    }

    /// Whether the protocol defines a scale for this unit/range pair.
    pub fn has_known_scale(&self) -> bool {
        units::lookup(self.unit_code(), self.range_code()).is_some()
    }
}

/// Pulls the payload that ends right before the terminator at `terminator`.
///
/// # Returns
///
/// * `Ok(RawPacket)` if at least 9 bytes precede the terminator.
/// * `Err(M9803rError::FrameMalformed)` otherwise.
pub fn extract(snapshot: &[u8], terminator: usize) -> Result<RawPacket, M9803rError<()>> {
    let start = terminator
        .checked_sub(PAYLOAD_LEN)
        .ok_or(M9803rError::FrameMalformed { terminator })?;
    let payload: &[u8; PAYLOAD_LEN] = snapshot
        .get(start..terminator)
        .and_then(|s| s.try_into().ok())
        .ok_or(M9803rError::FrameMalformed { terminator })?;
    Ok(RawPacket::from_payload(payload))
}

/// Interprets the fields of an extracted packet.
///
/// Over-range is checked first, so a packet flagged OL never yields a value
/// regardless of its digit bytes. Unmapped unit codes give a blank unit and
/// unmapped unit/range pairs a scale of `0.0`; reporting them is left to the
/// caller (see [`DecoderConfig::strict_units`]).
pub fn decode_packet(packet: &RawPacket, config: &DecoderConfig) -> Result<DecodedReading, M9803rError<()>> {
    if packet.is_over_range() {
        return Err(M9803rError::OverRange);
    }
    if config.strict_digits {
        if let Some((position, value)) = packet.invalid_digit() {
            return Err(M9803rError::InvalidDigit { position, value });
        }
    }

    let mode = MeasurementMode::from_code(packet.unit_code());
    let unit = mode.map_or(Unit::None, |m| m.unit());
    let scale = units::scale_factor(packet.unit_code(), packet.range_code());

    let magnitude = packet.magnitude_counts() as f32 * scale;
    let value = if packet.is_negative() { -magnitude } else { magnitude };

    Ok(DecodedReading::new(value, unit, mode))
}

/// Extracts and decodes the frame whose terminator sits at `terminator`.
pub fn decode(snapshot: &[u8], terminator: usize, config: &DecoderConfig) -> Result<DecodedReading, M9803rError<()>> {
    let packet = extract(snapshot, terminator)?;
    decode_packet(&packet, config)
}
