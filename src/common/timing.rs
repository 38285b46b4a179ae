// src/common/timing.rs

use super::frame::{BUFFER_CAPACITY, FRAME_LEN};
use core::time::Duration;

// These are nominal values for the host layer that opens the port and
// schedules polling. The decoder itself never waits on anything.

// === Line Settings ===

/// Baud rate used when the host does not specify one.
pub const DEFAULT_BAUD_RATE: u32 = 9600;

/// 1 start bit + 8 data bits + 1 stop bit.
pub const BITS_PER_BYTE: u32 = 10;

// === Byte Timing at 9600 Baud (8N1) ===
// Time per byte = 10 / 9600 s = 1.0417 ms

/// Nominal duration of a single byte at the default baud rate.
pub const BYTE_DURATION: Duration = Duration::from_nanos(1_041_667);

/// Nominal time on the wire for one complete frame.
pub const FRAME_DURATION: Duration = Duration::from_nanos(1_041_667 * FRAME_LEN as u64);

// === Transmission Cadence ===

/// The meter sends roughly one frame per second.
pub const TRANSMIT_INTERVAL: Duration = Duration::from_secs(1);

/// Longest gap between polls before the receive buffer can overflow.
/// Two whole frames fit in the buffer; a third one does not.
pub const MAX_POLL_INTERVAL: Duration =
    Duration::from_secs((BUFFER_CAPACITY / FRAME_LEN) as u64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_duration_matches_baud_rate() {
        let expected_ns = 1_000_000_000u64 * BITS_PER_BYTE as u64 / DEFAULT_BAUD_RATE as u64;
        let diff = BYTE_DURATION.as_nanos() as i128 - expected_ns as i128;
        assert!(diff.abs() <= 1);
        assert!(FRAME_DURATION < TRANSMIT_INTERVAL);
    }

    #[test]
    fn test_poll_interval_covers_buffer() {
        assert_eq!(MAX_POLL_INTERVAL, Duration::from_secs(2));
        assert!(MAX_POLL_INTERVAL >= TRANSMIT_INTERVAL);
    }
}
