// src/common/frame.rs

use super::packet::RawPacket;

/// Frame terminator sent by the meter after every payload: `<CR><LF>`.
pub const TERMINATOR: [u8; 2] = [b'\r', b'\n'];

/// Meaningful bytes in front of the terminator:
/// `status, d0, d1, d2, d3, unit, range, special_1, special_2`.
pub const PAYLOAD_LEN: usize = 9;

/// Payload plus terminator.
pub const FRAME_LEN: usize = PAYLOAD_LEN + TERMINATOR.len();

/// Capacity of the receive buffer. Holds a little under three frames.
pub const BUFFER_CAPACITY: usize = 32;

/// Finds the first `<CR><LF>` pair, scanning left to right.
///
/// Returns the index of the `<CR>` byte, or `None` if the slice is shorter
/// than two bytes or holds no adjacent pair.
pub fn find_terminator(bytes: &[u8]) -> Option<usize> {
    bytes.windows(TERMINATOR.len()).position(|w| w == TERMINATOR)
}

/// Builds the wire form of a packet, terminator included.
pub fn encode_frame(packet: &RawPacket) -> [u8; FRAME_LEN] {
    let mut frame = [0u8; FRAME_LEN];
    frame[..PAYLOAD_LEN].copy_from_slice(&packet.to_payload());
    frame[PAYLOAD_LEN..].copy_from_slice(&TERMINATOR);
    frame
}
