// src/meter/sync_meter/io_helpers.rs

use super::SyncMeter;
use crate::common::{error::M9803rError, hal_traits::M9803rSerial};
use arrayvec::ArrayVec;

// Implementation block for I/O related helpers
impl<IF> SyncMeter<IF>
where
    IF: M9803rSerial,
{
    /// Reads bytes until the interface reports `WouldBlock` or `out` holds
    /// `limit` bytes. Whatever is not read stays in the UART for the next poll.
    pub(super) fn read_available<const N: usize>(
        &mut self,
        out: &mut ArrayVec<u8, N>,
        limit: usize,
    ) -> Result<usize, M9803rError<IF::Error>> {
        let limit = limit.min(out.capacity());
        while out.len() < limit {
            match self.interface.read_byte() {
                Ok(byte) => out.push(byte),
                Err(nb::Error::WouldBlock) => break,
                Err(nb::Error::Other(e)) => return Err(M9803rError::Io(e)),
            }
        }
        Ok(out.len())
    }
}

// --- Unit Tests for IO Helpers ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::frame::BUFFER_CAPACITY;
    use crate::meter::sync_meter::tests::{MockCommError, MockInterface};

    #[test]
    fn test_read_available_stops_on_would_block() {
        let mut mock_if = MockInterface::new();
        mock_if.stage_read_data(b"abc");
        let mut meter = SyncMeter::new(mock_if);
        let mut out: ArrayVec<u8, BUFFER_CAPACITY> = ArrayVec::new();

        assert_eq!(meter.read_available(&mut out, BUFFER_CAPACITY), Ok(3));
        assert_eq!(out.as_slice(), b"abc");
        assert_eq!(meter.interface.read_calls, 4);
    }

    #[test]
    fn test_read_available_respects_limit() {
        let mut mock_if = MockInterface::new();
        mock_if.stage_read_data(b"abcdef");
        let mut meter = SyncMeter::new(mock_if);
        let mut out: ArrayVec<u8, BUFFER_CAPACITY> = ArrayVec::new();

        assert_eq!(meter.read_available(&mut out, 4), Ok(4));
        assert_eq!(out.as_slice(), b"abcd");
        assert_eq!(meter.interface.pending(), 2);
    }

    #[test]
    fn test_read_available_propagates_io_error() {
        let mut mock_if = MockInterface::new();
        mock_if.stage_read_data(b"ab");
        mock_if.fail_after = Some(1);
        let mut meter = SyncMeter::new(mock_if);
        let mut out: ArrayVec<u8, BUFFER_CAPACITY> = ArrayVec::new();

        let result = meter.read_available(&mut out, BUFFER_CAPACITY);
        assert_eq!(result, Err(M9803rError::Io(MockCommError)));
        assert_eq!(out.as_slice(), b"a");
    }
}
