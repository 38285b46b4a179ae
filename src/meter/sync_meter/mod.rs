// src/meter/sync_meter/mod.rs

mod io_helpers;

use crate::common::{
    config::DecoderConfig,
    error::M9803rError,
    frame::BUFFER_CAPACITY,
    hal_traits::M9803rSerial,
    packet::RawPacket,
    types::{DecodeStatus, DecodedReading},
};
use crate::meter::engine::M9803rEngine;
use arrayvec::ArrayVec;

/// An M9803R engine fed from a serial interface, for SYNCHRONOUS polling.
///
/// The interface is injected by the host, which also owns port selection and
/// baud rate. Call [`poll`](SyncMeter::poll) at least once per
/// [`MAX_POLL_INTERVAL`](crate::common::timing::MAX_POLL_INTERVAL).
#[derive(Debug)]
pub struct SyncMeter<IF>
where
    IF: M9803rSerial,
{
    interface: IF,
    engine: M9803rEngine,
}

impl<IF> SyncMeter<IF>
where
    IF: M9803rSerial,
{
    pub fn new(interface: IF) -> Self {
        Self::with_config(interface, DecoderConfig::default())
    }

    pub fn with_config(interface: IF, config: DecoderConfig) -> Self {
        SyncMeter {
            interface,
            engine: M9803rEngine::with_config(config),
        }
    }

    /// Reads what the interface has ready and runs one decode step.
    ///
    /// Never reads more than the receive buffer can hold, so bytes are left
    /// in the UART rather than dropped. Decode outcomes come back as `Ok`;
    /// only transport failures are `Err`, and the bytes read before the
    /// failure are still handed to the engine.
    pub fn poll(&mut self) -> Result<DecodeStatus, M9803rError<IF::Error>> {
        let mut chunk: ArrayVec<u8, BUFFER_CAPACITY> = ArrayVec::new();
        let free = BUFFER_CAPACITY - self.engine.buffered().len();
        let read = self.read_available(&mut chunk, free);
        let status = self.engine.poll(&chunk);
        read.map(|_| status)
    }

    /// Clears buffered bytes and the stored reading.
    pub fn reset(&mut self) {
        self.engine.reset();
    }

    #[inline]
    pub fn current_value(&self) -> f32 {
        self.engine.current_value()
    }

    #[inline]
    pub fn current_unit(&self) -> char {
        self.engine.current_unit()
    }

    #[inline]
    pub fn current_reading(&self) -> DecodedReading {
        self.engine.current_reading()
    }

    #[inline]
    pub fn last_status(&self) -> DecodeStatus {
        self.engine.last_status()
    }

    #[inline]
    pub fn last_packet(&self) -> Option<RawPacket> {
        self.engine.last_packet()
    }

    pub fn engine(&self) -> &M9803rEngine {
        &self.engine
    }

    /// Gives the serial interface back to the host.
    pub fn into_inner(self) -> IF {
        self.interface
    }
}

// --- Unit Tests ---
#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::common::frame::{encode_frame, FRAME_LEN};
    use crate::common::packet::StatusFlags;
    use nb::Result as NbResult;

    // --- Mock Comm Error ---
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub(crate) struct MockCommError;

    // --- Mock Interface ---
    #[derive(Clone)]
    pub(crate) struct MockInterface {
        read_queue: [Option<u8>; 96],
        read_pos: usize,
        pub read_calls: u32,
        /// Fail with `MockCommError` once this many bytes have been read.
        pub fail_after: Option<usize>,
    }

    impl MockInterface {
        pub fn new() -> Self {
            MockInterface {
                read_queue: [None; 96],
                read_pos: 0,
                read_calls: 0,
                fail_after: None,
            }
        }

        /// Appends bytes behind whatever is still unread.
        pub fn stage_read_data(&mut self, data: &[u8]) {
            let start = self.read_pos + self.pending();
            assert!(start + data.len() <= self.read_queue.len());
            for (i, byte) in data.iter().enumerate() {
                self.read_queue[start + i] = Some(*byte);
            }
        }

        pub fn pending(&self) -> usize {
            self.read_queue[self.read_pos..].iter().take_while(|b| b.is_some()).count()
        }
    }

    impl M9803rSerial for MockInterface {
        type Error = MockCommError;

        fn read_byte(&mut self) -> NbResult<u8, Self::Error> {
            self.read_calls += 1;
            if self.fail_after == Some(self.read_pos) {
                return Err(nb::Error::Other(MockCommError));
            }
            match self.read_queue.get(self.read_pos).copied().flatten() {
                Some(byte) => {
                    self.read_pos += 1;
                    Ok(byte)
                }
                None => Err(nb::Error::WouldBlock),
            }
        }
    }

    fn frame(status: u8, digits: [u8; 4], unit: u8, range: u8) -> [u8; FRAME_LEN] {
        encode_frame(&RawPacket { status, digits, unit, range, special: [0, 0] })
    }

    #[test]
    fn test_poll_decodes_staged_frame() {
        let mut mock_if = MockInterface::new();
        mock_if.stage_read_data(&frame(0x00, [1, 2, 3, 0], 0x00, 0x03));
        let mut meter = SyncMeter::new(mock_if);

        assert_eq!(meter.poll(), Ok(DecodeStatus::Success));
        assert!((meter.current_value() - 32.1).abs() < 1e-4);
        assert_eq!(meter.current_unit(), 'V');
        assert_eq!(meter.last_status(), DecodeStatus::Success);
    }

    #[test]
    fn test_poll_without_data_changes_nothing() {
        let mut mock_if = MockInterface::new();
        mock_if.stage_read_data(&frame(StatusFlags::NEGATIVE, [5, 0, 0, 0], 0x04, 0x02));
        let mut meter = SyncMeter::new(mock_if);
        meter.poll().unwrap();
        let reading = meter.current_reading();
        assert_eq!(reading.value, -50.0);

        assert_eq!(meter.poll(), Ok(DecodeStatus::Success));
        assert_eq!(meter.current_reading(), reading);
    }

    #[test]
    fn test_poll_leaves_excess_bytes_in_uart() {
        let mut mock_if = MockInterface::new();
        for d in 0..4u8 {
            mock_if.stage_read_data(&frame(0, [d, 0, 0, 0], 0x00, 0x04));
        }
        let mut meter = SyncMeter::new(mock_if);

        // First poll reads 32 of 44 bytes: two frames plus a partial third
        assert_eq!(meter.poll(), Ok(DecodeStatus::Success));
        assert_eq!(meter.current_value(), 1.0);
        assert_eq!(meter.engine().buffered().len(), 10);

        assert_eq!(meter.poll(), Ok(DecodeStatus::Success));
        assert_eq!(meter.current_value(), 3.0);
        assert_eq!(meter.into_inner().pending(), 0);
    }

    #[test]
    fn test_poll_over_range_then_recovery() {
        let mut mock_if = MockInterface::new();
        mock_if.stage_read_data(&frame(0, [2, 0, 0, 0], 0x08, 0x00));
        let mut meter = SyncMeter::new(mock_if);
        meter.poll().unwrap();
        assert_eq!(meter.current_value(), 2.0 * 0.01);
        assert_eq!(meter.current_unit(), 'A');

        meter.interface.stage_read_data(&frame(StatusFlags::OVER_RANGE, [0; 4], 0x00, 0x00));
        assert_eq!(meter.poll(), Ok(DecodeStatus::OverRange));
        assert_eq!(meter.current_value(), 2.0 * 0.01);
        assert_eq!(meter.current_unit(), 'A');
        assert_eq!(meter.last_packet().unwrap().status, StatusFlags::OVER_RANGE);
    }

    #[test]
    fn test_poll_io_error_keeps_bytes_read_so_far() {
        let mut mock_if = MockInterface::new();
        let f = frame(0, [1, 0, 0, 0], 0x00, 0x04);
        mock_if.stage_read_data(&f);
        mock_if.fail_after = Some(5);
        let mut meter = SyncMeter::new(mock_if);

        assert_eq!(meter.poll(), Err(M9803rError::Io(MockCommError)));
        assert_eq!(meter.engine().buffered(), &f[..5]);

        meter.interface.fail_after = None;
        assert_eq!(meter.poll(), Ok(DecodeStatus::Success));
        assert_eq!(meter.current_value(), 1.0);
    }

    #[test]
    fn test_reset() {
        let mut mock_if = MockInterface::new();
        mock_if.stage_read_data(&frame(0, [1, 0, 0, 0], 0x00, 0x04));
        let mut meter = SyncMeter::with_config(mock_if, DecoderConfig::LEGACY);
        meter.poll().unwrap();
        meter.reset();
        assert_eq!(meter.current_value(), 0.0);
        assert_eq!(meter.current_unit(), ' ');
        assert_eq!(meter.last_packet(), None);
        assert_eq!(*meter.engine().config(), DecoderConfig::LEGACY);
    }
}
