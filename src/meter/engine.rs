// src/meter/engine.rs

use crate::common::{
    buffer::FrameAccumulator,
    config::DecoderConfig,
    frame::FRAME_LEN,
    packet::{self, RawPacket},
    types::{DecodeStatus, DecodedReading},
    units::Unit,
};

/// Decoder state for one meter connection.
///
/// Owns the receive buffer, the latest reading and the latest status. The
/// caller feeds it whatever bytes the transport delivered via [`poll`];
/// nothing here blocks, spawns or locks. One engine tracks exactly one
/// byte stream and must only be driven from one place at a time.
///
/// [`poll`]: M9803rEngine::poll
#[derive(Debug, Clone)]
pub struct M9803rEngine {
    buffer: FrameAccumulator,
    reading: DecodedReading,
    status: DecodeStatus,
    last_packet: Option<RawPacket>,
    config: DecoderConfig,
}

impl M9803rEngine {
    pub fn new() -> Self {
        Self::with_config(DecoderConfig::default())
    }

    pub fn with_config(config: DecoderConfig) -> Self {
        M9803rEngine {
            buffer: FrameAccumulator::new(),
            reading: DecodedReading::default(),
            status: DecodeStatus::default(),
            last_packet: None,
            config,
        }
    }

    /// Back to construction state: empty buffer, blank zero reading, `Success`.
    pub fn reset(&mut self) {
        self.buffer.reset();
        self.reading = DecodedReading::default();
        self.status = DecodeStatus::default();
        self.last_packet = None;
    }

    /// Drives the engine one step.
    ///
    /// Feeds `incoming` into the buffer as room allows, decoding every
    /// complete frame along the way so that finished frames make space for
    /// the bytes behind them. Bytes are only dropped when the buffer is full
    /// and holds no terminator; that poll then reports `BufferOverflow`,
    /// whatever was decoded before it. The reading is only overwritten by a
    /// successful decode. With no new bytes and no pending frame, nothing
    /// changes.
    pub fn poll(&mut self, incoming: &[u8]) -> DecodeStatus {
        let mut pending = incoming;

        loop {
            pending = self.buffer.fill_from(pending);

            while let Some(terminator) = self.buffer.find_terminator() {
                self.status = self.complete_frame(terminator);
            }

            if pending.is_empty() {
                break;
            }
            // Nothing drained, so the rest has nowhere to go
            if self.buffer.is_full() {
                #[cfg(feature = "log")]
                log::warn!("M9803R receive buffer overflow, dropped {} bytes", pending.len());
                self.status = DecodeStatus::BufferOverflow;
                break;
            }
        }

        // A full buffer without terminator can never complete. Keep only what
        // could still be the start of a frame.
        if self.buffer.is_full() {
            #[cfg(feature = "log")]
            log::warn!("M9803R buffer full without terminator, resyncing");
            self.buffer.retain_tail(FRAME_LEN - 1);
        }

        self.status
    }

    fn complete_frame(&mut self, terminator: usize) -> DecodeStatus {
        let snapshot = self.buffer.drain_frame(terminator);

        let packet = match packet::extract(&snapshot, terminator) {
            Ok(p) => p,
            Err(e) => {
                #[cfg(feature = "log")]
                log::warn!("M9803R dropped frame: {}", e);
                return DecodeStatus::from(&e);
            }
        };
        self.last_packet = Some(packet);

        match packet::decode_packet(&packet, &self.config) {
            Ok(reading) => {
                #[cfg(feature = "log")]
                log::trace!("M9803R reading {}", reading);
                self.reading = reading;
                if self.config.strict_units && !packet.has_known_scale() {
                    #[cfg(feature = "log")]
                    log::debug!("M9803R unmapped unit {} / range {}", packet.unit_code(), packet.range_code());
                    DecodeStatus::UnknownUnitOrRange
                } else {
                    DecodeStatus::Success
                }
            }
            Err(e) => {
                #[cfg(feature = "log")]
                log::debug!("M9803R frame not decoded: {}", e);
                DecodeStatus::from(&e)
            }
        }
    }

    #[inline]
    pub fn current_value(&self) -> f32 {
        self.reading.value
    }

    #[inline]
    pub fn current_unit(&self) -> char {
        self.reading.symbol()
    }

    #[inline]
    pub fn current_reading(&self) -> DecodedReading {
        self.reading
    }

    #[inline]
    pub fn current_unit_kind(&self) -> Unit {
        self.reading.unit
    }

    #[inline]
    pub fn last_status(&self) -> DecodeStatus {
        self.status
    }

    /// The last payload that was extracted, over-range frames included.
    #[inline]
    pub fn last_packet(&self) -> Option<RawPacket> {
        self.last_packet
    }

    /// Bytes waiting for a terminator.
    #[inline]
    pub fn buffered(&self) -> &[u8] {
        self.buffer.as_bytes()
    }

    #[inline]
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }
}

impl Default for M9803rEngine {
    fn default() -> Self {
        Self::new()
    }
}
