// src/common/buffer.rs

use super::error::M9803rError;
use super::frame::{self, BUFFER_CAPACITY, TERMINATOR};
use arrayvec::ArrayVec;

/// Bounded receive buffer that collects bytes until a frame terminator shows up.
///
/// Backed by a fixed-capacity `ArrayVec`, so writes past the end are
/// rejected instead of corrupting memory. Bytes that do not fit are dropped
/// and reported as [`M9803rError::BufferOverflow`]; what was already buffered
/// stays in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameAccumulator {
    bytes: ArrayVec<u8, BUFFER_CAPACITY>,
}

impl FrameAccumulator {
    pub const fn new() -> Self {
        FrameAccumulator { bytes: ArrayVec::new_const() }
    }

    /// Appends as many bytes as fit, in order.
    ///
    /// # Returns
    ///
    /// * `Ok(())` if every byte was stored.
    /// * `Err(M9803rError::BufferOverflow)` if some trailing bytes were dropped.
    ///   `needed` is the length the buffer would have had, `got` its capacity.
    pub fn append(&mut self, input: &[u8]) -> Result<(), M9803rError<()>> {
        let dropped = self.fill_from(input);
        if dropped.is_empty() {
            Ok(())
        } else {
            Err(M9803rError::BufferOverflow {
                needed: self.bytes.len() + dropped.len(),
                got: BUFFER_CAPACITY,
            })
        }
    }

    /// Stores the longest prefix of `input` that fits and hands back the rest.
    pub fn fill_from<'a>(&mut self, input: &'a [u8]) -> &'a [u8] {
        let (fits, rest) = input.split_at(input.len().min(self.remaining()));
        self.bytes.extend(fits.iter().copied());
        rest
    }

    /// Appends a single byte.
    pub fn push(&mut self, byte: u8) -> Result<(), M9803rError<()>> {
        self.bytes.try_push(byte).map_err(|_| M9803rError::BufferOverflow {
            needed: BUFFER_CAPACITY + 1,
            got: BUFFER_CAPACITY,
        })
    }

    /// Index of the first `<CR>` of a `<CR><LF>` pair, if any.
    #[inline]
    pub fn find_terminator(&self) -> Option<usize> {
        frame::find_terminator(&self.bytes)
    }

    /// Removes everything up to and including the terminator whose `<CR>` sits
    /// at `terminator`, returning the removed bytes. Bytes received after the
    /// terminator stay buffered for the next frame.
    pub fn drain_frame(&mut self, terminator: usize) -> ArrayVec<u8, BUFFER_CAPACITY> {
        let end = terminator.saturating_add(TERMINATOR.len()).min(self.bytes.len());
        self.bytes.drain(..end).collect()
    }

    /// Drops the oldest bytes so that at most `keep` remain.
    pub fn retain_tail(&mut self, keep: usize) {
        let excess = self.bytes.len().saturating_sub(keep);
        self.bytes.drain(..excess);
    }

    /// Zeroes the content and rewinds the write index.
    pub fn reset(&mut self) {
        self.bytes.iter_mut().for_each(|b| *b = 0);
        self.bytes.clear();
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.bytes.is_full()
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.bytes.remaining_capacity()
    }

    #[inline]
    pub const fn capacity(&self) -> usize {
        BUFFER_CAPACITY
    }
}
