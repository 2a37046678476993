//! Bit-level access to a pixel buffer through a slot cursor.
//!
//! An [`Embedder`] mutably borrows the buffer for the duration of one
//! encode, an [`Extractor`] immutably borrows it for one decode. Each owns
//! a fresh [`SlotCursor`], so one engine handles exactly one payload and
//! there is no way to rewind it.
//!
//! Encoding is not transactional. When a write fails partway through a
//! payload the bits already written stay in the buffer, and the caller
//! should discard it.

use crate::buffer::PixelBuffer;
use crate::cursor::{Slot, SlotCursor};
use crate::error::Result;

/// Writes bits into a pixel buffer, one slot at a time.
#[derive(Debug)]
pub struct Embedder<'a> {
    buffer: &'a mut PixelBuffer,
    cursor: SlotCursor,
}

impl<'a> Embedder<'a> {
    /// Start embedding at the first slot of bit plane 0.
    pub fn new(buffer: &'a mut PixelBuffer) -> Self {
        let cursor = SlotCursor::new(buffer.height(), buffer.width(), buffer.channels());
        Self { buffer, cursor }
    }

    /// Set or clear the active plane's bit at the current slot, then advance.
    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        let slot = self.cursor.current()?;
        let value = self.buffer.get(slot.row, slot.col, slot.channel);
        let value = slot.bit_plane().apply(value, bit);
        self.buffer.set(slot.row, slot.col, slot.channel, value);
        self.cursor.advance()
    }

    /// The slot the next bit goes to, or `None` once the buffer is full.
    pub fn position(&self) -> Option<Slot> {
        self.cursor.peek()
    }

    /// Bits that can still be written.
    pub fn remaining(&self) -> u64 {
        self.cursor.remaining()
    }

    /// Total bits the buffer can hold across all bit planes.
    pub fn capacity_bits(&self) -> u64 {
        self.cursor.capacity_bits()
    }
}

/// Reads bits back out of a pixel buffer, in the order they were written.
#[derive(Debug)]
pub struct Extractor<'a> {
    buffer: &'a PixelBuffer,
    cursor: SlotCursor,
}

impl<'a> Extractor<'a> {
    /// Start extracting at the first slot of bit plane 0.
    pub fn new(buffer: &'a PixelBuffer) -> Self {
        let cursor = SlotCursor::new(buffer.height(), buffer.width(), buffer.channels());
        Self { buffer, cursor }
    }

    /// Read the active plane's bit at the current slot, then advance.
    pub fn read_bit(&mut self) -> Result<bool> {
        let slot = self.cursor.current()?;
        let value = self.buffer.get(slot.row, slot.col, slot.channel);
        let bit = slot.bit_plane().test(value);
        self.cursor.advance()?;
        Ok(bit)
    }

    /// The slot the next bit comes from, or `None` once the buffer is used up.
    pub fn position(&self) -> Option<Slot> {
        self.cursor.peek()
    }

    /// Bits that can still be read.
    pub fn remaining(&self) -> u64 {
        self.cursor.remaining()
    }

    /// Total bits the buffer can hold across all bit planes.
    pub fn capacity_bits(&self) -> u64 {
        self.cursor.capacity_bits()
    }
}
