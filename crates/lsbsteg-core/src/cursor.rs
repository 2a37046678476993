//! Slot cursor: the fixed traversal order of the embedding engine.
//!
//! Slots are visited channel first, then column, then row. Once every slot
//! has been visited at the active bit plane the cursor wraps to `(0, 0, 0)`
//! and escalates to the next plane, from bit 0 (LSB) up to bit 7 (MSB).
//! The order depends only on the buffer dimensions, never on pixel values,
//! so an encoder and a decoder over the same shape agree slot for slot.
//!
//! Advancing past the final slot of bit plane 7 parks the cursor in an
//! exhausted state. The bit that was just written there is kept; any
//! further advance, write or read fails with
//! [`StegError::CapacityExhausted`]. A payload that fills the buffer
//! exactly therefore succeeds.

use std::iter::FusedIterator;

use tracing::debug;

use crate::error::{Result, StegError};

/// A one-bit mask and its complement, selecting a single bit plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitPlane {
    /// Mask used to set the bit (bitwise OR).
    pub one: u8,
    /// Complement used to clear the bit (bitwise AND).
    pub zero: u8,
}

impl BitPlane {
    const fn at(index: u8) -> Self {
        let one = 1u8 << index;
        Self { one, zero: !one }
    }

    /// Return `value` with this plane's bit set or cleared.
    #[inline]
    pub fn apply(self, value: u8, bit: bool) -> u8 {
        if bit {
            value | self.one
        } else {
            value & self.zero
        }
    }

    /// Whether this plane's bit is set in `value`.
    #[inline]
    pub fn test(self, value: u8) -> bool {
        value & self.one != 0
    }
}

/// Mask pairs for bit planes 0 (LSB) through 7 (MSB), in escalation order.
pub const BIT_PLANES: [BitPlane; 8] = [
    BitPlane::at(0),
    BitPlane::at(1),
    BitPlane::at(2),
    BitPlane::at(3),
    BitPlane::at(4),
    BitPlane::at(5),
    BitPlane::at(6),
    BitPlane::at(7),
];

const LAST_PLANE: u8 = (BIT_PLANES.len() - 1) as u8;

/// One addressable bit: a channel sample and the bit plane in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slot {
    /// Pixel row.
    pub row: u32,
    /// Pixel column.
    pub col: u32,
    /// Channel within the pixel.
    pub channel: u32,
    /// Bit plane index, 0 (LSB) to 7 (MSB).
    pub plane: u8,
}

impl Slot {
    /// Mask pair for this slot's bit plane.
    #[inline]
    pub fn bit_plane(&self) -> BitPlane {
        BIT_PLANES[self.plane as usize]
    }
}

/// Position of the engine within a buffer of fixed dimensions.
#[derive(Debug, Clone)]
pub struct SlotCursor {
    height: u32,
    width: u32,
    channels: u32,
    row: u32,
    col: u32,
    channel: u32,
    plane: u8,
    exhausted: bool,
}

impl SlotCursor {
    /// Create a cursor at `(0, 0, 0)` on bit plane 0.
    ///
    /// Dimensions are expected to be non-zero; [`crate::PixelBuffer`]
    /// guarantees that for every cursor the engine creates. A cursor over
    /// an empty shape starts out exhausted.
    pub fn new(height: u32, width: u32, channels: u32) -> Self {
        Self {
            height,
            width,
            channels,
            row: 0,
            col: 0,
            channel: 0,
            plane: 0,
            exhausted: height == 0 || width == 0 || channels == 0,
        }
    }

    /// The slot the next bit will be written to or read from.
    ///
    /// Returns `None` once the cursor is exhausted.
    #[inline]
    pub fn peek(&self) -> Option<Slot> {
        if self.exhausted {
            return None;
        }
        Some(Slot {
            row: self.row,
            col: self.col,
            channel: self.channel,
            plane: self.plane,
        })
    }

    /// Like [`peek`](Self::peek) but fails with
    /// [`StegError::CapacityExhausted`] instead of returning `None`.
    #[inline]
    pub fn current(&self) -> Result<Slot> {
        self.peek().ok_or_else(|| self.exhausted_error())
    }

    /// Move to the next slot, escalating the bit plane on wraparound.
    pub fn advance(&mut self) -> Result<()> {
        if self.exhausted {
            return Err(self.exhausted_error());
        }

        self.channel += 1;
        if self.channel < self.channels {
            return Ok(());
        }
        self.channel = 0;

        self.col += 1;
        if self.col < self.width {
            return Ok(());
        }
        self.col = 0;

        self.row += 1;
        if self.row < self.height {
            return Ok(());
        }
        self.row = 0;

        if self.plane == LAST_PLANE {
            debug!(
                capacity_bits = self.capacity_bits(),
                "all bit planes used, cursor exhausted"
            );
            self.exhausted = true;
        } else {
            self.plane += 1;
            debug!(
                plane = self.plane,
                mask = BIT_PLANES[self.plane as usize].one,
                "bit plane filled, escalating"
            );
        }
        Ok(())
    }

    /// Index of the active bit plane (0 to 7).
    pub fn plane(&self) -> u8 {
        self.plane
    }

    /// Whether every slot of every bit plane has been visited.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Slots left to visit, including the current one.
    pub fn remaining(&self) -> u64 {
        if self.exhausted {
            return 0;
        }
        let per_plane = self.slots_per_plane();
        let within_plane = (self.row as u64 * self.width as u64 + self.col as u64)
            * self.channels as u64
            + self.channel as u64;
        self.capacity_bits() - (self.plane as u64 * per_plane + within_plane)
    }

    /// Total bits this cursor can visit over its lifetime.
    pub fn capacity_bits(&self) -> u64 {
        self.slots_per_plane() * BIT_PLANES.len() as u64
    }

    fn slots_per_plane(&self) -> u64 {
        self.height as u64 * self.width as u64 * self.channels as u64
    }

    fn exhausted_error(&self) -> StegError {
        StegError::CapacityExhausted {
            capacity_bits: self.capacity_bits(),
        }
    }
}

/// Lazy, finite sequence of every slot in visitation order.
///
/// Not restartable: once it has yielded the last slot of bit plane 7 it is
/// done for good.
#[derive(Debug, Clone)]
pub struct Slots {
    cursor: SlotCursor,
}

impl Iterator for Slots {
    type Item = Slot;

    fn next(&mut self) -> Option<Slot> {
        let slot = self.cursor.peek()?;
        self.cursor.advance().ok()?;
        Some(slot)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match usize::try_from(self.cursor.remaining()) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

impl FusedIterator for Slots {}

/// Every slot of a `height x width x channels` buffer, in the order the
/// engine writes and reads them.
pub fn slot_order(height: u32, width: u32, channels: u32) -> Slots {
    Slots {
        cursor: SlotCursor::new(height, width, channels),
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
