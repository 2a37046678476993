//! Capacity planning for a buffer shape.
//!
//! A buffer of `height x width x channels` samples has one slot per sample
//! on each of the eight bit planes. Filling only plane 0 keeps changes
//! invisible; every further plane touched doubles the worst-case error of
//! a sample, so callers may want to check [`planes_needed`] before encoding.

use serde::Serialize;

use crate::buffer::PixelBuffer;
use crate::cursor::BIT_PLANES;
use crate::error::{Result, StegError};
use crate::framing::{Framing, UNIT_BITS};

/// How much a buffer of a given shape can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Capacity {
    /// Slots per bit plane (`height * width * channels`).
    pub slots: u64,
    /// Bits across all eight planes.
    pub total_bits: u64,
    /// Bits available on the least significant plane alone.
    pub lsb_bits: u64,
    /// Longest text the text framing can embed.
    pub max_text_chars: u64,
    /// Longest byte payload the binary framing can embed.
    pub max_binary_bytes: u64,
}

impl Capacity {
    /// Capacity of a `height x width x channels` buffer.
    pub fn for_dimensions(height: u32, width: u32, channels: u32) -> Self {
        let slots = u64::from(height) * u64::from(width) * u64::from(channels);
        let total_bits = slots * BIT_PLANES.len() as u64;
        Self {
            slots,
            total_bits,
            lsb_bits: slots,
            max_text_chars: max_units(total_bits, Framing::Text),
            max_binary_bytes: max_units(total_bits, Framing::Binary),
        }
    }

    /// Capacity of an existing buffer.
    pub fn of(buffer: &PixelBuffer) -> Self {
        Self::for_dimensions(buffer.height(), buffer.width(), buffer.channels())
    }

    /// Whether a payload of `units` units fits with the given framing.
    pub fn fits(&self, framing: Framing, units: u64) -> bool {
        units <= framing.max_units() && framing.required_bits(units) <= u128::from(self.total_bits)
    }

    /// Number of bit planes an encode of `units` units will touch.
    ///
    /// Returns `None` if the payload does not fit.
    pub fn planes_needed(&self, framing: Framing, units: u64) -> Option<u8> {
        if !self.fits(framing, units) {
            return None;
        }
        let bits = framing.required_bits(units);
        let slots = u128::from(self.slots);
        // fits() guarantees at most 8 planes
        Some(bits.div_ceil(slots) as u8)
    }
}

fn max_units(total_bits: u64, framing: Framing) -> u64 {
    let payload_bits = total_bits.saturating_sub(u64::from(framing.prefix_bits()));
    (payload_bits / u64::from(UNIT_BITS)).min(framing.max_units())
}

/// Check that a payload of `units` units fits in `buffer`.
///
/// This is the precondition the framing functions verify before writing.
/// Fails with [`StegError::CapacityExhausted`] when it doesn't fit.
pub fn check_capacity(buffer: &PixelBuffer, framing: Framing, units: u64) -> Result<()> {
    let capacity = Capacity::of(buffer);
    if framing.required_bits(units) > u128::from(capacity.total_bits) {
        return Err(StegError::CapacityExhausted {
            capacity_bits: capacity.total_bits,
        });
    }
    Ok(())
}

/// Number of bit planes an encode into `buffer` would touch.
///
/// See [`Capacity::planes_needed`].
pub fn planes_needed(buffer: &PixelBuffer, framing: Framing, units: u64) -> Option<u8> {
    Capacity::of(buffer).planes_needed(framing, units)
}
