//! Length-prefixed payload framing.
//!
//! Two framings share the same slot stream:
//!
//! - **Text**: a 16-bit character count, then one 8-bit unit per character
//!   holding its code point. Only characters up to U+00FF can be framed.
//! - **Binary**: a 64-bit byte count, then one 8-bit unit per byte.
//!
//! All fields are written most significant bit first. A given buffer holds
//! one payload in one framing; the decoder must be told which.

use serde::Serialize;
use tracing::debug;

use crate::buffer::PixelBuffer;
use crate::capacity::check_capacity;
use crate::engine::{Embedder, Extractor};
use crate::error::{Result, StegError};

/// Width of the text framing's character count.
pub const TEXT_LENGTH_BITS: u32 = 16;
/// Width of the binary framing's byte count.
pub const BINARY_LENGTH_BITS: u32 = 64;
/// Width of one payload unit (character or byte).
pub const UNIT_BITS: u32 = 8;

/// The two supported payload framings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Framing {
    Text,
    Binary,
}

impl Framing {
    /// Width in bits of the length prefix.
    pub fn prefix_bits(self) -> u32 {
        match self {
            Framing::Text => TEXT_LENGTH_BITS,
            Framing::Binary => BINARY_LENGTH_BITS,
        }
    }

    /// Largest unit count the length prefix can describe.
    pub fn max_units(self) -> u64 {
        match self {
            Framing::Text => (1u64 << TEXT_LENGTH_BITS) - 1,
            Framing::Binary => u64::MAX,
        }
    }

    /// Bits needed to embed a payload of `units` units, prefix included.
    pub fn required_bits(self, units: u64) -> u128 {
        u128::from(self.prefix_bits()) + u128::from(units) * u128::from(UNIT_BITS)
    }
}

/// Convert text to 8-bit units, rejecting anything the text framing can't hold.
fn text_units(text: &str) -> Result<Vec<u8>> {
    let count = text.chars().count() as u64;
    if count > Framing::Text.max_units() {
        return Err(StegError::EncodingTooLarge {
            value: count,
            width: TEXT_LENGTH_BITS,
        });
    }

    text.chars()
        .map(|c| {
            u8::try_from(u32::from(c)).map_err(|_| StegError::EncodingTooLarge {
                value: u64::from(u32::from(c)),
                width: UNIT_BITS,
            })
        })
        .collect()
}

impl Embedder<'_> {
    /// Embed `text` with the text framing.
    ///
    /// The character count and every code point are checked before the
    /// first bit is written. Capacity is not: if the buffer runs out midway
    /// the error is returned with the buffer partially modified.
    pub fn encode_text(&mut self, text: &str) -> Result<()> {
        let units = text_units(text)?;
        debug!(
            chars = units.len(),
            bits = %Framing::Text.required_bits(units.len() as u64),
            "embedding text payload"
        );
        self.put_units(&units, Framing::Text)
    }

    /// Embed `data` with the binary framing.
    ///
    /// Like [`encode_text`](Self::encode_text), running out of capacity
    /// leaves the buffer partially modified.
    pub fn encode_binary(&mut self, data: &[u8]) -> Result<()> {
        debug!(
            bytes = data.len(),
            bits = %Framing::Binary.required_bits(data.len() as u64),
            "embedding binary payload"
        );
        self.put_units(data, Framing::Binary)
    }

    fn put_units(&mut self, units: &[u8], framing: Framing) -> Result<()> {
        self.put_value(units.len() as u64, framing.prefix_bits())?;
        for &unit in units {
            self.put_value(u64::from(unit), UNIT_BITS)?;
        }
        Ok(())
    }
}

impl Extractor<'_> {
    /// Recover a payload embedded with the text framing.
    ///
    /// Each 8-bit unit becomes the character with that code point.
    pub fn decode_text(&mut self) -> Result<String> {
        let units = self.read_units(Framing::Text)?;
        Ok(units.into_iter().map(char::from).collect())
    }

    /// Recover a payload embedded with the binary framing.
    pub fn decode_binary(&mut self) -> Result<Vec<u8>> {
        self.read_units(Framing::Binary)
    }

    fn read_units(&mut self, framing: Framing) -> Result<Vec<u8>> {
        let count = self.read_value(framing.prefix_bits())?;

        // A length that can't fit in what is left of the buffer means there
        // is no payload here. Fail before allocating for it.
        let needed = u128::from(count) * u128::from(UNIT_BITS);
        if needed > u128::from(self.remaining()) {
            debug!(
                ?framing,
                count,
                remaining_bits = self.remaining(),
                "decoded length exceeds remaining capacity"
            );
            return Err(StegError::CapacityExhausted {
                capacity_bits: self.capacity_bits(),
            });
        }

        let mut units = Vec::with_capacity(count as usize);
        for _ in 0..count {
            // UNIT_BITS wide, always fits
            units.push(self.read_value(UNIT_BITS)? as u8);
        }
        debug!(?framing, units = units.len(), "extracted payload");
        Ok(units)
    }
}

/// Embed `text` into `buffer` in place, using the text framing.
///
/// The payload is validated and checked against the buffer's capacity
/// before anything is written, so on error `buffer` is unchanged.
pub fn encode_text(buffer: &mut PixelBuffer, text: &str) -> Result<()> {
    let units = text_units(text)?;
    check_capacity(buffer, Framing::Text, units.len() as u64)?;
    Embedder::new(buffer).encode_text(text)
}

/// Recover text embedded by [`encode_text`].
pub fn decode_text(buffer: &PixelBuffer) -> Result<String> {
    Extractor::new(buffer).decode_text()
}

/// Embed `data` into `buffer` in place, using the binary framing.
///
/// Checked against capacity first; on error `buffer` is unchanged.
pub fn encode_binary(buffer: &mut PixelBuffer, data: &[u8]) -> Result<()> {
    check_capacity(buffer, Framing::Binary, data.len() as u64)?;
    Embedder::new(buffer).encode_binary(data)
}

/// Recover bytes embedded by [`encode_binary`].
pub fn decode_binary(buffer: &PixelBuffer) -> Result<Vec<u8>> {
    Extractor::new(buffer).decode_binary()
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for Latin-1 text (every code point fits in 8 bits).
    fn latin1_strategy() -> impl Strategy<Value = String> {
        prop::collection::vec(any::<u8>(), 0..64)
            .prop_map(|bytes| bytes.into_iter().map(char::from).collect())
    }

    /// Strategy for a random buffer of the given shape.
    fn buffer_strategy(height: u32, width: u32, channels: u32) -> impl Strategy<Value = PixelBuffer> {
        let size = (height * width * channels) as usize;
        prop::collection::vec(any::<u8>(), size..=size)
            .prop_map(move |data| PixelBuffer::new(height, width, channels, data).unwrap())
    }

    /// Strategy for shape plus random contents (small for speed).
    fn any_buffer() -> impl Strategy<Value = PixelBuffer> {
        (1u32..=12, 1u32..=12, 1u32..=4).prop_flat_map(|(h, w, c)| buffer_strategy(h, w, c))
    }

    proptest! {
        /// Property: Text round-trips whenever it fits.
        #[test]
        fn prop_text_round_trip(mut buf in any_buffer(), text in latin1_strategy()) {
            let units = text.chars().count() as u64;
            let fits = Framing::Text.required_bits(units) <= u128::from(buf.capacity_bits());

            let result = encode_text(&mut buf, &text);
            if fits {
                prop_assert!(result.is_ok());
                prop_assert_eq!(decode_text(&buf).unwrap(), text);
            } else {
                let is_exhausted = matches!(result, Err(StegError::CapacityExhausted { .. }));
                prop_assert!(is_exhausted);
            }
        }

        /// Property: Bytes round-trip whenever they fit.
        #[test]
        fn prop_binary_round_trip(
            mut buf in any_buffer(),
            data in prop::collection::vec(any::<u8>(), 0..64),
        ) {
            let fits = Framing::Binary.required_bits(data.len() as u64)
                <= u128::from(buf.capacity_bits());

            let result = encode_binary(&mut buf, &data);
            if fits {
                prop_assert!(result.is_ok());
                prop_assert_eq!(decode_binary(&buf).unwrap(), data);
            } else {
                let is_exhausted = matches!(result, Err(StegError::CapacityExhausted { .. }));
                prop_assert!(is_exhausted);
            }
        }

        /// Property: Slots beyond the payload keep their original values.
        #[test]
        fn prop_unused_slots_untouched(
            buf in buffer_strategy(12, 12, 4),
            text in latin1_strategy(),
        ) {
            let mut encoded = buf.clone();
            encode_text(&mut encoded, &text).unwrap();

            // 576 LSB slots hold 16 + 8 * 63 bits at most, so plane 0 suffices
            let used = Framing::Text.required_bits(text.chars().count() as u64) as usize;
            prop_assert_eq!(&encoded.as_raw()[used..], &buf.as_raw()[used..]);
            for (a, b) in encoded.as_raw()[..used].iter().zip(&buf.as_raw()[..used]) {
                prop_assert_eq!(a & 0xFE, b & 0xFE);
            }
        }
    }
}
