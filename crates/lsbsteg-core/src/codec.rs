//! Fixed-width binary fields, most significant bit first.
//!
//! Every field the framer writes has a fixed width chosen by the call site
//! (16 or 64 bits for lengths, 8 bits per unit). A value that needs more
//! bits than its field is rejected before any bit of that field is written;
//! nothing is ever truncated.

use crate::engine::{Embedder, Extractor};
use crate::error::{Result, StegError};

/// Number of significant bits in `value`, counting `0` as one bit.
#[inline]
fn bit_length(value: u64) -> u32 {
    (u64::BITS - value.leading_zeros()).max(1)
}

fn check_width(value: u64, width: u32) -> Result<()> {
    if bit_length(value) > width {
        return Err(StegError::EncodingTooLarge { value, width });
    }
    Ok(())
}

/// Render `value` as exactly `width` binary digits, zero padded on the left.
///
/// Fails with [`StegError::EncodingTooLarge`] if `value` needs more than
/// `width` bits.
pub fn to_binary(value: u64, width: u32) -> Result<String> {
    check_width(value, width)?;
    Ok(format!("{:0width$b}", value, width = width as usize))
}

/// Parse a string of binary digits, most significant first.
///
/// The empty string parses as `0`. Leading zeros are ignored, so fields
/// wider than 64 bits parse as long as the value itself fits in a `u64`.
pub fn parse_binary(bits: &str) -> Result<u64> {
    validate_bits(bits)?;
    let significant = bits.trim_start_matches('0');
    if significant.len() > u64::BITS as usize {
        return Err(StegError::InvalidBitString(format!(
            "{} significant digits exceed 64 bits",
            significant.len()
        )));
    }
    Ok(significant
        .bytes()
        .fold(0u64, |acc, b| (acc << 1) | u64::from(b == b'1')))
}

fn validate_bits(bits: &str) -> Result<()> {
    match bits.chars().find(|&c| c != '0' && c != '1') {
        Some(c) => Err(StegError::InvalidBitString(format!(
            "unexpected character {c:?}"
        ))),
        None => Ok(()),
    }
}

impl Embedder<'_> {
    /// Write a string of binary digits, left to right, one bit per slot.
    ///
    /// The whole string is validated before the first bit is written.
    pub fn put_bits(&mut self, bits: &str) -> Result<()> {
        validate_bits(bits)?;
        for b in bits.bytes() {
            self.write_bit(b == b'1')?;
        }
        Ok(())
    }

    /// Write `value` as a `width`-bit field, most significant bit first.
    ///
    /// Equivalent to `put_bits(&to_binary(value, width)?)`.
    pub fn put_value(&mut self, value: u64, width: u32) -> Result<()> {
        check_width(value, width)?;
        for i in (0..width).rev() {
            let bit = i < u64::BITS && (value >> i) & 1 == 1;
            self.write_bit(bit)?;
        }
        Ok(())
    }
}

impl Extractor<'_> {
    /// Read `n` bits and return them as binary digits, first read first.
    pub fn read_bits(&mut self, n: usize) -> Result<String> {
        let mut bits = String::with_capacity(n);
        for _ in 0..n {
            bits.push(if self.read_bit()? { '1' } else { '0' });
        }
        Ok(bits)
    }

    /// Read a `width`-bit field written by [`Embedder::put_value`].
    ///
    /// Fails with [`StegError::InvalidBitString`] if the field holds a value
    /// that does not fit in a `u64` (only possible for `width > 64`).
    pub fn read_value(&mut self, width: u32) -> Result<u64> {
        let mut value = 0u64;
        for _ in 0..width {
            let bit = self.read_bit()?;
            if value.leading_zeros() == 0 {
                return Err(StegError::InvalidBitString(format!(
                    "{width}-bit field exceeds 64 bits"
                )));
            }
            value = (value << 1) | u64::from(bit);
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::PixelBuffer;

    #[test]
    fn test_to_binary_padding() {
        assert_eq!(to_binary(5, 8).unwrap(), "00000101");
        assert_eq!(to_binary(0, 16).unwrap(), "0000000000000000");
        assert_eq!(to_binary(255, 8).unwrap(), "11111111");
        assert_eq!(to_binary(u64::MAX, 64).unwrap(), "1".repeat(64));
    }

    #[test]
    fn test_to_binary_too_large() {
        assert_eq!(
            to_binary(256, 8),
            Err(StegError::EncodingTooLarge {
                value: 256,
                width: 8
            })
        );
        assert!(to_binary(65536, 16).is_err());
        assert!(to_binary(65535, 16).is_ok());
    }

    #[test]
    fn test_parse_binary() {
        assert_eq!(parse_binary("00000101").unwrap(), 5);
        assert_eq!(parse_binary("").unwrap(), 0);
        assert_eq!(parse_binary(&to_binary(u64::MAX, 64).unwrap()).unwrap(), u64::MAX);
        assert_eq!(parse_binary(&format!("{}1", "0".repeat(100))).unwrap(), 1);
    }

    #[test]
    fn test_parse_binary_rejects_garbage() {
        assert!(matches!(
            parse_binary("0102"),
            Err(StegError::InvalidBitString(_))
        ));
        assert!(matches!(
            parse_binary("+101"),
            Err(StegError::InvalidBitString(_))
        ));
        assert!(matches!(
            parse_binary(&"1".repeat(65)),
            Err(StegError::InvalidBitString(_))
        ));
    }

    #[test]
    fn test_put_bits_validates_before_writing() {
        let mut buf = PixelBuffer::filled(1, 1, 3, 0).unwrap();
        {
            let mut emb = Embedder::new(&mut buf);
            assert!(emb.put_bits("11x").is_err());
            assert_eq!(emb.remaining(), 24);
        }
        assert_eq!(buf.as_raw(), &[0, 0, 0]);
    }

    #[test]
    fn test_put_value_rejects_before_writing() {
        let mut buf = PixelBuffer::filled(2, 2, 3, 0).unwrap();
        {
            let mut emb = Embedder::new(&mut buf);
            assert!(matches!(
                emb.put_value(300, 8),
                Err(StegError::EncodingTooLarge { .. })
            ));
            assert_eq!(emb.remaining(), 96);
        }
        assert!(buf.as_raw().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_put_value_matches_put_bits() {
        let mut a = PixelBuffer::filled(2, 3, 3, 0x5A).unwrap();
        let mut b = a.clone();
        Embedder::new(&mut a).put_value(0xBEEF, 16).unwrap();
        Embedder::new(&mut b)
            .put_bits(&to_binary(0xBEEF, 16).unwrap())
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_read_bits_msb_first() {
        let mut buf = PixelBuffer::filled(1, 4, 3, 0).unwrap();
        Embedder::new(&mut buf).put_value(0b1011_0001, 8).unwrap();

        let mut ext = Extractor::new(&buf);
        assert_eq!(ext.read_bits(8).unwrap(), "10110001");

        let mut ext = Extractor::new(&buf);
        assert_eq!(ext.read_value(8).unwrap(), 0b1011_0001);
    }

    #[test]
    fn test_wide_field_round_trip() {
        let mut buf = PixelBuffer::filled(4, 4, 3, 0).unwrap();
        Embedder::new(&mut buf).put_value(42, 80).unwrap();
        assert_eq!(Extractor::new(&buf).read_value(80).unwrap(), 42);
    }

    #[test]
    fn test_read_value_overflow() {
        let mut buf = PixelBuffer::filled(4, 4, 3, 0).unwrap();
        Embedder::new(&mut buf).put_bits(&"1".repeat(65)).unwrap();
        assert!(matches!(
            Extractor::new(&buf).read_value(65),
            Err(StegError::InvalidBitString(_))
        ));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: Rendered fields always have exactly the requested width.
        #[test]
        fn prop_to_binary_width(value in any::<u32>(), extra in 0u32..=32) {
            let width = 32 + extra;
            let bits = to_binary(u64::from(value), width).unwrap();
            prop_assert_eq!(bits.len(), width as usize);
            prop_assert_eq!(parse_binary(&bits).unwrap(), u64::from(value));
        }

        /// Property: A value is rejected exactly when it needs more bits than the field.
        #[test]
        fn prop_to_binary_rejects_exactly_oversized(value in any::<u64>(), width in 1u32..=64) {
            let fits = width == 64 || value < (1u64 << width);
            prop_assert_eq!(to_binary(value, width).is_ok(), fits);
        }
    }
}
