//! Error types for the embedding engine.

use thiserror::Error;

/// Errors that can occur while embedding or extracting a payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StegError {
    /// Every slot of every bit plane has been used.
    ///
    /// Raised mid-stream by the slot cursor or up front by a capacity check.
    /// A failed encode may already have modified part of the buffer.
    #[error("No available slot remaining (image filled, capacity {capacity_bits} bits)")]
    CapacityExhausted { capacity_bits: u64 },

    /// A value does not fit in the fixed-width field it is written to.
    #[error("Binary value {value} larger than expected size of {width} bits")]
    EncodingTooLarge { value: u64, width: u32 },

    /// Height, width or channel count is zero.
    #[error(
        "Invalid dimensions: height ({height}), width ({width}) and channels ({channels}) must be non-zero"
    )]
    InvalidDimensions {
        height: u32,
        width: u32,
        channels: u32,
    },

    /// Pixel data length doesn't match the declared dimensions.
    #[error("Invalid pixel data: expected {expected} bytes (height * width * channels), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// A bit string contained something other than `0` and `1`, or was too long.
    #[error("Invalid bit string: {0}")]
    InvalidBitString(String),
}

/// Result alias used throughout the engine.
pub type Result<T> = std::result::Result<T, StegError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StegError::CapacityExhausted { capacity_bits: 24 };
        assert_eq!(
            err.to_string(),
            "No available slot remaining (image filled, capacity 24 bits)"
        );

        let err = StegError::EncodingTooLarge {
            value: 256,
            width: 8,
        };
        assert_eq!(
            err.to_string(),
            "Binary value 256 larger than expected size of 8 bits"
        );

        let err = StegError::InvalidPixelData {
            expected: 12,
            actual: 11,
        };
        assert_eq!(
            err.to_string(),
            "Invalid pixel data: expected 12 bytes (height * width * channels), got 11"
        );
    }
}
