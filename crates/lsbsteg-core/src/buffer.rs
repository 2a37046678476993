//! Pixel buffer carried through the embedding engine.
//!
//! The buffer is a dense `height x width x channels` grid of 8-bit samples
//! stored interleaved in row-major order, channel-minor:
//! `index = (row * width + col) * channels + channel`. Dimensions are fixed
//! at construction.

use image::{DynamicImage, GrayImage, RgbImage, RgbaImage};

use crate::error::{Result, StegError};

/// A decoded image as a 3-dimensional grid of channel values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    height: u32,
    width: u32,
    channels: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Create a buffer from interleaved channel data.
    ///
    /// Fails with [`StegError::InvalidDimensions`] if any dimension is zero
    /// and with [`StegError::InvalidPixelData`] if `data` is not exactly
    /// `height * width * channels` bytes long.
    pub fn new(height: u32, width: u32, channels: u32, data: Vec<u8>) -> Result<Self> {
        let expected = expected_len(height, width, channels)?;
        if data.len() != expected {
            return Err(StegError::InvalidPixelData {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            height,
            width,
            channels,
            data,
        })
    }

    /// Create a buffer of the given shape with every sample set to `value`.
    pub fn filled(height: u32, width: u32, channels: u32, value: u8) -> Result<Self> {
        let len = expected_len(height, width, channels)?;
        Self::new(height, width, channels, vec![value; len])
    }

    /// Create a buffer from an `image::RgbImage` (3 channels).
    pub fn from_rgb_image(img: RgbImage) -> Result<Self> {
        let (width, height) = img.dimensions();
        Self::new(height, width, 3, img.into_raw())
    }

    /// Create a buffer from an `image::RgbaImage` (4 channels).
    ///
    /// The alpha channel is part of the slot order like any other channel.
    pub fn from_rgba_image(img: RgbaImage) -> Result<Self> {
        let (width, height) = img.dimensions();
        Self::new(height, width, 4, img.into_raw())
    }

    /// Create a buffer from an `image::GrayImage` (1 channel).
    pub fn from_luma_image(img: GrayImage) -> Result<Self> {
        let (width, height) = img.dimensions();
        Self::new(height, width, 1, img.into_raw())
    }

    /// Create a buffer from any decoded image.
    ///
    /// 8-bit grey, grey-alpha, RGB and RGBA images keep their channel
    /// layout. Everything else (16-bit, float) is converted to RGBA8.
    pub fn from_dynamic_image(img: DynamicImage) -> Result<Self> {
        match img {
            DynamicImage::ImageLuma8(img) => Self::from_luma_image(img),
            DynamicImage::ImageLumaA8(img) => {
                let (width, height) = img.dimensions();
                Self::new(height, width, 2, img.into_raw())
            }
            DynamicImage::ImageRgb8(img) => Self::from_rgb_image(img),
            DynamicImage::ImageRgba8(img) => Self::from_rgba_image(img),
            other => Self::from_rgba_image(other.to_rgba8()),
        }
    }

    /// Convert to an `image::RgbImage`. Returns `None` unless the buffer has 3 channels.
    pub fn into_rgb_image(self) -> Option<RgbImage> {
        if self.channels != 3 {
            return None;
        }
        RgbImage::from_raw(self.width, self.height, self.data)
    }

    /// Convert to an `image::RgbaImage`. Returns `None` unless the buffer has 4 channels.
    pub fn into_rgba_image(self) -> Option<RgbaImage> {
        if self.channels != 4 {
            return None;
        }
        RgbaImage::from_raw(self.width, self.height, self.data)
    }

    /// Get the buffer height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the buffer width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the number of channels per pixel
    pub fn channels(&self) -> u32 {
        self.channels
    }

    /// Raw interleaved channel data.
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// Consume the buffer and return the raw interleaved channel data.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Read the sample at `(row, col, channel)`.
    ///
    /// # Panics
    /// Panics if the position is outside the buffer.
    #[inline]
    pub fn get(&self, row: u32, col: u32, channel: u32) -> u8 {
        self.data[self.index(row, col, channel)]
    }

    /// Overwrite the sample at `(row, col, channel)`.
    ///
    /// # Panics
    /// Panics if the position is outside the buffer.
    #[inline]
    pub fn set(&mut self, row: u32, col: u32, channel: u32, value: u8) {
        let idx = self.index(row, col, channel);
        self.data[idx] = value;
    }

    /// Number of addressable slots (`height * width * channels`).
    pub fn slot_count(&self) -> u64 {
        self.data.len() as u64
    }

    /// Total embeddable bits across all eight bit planes.
    pub fn capacity_bits(&self) -> u64 {
        self.slot_count() * 8
    }

    #[inline]
    fn index(&self, row: u32, col: u32, channel: u32) -> usize {
        debug_assert!(row < self.height && col < self.width && channel < self.channels);
        ((row as usize * self.width as usize) + col as usize) * self.channels as usize
            + channel as usize
    }
}

fn expected_len(height: u32, width: u32, channels: u32) -> Result<usize> {
    let invalid = StegError::InvalidDimensions {
        height,
        width,
        channels,
    };
    if height == 0 || width == 0 || channels == 0 {
        return Err(invalid);
    }
    (height as usize)
        .checked_mul(width as usize)
        .and_then(|n| n.checked_mul(channels as usize))
        .ok_or(invalid)
}
