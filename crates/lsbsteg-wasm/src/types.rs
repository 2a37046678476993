//! WASM-compatible wrapper types for pixel data.
//!
//! This module provides JavaScript-friendly types that wrap the core
//! `PixelBuffer`, handling the conversion between Rust and JavaScript data
//! representations.

use lsbsteg_core::{Capacity, PixelBuffer, StegError};
use wasm_bindgen::prelude::*;

/// A pixel buffer wrapper for JavaScript.
///
/// Holds interleaved channel samples, e.g. the `data` of a canvas
/// `ImageData` (4 channels) or decoded RGB data (3 channels).
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. `pixels()` copies it out to a
/// JavaScript `Uint8Array`.
#[wasm_bindgen]
pub struct JsPixelBuffer {
    inner: PixelBuffer,
}

#[wasm_bindgen]
impl JsPixelBuffer {
    /// Create a JsPixelBuffer from dimensions and pixel data.
    ///
    /// Fails if a dimension is zero or `pixels.length` is not
    /// `height * width * channels`.
    #[wasm_bindgen(constructor)]
    pub fn new(
        height: u32,
        width: u32,
        channels: u32,
        pixels: Vec<u8>,
    ) -> Result<JsPixelBuffer, JsValue> {
        PixelBuffer::new(height, width, channels, pixels)
            .map(JsPixelBuffer::from_core)
            .map_err(to_js_error)
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    #[wasm_bindgen(getter)]
    pub fn channels(&self) -> u32 {
        self.inner.channels()
    }

    /// Get the number of bytes in the pixel buffer
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.as_raw().len()
    }

    /// Returns the pixel data as Uint8Array (copied).
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.as_raw().to_vec()
    }

    /// Capacity of this buffer as a plain object:
    /// `{ slots, total_bits, lsb_bits, max_text_chars, max_binary_bytes }`.
    pub fn capacity(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&Capacity::of(&self.inner))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl JsPixelBuffer {
    pub(crate) fn from_core(inner: PixelBuffer) -> Self {
        Self { inner }
    }

    pub(crate) fn as_core(&self) -> &PixelBuffer {
        &self.inner
    }

    pub(crate) fn as_core_mut(&mut self) -> &mut PixelBuffer {
        &mut self.inner
    }
}

/// Convert a core error into a JavaScript error value, logging it to the
/// browser console on the way.
pub(crate) fn to_js_error(err: StegError) -> JsValue {
    let msg = err.to_string();
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&JsValue::from_str(&format!("lsbsteg: {msg}")));
    JsValue::from_str(&msg)
}


/// WASM-specific tests that require JsValue.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_constructor_rejects_bad_length() {
        assert!(JsPixelBuffer::new(2, 2, 3, vec![0u8; 11]).is_err());
        assert!(JsPixelBuffer::new(0, 2, 3, vec![]).is_err());
    }

    #[wasm_bindgen_test]
    fn test_capacity_object() {
        let img = JsPixelBuffer::new(1, 1, 3, vec![0u8; 3]).unwrap();
        assert!(img.capacity().unwrap().is_object());
    }
}
