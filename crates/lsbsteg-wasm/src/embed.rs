//! Payload embedding WASM bindings.
//!
//! This module exposes the lsbsteg-core framing functions to JavaScript.
//! The browser side decodes the cover image (e.g. via a canvas), passes the
//! raw samples here, and re-encodes the result as PNG.
//!
//! # Functions
//!
//! - [`encode_text`] / [`decode_text`] - Text framing (16-bit length, Latin-1 characters)
//! - [`encode_binary`] / [`decode_binary`] - Binary framing (64-bit length, raw bytes)
//! - [`embed_text`] / [`extract_text`] - Same as above, on a [`JsPixelBuffer`]
//! - [`capacity`] - How much a buffer of a given shape can hold
//!
//! # Example
//!
//! ```typescript
//! import { encode_text, decode_text } from '@lsbsteg/wasm';
//!
//! const { data, width, height } = ctx.getImageData(0, 0, w, h);
//! const stego = encode_text(data, height, width, 4, 'meet at noon');
//! console.log(decode_text(stego, height, width, 4));
//! ```

use crate::types::{to_js_error, JsPixelBuffer};
use lsbsteg_core::{framing, Capacity, PixelBuffer};
use wasm_bindgen::prelude::*;

fn buffer_from(pixels: &[u8], height: u32, width: u32, channels: u32) -> Result<PixelBuffer, JsValue> {
    PixelBuffer::new(height, width, channels, pixels.to_vec()).map_err(to_js_error)
}

/// Embed text into pixel data and return the modified copy.
///
/// # Arguments
///
/// * `pixels` - Interleaved channel samples as a `Uint8Array`
/// * `height` - Image height in pixels
/// * `width` - Image width in pixels
/// * `channels` - Samples per pixel (3 for RGB, 4 for RGBA)
/// * `text` - Text to hide; every character must be U+00FF or below
///
/// # Errors
///
/// Returns an error if the dimensions don't match the data, the text has a
/// character above U+00FF or more than 65535 characters, or the image is
/// too small. The input array is never modified.
#[wasm_bindgen]
pub fn encode_text(
    pixels: &[u8],
    height: u32,
    width: u32,
    channels: u32,
    text: &str,
) -> Result<Vec<u8>, JsValue> {
    let mut buffer = buffer_from(pixels, height, width, channels)?;
    framing::encode_text(&mut buffer, text).map_err(to_js_error)?;
    Ok(buffer.into_raw())
}

/// Recover text embedded by [`encode_text`].
#[wasm_bindgen]
pub fn decode_text(pixels: &[u8], height: u32, width: u32, channels: u32) -> Result<String, JsValue> {
    let buffer = buffer_from(pixels, height, width, channels)?;
    framing::decode_text(&buffer).map_err(to_js_error)
}

/// Embed bytes into pixel data and return the modified copy.
#[wasm_bindgen]
pub fn encode_binary(
    pixels: &[u8],
    height: u32,
    width: u32,
    channels: u32,
    data: &[u8],
) -> Result<Vec<u8>, JsValue> {
    let mut buffer = buffer_from(pixels, height, width, channels)?;
    framing::encode_binary(&mut buffer, data).map_err(to_js_error)?;
    Ok(buffer.into_raw())
}

/// Recover bytes embedded by [`encode_binary`].
#[wasm_bindgen]
pub fn decode_binary(
    pixels: &[u8],
    height: u32,
    width: u32,
    channels: u32,
) -> Result<js_sys::Uint8Array, JsValue> {
    let buffer = buffer_from(pixels, height, width, channels)?;
    let bytes = framing::decode_binary(&buffer).map_err(to_js_error)?;
    Ok(js_sys::Uint8Array::from(bytes.as_slice()))
}

/// Embed text into a JsPixelBuffer in place.
///
/// On error the buffer is left unchanged.
#[wasm_bindgen]
pub fn embed_text(image: &mut JsPixelBuffer, text: &str) -> Result<(), JsValue> {
    framing::encode_text(image.as_core_mut(), text).map_err(to_js_error)
}

/// Recover text from a JsPixelBuffer.
#[wasm_bindgen]
pub fn extract_text(image: &JsPixelBuffer) -> Result<String, JsValue> {
    framing::decode_text(image.as_core()).map_err(to_js_error)
}

/// Capacity of a `height x width x channels` buffer as a plain object.
#[wasm_bindgen]
pub fn capacity(height: u32, width: u32, channels: u32) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&Capacity::for_dimensions(height, width, channels))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}


/// WASM-specific tests that require JsValue.
///
/// Use `wasm-pack test` to run these.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_text_round_trip() {
        let pixels = vec![128u8; 10 * 10 * 4];
        let stego = encode_text(&pixels, 10, 10, 4, "hidden").unwrap();
        assert_eq!(stego.len(), pixels.len());
        assert_eq!(decode_text(&stego, 10, 10, 4).unwrap(), "hidden");
    }

    #[wasm_bindgen_test]
    fn test_binary_round_trip() {
        let pixels = vec![7u8; 10 * 10 * 3];
        let stego = encode_binary(&pixels, 10, 10, 3, &[0, 1, 2, 255]).unwrap();
        let out = decode_binary(&stego, 10, 10, 3).unwrap();
        assert_eq!(out.to_vec(), vec![0, 1, 2, 255]);
    }

    #[wasm_bindgen_test]
    fn test_encode_text_too_large() {
        let pixels = vec![0u8; 3];
        assert!(encode_text(&pixels, 1, 1, 3, "ab").is_err());
    }

    #[wasm_bindgen_test]
    fn test_encode_text_non_latin1() {
        let pixels = vec![0u8; 10 * 10 * 3];
        assert!(encode_text(&pixels, 10, 10, 3, "日本").is_err());
    }

    #[wasm_bindgen_test]
    fn test_invalid_dimensions() {
        let pixels = vec![0u8; 12];
        assert!(decode_text(&pixels, 2, 2, 4).is_err());
    }

    #[wasm_bindgen_test]
    fn test_embed_in_place() {
        let mut img = JsPixelBuffer::new(4, 4, 3, vec![0u8; 48]).unwrap();
        embed_text(&mut img, "ok").unwrap();
        assert_eq!(extract_text(&img).unwrap(), "ok");
    }

    #[wasm_bindgen_test]
    fn test_capacity() {
        assert!(capacity(10, 10, 3).unwrap().is_object());
    }
}
