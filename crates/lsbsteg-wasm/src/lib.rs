//! lsbsteg WASM - WebAssembly bindings for lsbsteg
//!
//! This crate exposes the lsbsteg-core embedding engine to
//! JavaScript/TypeScript applications. Image files are decoded and
//! re-encoded on the JavaScript side; only raw channel samples cross the
//! boundary.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper for pixel buffers
//! - `embed` - Text and binary payload embedding/extraction
//!
//! # Usage
//!
//! ```typescript
//! import init, { encode_text, decode_text } from '@lsbsteg/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const stego = encode_text(imageData.data, height, width, 4, 'secret');
//! ```

use wasm_bindgen::prelude::*;

mod embed;
mod types;

// Re-export public types
pub use embed::{
    capacity, decode_binary, decode_text, embed_text, encode_binary, encode_text, extract_text,
};
pub use types::JsPixelBuffer;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
