//! lsbsteg Core - LSB steganography engine
//!
//! This crate hides a text or byte payload in the low bits of a decoded
//! pixel buffer and recovers it again. Reading and writing image files is
//! left to the caller; the engine only sees channel samples.
//!
//! # Module Structure
//!
//! - `buffer` - The `height x width x channels` pixel grid
//! - `cursor` - Slot traversal order and bit-plane escalation
//! - `engine` - Bit-level writer ([`Embedder`]) and reader ([`Extractor`])
//! - `codec` - Fixed-width binary fields, MSB first
//! - `framing` - Length-prefixed text and binary payloads
//! - `capacity` - How much a buffer can hold
//!
//! # Example
//!
//! ```ignore
//! use lsbsteg_core::{decode_text, encode_text, PixelBuffer};
//!
//! let img = image::open("cover.png")?.to_rgb8();
//! let mut buffer = PixelBuffer::from_rgb_image(img)?;
//! encode_text(&mut buffer, "meet at noon")?;
//! buffer.clone().into_rgb_image().unwrap().save("stego.png")?;
//!
//! assert_eq!(decode_text(&buffer)?, "meet at noon");
//! ```
//!
//! The buffer must survive bit-exact between encode and decode, so only
//! lossless formats (PNG, BMP) work as carriers.

pub mod buffer;
pub mod capacity;
pub mod codec;
pub mod cursor;
pub mod engine;
pub mod error;
pub mod framing;

pub use buffer::PixelBuffer;
pub use capacity::{check_capacity, planes_needed, Capacity};
pub use codec::{parse_binary, to_binary};
pub use cursor::{slot_order, BitPlane, Slot, SlotCursor, Slots, BIT_PLANES};
pub use engine::{Embedder, Extractor};
pub use error::{Result, StegError};
pub use framing::{
    decode_binary, decode_text, encode_binary, encode_text, Framing, BINARY_LENGTH_BITS,
    TEXT_LENGTH_BITS, UNIT_BITS,
};
