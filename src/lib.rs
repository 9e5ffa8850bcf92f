//! # zenraster
//!
//! A floating-point RGB pixel buffer with an uncompressed 24-bit BMP codec.
//!
//! ## Pixel buffer
//!
//! [`PixelBuffer`] owns `width * height` [`Color`] values stored row-major,
//! addressed by `(x, y)`. Channels are `f32` in the nominal range
//! `0.0..=1.0`.
//!
//! ## BMP
//!
//! - Decode and encode of uncompressed 24-bit BGR BMP (BITMAPINFOHEADER)
//! - Rows padded to 4-byte alignment, identical on both paths
//! - Channels quantized by truncation, saturating outside `0.0..=1.0`
//! - Rows are kept in file order: the first stored row is `y = 0`
//!
//! ## Non-Goals
//!
//! - Compressed, palette, or non-24-bit BMP variants
//! - Top-down (negative height) BMP files
//! - Image processing (resize, blend, filter)
//!
//! ## Usage
//!
//! ```no_run
//! use zenraster::{Color, PixelBuffer, Unstoppable};
//!
//! let mut image = PixelBuffer::new(2, 2)?;
//! image.set_color(Color::WHITE, 0, 0)?;
//! image.set_color(Color::RED, 0, 1)?;
//!
//! let bytes = zenraster::encode_bmp(&image, Unstoppable)?;
//! let decoded = zenraster::decode_bmp(&bytes, Unstoppable)?;
//! assert_eq!(decoded.get_color(0, 1)?, Color::RED);
//!
//! image.save("out.bmp")?;
//! let reloaded = PixelBuffer::open("out.bmp")?;
//! # Ok::<(), zenraster::BitmapError>(())
//! ```

#![forbid(unsafe_code)]

mod buffer;
mod color;
mod error;
mod limits;

pub mod bmp;

mod decode;
mod encode;

// Re-exports
pub use bmp::{BmpHeader, BmpInfo, BmpPermissiveness, row_padding};
pub use buffer::PixelBuffer;
pub use color::Color;
pub use decode::DecodeRequest;
pub use encode::EncodeRequest;
pub use enough::{Stop, StopReason, Unstoppable};
pub use error::BitmapError;
pub use limits::Limits;

/// Decode a 24-bit BMP with default permissiveness and no limits.
pub fn decode_bmp(data: &[u8], stop: impl Stop) -> Result<PixelBuffer, BitmapError> {
    DecodeRequest::new(data).decode(stop)
}

/// Encode a [`PixelBuffer`] as a 24-bit BMP.
pub fn encode_bmp(buffer: &PixelBuffer, stop: impl Stop) -> Result<Vec<u8>, BitmapError> {
    EncodeRequest::new().encode(buffer, stop)
}
