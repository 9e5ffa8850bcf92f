use enough::Stop;

use crate::bmp;
use crate::buffer::PixelBuffer;
use crate::error::BitmapError;

/// Builder for encoding a [`PixelBuffer`] as an uncompressed 24-bit BMP.
#[derive(Clone, Copy, Debug, Default)]
pub struct EncodeRequest {
    _private: (),
}

impl EncodeRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encode `buffer` to a complete BMP file in memory.
    pub fn encode(self, buffer: &PixelBuffer, stop: impl Stop) -> Result<Vec<u8>, BitmapError> {
        let out = bmp::encode(buffer, &stop)?;
        tracing::debug!(
            width = buffer.width(),
            height = buffer.height(),
            bytes = out.len(),
            "encoded BMP"
        );
        Ok(out)
    }
}
