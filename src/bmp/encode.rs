//! BMP encoder: uncompressed 24-bit BGR.

use enough::Stop;

use super::{BmpHeader, row_padding};
use crate::buffer::PixelBuffer;
use crate::error::BitmapError;

/// Encode `buffer` as a complete 24-bit BMP file.
///
/// Rows are written in buffer order, `y = 0` first. Channels are quantized
/// with [`crate::Color::to_bgr8`].
pub(crate) fn encode(buffer: &PixelBuffer, stop: &dyn Stop) -> Result<Vec<u8>, BitmapError> {
    let header = BmpHeader::rgb24(buffer.width(), buffer.height())?;
    let file_size = header.file_size as usize;

    let mut out = Vec::new();
    out.try_reserve_exact(file_size)
        .map_err(|_| BitmapError::DimensionsTooLarge {
            width: buffer.width(),
            height: buffer.height(),
        })?;
    out.extend_from_slice(&header.to_bytes());

    stop.check()?;

    let pad_bytes = row_padding(buffer.width());
    for (y, row) in buffer.rows().enumerate() {
        if y % 16 == 0 {
            stop.check()?;
        }
        for px in row {
            out.extend_from_slice(&px.to_bgr8());
        }
        out.extend(core::iter::repeat_n(0u8, pad_bytes));
    }

    debug_assert_eq!(out.len(), file_size);
    Ok(out)
}
