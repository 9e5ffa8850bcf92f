//! 24-bit uncompressed BMP decoder.

use std::borrow::Cow;

use enough::Stop;

use super::{
    BI_RGB, BITS_PER_PIXEL, BmpHeader, INFO_HEADER_SIZE, PIXEL_DATA_OFFSET, row_padding,
    row_stride,
};
use crate::buffer::{PixelBuffer, pixel_count};
use crate::color::Color;
use crate::error::BitmapError;
use crate::limits::Limits;

// ── Permissiveness ──────────────────────────────────────────────────

/// Controls how strictly the BMP decoder validates input.
///
/// Every level requires the `BM` magic and positive width and height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BmpPermissiveness {
    /// Reject files that deviate from the canonical 24-bit layout in any
    /// header field: info header size 40, planes 1, pixel data offset 54,
    /// and a file size field matching the actual row data.
    Strict,

    /// Default behavior. Requires 24 bits per pixel, no compression, and
    /// complete pixel rows (the last row's padding may be missing). The
    /// declared file size is not checked.
    #[default]
    Standard,

    /// Accept as much as possible. Ignores the bit depth, compression and
    /// planes fields, and zero-fills pixels past the end of a truncated file.
    Permissive,
}

/// Reject header fields the chosen permissiveness level does not allow.
fn validate_header(
    header: &BmpHeader,
    data_len: usize,
    mode: BmpPermissiveness,
) -> Result<(u32, u32), BitmapError> {
    if header.width <= 0 {
        return Err(BitmapError::InvalidHeader(format!(
            "width must be positive, got {}",
            header.width
        )));
    }
    if header.height <= 0 {
        // Negative height marks top-down row order.
        return Err(BitmapError::InvalidHeader(format!(
            "height must be positive, got {}",
            header.height
        )));
    }
    let width = header.width as u32;
    let height = header.height as u32;

    if mode != BmpPermissiveness::Permissive {
        if header.bits_per_pixel != BITS_PER_PIXEL {
            return Err(BitmapError::UnsupportedVariant(format!(
                "{} bits per pixel (only 24 is supported)",
                header.bits_per_pixel
            )));
        }
        if header.compression != BI_RGB {
            return Err(BitmapError::UnsupportedVariant(format!(
                "compression type {} (only uncompressed is supported)",
                header.compression
            )));
        }
    }

    if mode == BmpPermissiveness::Strict {
        if header.info_size != INFO_HEADER_SIZE as u32 {
            return Err(BitmapError::InvalidHeader(format!(
                "info header size {} (expected 40)",
                header.info_size
            )));
        }
        if header.planes != 1 {
            return Err(BitmapError::InvalidHeader(format!(
                "planes {} (expected 1)",
                header.planes
            )));
        }
        if header.data_offset != PIXEL_DATA_OFFSET as u32 {
            return Err(BitmapError::InvalidHeader(format!(
                "pixel data offset {} (expected 54)",
                header.data_offset
            )));
        }
        let expected = BmpHeader::rgb24(width, height)?.file_size;
        if header.file_size != expected {
            return Err(BitmapError::InvalidHeader(format!(
                "file size field {} does not match computed size {expected}",
                header.file_size
            )));
        }
        if data_len < expected as usize {
            return Err(BitmapError::UnexpectedEof);
        }
    }

    Ok((width, height))
}

/// Decode a complete BMP byte stream into a new [`PixelBuffer`].
///
/// Rows are read in file order into increasing `y`.
pub(crate) fn decode(
    data: &[u8],
    limits: Option<&Limits>,
    mode: BmpPermissiveness,
    stop: &dyn Stop,
) -> Result<PixelBuffer, BitmapError> {
    let header = BmpHeader::parse(data)?;
    let (width, height) = validate_header(&header, data.len(), mode)?;

    let count = pixel_count(width, height)?;
    if let Some(limits) = limits {
        limits.check(width, height)?;
        limits.check_memory((count as u64).saturating_mul(size_of::<Color>() as u64))?;
    }
    stop.check()?;

    let stride = row_stride(width).ok_or(BitmapError::DimensionsTooLarge { width, height })?;
    let total = stride
        .checked_mul(height as usize)
        .ok_or(BitmapError::DimensionsTooLarge { width, height })?;
    let rows = pixel_rows(&data[PIXEL_DATA_OFFSET..], total, row_padding(width), mode)
        .map_err(|e| match e {
            RowsError::Truncated => BitmapError::UnexpectedEof,
            RowsError::Alloc => BitmapError::DimensionsTooLarge { width, height },
        })?;

    let row_bytes = width as usize * 3;
    let mut pixels = Vec::new();
    pixels
        .try_reserve_exact(count)
        .map_err(|_| BitmapError::DimensionsTooLarge { width, height })?;
    for (y, row) in rows.chunks_exact(stride).enumerate() {
        if y % 16 == 0 {
            stop.check()?;
        }
        // Trailing padding bytes are skipped whatever they contain.
        for bgr in row[..row_bytes].chunks_exact(3) {
            pixels.push(Color::from_bgr8([bgr[0], bgr[1], bgr[2]]));
        }
    }

    PixelBuffer::from_pixels(width, height, pixels)
}

enum RowsError {
    Truncated,
    Alloc,
}

/// Slice out `total` bytes of row data, zero-extending where allowed.
fn pixel_rows(
    body: &[u8],
    total: usize,
    padding: usize,
    mode: BmpPermissiveness,
) -> Result<Cow<'_, [u8]>, RowsError> {
    if body.len() >= total {
        return Ok(Cow::Borrowed(&body[..total]));
    }
    let missing = total - body.len();
    if missing > padding && mode != BmpPermissiveness::Permissive {
        return Err(RowsError::Truncated);
    }
    if missing > padding {
        tracing::warn!(
            missing,
            "BMP pixel data truncated, filling remaining pixels with black"
        );
    }
    let mut owned = Vec::new();
    owned.try_reserve_exact(total).map_err(|_| RowsError::Alloc)?;
    owned.extend_from_slice(body);
    owned.resize(total, 0);
    Ok(Cow::Owned(owned))
}
