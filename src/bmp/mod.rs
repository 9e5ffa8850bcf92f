//! Uncompressed 24-bit BMP decoder and encoder.
//!
//! Use [`crate::DecodeRequest`], [`crate::EncodeRequest`] or the
//! top-level [`crate::decode_bmp`] / [`crate::encode_bmp`].
//!
//! Rows are stored in buffer order: the first row in the file is `y = 0`.
//! Decoding does not flip bottom-up files, and encoding writes `y = 0`
//! first, so files round-trip through this crate but appear vertically
//! mirrored in viewers that honor the bottom-up convention.

pub(crate) mod decode;
mod encode;

pub use decode::BmpPermissiveness;

use crate::error::BitmapError;

/// Size of the BITMAPFILEHEADER block.
pub(crate) const FILE_HEADER_SIZE: usize = 14;
/// Size of the BITMAPINFOHEADER block.
pub(crate) const INFO_HEADER_SIZE: usize = 40;
/// Offset of the first pixel row.
pub(crate) const PIXEL_DATA_OFFSET: usize = FILE_HEADER_SIZE + INFO_HEADER_SIZE;

pub(crate) const BITS_PER_PIXEL: u16 = 24;
pub(crate) const BI_RGB: u32 = 0;

/// Zero bytes after each row of `width` 24-bit pixels so that rows are
/// 4-byte aligned. Always in `0..=3`.
pub const fn row_padding(width: u32) -> usize {
    (4 - (width as usize * 3) % 4) % 4
}

/// Bytes per stored row including padding.
pub(crate) fn row_stride(width: u32) -> Option<usize> {
    (width as usize)
        .checked_mul(3)
        .map(|bytes| bytes + row_padding(width))
}

/// The 54-byte BITMAPFILEHEADER + BITMAPINFOHEADER pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BmpHeader {
    /// Declared total file size in bytes.
    pub file_size: u32,
    /// Offset of the pixel data from the start of the file.
    pub data_offset: u32,
    /// Info header size field; 40 for BITMAPINFOHEADER.
    pub info_size: u32,
    pub width: i32,
    pub height: i32,
    pub planes: u16,
    pub bits_per_pixel: u16,
    pub compression: u32,
}

impl BmpHeader {
    /// Header describing an uncompressed 24-bit image of the given size.
    pub(crate) fn rgb24(width: u32, height: u32) -> Result<Self, BitmapError> {
        let too_large = || BitmapError::DimensionsTooLarge { width, height };
        let w = i32::try_from(width).map_err(|_| too_large())?;
        let h = i32::try_from(height).map_err(|_| too_large())?;
        let file_size = row_stride(width)
            .and_then(|stride| stride.checked_mul(height as usize))
            .and_then(|data| data.checked_add(PIXEL_DATA_OFFSET))
            .and_then(|total| u32::try_from(total).ok())
            .ok_or_else(too_large)?;
        Ok(Self {
            file_size,
            data_offset: PIXEL_DATA_OFFSET as u32,
            info_size: INFO_HEADER_SIZE as u32,
            width: w,
            height: h,
            planes: 1,
            bits_per_pixel: BITS_PER_PIXEL,
            compression: BI_RGB,
        })
    }

    /// Serialize to the on-disk layout, all fields little-endian.
    pub fn to_bytes(&self) -> [u8; PIXEL_DATA_OFFSET] {
        let mut out = [0u8; PIXEL_DATA_OFFSET];
        let mut w = FieldWriter::new(&mut out);
        // File header (14 bytes)
        w.put(b"BM");
        w.put(&self.file_size.to_le_bytes());
        w.put(&0u16.to_le_bytes()); // reserved 1
        w.put(&0u16.to_le_bytes()); // reserved 2
        w.put(&self.data_offset.to_le_bytes());
        // Info header (40 bytes)
        w.put(&self.info_size.to_le_bytes());
        w.put(&self.width.to_le_bytes());
        w.put(&self.height.to_le_bytes());
        w.put(&self.planes.to_le_bytes());
        w.put(&self.bits_per_pixel.to_le_bytes());
        w.put(&self.compression.to_le_bytes());
        w.put(&0u32.to_le_bytes()); // image size (may be 0 for BI_RGB)
        w.put(&0i32.to_le_bytes()); // x pixels per meter
        w.put(&0i32.to_le_bytes()); // y pixels per meter
        w.put(&0u32.to_le_bytes()); // colors used
        w.put(&0u32.to_le_bytes()); // important colors
        debug_assert_eq!(w.pos, PIXEL_DATA_OFFSET);
        out
    }

    /// Parse the first 54 bytes of `data`.
    ///
    /// Only the magic and the length are checked here; field validation is
    /// up to the decoder's permissiveness level.
    pub fn parse(data: &[u8]) -> Result<Self, BitmapError> {
        if data.len() < 2 || &data[0..2] != b"BM" {
            return Err(BitmapError::UnrecognizedFormat);
        }
        let header: &[u8; PIXEL_DATA_OFFSET] = data
            .get(..PIXEL_DATA_OFFSET)
            .and_then(|h| h.try_into().ok())
            .ok_or(BitmapError::UnexpectedEof)?;
        let u16_at = |off: usize| u16::from_le_bytes([header[off], header[off + 1]]);
        let u32_at = |off: usize| {
            u32::from_le_bytes([header[off], header[off + 1], header[off + 2], header[off + 3]])
        };
        let i32_at = |off: usize| {
            i32::from_le_bytes([header[off], header[off + 1], header[off + 2], header[off + 3]])
        };
        let info = FILE_HEADER_SIZE;
        Ok(Self {
            file_size: u32_at(2),
            data_offset: u32_at(10),
            info_size: u32_at(info),
            width: i32_at(info + 4),
            height: i32_at(info + 8),
            planes: u16_at(info + 12),
            bits_per_pixel: u16_at(info + 14),
            compression: u32_at(info + 16),
        })
    }
}

struct FieldWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> FieldWriter<'a> {
    fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn put(&mut self, bytes: &[u8]) {
        self.buf[self.pos..self.pos + bytes.len()].copy_from_slice(bytes);
        self.pos += bytes.len();
    }
}

/// Header fields of a BMP, probed without decoding pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BmpInfo {
    pub width: i32,
    pub height: i32,
    pub bits_per_pixel: u16,
    pub compression: u32,
    /// File size as declared in the header (not checked against the data).
    pub declared_file_size: u32,
    pub data_offset: u32,
}

impl BmpInfo {
    /// Read the 54-byte header of `data`.
    pub fn from_bytes(data: &[u8]) -> Result<Self, BitmapError> {
        let header = BmpHeader::parse(data)?;
        Ok(Self {
            width: header.width,
            height: header.height,
            bits_per_pixel: header.bits_per_pixel,
            compression: header.compression,
            declared_file_size: header.file_size,
            data_offset: header.data_offset,
        })
    }
}

pub(crate) use decode::decode;
pub(crate) use encode::encode;
