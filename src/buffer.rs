use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use enough::Unstoppable;

use crate::color::Color;
use crate::decode::DecodeRequest;
use crate::encode::EncodeRequest;
use crate::error::BitmapError;

/// Owned RGB image with `f32` channels, stored row-major.
///
/// The pixel at `(x, y)` lives at index `y * width + x`. `pixels().len()`
/// always equals `width * height`; decoding into an existing buffer swaps
/// all three together or not at all.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl PixelBuffer {
    /// Create a `width` x `height` buffer filled with black.
    pub fn new(width: u32, height: u32) -> Result<Self, BitmapError> {
        let len = pixel_count(width, height)?;
        Ok(Self {
            width,
            height,
            pixels: vec![Color::BLACK; len],
        })
    }

    /// Create a buffer whose pixels are computed from their coordinates.
    pub fn from_fn(
        width: u32,
        height: u32,
        mut f: impl FnMut(u32, u32) -> Color,
    ) -> Result<Self, BitmapError> {
        let len = pixel_count(width, height)?;
        let mut pixels = Vec::with_capacity(len);
        for y in 0..height {
            for x in 0..width {
                pixels.push(f(x, y));
            }
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Wrap existing row-major pixels. `pixels.len()` must be `width * height`.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Color>) -> Result<Self, BitmapError> {
        let len = pixel_count(width, height)?;
        if pixels.len() != len {
            return Err(BitmapError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// All pixels, row-major.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [Color] {
        &mut self.pixels
    }

    /// Iterate rows in increasing `y`.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[Color]> + '_ {
        self.pixels.chunks_exact(self.width as usize)
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| y as usize * self.width as usize + x as usize)
    }

    pub fn get(&self, x: u32, y: u32) -> Option<&Color> {
        self.index(x, y).map(|i| &self.pixels[i])
    }

    pub fn get_mut(&mut self, x: u32, y: u32) -> Option<&mut Color> {
        self.index(x, y).map(|i| &mut self.pixels[i])
    }

    /// Copy of the color at `(x, y)`.
    pub fn get_color(&self, x: u32, y: u32) -> Result<Color, BitmapError> {
        self.get(x, y)
            .copied()
            .ok_or_else(|| self.out_of_bounds(x, y))
    }

    /// Overwrite the color at `(x, y)`.
    pub fn set_color(&mut self, color: Color, x: u32, y: u32) -> Result<(), BitmapError> {
        let err = self.out_of_bounds(x, y);
        let px = self.get_mut(x, y).ok_or(err)?;
        *px = color;
        Ok(())
    }

    pub fn fill(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    fn out_of_bounds(&self, x: u32, y: u32) -> BitmapError {
        BitmapError::OutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        }
    }

    /// Replace this buffer with the image decoded from `data`.
    ///
    /// On error `self` is left exactly as it was.
    pub fn decode_into(&mut self, data: &[u8]) -> Result<(), BitmapError> {
        *self = DecodeRequest::new(data).decode(Unstoppable)?;
        Ok(())
    }

    /// Replace this buffer with the image read from `reader`.
    ///
    /// On error `self` is left exactly as it was.
    pub fn read_from(&mut self, mut reader: impl Read) -> Result<(), BitmapError> {
        let mut data = Vec::new();
        reader
            .read_to_end(&mut data)
            .map_err(|e| BitmapError::io("failed to read BMP stream", e))?;
        self.decode_into(&data)
    }

    /// Decode the BMP file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, BitmapError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            BitmapError::io(format!("file could not be opened: {}", path.display()), e)
        })?;
        let mut data = Vec::new();
        BufReader::new(file)
            .read_to_end(&mut data)
            .map_err(|e| BitmapError::io(format!("failed to read {}", path.display()), e))?;
        let buffer = DecodeRequest::new(&data).decode(Unstoppable)?;
        tracing::debug!(
            path = %path.display(),
            width = buffer.width,
            height = buffer.height,
            "read BMP file"
        );
        Ok(buffer)
    }

    /// Encode as BMP into `writer`.
    pub fn write_to(&self, mut writer: impl Write) -> Result<(), BitmapError> {
        let bytes = EncodeRequest::new().encode(self, Unstoppable)?;
        writer
            .write_all(&bytes)
            .and_then(|()| writer.flush())
            .map_err(|e| BitmapError::io("failed to write BMP stream", e))
    }

    /// Encode as BMP and write it to `path`, creating or truncating the file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), BitmapError> {
        let path = path.as_ref();
        // A failed encode must not create or truncate the file.
        let bytes = EncodeRequest::new().encode(self, Unstoppable)?;
        let file = File::create(path).map_err(|e| {
            BitmapError::io(format!("file could not be opened: {}", path.display()), e)
        })?;
        let mut out = BufWriter::new(file);
        out.write_all(&bytes)
            .and_then(|()| out.flush())
            .map_err(|e| BitmapError::io(format!("failed to write {}", path.display()), e))?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "wrote BMP file");
        Ok(())
    }

    /// Zero-copy view as an [`imgref::ImgRef`].
    #[cfg(feature = "imgref")]
    pub fn as_imgref(&self) -> imgref::ImgRef<'_, Color> {
        imgref::ImgRef::new(&self.pixels, self.width as usize, self.height as usize)
    }
}

#[cfg(feature = "imgref")]
impl TryFrom<imgref::ImgVec<Color>> for PixelBuffer {
    type Error = BitmapError;

    fn try_from(img: imgref::ImgVec<Color>) -> Result<Self, BitmapError> {
        let (w, h) = (img.width(), img.height());
        let (Ok(width), Ok(height)) = (u32::try_from(w), u32::try_from(h)) else {
            return Err(BitmapError::DimensionsTooLarge {
                width: u32::try_from(w).unwrap_or(u32::MAX),
                height: u32::try_from(h).unwrap_or(u32::MAX),
            });
        };
        let (pixels, _, _) = img.into_contiguous_buf();
        Self::from_pixels(width, height, pixels)
    }
}

/// `width * height`, rejecting empty and overflowing sizes.
pub(crate) fn pixel_count(width: u32, height: u32) -> Result<usize, BitmapError> {
    if width == 0 || height == 0 {
        return Err(BitmapError::InvalidDimensions { width, height });
    }
    (width as usize)
        .checked_mul(height as usize)
        .ok_or(BitmapError::DimensionsTooLarge { width, height })
}
