use enough::Stop;

use crate::bmp::{self, BmpPermissiveness};
use crate::buffer::PixelBuffer;
use crate::error::BitmapError;
use crate::limits::Limits;

/// Builder for decoding a BMP byte stream into a [`PixelBuffer`].
///
/// ```no_run
/// use zenraster::{BmpPermissiveness, DecodeRequest, Limits, Unstoppable};
///
/// let data: &[u8] = &[]; // your BMP bytes
/// let limits = Limits { max_pixels: Some(16_000_000), ..Default::default() };
/// let image = DecodeRequest::new(data)
///     .with_limits(&limits)
///     .with_permissiveness(BmpPermissiveness::Strict)
///     .decode(Unstoppable)?;
/// # Ok::<(), zenraster::BitmapError>(())
/// ```
#[derive(Clone, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
    permissiveness: BmpPermissiveness,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            limits: None,
            permissiveness: BmpPermissiveness::default(),
        }
    }

    /// Reject images exceeding `limits` before allocating pixels.
    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    pub fn with_permissiveness(mut self, permissiveness: BmpPermissiveness) -> Self {
        self.permissiveness = permissiveness;
        self
    }

    /// Decode the whole stream. `stop` is polled between row batches.
    pub fn decode(self, stop: impl Stop) -> Result<PixelBuffer, BitmapError> {
        let buffer = bmp::decode(self.data, self.limits, self.permissiveness, &stop)?;
        tracing::debug!(
            width = buffer.width(),
            height = buffer.height(),
            bytes = self.data.len(),
            "decoded BMP"
        );
        Ok(buffer)
    }
}
