use enough::StopReason;

/// Errors from pixel buffer access and BMP decoding/encoding.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BitmapError {
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("not a BMP: unrecognized magic bytes")]
    UnrecognizedFormat,

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("unsupported format variant: {0}")]
    UnsupportedVariant(String),

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("pixel ({x}, {y}) out of bounds for {width}x{height} buffer")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl BitmapError {
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        BitmapError::Io {
            context: context.into(),
            source,
        }
    }

    /// Whether this error came from the underlying file or stream.
    pub fn is_io(&self) -> bool {
        matches!(self, BitmapError::Io { .. })
    }

    /// Whether this error means the input bytes are not a usable BMP.
    pub fn is_format(&self) -> bool {
        matches!(
            self,
            BitmapError::UnrecognizedFormat
                | BitmapError::InvalidHeader(_)
                | BitmapError::UnsupportedVariant(_)
                | BitmapError::UnexpectedEof
        )
    }
}

impl From<StopReason> for BitmapError {
    fn from(r: StopReason) -> Self {
        BitmapError::Cancelled(r)
    }
}
