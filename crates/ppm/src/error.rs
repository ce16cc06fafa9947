//! Error types for PPM decoding and encoding.

use contour_common::ContourError;
use thiserror::Error;

/// Errors that can occur while reading or writing PPM data.
#[derive(Error, Debug)]
pub enum PpmError {
    /// The data does not start with `P3` or `P6`.
    #[error("unsupported PPM magic number: {0:?}")]
    InvalidMagic(String),

    /// A header field is missing or malformed.
    #[error("invalid PPM header: {0}")]
    InvalidHeader(String),

    /// Only 8-bit channels (max value 255) are supported.
    #[error("unsupported max color value {0}, expected 255")]
    UnsupportedMaxValue(u32),

    /// The PNM decoder rejected the header or pixel data.
    #[error("failed to decode PPM: {0}")]
    Decode(#[from] image::ImageError),

    /// File system error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PpmError {
    /// Create an InvalidHeader error.
    pub fn invalid_header(msg: impl Into<String>) -> Self {
        Self::InvalidHeader(msg.into())
    }
}

impl From<PpmError> for ContourError {
    fn from(err: PpmError) -> Self {
        match err {
            PpmError::Io(io) => ContourError::Io(io),
            other => ContourError::decode(other.to_string()),
        }
    }
}

/// Result type for PPM operations.
pub type PpmResult<T> = std::result::Result<T, PpmError>;
