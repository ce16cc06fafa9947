//! Error types for contour-map operations.

use thiserror::Error;

/// Result type alias using ContourError.
pub type ContourResult<T> = Result<T, ContourError>;

/// Primary error type for the contour pipeline.
#[derive(Debug, Error)]
pub enum ContourError {
    // === Input Errors ===
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Pixel buffer holds {actual} pixels, expected {width}x{height}")]
    InvalidDimensions {
        width: usize,
        height: usize,
        actual: usize,
    },

    #[error("Raster is empty ({width}x{height})")]
    EmptyRaster { width: usize, height: usize },

    #[error("Failed to decode raster: {0}")]
    DecodeError(String),

    #[error("Contour atlas error: {0}")]
    AtlasError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Worker Errors ===
    #[error("Could not create worker thread {id}: {message}")]
    ThreadSpawn { id: usize, message: String },

    #[error("Worker thread {0} panicked")]
    WorkerPanicked(usize),

    #[error("Phase barrier aborted before all workers arrived")]
    BarrierAborted,
}

impl ContourError {
    /// Create an InvalidConfig error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create an AtlasError.
    pub fn atlas(msg: impl Into<String>) -> Self {
        Self::AtlasError(msg.into())
    }

    /// Create a DecodeError.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::DecodeError(msg.into())
    }
}
