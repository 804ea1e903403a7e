//! I/O error types

use thiserror::Error;

/// Error reading or writing a page image
#[derive(Error, Debug)]
pub enum IoError {
    /// Underlying file or stream failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Magic bytes not recognized, or the format's feature is disabled
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Malformed header or raster
    #[error("invalid image data: {0}")]
    InvalidData(String),

    /// The PNG decoder failed
    #[error("decode error: {0}")]
    DecodeError(String),

    /// The PNG encoder failed
    #[error("encode error: {0}")]
    EncodeError(String),

    /// Decoded samples did not form a valid page image
    #[error("core error: {0}")]
    Core(#[from] pagelayout_core::Error),
}

/// Result type for image I/O
pub type IoResult<T> = Result<T, IoError>;
