//! Errors from rendering and analyzing a page

use thiserror::Error;

/// Errors from rendering a page and analyzing it
#[derive(Debug, Error)]
pub enum Error {
    /// Layout analysis failed
    #[error("layout analysis error: {0}")]
    Seg(#[from] pagelayout_seg::SegError),

    /// The requested page does not exist
    #[error("page {index} out of range: document has {count} pages")]
    PageOutOfRange { index: usize, count: usize },

    /// Zoom factor is not a finite positive number
    #[error("invalid zoom factor: {0}")]
    InvalidZoom(f32),

    /// The page source failed to render
    #[error("render error: {0}")]
    Render(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Result type for facade operations
pub type Result<T> = std::result::Result<T, Error>;
