//! Error types for pagelayout-seg

use pagelayout_core::Box;
use thiserror::Error;

/// Errors that can occur during layout analysis
#[derive(Debug, Error)]
pub enum SegError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] pagelayout_core::Error),

    /// Binarization error
    #[error("color error: {0}")]
    Color(#[from] pagelayout_color::ColorError),

    /// Morphology error
    #[error("morphology error: {0}")]
    Morph(#[from] pagelayout_morph::MorphError),

    /// Edge filtering error
    #[error("filter error: {0}")]
    Filter(#[from] pagelayout_filter::FilterError),

    /// Connected component error
    #[error("region error: {0}")]
    Region(#[from] pagelayout_region::RegionError),

    /// Invalid parameter provided
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A region with no area, or outside its mask, reached the classifier
    #[error("degenerate region {bbox} in {width}x{height} mask")]
    DegenerateRegion { bbox: Box, width: u32, height: u32 },

    /// An unrecognized region or relationship name
    #[error("unknown {what} name: '{name}'")]
    UnknownName { what: &'static str, name: String },
}

/// Result type for layout analysis operations
pub type SegResult<T> = Result<T, SegError>;
