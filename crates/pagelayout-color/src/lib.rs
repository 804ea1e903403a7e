//! pagelayout-color - Intensity processing for page images
//!
//! This crate turns page rasters into the binary masks the rest of the
//! pipeline works on:
//!
//! - **Color space conversion** ([`colorspace`]): RGB to luminance gray
//! - **Thresholding** ([`threshold`]): histogram, Otsu's method, fixed and
//!   automatic inverted binarization

pub mod colorspace;
mod error;
pub mod threshold;

// Re-export core types
pub use pagelayout_core;

// Re-export error types
pub use error::{ColorError, ColorResult};

pub use colorspace::{convert_to_gray, rgb_to_gray};
pub use threshold::{
    binarize, compute_otsu_threshold, gray_histogram, otsu_threshold_from_histogram,
    threshold_to_binary,
};
