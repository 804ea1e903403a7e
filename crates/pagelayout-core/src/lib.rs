//! pagelayout Core - Basic data structures for page layout analysis
//!
//! This crate provides the fundamental data structures shared by every
//! stage of the layout pipeline:
//!
//! - [`PageImage`] / [`PageImageMut`] - Page raster (immutable / mutable)
//! - [`BinaryMask`] - Foreground/background mask with 0/255 samples
//! - [`Box`] - Rectangle regions in pixel coordinates

pub mod box_;
pub mod error;
pub mod image;
pub mod mask;

pub use box_::Box;
pub use error::{Error, Result};
pub use image::{Channels, PageImage, PageImageMut};
pub use mask::{BACKGROUND, BinaryMask, FOREGROUND};
