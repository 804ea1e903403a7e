//! pagelayout - Page layout analysis for Rust
//!
//! Recovers the visual structure of a rendered document page: the content
//! regions it contains (text blocks, images, tables, rules, short text)
//! and how they relate to each other (alignment, containment).
//!
//! # Overview
//!
//! The analysis is a strict three-stage pipeline over one page image:
//!
//! 1. binarize the page into an ink mask ([`color`])
//! 2. merge nearby ink by dilation ([`morph`]), take the outer blobs
//!    ([`region`]) and classify each one ([`seg`], [`filter`])
//! 3. relate every pair of regions ([`seg`])
//!
//! Rendering a document into a page image is left to the caller, behind
//! the [`PageSource`] trait.
//!
//! # Example
//!
//! ```
//! use pagelayout::{Box, Channels, PageImage};
//! use pagelayout::seg::{RegionKind, analyze_layout};
//!
//! let page = PageImage::new_filled(400, 400, Channels::Gray, 255).unwrap();
//! let mut page = page.try_into_mut().unwrap();
//! page.fill_rect(&Box::new_unchecked(125, 125, 150, 150), 0);
//!
//! let result = analyze_layout(&page.into(), 50.0).unwrap();
//! assert_eq!(result.regions[0].kind, RegionKind::Image);
//! ```

mod page_error;
pub mod source;

pub use page_error::{Error, Result};
pub use source::{PageSource, RenderedPage, analyze_page};

// Re-export core types (primary data structures used everywhere)
pub use pagelayout_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use pagelayout_color as color;
pub use pagelayout_filter as filter;
pub use pagelayout_io as io;
pub use pagelayout_morph as morph;
pub use pagelayout_region as region;
pub use pagelayout_seg as seg;
