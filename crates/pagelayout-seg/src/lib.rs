//! pagelayout-seg - Page layout analysis
//!
//! This crate finds and labels the layout regions of a page image:
//!
//! - **Detection** ([`detect`]): merge nearby ink by dilation and take the
//!   outer blobs as regions
//! - **Classification** ([`classify`]): ranked rule table over density,
//!   aspect and edge measurements
//! - **Relationships** ([`relation`]): alignment and containment between
//!   region pairs
//! - **Pipeline** ([`pipeline`]): binarize, detect, relate
//! - **Profile cuts** ([`profile`]): row and column projection runs
//!
//! # Quick Start
//!
//! ```
//! use pagelayout_core::{Box, Channels, PageImage};
//! use pagelayout_seg::analyze_layout;
//!
//! let page = PageImage::new_filled(400, 400, Channels::Gray, 255).unwrap();
//! let mut page = page.try_into_mut().unwrap();
//! page.fill_rect(&Box::new_unchecked(125, 125, 150, 150), 0);
//!
//! let result = analyze_layout(&page.into(), 50.0).unwrap();
//! print!("{}", result);
//! ```

pub mod classify;
pub mod detect;
mod error;
pub mod options;
pub mod pipeline;
pub mod profile;
pub mod relation;
mod report;

pub use error::{SegError, SegResult};

pub use classify::{
    CLASSIFICATION_RULES, ClassificationRule, LINE_EDGE_DENSITY_MAX, RegionFeatures, RegionKind,
    classify_features, classify_region,
};
pub use detect::{Region, detect_regions, detect_regions_with_options};
pub use options::{ClassificationThresholds, Granularity, LayoutOptions};
pub use pipeline::{AnalysisResult, LayoutAnalyzer, analyze_layout, analyze_layout_with_options};
pub use profile::{CutRange, ProfileCuts, column_cuts, profile_cuts, row_cuts};
pub use relation::{
    ALIGNMENT_TOLERANCE, RelationKind, Relationship, analyze_relationships,
    analyze_relationships_with_tolerance, relate,
};

// The pipeline's first stage, for callers that only need the mask
pub use pagelayout_color::binarize;

// Re-export core for convenience
pub use pagelayout_core;
