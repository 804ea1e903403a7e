//! Region detection
//!
//! Nearby ink is merged into blobs by one dilation with a square brick
//! whose side grows with the granularity. Each outer blob of the dilated
//! mask becomes a region; its bounding box is then classified against the
//! undilated mask.

use crate::classify::{RegionFeatures, RegionKind, classify_features};
use crate::SegResult;
use crate::options::LayoutOptions;
use pagelayout_core::{BinaryMask, Box};
use pagelayout_morph::dilate_brick;
use pagelayout_region::find_outer_components;
use tracing::debug;

/// A classified layout region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Region {
    /// What the region looks like
    pub kind: RegionKind,
    /// Bounding box in image coordinates; always non-empty
    pub bbox: Box,
}

/// Detect and classify regions with default options and the given
/// granularity.
///
/// # Errors
///
/// Returns [`SegError::InvalidParameter`](crate::SegError::InvalidParameter)
/// if `granularity` is not a finite value in `[1, 100]`.
pub fn detect_regions(mask: &BinaryMask, granularity: f64) -> SegResult<Vec<Region>> {
    detect_regions_with_options(
        mask,
        &LayoutOptions::default().with_granularity(granularity),
    )
}

/// Detect and classify regions.
///
/// Regions are returned in discovery order: raster order of the first
/// pixel of each dilated blob. A mask without foreground yields no
/// regions.
pub fn detect_regions_with_options(
    mask: &BinaryMask,
    options: &LayoutOptions,
) -> SegResult<Vec<Region>> {
    let granularity = options.validate()?;
    let kernel = granularity.merge_kernel_size(mask.width(), mask.height());

    let span = tracing::debug_span!(
        "detect_regions",
        width = mask.width(),
        height = mask.height(),
        granularity = granularity.value(),
        kernel
    );
    let _enter = span.enter();

    if mask.is_empty() {
        debug!("mask has no foreground");
        return Ok(Vec::new());
    }

    let merged = dilate_brick(mask, kernel, kernel)?;
    let blobs = find_outer_components(&merged)?;
    debug!(blobs = blobs.len(), "merged blobs found");

    let thresholds = granularity.thresholds();
    let mut regions = Vec::with_capacity(blobs.len());
    for blob in &blobs {
        let features =
            RegionFeatures::measure(mask, &blob.bounds, &thresholds, options.edge_threshold)?;
        regions.push(Region {
            kind: classify_features(&features, &thresholds),
            bbox: blob.bounds,
        });
    }

    debug!(regions = regions.len(), "regions detected");
    Ok(regions)
}
