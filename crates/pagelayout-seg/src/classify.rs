//! Region classification
//!
//! A detected region is labeled from a handful of measurements taken on
//! the *undilated* mask under its bounding box. The decision is an ordered
//! rule table ([`CLASSIFICATION_RULES`]); the first rule that matches
//! wins and a region matching none is [`RegionKind::Unknown`].

use crate::options::{ClassificationThresholds, LayoutOptions};
use crate::{SegError, SegResult};
use pagelayout_core::{BinaryMask, Box};
use pagelayout_filter::edge_density;
use std::fmt;
use std::str::FromStr;
use tracing::trace;

/// Edge density below which a thin region is a solid rule
pub const LINE_EDGE_DENSITY_MAX: f64 = 0.2;

/// Kind of a layout region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionKind {
    /// A long paragraph-like block of text
    TextBlock,
    /// A dense picture or filled area
    Image,
    /// A large, sparse gridded area
    Table,
    /// A thin solid rule
    Line,
    /// A small piece of text
    ShortText,
    /// Nothing above matched
    Unknown,
}

impl RegionKind {
    /// All kinds, in declaration order
    pub const ALL: [RegionKind; 6] = [
        RegionKind::TextBlock,
        RegionKind::Image,
        RegionKind::Table,
        RegionKind::Line,
        RegionKind::ShortText,
        RegionKind::Unknown,
    ];

    /// Stable snake_case name
    pub fn as_str(self) -> &'static str {
        match self {
            RegionKind::TextBlock => "text_block",
            RegionKind::Image => "image",
            RegionKind::Table => "table",
            RegionKind::Line => "line",
            RegionKind::ShortText => "short_text",
            RegionKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for RegionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RegionKind {
    type Err = SegError;

    fn from_str(s: &str) -> SegResult<Self> {
        RegionKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| SegError::UnknownName {
                what: "region kind",
                name: s.to_string(),
            })
    }
}

/// Measurements of one region
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionFeatures {
    /// Box width
    pub width: i64,
    /// Box height
    pub height: i64,
    /// `width / height`
    pub aspect: f64,
    /// `width * height`
    pub area: i64,
    /// Fraction of foreground pixels under the box
    pub density: f64,
    /// Fraction of edge pixels under the box; measured only for line
    /// candidates
    pub edge_density: Option<f64>,
}

impl RegionFeatures {
    /// Measure the region under `bbox` in `mask`.
    ///
    /// # Errors
    ///
    /// Returns [`SegError::DegenerateRegion`] if the box has no area or
    /// does not lie inside the mask.
    pub fn measure(
        mask: &BinaryMask,
        bbox: &Box,
        thresholds: &ClassificationThresholds,
        edge_threshold: u16,
    ) -> SegResult<Self> {
        if bbox.is_empty() || !bbox.fits_within(mask.width(), mask.height()) {
            return Err(SegError::DegenerateRegion {
                bbox: *bbox,
                width: mask.width(),
                height: mask.height(),
            });
        }

        let area = bbox.area();
        let density = mask.sum_in(bbox) as f64 / (area as f64 * 255.0);
        let mut features = Self {
            width: bbox.w as i64,
            height: bbox.h as i64,
            aspect: bbox.aspect_ratio(),
            area,
            density,
            edge_density: None,
        };

        if features.is_line_candidate(thresholds) {
            let roi = mask.crop(bbox)?;
            features.edge_density = Some(edge_density(&roi, edge_threshold)?);
        }
        trace!(
            bbox = %bbox,
            aspect = features.aspect,
            density = features.density,
            edge_density = ?features.edge_density,
            "region features"
        );
        Ok(features)
    }

    /// Thin and elongated, horizontally or vertically.
    pub fn is_line_candidate(&self, t: &ClassificationThresholds) -> bool {
        (self.aspect > 10.0 && self.height < t.line_thickness)
            || (self.aspect < 0.1 && self.width < t.line_thickness)
    }

    fn text_density(&self) -> bool {
        0.05 < self.density && self.density < 0.5
    }
}

/// One row of the rule table
#[derive(Debug, Clone, Copy)]
pub struct ClassificationRule {
    /// Kind assigned when the rule matches
    pub kind: RegionKind,
    /// Short description, for tracing
    pub name: &'static str,
    /// The test
    pub matches: fn(&RegionFeatures, &ClassificationThresholds) -> bool,
}

/// Ranked classification rules; the first match wins.
pub const CLASSIFICATION_RULES: [ClassificationRule; 6] = [
    ClassificationRule {
        kind: RegionKind::Line,
        name: "thin with few edges",
        matches: |f, t| {
            f.is_line_candidate(t)
                && f.edge_density.is_some_and(|d| d < LINE_EDGE_DENSITY_MAX)
        },
    },
    ClassificationRule {
        kind: RegionKind::Image,
        name: "dense and large",
        matches: |f, t| f.density > 0.5 && f.width.min(f.height) > t.min_size,
    },
    ClassificationRule {
        kind: RegionKind::TextBlock,
        name: "text density, large area",
        matches: |f, t| f.text_density() && f.area > t.area_threshold,
    },
    ClassificationRule {
        kind: RegionKind::TextBlock,
        name: "text density, wide",
        matches: |f, _| f.text_density() && f.width > 3 * f.height,
    },
    ClassificationRule {
        kind: RegionKind::ShortText,
        name: "text density",
        matches: |f, _| f.text_density(),
    },
    ClassificationRule {
        kind: RegionKind::Table,
        name: "sparse and large",
        matches: |f, t| {
            0.01 < f.density
                && f.density < 0.1
                && f.width > t.table_size
                && f.height > t.table_size
        },
    },
];

/// Apply the rule table to measured features.
pub fn classify_features(
    features: &RegionFeatures,
    thresholds: &ClassificationThresholds,
) -> RegionKind {
    match CLASSIFICATION_RULES
        .iter()
        .find(|rule| (rule.matches)(features, thresholds))
    {
        Some(rule) => {
            trace!(kind = %rule.kind, rule = rule.name, "classified");
            rule.kind
        }
        None => {
            trace!("no rule matched");
            RegionKind::Unknown
        }
    }
}

/// Classify the region under `bbox` of an undilated mask.
///
/// # Errors
///
/// - [`SegError::InvalidParameter`] for invalid options
/// - [`SegError::DegenerateRegion`] for a zero-area or out-of-bounds box
pub fn classify_region(
    mask: &BinaryMask,
    bbox: &Box,
    options: &LayoutOptions,
) -> SegResult<RegionKind> {
    let thresholds = options.validate()?.thresholds();
    let features = RegionFeatures::measure(mask, bbox, &thresholds, options.edge_threshold)?;
    Ok(classify_features(&features, &thresholds))
}
