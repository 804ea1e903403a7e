//! Layout analysis pipeline
//!
//! image -> [`binarize`] -> mask -> [`detect_regions_with_options`] ->
//! regions -> [`analyze_relationships_with_tolerance`] -> relationships.
//!
//! Every stage is a pure function of its inputs. [`LayoutAnalyzer`] only
//! holds validated options, so one analyzer can be shared between threads.

use crate::detect::{Region, detect_regions_with_options};
use crate::options::{Granularity, LayoutOptions};
use crate::relation::{Relationship, analyze_relationships_with_tolerance};
use crate::SegResult;
use pagelayout_color::binarize;
use pagelayout_core::PageImage;
use tracing::debug;

/// Output of a layout analysis
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisResult {
    /// Classified regions, in discovery order
    pub regions: Vec<Region>,
    /// Pairwise relationships; indices refer to `regions`
    pub relationships: Vec<Relationship>,
}

impl AnalysisResult {
    /// Check whether nothing was found
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

/// Stateless layout analysis engine
///
/// # Examples
///
/// ```
/// use pagelayout_core::{Box, Channels, PageImage};
/// use pagelayout_seg::{LayoutAnalyzer, LayoutOptions, RegionKind};
///
/// let page = PageImage::new_filled(400, 400, Channels::Gray, 255).unwrap();
/// let mut page = page.try_into_mut().unwrap();
/// page.fill_rect(&Box::new_unchecked(125, 125, 150, 150), 0);
///
/// let analyzer = LayoutAnalyzer::new(LayoutOptions::default()).unwrap();
/// let result = analyzer.analyze(&page.into()).unwrap();
/// assert_eq!(result.regions.len(), 1);
/// assert_eq!(result.regions[0].kind, RegionKind::Image);
/// ```
#[derive(Debug, Clone)]
pub struct LayoutAnalyzer {
    options: LayoutOptions,
    granularity: Granularity,
}

impl LayoutAnalyzer {
    /// Create an analyzer, validating the options up front.
    pub fn new(options: LayoutOptions) -> SegResult<Self> {
        let granularity = options.validate()?;
        Ok(Self {
            options,
            granularity,
        })
    }

    /// The analyzer's options
    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// The validated granularity
    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    /// Run the full pipeline on one page image.
    pub fn analyze(&self, image: &PageImage) -> SegResult<AnalysisResult> {
        let span = tracing::debug_span!(
            "analyze_layout",
            width = image.width(),
            height = image.height(),
            granularity = self.granularity.value()
        );
        let _enter = span.enter();

        let mask = binarize(image)?;
        let regions = detect_regions_with_options(&mask, &self.options)?;
        let relationships =
            analyze_relationships_with_tolerance(&regions, self.options.alignment_tolerance);

        debug!(
            regions = regions.len(),
            relationships = relationships.len(),
            "layout analysis complete"
        );
        Ok(AnalysisResult {
            regions,
            relationships,
        })
    }
}

impl Default for LayoutAnalyzer {
    fn default() -> Self {
        Self {
            options: LayoutOptions::default(),
            granularity: Granularity::default(),
        }
    }
}

/// Analyze a page image at the given granularity.
///
/// # Errors
///
/// Returns [`SegError::InvalidParameter`](crate::SegError::InvalidParameter)
/// for a granularity outside `[1, 100]` or non-finite.
pub fn analyze_layout(image: &PageImage, granularity: f64) -> SegResult<AnalysisResult> {
    analyze_layout_with_options(image, &LayoutOptions::default().with_granularity(granularity))
}

/// Analyze a page image with explicit options.
pub fn analyze_layout_with_options(
    image: &PageImage,
    options: &LayoutOptions,
) -> SegResult<AnalysisResult> {
    LayoutAnalyzer::new(options.clone())?.analyze(image)
}
