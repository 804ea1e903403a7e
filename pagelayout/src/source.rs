//! Page sources
//!
//! Layout analysis works on rasters; turning a document page into one is
//! the job of a [`PageSource`]. No renderer ships with this crate.

use crate::{Error, Result};
use pagelayout_core::PageImage;
use pagelayout_seg::{AnalysisResult, LayoutAnalyzer, LayoutOptions};
use tracing::debug;

/// One rendered page
#[derive(Debug, Clone)]
pub struct RenderedPage {
    /// The page raster, gray or RGB
    pub image: PageImage,
    /// Number of pages in the source document
    pub page_count: usize,
}

/// Something that renders document pages to rasters
///
/// Implementations return [`Error::PageOutOfRange`] for a page index past
/// the end of the document and wrap their own failures in
/// [`Error::Render`].
pub trait PageSource {
    /// Render page `page_index` (0-based) at `zoom` times its natural size.
    fn render_page(&self, page_index: usize, zoom: f32) -> Result<RenderedPage>;
}

impl<S: PageSource + ?Sized> PageSource for &S {
    fn render_page(&self, page_index: usize, zoom: f32) -> Result<RenderedPage> {
        (**self).render_page(page_index, zoom)
    }
}

/// Render one page through `source` and analyze its layout.
///
/// Options are validated before the source is asked to render.
///
/// # Errors
///
/// - [`Error::InvalidZoom`] if `zoom` is not finite and positive
/// - [`Error::Seg`] for invalid options or analysis failures
/// - whatever the source returns from [`PageSource::render_page`]
pub fn analyze_page<S: PageSource + ?Sized>(
    source: &S,
    page_index: usize,
    zoom: f32,
    options: &LayoutOptions,
) -> Result<(RenderedPage, AnalysisResult)> {
    if !zoom.is_finite() || zoom <= 0.0 {
        return Err(Error::InvalidZoom(zoom));
    }
    let analyzer = LayoutAnalyzer::new(options.clone())?;

    let page = source.render_page(page_index, zoom)?;
    if page_index >= page.page_count {
        return Err(Error::PageOutOfRange {
            index: page_index,
            count: page.page_count,
        });
    }
    debug!(
        page_index,
        zoom,
        width = page.image.width(),
        height = page.image.height(),
        "page rendered"
    );

    let result = analyzer.analyze(&page.image)?;
    Ok((page, result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagelayout_core::{Box, Channels};
    use pagelayout_seg::{RegionKind, SegError};
    use std::cell::Cell;

    /// Renders each page as a white sheet with one black block whose
    /// position depends on the page index.
    struct BlockDocument {
        pages: usize,
        renders: Cell<usize>,
    }

    impl BlockDocument {
        fn new(pages: usize) -> Self {
            Self {
                pages,
                renders: Cell::new(0),
            }
        }
    }

    impl PageSource for BlockDocument {
        fn render_page(&self, page_index: usize, zoom: f32) -> Result<RenderedPage> {
            if page_index >= self.pages {
                return Err(Error::PageOutOfRange {
                    index: page_index,
                    count: self.pages,
                });
            }
            self.renders.set(self.renders.get() + 1);
            let side = (200.0 * zoom) as u32;
            let image = PageImage::new_filled(side, side, Channels::Gray, 255)
                .map_err(|e| Error::Render(e.into()))?;
            let mut image = image.try_into_mut().map_err(|_| {
                Error::Render("page buffer is shared".into())
            })?;
            let offset = 10 + 20 * page_index as i32;
            image.fill_rect(&Box::new_unchecked(offset, offset, side as i32 / 3, side as i32 / 3), 0);
            Ok(RenderedPage {
                image: image.into(),
                page_count: self.pages,
            })
        }
    }

    struct BrokenSource;

    impl PageSource for BrokenSource {
        fn render_page(&self, _page_index: usize, _zoom: f32) -> Result<RenderedPage> {
            Err(Error::Render("document is encrypted".into()))
        }
    }

    #[test]
    fn test_analyze_page() {
        let doc = BlockDocument::new(3);
        let (page, result) = analyze_page(&doc, 1, 2.0, &LayoutOptions::default()).unwrap();
        assert_eq!(page.page_count, 3);
        assert_eq!(page.image.width(), 400);
        assert_eq!(result.regions.len(), 1);
        assert_eq!(result.regions[0].kind, RegionKind::Image);
        assert!(result.relationships.is_empty());
    }

    #[test]
    fn test_page_out_of_range() {
        let doc = BlockDocument::new(2);
        let err = analyze_page(&doc, 5, 1.0, &LayoutOptions::default()).unwrap_err();
        assert!(matches!(err, Error::PageOutOfRange { index: 5, count: 2 }));
    }

    #[test]
    fn test_invalid_arguments_skip_rendering() {
        let doc = BlockDocument::new(1);
        for zoom in [0.0, -1.0, f32::NAN, f32::INFINITY] {
            assert!(matches!(
                analyze_page(&doc, 0, zoom, &LayoutOptions::default()),
                Err(Error::InvalidZoom(_))
            ));
        }
        let options = LayoutOptions::default().with_granularity(0.0);
        assert!(matches!(
            analyze_page(&doc, 0, 1.0, &options),
            Err(Error::Seg(SegError::InvalidParameter(_)))
        ));
        assert_eq!(doc.renders.get(), 0);
    }

    #[test]
    fn test_render_error_propagates() {
        let err = analyze_page(&BrokenSource, 0, 1.0, &LayoutOptions::default()).unwrap_err();
        assert!(matches!(err, Error::Render(_)));
        assert_eq!(err.to_string(), "render error: document is encrypted");
    }

    #[test]
    fn test_source_by_reference() {
        let doc = BlockDocument::new(1);
        let by_ref: &dyn PageSource = &doc;
        let (_, result) = analyze_page(&by_ref, 0, 1.0, &LayoutOptions::default()).unwrap();
        assert_eq!(result.regions.len(), 1);
        assert_eq!(doc.renders.get(), 1);
    }
}
