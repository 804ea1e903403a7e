//! Projection-profile cuts
//!
//! Row and column intensity sums of a gray page compared against a
//! fraction of the all-white sum. A row (column) qualifies when its sum is
//! below `max_sum * (1 - pct / 100)`; consecutive qualifying rows are
//! reported as inclusive `(start, end)` runs.

use crate::{SegError, SegResult};
use pagelayout_color::convert_to_gray;
use pagelayout_core::PageImage;

/// Inclusive run of row or column indices
pub type CutRange = (u32, u32);

/// Row and column runs of one page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileCuts {
    /// Runs of qualifying rows
    pub rows: Vec<CutRange>,
    /// Runs of qualifying columns
    pub columns: Vec<CutRange>,
}

fn check_percentage(pct: f64) -> SegResult<()> {
    if !pct.is_finite() || !(0.0..=100.0).contains(&pct) {
        return Err(SegError::InvalidParameter(format!(
            "profile threshold must be a percentage in [0, 100], got {}",
            pct
        )));
    }
    Ok(())
}

fn require_gray(gray: &PageImage) -> SegResult<()> {
    if !gray.is_gray() {
        return Err(pagelayout_color::ColorError::UnsupportedChannels {
            expected: "1 (gray)",
            actual: gray.channels().count(),
        }
        .into());
    }
    Ok(())
}

/// Group sorted indices into maximal runs of consecutive values.
fn runs(indices: impl IntoIterator<Item = u32>) -> Vec<CutRange> {
    let mut ranges: Vec<CutRange> = Vec::new();
    for i in indices {
        match ranges.last_mut() {
            Some((_, end)) if *end + 1 == i => *end = i,
            _ => ranges.push((i, i)),
        }
    }
    ranges
}

fn qualifying(sums: &[u64], length: u32, pct: f64) -> Vec<CutRange> {
    let max_sum = length as f64 * 255.0;
    let limit = max_sum * (1.0 - pct / 100.0);
    runs(
        sums.iter()
            .enumerate()
            .filter(|&(_, &s)| (s as f64) < limit)
            .map(|(i, _)| i as u32),
    )
}

/// Runs of rows whose intensity sum is below `width * 255 * (1 - pct/100)`.
pub fn row_cuts(gray: &PageImage, threshold_pct: f64) -> SegResult<Vec<CutRange>> {
    check_percentage(threshold_pct)?;
    require_gray(gray)?;
    let sums: Vec<u64> = (0..gray.height())
        .map(|y| gray.row(y).iter().map(|&v| v as u64).sum())
        .collect();
    Ok(qualifying(&sums, gray.width(), threshold_pct))
}

/// Runs of columns whose intensity sum is below
/// `height * 255 * (1 - pct/100)`.
pub fn column_cuts(gray: &PageImage, threshold_pct: f64) -> SegResult<Vec<CutRange>> {
    check_percentage(threshold_pct)?;
    require_gray(gray)?;
    let mut sums = vec![0u64; gray.width() as usize];
    for y in 0..gray.height() {
        for (sum, &v) in sums.iter_mut().zip(gray.row(y)) {
            *sum += v as u64;
        }
    }
    Ok(qualifying(&sums, gray.height(), threshold_pct))
}

/// Row and column cuts of a page; RGB input is converted to gray first.
pub fn profile_cuts(image: &PageImage, row_pct: f64, column_pct: f64) -> SegResult<ProfileCuts> {
    let gray = convert_to_gray(image)?;
    Ok(ProfileCuts {
        rows: row_cuts(&gray, row_pct)?,
        columns: column_cuts(&gray, column_pct)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagelayout_core::{Box, Channels};

    fn page_with(blocks: &[Box]) -> PageImage {
        let page = PageImage::new_filled(20, 10, Channels::Gray, 255).unwrap();
        let mut page = page.try_into_mut().unwrap();
        for b in blocks {
            page.fill_rect(b, 0);
        }
        page.into()
    }

    #[test]
    fn test_runs_are_maximal() {
        assert_eq!(runs([1, 2, 3, 7, 9, 10]), vec![(1, 3), (7, 7), (9, 10)]);
        assert_eq!(runs([4]), vec![(4, 4)]);
        assert!(runs([]).is_empty());
    }

    #[test]
    fn test_row_and_column_cuts() {
        let page = page_with(&[
            Box::new_unchecked(0, 2, 20, 2),
            Box::new_unchecked(5, 7, 3, 1),
        ]);
        // Any ink at all qualifies at 0%.
        assert_eq!(row_cuts(&page, 0.0).unwrap(), vec![(2, 3), (7, 7)]);
        // Row 7 is only 15% ink.
        assert_eq!(row_cuts(&page, 50.0).unwrap(), vec![(2, 3)]);
        assert_eq!(column_cuts(&page, 0.0).unwrap(), vec![(0, 19)]);
        assert_eq!(column_cuts(&page, 25.0).unwrap(), vec![(5, 7)]);
    }

    #[test]
    fn test_hundred_percent_matches_nothing() {
        let page = page_with(&[Box::new_unchecked(0, 0, 20, 10)]);
        assert!(row_cuts(&page, 100.0).unwrap().is_empty());
    }

    #[test]
    fn test_profile_cuts_rgb() {
        let page = PageImage::new_filled(10, 10, Channels::Rgb, 255).unwrap();
        let mut page = page.try_into_mut().unwrap();
        page.fill_rect_rgb(&Box::new_unchecked(0, 4, 10, 1), 0, 0, 0);
        let cuts = profile_cuts(&page.into(), 5.0, 5.0).unwrap();
        assert_eq!(cuts.rows, vec![(4, 4)]);
        assert_eq!(cuts.columns, vec![(0, 9)]);

        // One dark pixel in ten sits exactly on the 10% limit.
        let page = PageImage::new_filled(10, 10, Channels::Gray, 255).unwrap();
        let mut page = page.try_into_mut().unwrap();
        page.fill_rect(&Box::new_unchecked(0, 4, 10, 1), 0);
        let cuts = profile_cuts(&page.into(), 10.0, 10.0).unwrap();
        assert!(cuts.columns.is_empty());
    }

    #[test]
    fn test_invalid_percentage() {
        let page = page_with(&[]);
        for pct in [-1.0, 100.5, f64::NAN] {
            assert!(matches!(
                row_cuts(&page, pct),
                Err(SegError::InvalidParameter(_))
            ));
        }
        let rgb = PageImage::new(2, 2, Channels::Rgb).unwrap();
        assert!(matches!(column_cuts(&rgb, 10.0), Err(SegError::Color(_))));
    }
}
