//! Binary thresholding
//!
//! Converts page images to ink masks:
//! - Fixed threshold binarization
//! - Otsu's method (automatic threshold selection)
//!
//! Both produce *inverted* masks: intensities below the threshold are dark
//! ink and become foreground (255); everything else is background (0).

use crate::colorspace::convert_to_gray;
use crate::{ColorError, ColorResult};
use pagelayout_core::{BACKGROUND, BinaryMask, FOREGROUND, PageImage};
use tracing::debug;

/// Compute the 256-bin intensity histogram of a gray image.
///
/// # Errors
///
/// Returns [`ColorError::UnsupportedChannels`] for RGB input; convert with
/// [`convert_to_gray`] first.
pub fn gray_histogram(gray: &PageImage) -> ColorResult<[u64; 256]> {
    if !gray.is_gray() {
        return Err(ColorError::UnsupportedChannels {
            expected: "1 (gray)",
            actual: gray.channels().count(),
        });
    }
    let mut histogram = [0u64; 256];
    for &v in gray.data() {
        histogram[v as usize] += 1;
    }
    Ok(histogram)
}

/// Select a threshold from a histogram with Otsu's method.
///
/// Every split `[0, t] | [t+1, 255]` is scored by its between-class
/// variance `w0 * w1 * (m0 - m1)^2`; the first maximum wins. The returned
/// value is `t + 1`, the first intensity of the bright class, so that ink
/// is exactly the set of intensities *below* the threshold.
///
/// A histogram with fewer than two occupied bins has no contrast to split
/// and yields 0, which classifies every pixel as background.
pub fn otsu_threshold_from_histogram(histogram: &[u64; 256]) -> u8 {
    let occupied = histogram.iter().filter(|&&c| c > 0).count();
    if occupied < 2 {
        return 0;
    }

    let total: u64 = histogram.iter().sum();
    let sum_total: f64 = histogram
        .iter()
        .enumerate()
        .map(|(i, &c)| i as f64 * c as f64)
        .sum();

    let mut weight_dark = 0u64;
    let mut sum_dark = 0.0f64;
    let mut best_variance = 0.0f64;
    let mut best_split = 0usize;

    for (t, &count) in histogram.iter().enumerate().take(255) {
        weight_dark += count;
        sum_dark += t as f64 * count as f64;
        if weight_dark == 0 {
            continue;
        }
        let weight_bright = total - weight_dark;
        if weight_bright == 0 {
            break;
        }

        let mean_dark = sum_dark / weight_dark as f64;
        let mean_bright = (sum_total - sum_dark) / weight_bright as f64;
        let variance =
            weight_dark as f64 * weight_bright as f64 * (mean_dark - mean_bright).powi(2);

        if variance > best_variance {
            best_variance = variance;
            best_split = t;
        }
    }

    (best_split + 1) as u8
}

/// Compute Otsu's threshold for a gray image.
///
/// See [`otsu_threshold_from_histogram`] for the meaning of the result.
pub fn compute_otsu_threshold(gray: &PageImage) -> ColorResult<u8> {
    let histogram = gray_histogram(gray)?;
    Ok(otsu_threshold_from_histogram(&histogram))
}

/// Convert a gray image to an ink mask using a fixed threshold.
///
/// Pixels with intensity `< threshold` become foreground.
pub fn threshold_to_binary(gray: &PageImage, threshold: u8) -> ColorResult<BinaryMask> {
    if !gray.is_gray() {
        return Err(ColorError::UnsupportedChannels {
            expected: "1 (gray)",
            actual: gray.channels().count(),
        });
    }
    let data = gray
        .data()
        .iter()
        .map(|&v| if v < threshold { FOREGROUND } else { BACKGROUND })
        .collect();
    Ok(BinaryMask::from_raw(gray.width(), gray.height(), data)?)
}

/// Binarize a page image with an automatically selected threshold.
///
/// RGB input is first reduced to luminance. The threshold comes from
/// Otsu's method and the result is inverted so that dark content is
/// foreground. Pure and deterministic: the input is never modified.
///
/// # Examples
///
/// ```
/// use pagelayout_color::binarize;
/// use pagelayout_core::{Box, Channels, PageImage};
///
/// let page = PageImage::new_filled(40, 40, Channels::Gray, 255).unwrap();
/// let mut page = page.try_into_mut().unwrap();
/// page.fill_rect(&Box::new_unchecked(10, 10, 5, 5), 0);
///
/// let mask = binarize(&page.into()).unwrap();
/// assert_eq!(mask.count_foreground(), 25);
/// ```
pub fn binarize(image: &PageImage) -> ColorResult<BinaryMask> {
    let span = tracing::debug_span!(
        "binarize",
        width = image.width(),
        height = image.height(),
        channels = image.channels().count()
    );
    let _enter = span.enter();

    let gray = convert_to_gray(image)?;
    let threshold = compute_otsu_threshold(&gray)?;
    let mask = threshold_to_binary(&gray, threshold)?;

    debug!(
        threshold,
        foreground = mask.count_foreground(),
        "binarization complete"
    );
    Ok(mask)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagelayout_core::{Box, Channels};

    fn two_level(dark: u8, light: u8) -> PageImage {
        let page = PageImage::new_filled(20, 20, Channels::Gray, light).unwrap();
        let mut page = page.try_into_mut().unwrap();
        page.fill_rect(&Box::new_unchecked(0, 0, 20, 5), dark);
        page.into()
    }

    #[test]
    fn test_otsu_separates_two_levels() {
        let page = two_level(30, 200);
        let t = compute_otsu_threshold(&page).unwrap();
        assert!(t > 30 && t <= 200, "threshold {t}");
        let mask = threshold_to_binary(&page, t).unwrap();
        assert_eq!(mask.count_foreground(), 100);
    }

    #[test]
    fn test_otsu_black_on_white_is_one() {
        // Only 0 and 255 occupied: first maximum splits right after 0.
        let page = two_level(0, 255);
        assert_eq!(compute_otsu_threshold(&page).unwrap(), 1);
    }

    #[test]
    fn test_uniform_image_has_no_ink() {
        for value in [0u8, 128, 255] {
            let page = PageImage::new_filled(8, 8, Channels::Gray, value).unwrap();
            assert_eq!(compute_otsu_threshold(&page).unwrap(), 0);
            let mask = binarize(&page).unwrap();
            assert!(mask.is_empty(), "value {value}");
        }
    }

    #[test]
    fn test_otsu_three_levels() {
        let mut histogram = [0u64; 256];
        histogram[10] = 100;
        histogram[20] = 100;
        histogram[240] = 800;
        let t = otsu_threshold_from_histogram(&histogram);
        // Both dark levels fall in the ink class.
        assert!(t > 20 && t <= 240, "threshold {t}");
    }

    #[test]
    fn test_histogram_requires_gray() {
        let page = PageImage::new(2, 2, Channels::Rgb).unwrap();
        assert!(matches!(
            gray_histogram(&page),
            Err(ColorError::UnsupportedChannels { actual: 3, .. })
        ));
        assert!(threshold_to_binary(&page, 10).is_err());
    }

    #[test]
    fn test_binarize_rgb() {
        let page = PageImage::new_filled(10, 10, Channels::Rgb, 250).unwrap();
        let mut page = page.try_into_mut().unwrap();
        page.fill_rect_rgb(&Box::new_unchecked(2, 2, 4, 4), 20, 20, 120);
        let mask = binarize(&page.into()).unwrap();
        assert_eq!(mask.count_foreground(), 16);
        assert!(mask.is_foreground(2, 2));
        assert!(!mask.is_foreground(6, 6));
    }

    #[test]
    fn test_binarize_does_not_touch_input() {
        let page = two_level(0, 255);
        let before = page.clone().to_mut();
        let _ = binarize(&page).unwrap();
        let before: PageImage = before.into();
        assert_eq!(page, before);
    }
}
