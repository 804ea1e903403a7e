//! Analysis options and granularity
//!
//! Granularity is the single knob of the detector, on a 1..=100 scale.
//! Higher values merge more aggressively (a larger dilation kernel) and
//! raise the size thresholds of the classifier.

use crate::relation::ALIGNMENT_TOLERANCE;
use crate::{SegError, SegResult};
use pagelayout_filter::DEFAULT_EDGE_THRESHOLD;

/// Validated granularity in `[1, 100]`
///
/// # Examples
///
/// ```
/// use pagelayout_seg::Granularity;
///
/// let g = Granularity::new(50.0).unwrap();
/// assert_eq!(g.merge_kernel_size(400, 300), 15);
/// assert!(Granularity::new(0.5).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Granularity(f64);

impl Granularity {
    /// Smallest accepted granularity
    pub const MIN: f64 = 1.0;
    /// Largest accepted granularity
    pub const MAX: f64 = 100.0;
    /// Default granularity
    pub const DEFAULT: f64 = 50.0;

    /// Validate a granularity value.
    ///
    /// # Errors
    ///
    /// Returns [`SegError::InvalidParameter`] for non-finite values and
    /// values outside `[1, 100]`. Values are never clamped.
    pub fn new(value: f64) -> SegResult<Self> {
        if !value.is_finite() || !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(SegError::InvalidParameter(format!(
                "granularity must be a finite value in [{}, {}], got {}",
                Self::MIN,
                Self::MAX,
                value
            )));
        }
        Ok(Granularity(value))
    }

    /// The raw value
    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Side of the square dilation kernel for a `width` x `height` image:
    /// `max(1, floor(min(width, height) * g / 1000))`.
    pub fn merge_kernel_size(self, width: u32, height: u32) -> u32 {
        let side = width.min(height) as f64;
        ((side * self.0 / 1000.0).floor() as u32).max(1)
    }

    /// Classifier thresholds derived from this granularity.
    pub fn thresholds(self) -> ClassificationThresholds {
        ClassificationThresholds::for_granularity(self)
    }
}

impl Default for Granularity {
    fn default() -> Self {
        Granularity(Self::DEFAULT)
    }
}

impl TryFrom<f64> for Granularity {
    type Error = SegError;

    fn try_from(value: f64) -> SegResult<Self> {
        Granularity::new(value)
    }
}

/// Granularity-scaled size thresholds of the classifier
///
/// Each is the base value scaled by `g / base_g`, rounded half to even,
/// and floored at a minimum:
///
/// | threshold        | formula                            |
/// |------------------|------------------------------------|
/// | `line_thickness` | `max(1, round(20 g / 25))`         |
/// | `min_size`       | `max(20, round(20 g / 50))`        |
/// | `area_threshold` | `max(1000, round(1000 g / 50))`    |
/// | `table_size`     | `max(100, round(100 g / 50))`      |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassificationThresholds {
    /// Thin side of a line must be below this
    pub line_thickness: i64,
    /// Short side of an image must exceed this
    pub min_size: i64,
    /// Area of a text block must exceed this
    pub area_threshold: i64,
    /// Both sides of a table must exceed this
    pub table_size: i64,
}

impl ClassificationThresholds {
    /// Thresholds for a granularity.
    pub fn for_granularity(granularity: Granularity) -> Self {
        let g = granularity.value();
        let scaled = |base: f64, base_g: f64, floor: i64| {
            ((base * g / base_g).round_ties_even() as i64).max(floor)
        };
        Self {
            line_thickness: scaled(20.0, 25.0, 1),
            min_size: scaled(20.0, 50.0, 20),
            area_threshold: scaled(1000.0, 50.0, 1000),
            table_size: scaled(100.0, 50.0, 100),
        }
    }
}

impl Default for ClassificationThresholds {
    fn default() -> Self {
        Self::for_granularity(Granularity::default())
    }
}

/// Options for layout analysis
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOptions {
    /// Granularity in `[1, 100]` (default: 50)
    pub granularity: f64,
    /// Sobel magnitude at or above which a pixel is an edge (default: 150)
    pub edge_threshold: u16,
    /// Pixel tolerance for alignment relationships (default: 10)
    pub alignment_tolerance: i32,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            granularity: Granularity::DEFAULT,
            edge_threshold: DEFAULT_EDGE_THRESHOLD,
            alignment_tolerance: ALIGNMENT_TOLERANCE,
        }
    }
}

impl LayoutOptions {
    /// Set the granularity
    pub fn with_granularity(mut self, granularity: f64) -> Self {
        self.granularity = granularity;
        self
    }

    /// Set the edge magnitude threshold
    pub fn with_edge_threshold(mut self, threshold: u16) -> Self {
        self.edge_threshold = threshold;
        self
    }

    /// Set the alignment tolerance
    pub fn with_alignment_tolerance(mut self, tolerance: i32) -> Self {
        self.alignment_tolerance = tolerance;
        self
    }

    /// Check every field, returning the validated granularity.
    pub fn validate(&self) -> SegResult<Granularity> {
        let granularity = Granularity::new(self.granularity)?;
        if self.edge_threshold == 0 {
            return Err(SegError::InvalidParameter(
                "edge threshold must be positive".to_string(),
            ));
        }
        if self.alignment_tolerance <= 0 {
            return Err(SegError::InvalidParameter(format!(
                "alignment tolerance must be positive, got {}",
                self.alignment_tolerance
            )));
        }
        Ok(granularity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_granularity_range() {
        assert!(Granularity::new(1.0).is_ok());
        assert!(Granularity::new(100.0).is_ok());
        for bad in [0.0, 0.999, 100.5, -3.0, f64::NAN, f64::INFINITY] {
            assert!(
                matches!(Granularity::new(bad), Err(SegError::InvalidParameter(_))),
                "{}",
                bad
            );
        }
        assert!(Granularity::try_from(101.0).is_err());
    }

    #[test]
    fn test_merge_kernel_size() {
        let g = |v| Granularity::new(v).unwrap();
        assert_eq!(g(50.0).merge_kernel_size(400, 400), 20);
        assert_eq!(g(1.0).merge_kernel_size(400, 400), 1);
        assert_eq!(g(100.0).merge_kernel_size(800, 1000), 80);
        assert_eq!(g(50.0).merge_kernel_size(10, 10), 1);
    }

    #[test]
    fn test_merge_kernel_size_monotonic() {
        let mut last = 0;
        for step in 0..=198 {
            let g = Granularity::new(1.0 + step as f64 * 0.5).unwrap();
            let k = g.merge_kernel_size(1240, 1754);
            assert!(k >= last, "k decreased at g = {}", g.value());
            last = k;
        }
    }

    #[test]
    fn test_default_thresholds() {
        let t = ClassificationThresholds::default();
        assert_eq!(t.line_thickness, 40);
        assert_eq!(t.min_size, 20);
        assert_eq!(t.area_threshold, 1000);
        assert_eq!(t.table_size, 100);
    }

    #[test]
    fn test_thresholds_scale_and_floor() {
        let t = Granularity::new(100.0).unwrap().thresholds();
        assert_eq!(t.line_thickness, 80);
        assert_eq!(t.min_size, 40);
        assert_eq!(t.area_threshold, 2000);
        assert_eq!(t.table_size, 200);

        let t = Granularity::new(1.0).unwrap().thresholds();
        assert_eq!(t.line_thickness, 1);
        assert_eq!(t.min_size, 20);
        assert_eq!(t.area_threshold, 1000);
        assert_eq!(t.table_size, 100);
    }

    #[test]
    fn test_thresholds_round_half_to_even() {
        // 20 * 1.875 / 25 = 1.5 -> 2; 20 * 3.125 / 25 = 2.5 -> 2
        assert_eq!(Granularity::new(1.875).unwrap().thresholds().line_thickness, 2);
        assert_eq!(Granularity::new(3.125).unwrap().thresholds().line_thickness, 2);
    }

    #[test]
    fn test_options_validate() {
        assert_eq!(
            LayoutOptions::default().validate().unwrap(),
            Granularity::default()
        );
        assert!(LayoutOptions::default().with_granularity(0.0).validate().is_err());
        assert!(LayoutOptions::default().with_edge_threshold(0).validate().is_err());
        assert!(
            LayoutOptions::default()
                .with_alignment_tolerance(0)
                .validate()
                .is_err()
        );
        let opts = LayoutOptions::default()
            .with_granularity(20.0)
            .with_alignment_tolerance(4);
        assert_eq!(opts.validate().unwrap().value(), 20.0);
        assert_eq!(opts.alignment_tolerance, 4);
    }
}
