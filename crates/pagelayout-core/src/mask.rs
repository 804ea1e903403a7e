//! BinaryMask - Foreground/background masks
//!
//! A `BinaryMask` has the geometry of the page it was derived from and one
//! byte per pixel: [`FOREGROUND`] (255) for ink, [`BACKGROUND`] (0) for
//! paper. Keeping the 0/255 convention means ROI sums can be compared
//! directly against `area * 255`.

use crate::box_::Box;
use crate::error::{Error, Result};
use crate::image::PageImage;

/// Sample value of a foreground pixel
pub const FOREGROUND: u8 = 255;

/// Sample value of a background pixel
pub const BACKGROUND: u8 = 0;

/// Two-level foreground/background mask
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryMask {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl BinaryMask {
    /// Create an all-background mask.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        Ok(Self {
            width,
            height,
            data: vec![BACKGROUND; width as usize * height as usize],
        })
    }

    /// Wrap a row-major buffer, treating every nonzero byte as foreground.
    ///
    /// Nonzero samples are normalized to [`FOREGROUND`].
    pub fn from_raw(width: u32, height: u32, mut data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(Error::DataLengthMismatch {
                expected,
                actual: data.len(),
            });
        }
        for v in data.iter_mut() {
            if *v != BACKGROUND {
                *v = FOREGROUND;
            }
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build a mask from a predicate evaluated at every pixel.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> bool) -> Result<Self> {
        let mut mask = Self::new(width, height)?;
        for y in 0..height {
            for x in 0..width {
                if f(x, y) {
                    mask.data[y as usize * width as usize + x as usize] = FOREGROUND;
                }
            }
        }
        Ok(mask)
    }

    /// Get the mask width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the mask height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get raw access to the samples (0 or 255).
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Get the samples of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        let start = y as usize * self.width as usize;
        &self.data[start..start + self.width as usize]
    }

    /// Check whether (x, y) is foreground. Out-of-range pixels are
    /// background.
    #[inline]
    pub fn is_foreground(&self, x: u32, y: u32) -> bool {
        x < self.width
            && y < self.height
            && self.data[y as usize * self.width as usize + x as usize] == FOREGROUND
    }

    /// Set (x, y) to foreground or background.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] for coordinates outside the mask.
    pub fn set(&mut self, x: u32, y: u32, foreground: bool) -> Result<()> {
        let idx = y as usize * self.width as usize + x as usize;
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                index: idx,
                len: self.data.len(),
            });
        }
        self.data[idx] = if foreground { FOREGROUND } else { BACKGROUND };
        Ok(())
    }

    /// Mark a rectangle as foreground, clipped to the mask.
    pub fn fill_rect(&mut self, rect: &Box) {
        let Some(clipped) = rect.clip(self.width as i32, self.height as i32) else {
            return;
        };
        for y in clipped.y..clipped.bottom() {
            let start = y as usize * self.width as usize + clipped.x as usize;
            self.data[start..start + clipped.w as usize].fill(FOREGROUND);
        }
    }

    /// Count foreground pixels.
    pub fn count_foreground(&self) -> u64 {
        self.data.iter().filter(|&&v| v == FOREGROUND).count() as u64
    }

    /// Check whether the mask has no foreground at all.
    pub fn is_empty(&self) -> bool {
        self.data.iter().all(|&v| v == BACKGROUND)
    }

    /// Sum of sample values (0 or 255 each) inside `rect`.
    ///
    /// The rectangle is clipped to the mask first.
    pub fn sum_in(&self, rect: &Box) -> u64 {
        let Some(clipped) = rect.clip(self.width as i32, self.height as i32) else {
            return 0;
        };
        (clipped.y..clipped.bottom())
            .map(|y| {
                let start = y as usize * self.width as usize + clipped.x as usize;
                self.data[start..start + clipped.w as usize]
                    .iter()
                    .map(|&v| v as u64)
                    .sum::<u64>()
            })
            .sum()
    }

    /// Copy out the sub-mask under `rect`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `rect` does not intersect the
    /// mask.
    pub fn crop(&self, rect: &Box) -> Result<BinaryMask> {
        let clipped = rect
            .clip(self.width as i32, self.height as i32)
            .ok_or_else(|| {
                Error::InvalidParameter(format!(
                    "crop rectangle {} does not intersect {}x{} mask",
                    rect, self.width, self.height
                ))
            })?;
        let mut data = Vec::with_capacity(clipped.area() as usize);
        for y in clipped.y..clipped.bottom() {
            let start = y as usize * self.width as usize + clipped.x as usize;
            data.extend_from_slice(&self.data[start..start + clipped.w as usize]);
        }
        Ok(BinaryMask {
            width: clipped.w as u32,
            height: clipped.h as u32,
            data,
        })
    }

    /// Check that another mask has the same geometry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DimensionMismatch`] when the sizes differ.
    pub fn check_same_size(&self, other: &BinaryMask) -> Result<()> {
        if self.width != other.width || self.height != other.height {
            return Err(Error::DimensionMismatch {
                expected: (self.width, self.height),
                actual: (other.width, other.height),
            });
        }
        Ok(())
    }

    /// Copy the mask into a single-channel page image (0/255 samples).
    pub fn to_image(&self) -> Result<PageImage> {
        PageImage::from_gray(self.width, self.height, self.data.clone())
    }
}
