//! PageImage - The page raster container
//!
//! `PageImage` holds a rendered page as 8-bit samples, either one gray
//! channel or three interleaved RGB channels.
//!
//! # Sample layout
//!
//! - Rows are stored top to bottom with no padding
//! - Within a row, pixels run left to right
//! - For RGB images, each pixel is the three bytes `R, G, B`
//!
//! # Ownership model
//!
//! `PageImage` uses `Arc` for cheap cloning (shared ownership).
//! To modify sample data, convert to `PageImageMut` via
//! [`PageImage::try_into_mut`] or [`PageImage::to_mut`], then convert back
//! with `Into<PageImage>`.

mod access;
mod graphics;

use crate::error::{Error, Result};
use std::sync::Arc;

/// Number of interleaved channels per pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Channels {
    /// Single intensity channel
    Gray = 1,
    /// Interleaved red, green, blue
    Rgb = 3,
}

impl Channels {
    /// Create `Channels` from a raw channel count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidChannels`] if `count` is not 1 or 3.
    pub fn from_count(count: u32) -> Result<Self> {
        match count {
            1 => Ok(Channels::Gray),
            3 => Ok(Channels::Rgb),
            _ => Err(Error::InvalidChannels(count)),
        }
    }

    /// Get the number of samples per pixel.
    #[inline]
    pub fn count(self) -> u32 {
        self as u32
    }
}

/// Internal image data
#[derive(Debug, Clone, PartialEq, Eq)]
struct PageImageData {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Samples per pixel
    channels: Channels,
    /// Row-major interleaved samples
    data: Vec<u8>,
}

impl PageImageData {
    fn validate(width: u32, height: u32, channels: Channels, len: usize) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let expected = width as usize * height as usize * channels.count() as usize;
        if len != expected {
            return Err(Error::DataLengthMismatch {
                expected,
                actual: len,
            });
        }
        Ok(())
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * self.channels.count() as usize
    }
}

/// PageImage - Immutable page raster
///
/// # Examples
///
/// ```
/// use pagelayout_core::{Channels, PageImage};
///
/// let page = PageImage::new_filled(640, 480, Channels::Gray, 255).unwrap();
/// assert_eq!(page.width(), 640);
/// assert_eq!(page.height(), 480);
/// assert_eq!(page.sample(10, 10, 0), Some(255));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageImage {
    inner: Arc<PageImageData>,
}

impl PageImage {
    /// Create a new image with all samples set to zero.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32, channels: Channels) -> Result<Self> {
        Self::new_filled(width, height, channels, 0)
    }

    /// Create a new image with every sample set to `value`.
    pub fn new_filled(width: u32, height: u32, channels: Channels, value: u8) -> Result<Self> {
        let len = width as usize * height as usize * channels.count() as usize;
        Self::from_data(width, height, channels, vec![value; len])
    }

    /// Wrap an existing sample buffer.
    ///
    /// `channels` is the raw samples-per-pixel count as supplied by a
    /// renderer; anything other than 1 or 3 is rejected.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidChannels`] for an unsupported channel count
    /// - [`Error::InvalidDimension`] if width or height is 0
    /// - [`Error::DataLengthMismatch`] if `data` does not hold exactly
    ///   `width * height * channels` samples
    pub fn from_raw(width: u32, height: u32, channels: u32, data: Vec<u8>) -> Result<Self> {
        let channels = Channels::from_count(channels)?;
        Self::from_data(width, height, channels, data)
    }

    /// Wrap a single-channel sample buffer.
    pub fn from_gray(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        Self::from_data(width, height, Channels::Gray, data)
    }

    /// Wrap an interleaved RGB sample buffer.
    pub fn from_rgb(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        Self::from_data(width, height, Channels::Rgb, data)
    }

    fn from_data(width: u32, height: u32, channels: Channels, data: Vec<u8>) -> Result<Self> {
        PageImageData::validate(width, height, channels, data.len())?;
        Ok(PageImage {
            inner: Arc::new(PageImageData {
                width,
                height,
                channels,
                data,
            }),
        })
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the channel layout.
    #[inline]
    pub fn channels(&self) -> Channels {
        self.inner.channels
    }

    /// Check whether this is a single-channel image.
    #[inline]
    pub fn is_gray(&self) -> bool {
        self.inner.channels == Channels::Gray
    }

    /// Get raw access to the sample data.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.inner.data
    }

    /// Get the samples of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.inner.width as usize * self.inner.channels.count() as usize;
        let start = y as usize * stride;
        &self.inner.data[start..start + stride]
    }

    /// Check if two images have the same width, height, and channel layout.
    pub fn sizes_equal(&self, other: &PageImage) -> bool {
        self.inner.width == other.inner.width
            && self.inner.height == other.inner.height
            && self.inner.channels == other.inner.channels
    }

    /// Try to get mutable access to the sample data.
    ///
    /// Succeeds only if there is exactly one reference to the data.
    pub fn try_into_mut(self) -> std::result::Result<PageImageMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(PageImageMut { inner: data }),
            Err(arc) => Err(PageImage { inner: arc }),
        }
    }

    /// Create a mutable copy of this image.
    ///
    /// Always copies; the original is left untouched.
    pub fn to_mut(&self) -> PageImageMut {
        PageImageMut {
            inner: (*self.inner).clone(),
        }
    }
}

/// Mutable page raster
///
/// Convert back to an immutable [`PageImage`] using `Into<PageImage>`.
#[derive(Debug)]
pub struct PageImageMut {
    inner: PageImageData,
}

impl PageImageMut {
    /// Get the image width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the channel layout.
    #[inline]
    pub fn channels(&self) -> Channels {
        self.inner.channels
    }

    /// Get mutable access to the sample data.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.inner.data
    }
}

impl From<PageImageMut> for PageImage {
    fn from(image: PageImageMut) -> Self {
        PageImage {
            inner: Arc::new(image.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channels_from_count() {
        assert_eq!(Channels::from_count(1).unwrap(), Channels::Gray);
        assert_eq!(Channels::from_count(3).unwrap(), Channels::Rgb);
        assert!(matches!(
            Channels::from_count(4),
            Err(Error::InvalidChannels(4))
        ));
    }

    #[test]
    fn test_zero_dimension_rejected() {
        assert!(matches!(
            PageImage::new(0, 10, Channels::Gray),
            Err(Error::InvalidDimension {
                width: 0,
                height: 10
            })
        ));
    }

    #[test]
    fn test_from_raw_checks_length() {
        let err = PageImage::from_raw(4, 4, 3, vec![0; 16]).unwrap_err();
        assert!(matches!(
            err,
            Error::DataLengthMismatch {
                expected: 48,
                actual: 16
            }
        ));
        assert!(PageImage::from_raw(4, 4, 1, vec![0; 16]).is_ok());
        assert!(matches!(
            PageImage::from_raw(4, 4, 2, vec![0; 32]),
            Err(Error::InvalidChannels(2))
        ));
    }

    #[test]
    fn test_try_into_mut_requires_unique_owner() {
        let page = PageImage::new(3, 3, Channels::Gray).unwrap();
        let shared = page.clone();
        let page = page.try_into_mut().unwrap_err();
        drop(shared);
        assert!(page.try_into_mut().is_ok());
    }

    #[test]
    fn test_to_mut_copies() {
        let page = PageImage::new_filled(2, 2, Channels::Gray, 7).unwrap();
        let mut copy = page.to_mut();
        copy.data_mut()[0] = 1;
        let copy: PageImage = copy.into();
        assert_eq!(page.data()[0], 7);
        assert_eq!(copy.data()[0], 1);
        assert!(page.sizes_equal(&copy));
    }

    #[test]
    fn test_row_stride() {
        let data: Vec<u8> = (0..18).collect();
        let page = PageImage::from_rgb(3, 2, data).unwrap();
        assert_eq!(page.row(1), &[9, 10, 11, 12, 13, 14, 15, 16, 17]);
    }
}
