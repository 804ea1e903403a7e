//! Sample access functions
//!
//! Low-level functions for getting and setting individual samples.

use super::{Channels, PageImage, PageImageMut};
use crate::error::{Error, Result};

impl PageImage {
    /// Get the sample of `channel` at (x, y).
    ///
    /// Returns `None` if the coordinates or the channel are out of range.
    pub fn sample(&self, x: u32, y: u32, channel: u32) -> Option<u8> {
        let inner = &self.inner;
        if x >= inner.width || y >= inner.height || channel >= inner.channels.count() {
            return None;
        }
        Some(inner.data[inner.index(x, y) + channel as usize])
    }

    /// Get RGB values at (x, y).
    ///
    /// Gray images report the intensity in all three components.
    pub fn get_rgb(&self, x: u32, y: u32) -> Option<(u8, u8, u8)> {
        let inner = &self.inner;
        if x >= inner.width || y >= inner.height {
            return None;
        }
        let idx = inner.index(x, y);
        match inner.channels {
            Channels::Gray => {
                let v = inner.data[idx];
                Some((v, v, v))
            }
            Channels::Rgb => Some((inner.data[idx], inner.data[idx + 1], inner.data[idx + 2])),
        }
    }
}

impl PageImageMut {
    /// Get the sample of `channel` at (x, y).
    pub fn sample(&self, x: u32, y: u32, channel: u32) -> Option<u8> {
        let inner = &self.inner;
        if x >= inner.width || y >= inner.height || channel >= inner.channels.count() {
            return None;
        }
        Some(inner.data[inner.index(x, y) + channel as usize])
    }

    /// Set the sample of `channel` at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates or channel are out
    /// of range.
    pub fn set_sample(&mut self, x: u32, y: u32, channel: u32, value: u8) -> Result<()> {
        let idx = self.inner.index(x, y) + channel as usize;
        if x >= self.inner.width || y >= self.inner.height || channel >= self.inner.channels.count()
        {
            return Err(Error::IndexOutOfBounds {
                index: idx,
                len: self.inner.data.len(),
            });
        }
        self.inner.data[idx] = value;
        Ok(())
    }

    /// Set an RGB pixel at (x, y).
    ///
    /// On a gray image the pixel receives the mean of the three components.
    pub fn set_rgb(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8) -> Result<()> {
        match self.inner.channels {
            Channels::Gray => {
                let avg = ((r as u32 + g as u32 + b as u32) / 3) as u8;
                self.set_sample(x, y, 0, avg)
            }
            Channels::Rgb => {
                self.set_sample(x, y, 0, r)?;
                self.set_sample(x, y, 1, g)?;
                self.set_sample(x, y, 2, b)
            }
        }
    }
}
