//! Color space conversion
//!
//! Only the conversion the pipeline needs: interleaved RGB to a single
//! luminance channel.

use crate::ColorResult;
use pagelayout_core::{Channels, PageImage};

/// Fixed-point luminance weights (ITU-R BT.601), scaled by 2^14.
const R_WEIGHT: u32 = 4899;
const G_WEIGHT: u32 = 9617;
const B_WEIGHT: u32 = 1868;
const WEIGHT_SHIFT: u32 = 14;

/// Convert one RGB pixel to gray.
///
/// `Y = 0.299 R + 0.587 G + 0.114 B`, rounded to nearest.
#[inline]
pub fn rgb_to_gray(r: u8, g: u8, b: u8) -> u8 {
    let y = r as u32 * R_WEIGHT + g as u32 * G_WEIGHT + b as u32 * B_WEIGHT;
    ((y + (1 << (WEIGHT_SHIFT - 1))) >> WEIGHT_SHIFT) as u8
}

/// Convert an image to a single intensity channel.
///
/// A gray image is returned as a cheap shared clone; an RGB image is
/// reduced with [`rgb_to_gray`].
pub fn convert_to_gray(image: &PageImage) -> ColorResult<PageImage> {
    match image.channels() {
        Channels::Gray => Ok(image.clone()),
        Channels::Rgb => {
            let data = image
                .data()
                .chunks_exact(3)
                .map(|px| rgb_to_gray(px[0], px[1], px[2]))
                .collect();
            Ok(PageImage::from_gray(image.width(), image.height(), data)?)
        }
    }
}
