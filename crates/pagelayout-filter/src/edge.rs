//! Edge detection
//!
//! 3x3 Sobel operator with replicated borders:
//!
//! ```text
//!        -1 0 1           -1 -2 -1
//!   gx = -2 0 2      gy =  0  0  0
//!        -1 0 1            1  2  1
//! ```
//!
//! The magnitude is approximated as `|gx| + |gy|`.

use crate::{FilterError, FilterResult};
use pagelayout_core::BinaryMask;

/// Gradient magnitude at or above which a pixel counts as an edge
pub const DEFAULT_EDGE_THRESHOLD: u16 = 150;

/// Gradient magnitude of a row-major 8-bit plane, unclipped.
fn sobel_magnitude(data: &[u8], w: usize, h: usize) -> Vec<u16> {
    let at = |x: isize, y: isize| -> i32 {
        let x = x.clamp(0, w as isize - 1) as usize;
        let y = y.clamp(0, h as isize - 1) as usize;
        data[y * w + x] as i32
    };

    let mut out = vec![0u16; w * h];
    for y in 0..h as isize {
        for x in 0..w as isize {
            let gx = (at(x + 1, y - 1) + 2 * at(x + 1, y) + at(x + 1, y + 1))
                - (at(x - 1, y - 1) + 2 * at(x - 1, y) + at(x - 1, y + 1));
            let gy = (at(x - 1, y + 1) + 2 * at(x, y + 1) + at(x + 1, y + 1))
                - (at(x - 1, y - 1) + 2 * at(x, y - 1) + at(x + 1, y - 1));
            out[y as usize * w + x as usize] = (gx.abs() + gy.abs()) as u16;
        }
    }
    out
}

/// Edge map of a binary mask.
///
/// A pixel is foreground in the result when its Sobel magnitude
/// (`|gx| + |gy|` over the 0/255 samples) is at least `threshold`.
///
/// # Errors
///
/// Returns [`FilterError::InvalidParameters`] if `threshold` is 0, which
/// would mark every pixel.
pub fn edge_map(mask: &BinaryMask, threshold: u16) -> FilterResult<BinaryMask> {
    if threshold == 0 {
        return Err(FilterError::InvalidParameters(
            "edge threshold must be positive".to_string(),
        ));
    }
    let mag = sobel_magnitude(mask.data(), mask.width() as usize, mask.height() as usize);
    let data = mag
        .into_iter()
        .map(|m| if m >= threshold { 255 } else { 0 })
        .collect();
    Ok(BinaryMask::from_raw(mask.width(), mask.height(), data)?)
}

/// Fraction of pixels of `mask` that are edges, in `[0, 1]`.
///
/// Solid thin rules have edges only along their two long sides; text
/// strips of the same shape have many more.
pub fn edge_density(mask: &BinaryMask, threshold: u16) -> FilterResult<f64> {
    let edges = edge_map(mask, threshold)?;
    let total = mask.width() as u64 * mask.height() as u64;
    Ok(edges.count_foreground() as f64 / total as f64)
}
