//! Binary morphological operations
//!
//! Dilation of [`BinaryMask`]s. The destination pixel at `(x, y)` is
//! foreground when any hit of the SEL, placed with its origin on `(x, y)`,
//! covers a foreground source pixel:
//!
//! ```text
//! dst(x, y) = OR over hits (dx, dy) of src(x + dx, y + dy)
//! ```
//!
//! where `(dx, dy)` are offsets relative to the SEL origin. Positions
//! outside the image never contribute.

use crate::{MorphError, MorphResult, Sel};
use pagelayout_core::{BinaryMask, FOREGROUND};
use tracing::trace;

/// Dilate a binary mask with an arbitrary structuring element.
///
/// Cost is proportional to the number of hits times the image size; use
/// [`dilate_brick`] for rectangles.
pub fn dilate(mask: &BinaryMask, sel: &Sel) -> MorphResult<BinaryMask> {
    let w = mask.width() as i32;
    let h = mask.height() as i32;
    let src = mask.data();
    let mut dst = vec![0u8; src.len()];

    let hit_offsets: Vec<_> = sel.hit_offsets().collect();

    for &(dx, dy) in &hit_offsets {
        // Destination rows/columns whose shifted source stays in the image.
        let y_start = (-dy).max(0);
        let y_end = (h - dy).min(h);
        let x_start = (-dx).max(0);
        let x_end = (w - dx).min(w);
        if y_start >= y_end || x_start >= x_end {
            continue;
        }

        for y in y_start..y_end {
            let src_row = ((y + dy) * w) as usize;
            let dst_row = (y * w) as usize;
            for x in x_start..x_end {
                if src[src_row + (x + dx) as usize] == FOREGROUND {
                    dst[dst_row + x as usize] = FOREGROUND;
                }
            }
        }
    }

    Ok(BinaryMask::from_raw(mask.width(), mask.height(), dst)?)
}

/// Dilate with a brick (rectangular) structuring element
///
/// Equivalent to [`dilate`] with `Sel::create_brick(width, height)`
/// (origin at `(width / 2, height / 2)`), computed separably: a horizontal
/// pass then a vertical pass, each a sliding-window test over running
/// foreground counts. Cost is independent of the brick size.
///
/// # Errors
///
/// Returns [`MorphError::InvalidParameters`] if either size is 0.
pub fn dilate_brick(mask: &BinaryMask, width: u32, height: u32) -> MorphResult<BinaryMask> {
    if width == 0 || height == 0 {
        return Err(MorphError::InvalidParameters(format!(
            "brick size must be positive: {}x{}",
            width, height
        )));
    }
    if width == 1 && height == 1 {
        return Ok(mask.clone());
    }
    trace!(width, height, "dilate_brick");

    let w = mask.width() as usize;
    let h = mask.height() as usize;

    let mut tmp = mask.data().to_vec();
    if width > 1 {
        for y in 0..h {
            let row = &mask.data()[y * w..(y + 1) * w];
            dilate_line(row, &mut tmp[y * w..(y + 1) * w], width as usize);
        }
    }

    let mut out = tmp.clone();
    if height > 1 {
        let mut column = vec![0u8; h];
        let mut dilated = vec![0u8; h];
        for x in 0..w {
            for (y, v) in column.iter_mut().enumerate() {
                *v = tmp[y * w + x];
            }
            dilate_line(&column, &mut dilated, height as usize);
            for (y, &v) in dilated.iter().enumerate() {
                out[y * w + x] = v;
            }
        }
    }

    Ok(BinaryMask::from_raw(mask.width(), mask.height(), out)?)
}

/// 1-D dilation of `src` into `dst` with a run of `size` hits, origin at
/// `size / 2`.
fn dilate_line(src: &[u8], dst: &mut [u8], size: usize) {
    let n = src.len();
    let origin = size / 2;

    // prefix[i] = foreground count in src[..i]
    let mut prefix = Vec::with_capacity(n + 1);
    prefix.push(0usize);
    for &v in src {
        let last = prefix[prefix.len() - 1];
        prefix.push(last + usize::from(v == FOREGROUND));
    }

    for (i, out) in dst.iter_mut().enumerate() {
        // Window [i - origin, i - origin + size - 1], clipped to the line.
        let lo = i.saturating_sub(origin);
        let hi = (i + size - origin).min(n);
        *out = if lo < hi && prefix[hi] > prefix[lo] {
            FOREGROUND
        } else {
            0
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SelElement;
    use pagelayout_core::Box;

    fn single_pixel(w: u32, h: u32, x: u32, y: u32) -> BinaryMask {
        let mut mask = BinaryMask::new(w, h).unwrap();
        mask.set(x, y, true).unwrap();
        mask
    }

    #[test]
    fn test_dilate_point_odd_square() {
        let mask = single_pixel(9, 9, 4, 4);
        let sel = Sel::create_square(3).unwrap();
        let out = dilate(&mask, &sel).unwrap();
        assert_eq!(out.count_foreground(), 9);
        for y in 3..=5 {
            for x in 3..=5 {
                assert!(out.is_foreground(x, y));
            }
        }
    }

    #[test]
    fn test_dilate_point_even_square_anchor() {
        // k = 4, origin 2: dst(x, y) covers src(x-2..=x+1, y-2..=y+1),
        // so a point at (4, 4) spreads to x in 3..=6, y in 3..=6.
        let mask = single_pixel(10, 10, 4, 4);
        let out = dilate_brick(&mask, 4, 4).unwrap();
        assert_eq!(out.count_foreground(), 16);
        assert!(out.is_foreground(3, 3));
        assert!(out.is_foreground(6, 6));
        assert!(!out.is_foreground(2, 4));
        assert!(!out.is_foreground(7, 4));
    }

    #[test]
    fn test_dilate_clips_at_border() {
        let mask = single_pixel(5, 5, 0, 0);
        let out = dilate_brick(&mask, 3, 3).unwrap();
        assert_eq!(out.count_foreground(), 4);
    }

    #[test]
    fn test_brick_matches_generic() {
        let mut mask = BinaryMask::new(37, 23).unwrap();
        mask.fill_rect(&Box::new_unchecked(3, 4, 6, 2));
        mask.fill_rect(&Box::new_unchecked(20, 10, 1, 9));
        mask.set(36, 22, true).unwrap();
        mask.set(0, 12, true).unwrap();

        for &(bw, bh) in &[(1, 1), (2, 2), (3, 3), (4, 7), (8, 1), (1, 5), (10, 10)] {
            let sel = Sel::create_brick(bw, bh).unwrap();
            let generic = dilate(&mask, &sel).unwrap();
            let fast = dilate_brick(&mask, bw, bh).unwrap();
            assert_eq!(generic, fast, "brick {}x{}", bw, bh);
        }
    }

    #[test]
    fn test_dilate_is_extensive() {
        let mut mask = BinaryMask::new(20, 20).unwrap();
        mask.fill_rect(&Box::new_unchecked(5, 5, 3, 3));
        let out = dilate_brick(&mask, 5, 5).unwrap();
        for y in 0..20 {
            for x in 0..20 {
                if mask.is_foreground(x, y) {
                    assert!(out.is_foreground(x, y));
                }
            }
        }
    }

    #[test]
    fn test_dilate_brick_rejects_zero() {
        let mask = BinaryMask::new(4, 4).unwrap();
        assert!(matches!(
            dilate_brick(&mask, 0, 3),
            Err(MorphError::InvalidParameters(_))
        ));
    }

    #[test]
    fn test_cross_sel() {
        let mut sel = Sel::new(3, 3).unwrap();
        for (x, y) in [(1, 0), (0, 1), (1, 1), (2, 1), (1, 2)] {
            sel.set_element(x, y, SelElement::Hit);
        }
        let out = dilate(&single_pixel(5, 5, 2, 2), &sel).unwrap();
        assert_eq!(out.count_foreground(), 5);
        assert!(out.is_foreground(2, 1));
        assert!(!out.is_foreground(1, 1));
    }
}
