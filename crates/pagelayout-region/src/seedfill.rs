//! Seed fill from the image border
//!
//! Marks the background region connected to the border; background left
//! unmarked lies in holes.

use crate::conncomp::ConnectivityType;
use crate::error::RegionResult;
use pagelayout_core::BinaryMask;
use std::collections::VecDeque;

/// Mark the background reachable from the image border.
///
/// Returns a mask whose foreground is every background pixel of `mask`
/// connected (with `connectivity`) to a background pixel on the border.
/// Background pixels not marked lie in holes.
pub fn mark_outer_background(
    mask: &BinaryMask,
    connectivity: ConnectivityType,
) -> RegionResult<BinaryMask> {
    let w = mask.width() as i32;
    let h = mask.height() as i32;
    let mut outer = BinaryMask::new(mask.width(), mask.height())?;
    let mut queue = VecDeque::new();

    let border = (0..w)
        .flat_map(|x| [(x, 0), (x, h - 1)])
        .chain((0..h).flat_map(|y| [(0, y), (w - 1, y)]));
    for (x, y) in border {
        let (ux, uy) = (x as u32, y as u32);
        if !mask.is_foreground(ux, uy) && !outer.is_foreground(ux, uy) {
            outer.set(ux, uy, true)?;
            queue.push_back((x, y));
        }
    }

    while let Some((x, y)) = queue.pop_front() {
        for &(dx, dy) in connectivity.offsets() {
            let nx = x + dx;
            let ny = y + dy;
            if nx < 0 || ny < 0 || nx >= w || ny >= h {
                continue;
            }
            let (ux, uy) = (nx as u32, ny as u32);
            if !mask.is_foreground(ux, uy) && !outer.is_foreground(ux, uy) {
                outer.set(ux, uy, true)?;
                queue.push_back((nx, ny));
            }
        }
    }

    Ok(outer)
}
