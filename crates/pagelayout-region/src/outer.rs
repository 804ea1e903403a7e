//! Outer components
//!
//! The outermost 8-connected components of a mask: those whose outer
//! boundary faces the background region connected to the image border.
//! Components lying inside a hole of another component are skipped, which
//! gives the same set as tracing only external contours. Pixels beyond the
//! image frame count as outer background, so a component touching the
//! frame is always outer.

use crate::conncomp::{ConnectedComponent, ConnectivityType, label_connected_components};
use crate::error::RegionResult;
use crate::seedfill::mark_outer_background;
use pagelayout_core::BinaryMask;

/// Find the outer 8-connected components of a mask.
///
/// The background is treated as 4-connected. Components are returned in
/// raster order of their first pixel; labels are those of
/// [`label_connected_components`] and so may skip values where nested
/// components were dropped.
pub fn find_outer_components(mask: &BinaryMask) -> RegionResult<Vec<ConnectedComponent>> {
    let map = label_connected_components(mask, ConnectivityType::EightWay)?;
    if map.component_count() == 0 {
        return Ok(Vec::new());
    }
    let outer_bg = mark_outer_background(mask, ConnectivityType::FourWay)?;

    let w = mask.width() as i32;
    let h = mask.height() as i32;
    let mut is_outer = vec![false; map.component_count() + 1];

    for y in 0..h {
        for x in 0..w {
            let Some(label) = map.label_at(x as u32, y as u32) else {
                continue;
            };
            if label == 0 || is_outer[label as usize] {
                continue;
            }
            let faces_outside = ConnectivityType::FourWay
                .offsets()
                .iter()
                .any(|&(dx, dy)| {
                    let nx = x + dx;
                    let ny = y + dy;
                    nx < 0
                        || ny < 0
                        || nx >= w
                        || ny >= h
                        || outer_bg.is_foreground(nx as u32, ny as u32)
                });
            if faces_outside {
                is_outer[label as usize] = true;
            }
        }
    }

    Ok(map
        .into_components()
        .into_iter()
        .filter(|c| is_outer[c.label as usize])
        .collect())
}
