//! Connected component analysis
//!
//! Finds and labels connected components of foreground pixels in binary
//! masks. Components are discovered by breadth-first search from each
//! unlabeled foreground pixel in raster order, so labels (and the order of
//! the returned components) follow the raster position of each
//! component's first pixel.

use crate::error::RegionResult;
use pagelayout_core::{BinaryMask, Box};
use std::collections::VecDeque;

/// Connectivity type for component analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectivityType {
    /// 4-way connectivity (up, down, left, right)
    #[default]
    FourWay,
    /// 8-way connectivity (includes diagonals)
    EightWay,
}

impl ConnectivityType {
    /// Neighbour offsets `(dx, dy)` for this connectivity.
    pub fn offsets(self) -> &'static [(i32, i32)] {
        const FOUR: [(i32, i32); 4] = [(0, -1), (-1, 0), (1, 0), (0, 1)];
        const EIGHT: [(i32, i32); 8] = [
            (-1, -1),
            (0, -1),
            (1, -1),
            (-1, 0),
            (1, 0),
            (-1, 1),
            (0, 1),
            (1, 1),
        ];
        match self {
            ConnectivityType::FourWay => &FOUR,
            ConnectivityType::EightWay => &EIGHT,
        }
    }
}

/// A connected component in a mask
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectedComponent {
    /// Label of this component (1-based, in discovery order)
    pub label: u32,
    /// Number of pixels in this component
    pub pixel_count: u32,
    /// Bounding box of this component
    pub bounds: Box,
}

impl ConnectedComponent {
    /// Create a new connected component
    pub fn new(label: u32, pixel_count: u32, bounds: Box) -> Self {
        Self {
            label,
            pixel_count,
            bounds,
        }
    }
}

/// Per-pixel component labels
///
/// Label 0 is background; components are numbered from 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMap {
    width: u32,
    height: u32,
    labels: Vec<u32>,
    components: Vec<ConnectedComponent>,
}

impl LabelMap {
    /// Width of the labeled mask
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height of the labeled mask
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Label at (x, y), or `None` outside the mask.
    pub fn label_at(&self, x: u32, y: u32) -> Option<u32> {
        if x < self.width && y < self.height {
            Some(self.labels[y as usize * self.width as usize + x as usize])
        } else {
            None
        }
    }

    /// Raw row-major labels
    pub fn labels(&self) -> &[u32] {
        &self.labels
    }

    /// Components in label order
    pub fn components(&self) -> &[ConnectedComponent] {
        &self.components
    }

    /// Number of components
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Consume the map, keeping only the component list.
    pub fn into_components(self) -> Vec<ConnectedComponent> {
        self.components
    }
}

/// Label all connected components in a mask
pub fn label_connected_components(
    mask: &BinaryMask,
    connectivity: ConnectivityType,
) -> RegionResult<LabelMap> {
    let w = mask.width() as i32;
    let h = mask.height() as i32;
    let mut labels = vec![0u32; mask.data().len()];
    let mut components = Vec::new();
    let mut queue = VecDeque::new();

    for y in 0..h {
        for x in 0..w {
            let idx = (y * w + x) as usize;
            if labels[idx] != 0 || !mask.is_foreground(x as u32, y as u32) {
                continue;
            }

            let label = components.len() as u32 + 1;
            labels[idx] = label;
            queue.push_back((x, y));

            let (mut min_x, mut min_y, mut max_x, mut max_y) = (x, y, x, y);
            let mut pixel_count = 0u32;

            while let Some((cx, cy)) = queue.pop_front() {
                pixel_count += 1;
                min_x = min_x.min(cx);
                min_y = min_y.min(cy);
                max_x = max_x.max(cx);
                max_y = max_y.max(cy);

                for &(dx, dy) in connectivity.offsets() {
                    let nx = cx + dx;
                    let ny = cy + dy;
                    if nx < 0 || ny < 0 || nx >= w || ny >= h {
                        continue;
                    }
                    let nidx = (ny * w + nx) as usize;
                    if labels[nidx] == 0 && mask.is_foreground(nx as u32, ny as u32) {
                        labels[nidx] = label;
                        queue.push_back((nx, ny));
                    }
                }
            }

            components.push(ConnectedComponent::new(
                label,
                pixel_count,
                Box::from_extent(min_x, min_y, max_x, max_y),
            ));
        }
    }

    Ok(LabelMap {
        width: mask.width(),
        height: mask.height(),
        labels,
        components,
    })
}

/// Find all connected components in a mask
///
/// Returns the components in discovery (raster) order, each with a label,
/// pixel count, and bounding box.
pub fn find_connected_components(
    mask: &BinaryMask,
    connectivity: ConnectivityType,
) -> RegionResult<Vec<ConnectedComponent>> {
    Ok(label_connected_components(mask, connectivity)?.into_components())
}
