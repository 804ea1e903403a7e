//! Rectangle rendering
//!
//! Fills axis-aligned rectangles, the primitive used to compose synthetic
//! pages (blocks of ink on paper).

use super::{Channels, PageImageMut};
use crate::box_::Box;

impl PageImageMut {
    /// Fill a rectangle with a gray value on every channel.
    ///
    /// The rectangle is clipped to the image; a rectangle entirely outside
    /// the image is a no-op.
    pub fn fill_rect(&mut self, rect: &Box, value: u8) {
        self.fill_rect_rgb(rect, value, value, value);
    }

    /// Fill a rectangle with an RGB color.
    ///
    /// Gray images receive the red component.
    pub fn fill_rect_rgb(&mut self, rect: &Box, r: u8, g: u8, b: u8) {
        let Some(clipped) = rect.clip(self.inner.width as i32, self.inner.height as i32) else {
            return;
        };
        let spp = self.inner.channels.count() as usize;
        for y in clipped.y..clipped.bottom() {
            let start = self.inner.index(clipped.x as u32, y as u32);
            let end = start + clipped.w as usize * spp;
            let row = &mut self.inner.data[start..end];
            match self.inner.channels {
                Channels::Gray => row.fill(r),
                Channels::Rgb => {
                    for px in row.chunks_exact_mut(3) {
                        px.copy_from_slice(&[r, g, b]);
                    }
                }
            }
        }
    }
}
