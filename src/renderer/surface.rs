//! 2D drawing surface abstraction
//!
//! The subset of a canvas-style immediate-mode API the crowd needs. Transforms
//! compose onto the current state; `save`/`restore` bracket them.

use crate::sim::Rect;

/// A canvas-like drawing target
pub trait Surface {
    /// Image handle the surface can blit from
    type Image;

    /// Clear a region of the backing store (device pixels, identity transform)
    fn clear(&mut self, width: f32, height: f32);

    /// Push the current transform
    fn save(&mut self);

    /// Pop back to the last saved transform
    fn restore(&mut self);

    fn translate(&mut self, x: f32, y: f32);

    fn scale(&mut self, x: f32, y: f32);

    /// Blit `source` from `image` into `dest` under the current transform
    fn draw_image(&mut self, image: &Self::Image, source: Rect, dest: Rect);
}
