//! Stage geometry
//!
//! The simulation works in CSS pixels; the backing store is scaled by the
//! device pixel ratio so sprites stay crisp on dense displays.

/// Drawing area in layout (CSS) pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stage {
    pub width: f32,
    pub height: f32,
    /// Device pixels per CSS pixel
    pub pixel_ratio: f32,
}

impl Default for Stage {
    fn default() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }
}

impl Stage {
    pub fn new(width: f32, height: f32, pixel_ratio: f32) -> Self {
        let pixel_ratio = if pixel_ratio.is_finite() && pixel_ratio > 0.0 {
            pixel_ratio
        } else {
            1.0
        };
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
            pixel_ratio,
        }
    }

    /// Backing store size in device pixels
    pub fn backing_size(&self) -> (u32, u32) {
        (
            (self.width * self.pixel_ratio).round() as u32,
            (self.height * self.pixel_ratio).round() as u32,
        )
    }
}
