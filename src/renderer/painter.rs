//! Crowd painter
//!
//! Clears the backing store and redraws every active figure, farthest first,
//! under the device-pixel-ratio scale.

use super::Surface;
use crate::sim::Crowd;

/// Paint one frame of `crowd` onto `surface`
pub fn paint<S: Surface>(crowd: &Crowd<S::Image>, surface: &mut S) {
    let stage = crowd.stage();
    let (width, height) = stage.backing_size();
    surface.clear(width as f32, height as f32);

    surface.save();
    surface.scale(stage.pixel_ratio, stage.pixel_ratio);
    let image = crowd.atlas().image();
    for figure in crowd.draw_order() {
        figure.render(surface, image);
    }
    surface.restore();
}
