//! Canvas 2D backend
//!
//! Individual draw calls can fail on the JS side (e.g. an image that was
//! evicted); the crowd is decoration, so failures are dropped.

use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use super::Surface;
use crate::sim::Rect;

impl Surface for CanvasRenderingContext2d {
    type Image = HtmlImageElement;

    fn clear(&mut self, width: f32, height: f32) {
        self.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn save(&mut self) {
        CanvasRenderingContext2d::save(self);
    }

    fn restore(&mut self) {
        CanvasRenderingContext2d::restore(self);
    }

    fn translate(&mut self, x: f32, y: f32) {
        let _ = CanvasRenderingContext2d::translate(self, x as f64, y as f64);
    }

    fn scale(&mut self, x: f32, y: f32) {
        let _ = CanvasRenderingContext2d::scale(self, x as f64, y as f64);
    }

    fn draw_image(&mut self, image: &HtmlImageElement, source: Rect, dest: Rect) {
        let _ = self.draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
            image,
            source.x as f64,
            source.y as f64,
            source.width as f64,
            source.height as f64,
            dest.x as f64,
            dest.y as f64,
            dest.width as f64,
            dest.height as f64,
        );
    }
}
