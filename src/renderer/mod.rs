//! Crowd rendering
//!
//! Figures draw through the [`Surface`] trait: Canvas 2D in the browser, a
//! recording surface for headless runs and tests.

#[cfg(target_arch = "wasm32")]
pub mod canvas2d;
pub mod painter;
pub mod recording;
pub mod surface;

pub use painter::paint;
pub use recording::{DrawCommand, RecordingSurface};
pub use surface::Surface;
