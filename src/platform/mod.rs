//! Platform layer
//!
//! Handles the browser side of the crowd:
//! - Frame timing (rAF timestamps to clamped deltas)
//! - Canvas mounting, sprite sheet loading, resize tracking (wasm only)

pub mod frame_clock;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use frame_clock::FrameClock;
#[cfg(target_arch = "wasm32")]
pub use web::CrowdCanvas;
