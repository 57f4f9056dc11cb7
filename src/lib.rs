//! Crowd Canvas - a scroll-driven ambient crowd of walking sprites
//!
//! Core modules:
//! - `sim`: Deterministic crowd simulation (atlas, pools, walks, scroll physics)
//! - `renderer`: Drawing surface abstraction and crowd painter
//! - `platform`: Frame clock and the browser host (canvas, rAF loop, resize)
//! - `settings`: Data-driven tuning
//! - `error`: Crate error type

pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::CrowdError;
pub use settings::Settings;

/// Crowd tuning constants (defaults for [`Settings`])
pub mod consts {
    /// Nominal frame delta used for the first frame and headless runs
    pub const FRAME_DT: f32 = 1.0 / 60.0;
    /// Largest frame delta accepted from the browser (backgrounded tabs)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Default sprite sheet (Open Peeps)
    pub const DEFAULT_SPRITE_SRC: &str =
        "https://s3-us-west-2.amazonaws.com/s.cdpn.io/175711/open-peeps-sheet.png";
    /// Sprite grid: cells across
    pub const DEFAULT_ROWS: u32 = 15;
    /// Sprite grid: cells down
    pub const DEFAULT_COLS: u32 = 7;
    /// Largest sprite grid accepted (cells)
    pub const MAX_FIGURES: u32 = 4096;

    /// Scroll pixels per additional figure on stage
    pub const SCROLL_PER_FIGURE: f32 = 8.0;
    /// Chance per frame of adding a figure while under target
    pub const SPAWN_CHANCE: f64 = 0.5;

    /// Exponential smoothing factor for scroll velocity
    pub const VELOCITY_SMOOTHING: f32 = 0.1;
    /// Smoothed velocity below this (px/frame) snaps to rest
    pub const VELOCITY_REST: f32 = 0.01;
    /// Scroll velocity to walk playback rate
    pub const SPEED_MULTIPLIER: f32 = 0.4;

    /// Nominal time to cross the stage (seconds at rate 1)
    pub const WALK_DURATION: f32 = 10.0;
    /// Vertical bob height (pixels, upward)
    pub const BOB_AMPLITUDE: f32 = 10.0;
    /// Vertical bob half-cycle (seconds at rate 1)
    pub const BOB_PERIOD: f32 = 0.25;
    /// Per-walk base speed range
    pub const BASE_SPEED_MIN: f32 = 0.5;
    pub const BASE_SPEED_MAX: f32 = 1.5;

    /// Vertical offset below the stage floor for the nearest figures
    pub const VERTICAL_OFFSET_MAX: f32 = 100.0;
    /// Total vertical spread of figure baselines
    pub const VERTICAL_OFFSET_SPAN: f32 = 250.0;
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
