//! Crowd settings
//!
//! Every tuned constant lives here so a host page can override any of them
//! with a JSON object at mount time.

use serde::Deserialize;

use crate::consts::*;
use crate::error::CrowdError;
use crate::sim::atlas::grid_cells;

/// Crowd settings/tuning
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Sprite sheet ===
    /// Sprite sheet URL
    pub sprite_src: String,
    /// Cells across the sheet
    pub rows: u32,
    /// Cells down the sheet
    pub cols: u32,

    // === Population ===
    /// Scroll pixels per additional figure on stage (K)
    pub scroll_per_figure: f32,
    /// Chance per frame of adding a figure while under target (0.0 - 1.0)
    pub spawn_chance: f64,

    // === Scroll physics ===
    /// Exponential smoothing factor (0.0 - 1.0]
    pub velocity_smoothing: f32,
    /// Smoothed velocity snaps to zero below this
    pub velocity_rest: f32,
    /// Scroll velocity to walk playback rate
    pub speed_multiplier: f32,

    // === Walk ===
    /// Nominal seconds to cross the stage
    pub walk_duration: f32,
    /// Bob height in pixels
    pub bob_amplitude: f32,
    /// Bob half-cycle in seconds
    pub bob_period: f32,
    /// Per-walk base speed range
    pub base_speed_min: f32,
    pub base_speed_max: f32,
    /// Baseline offset below the stage floor for the nearest figures
    pub vertical_offset_max: f32,
    /// Total spread of baselines
    pub vertical_offset_span: f32,

    /// Fixed RNG seed (None = seeded from the clock)
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sprite_src: DEFAULT_SPRITE_SRC.to_string(),
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,

            scroll_per_figure: SCROLL_PER_FIGURE,
            spawn_chance: SPAWN_CHANCE,

            velocity_smoothing: VELOCITY_SMOOTHING,
            velocity_rest: VELOCITY_REST,
            speed_multiplier: SPEED_MULTIPLIER,

            walk_duration: WALK_DURATION,
            bob_amplitude: BOB_AMPLITUDE,
            bob_period: BOB_PERIOD,
            base_speed_min: BASE_SPEED_MIN,
            base_speed_max: BASE_SPEED_MAX,
            vertical_offset_max: VERTICAL_OFFSET_MAX,
            vertical_offset_span: VERTICAL_OFFSET_SPAN,

            seed: None,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON object; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, CrowdError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Total number of figures the sheet yields
    pub fn total_figures(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    /// Reject values the simulation can't run with
    pub fn validate(&self) -> Result<(), CrowdError> {
        if grid_cells(self.rows, self.cols).is_none() {
            return Err(CrowdError::InvalidGrid {
                rows: self.rows,
                cols: self.cols,
            });
        }
        positive("scroll_per_figure", self.scroll_per_figure)?;
        positive("walk_duration", self.walk_duration)?;
        positive("bob_period", self.bob_period)?;
        positive("speed_multiplier", self.speed_multiplier)?;

        if !(0.0..=1.0).contains(&self.spawn_chance) {
            return Err(invalid("spawn_chance", "must be within 0..=1"));
        }
        if !(self.velocity_smoothing > 0.0 && self.velocity_smoothing <= 1.0) {
            return Err(invalid("velocity_smoothing", "must be within (0, 1]"));
        }
        if !(self.velocity_rest >= 0.0) {
            return Err(invalid("velocity_rest", "must not be negative"));
        }
        if !(self.base_speed_min > 0.0 && self.base_speed_min < self.base_speed_max) {
            return Err(invalid(
                "base_speed_min",
                "must be positive and below base_speed_max",
            ));
        }
        if !(self.vertical_offset_span >= 0.0) {
            return Err(invalid("vertical_offset_span", "must not be negative"));
        }
        Ok(())
    }
}

fn invalid(name: &'static str, reason: &str) -> CrowdError {
    CrowdError::InvalidSetting {
        name,
        reason: reason.to_string(),
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), CrowdError> {
    // Also rejects NaN
    if value > 0.0 {
        Ok(())
    } else {
        Err(invalid(name, "must be positive"))
    }
}
