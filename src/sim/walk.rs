//! Walks across the stage
//!
//! A traversal is a playback-rate-driven progression, not a wall-clock
//! animation: each frame it advances by `dt * rate`, and the rate follows the
//! scroll velocity. Rate zero freezes the figure mid-walk.

use glam::Vec2;
use rand::Rng;

use super::ease::{Ease, yoyo};
use super::figure::{Direction, Figure};
use super::stage::Stage;
use crate::lerp;
use crate::settings::Settings;

/// Outcome of advancing a walk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkStatus {
    Walking,
    Complete,
}

/// One crossing of the stage, owned by exactly one figure
#[derive(Debug, Clone)]
pub struct Traversal {
    pub direction: Direction,
    pub start_x: f32,
    pub end_x: f32,
    pub start_y: f32,
    pub bob_amplitude: f32,
    pub bob_period: f32,
    /// Nominal seconds at rate 1
    pub duration: f32,
    /// Per-walk speed variation
    pub base_speed: f32,
    /// Current playback rate (>= 0)
    pub rate: f32,
    /// Nominal seconds played so far
    pub elapsed: f32,
}

impl Traversal {
    /// Progress along the walk (0-1)
    #[inline]
    pub fn progress(&self) -> f32 {
        (self.elapsed / self.duration).clamp(0.0, 1.0)
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Set the playback rate from the smoothed scroll velocity
    pub fn set_rate(&mut self, smoothed_velocity: f32, multiplier: f32) {
        self.rate = (self.base_speed * smoothed_velocity * multiplier).max(0.0);
    }

    /// Position at the current progress
    pub fn position(&self) -> Vec2 {
        let x = lerp(self.start_x, self.end_x, Ease::Linear.apply(self.progress()));
        let bob = yoyo(self.elapsed.min(self.duration), self.bob_period, Ease::QuadOut);
        Vec2::new(x, self.start_y - self.bob_amplitude * bob)
    }

    /// Play `dt` seconds of wall time at the current rate
    pub fn advance(&mut self, dt: f32) -> WalkStatus {
        if self.rate > 0.0 && dt > 0.0 {
            self.elapsed = (self.elapsed + dt * self.rate).min(self.duration);
        }
        if self.is_complete() {
            WalkStatus::Complete
        } else {
            WalkStatus::Walking
        }
    }
}

/// Builds walks and maps scroll velocity onto their playback rate
#[derive(Debug, Clone)]
pub struct WalkScheduler {
    duration: f32,
    bob_amplitude: f32,
    bob_period: f32,
    base_speed: (f32, f32),
    offset_max: f32,
    offset_span: f32,
    speed_multiplier: f32,
}

impl WalkScheduler {
    pub fn new(settings: &Settings) -> Self {
        Self {
            duration: settings.walk_duration,
            bob_amplitude: settings.bob_amplitude,
            bob_period: settings.bob_period,
            base_speed: (settings.base_speed_min, settings.base_speed_max),
            offset_max: settings.vertical_offset_max,
            offset_span: settings.vertical_offset_span,
            speed_multiplier: settings.speed_multiplier,
        }
    }

    /// Start a fresh walk for `figure`: pick a side, a baseline and a speed,
    /// and place the figure off-stage at the entry point.
    ///
    /// The walk starts paused; the next rate update gets it moving.
    pub fn begin<R: Rng>(&self, figure: &mut Figure, stage: &Stage, rng: &mut R) {
        let direction = if rng.random_bool(0.5) {
            Direction::LeftToRight
        } else {
            Direction::RightToLeft
        };

        // Mostly near the floor, with a tail of figures further back
        let offset_y = self.offset_max - self.offset_span * Ease::QuadIn.apply(rng.random::<f32>());
        let start_y = stage.height - figure.height() + offset_y;

        // A mirrored sprite extends leftward from its x
        let (start_x, end_x) = match direction {
            Direction::LeftToRight => (-figure.width(), stage.width),
            Direction::RightToLeft => (stage.width + figure.width(), 0.0),
        };

        let base_speed = rng.random_range(self.base_speed.0..self.base_speed.1);

        figure.place(Vec2::new(start_x, start_y), direction);
        figure.walk = Some(Traversal {
            direction,
            start_x,
            end_x,
            start_y,
            bob_amplitude: self.bob_amplitude,
            bob_period: self.bob_period,
            duration: self.duration,
            base_speed,
            rate: 0.0,
            elapsed: 0.0,
        });
    }

    /// Apply the current scroll velocity to a figure's walk
    pub fn apply_rate(&self, figure: &mut Figure, smoothed_velocity: f32) {
        if let Some(walk) = figure.walk.as_mut() {
            walk.set_rate(smoothed_velocity, self.speed_multiplier);
        }
    }

    /// Advance a figure's walk and move it; `Complete` once it has crossed
    pub fn step(&self, figure: &mut Figure, dt: f32) -> WalkStatus {
        let Some(walk) = figure.walk.as_mut() else {
            return WalkStatus::Complete;
        };
        let status = walk.advance(dt);
        figure.pos = walk.position();
        status
    }
}
