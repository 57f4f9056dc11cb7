//! Scroll velocity estimation
//!
//! Raw per-frame scroll deltas are noisy (wheel ticks arrive in bursts,
//! touch scrolling stutters). Walk speed follows an exponential moving
//! average of the delta magnitude instead, so figures ease in and coast to
//! a stop.

use crate::consts::{VELOCITY_REST, VELOCITY_SMOOTHING};

/// Scroll tracking state, reset at mount
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollState {
    pub last_y: f32,
    pub current_y: f32,
    /// Unsmoothed |delta| of the last frame (px/frame)
    pub velocity: f32,
    /// Low-pass filtered velocity (px/frame)
    pub smoothed_velocity: f32,
}

/// Exponential moving average over scroll deltas
#[derive(Debug, Clone)]
pub struct ScrollVelocity {
    state: ScrollState,
    smoothing: f32,
    rest: f32,
}

impl ScrollVelocity {
    /// Start tracking from the current scroll offset (no initial velocity)
    pub fn new(scroll_y: f32) -> Self {
        Self::with_tuning(scroll_y, VELOCITY_SMOOTHING, VELOCITY_REST)
    }

    pub fn with_tuning(scroll_y: f32, smoothing: f32, rest: f32) -> Self {
        Self {
            state: ScrollState {
                last_y: scroll_y,
                current_y: scroll_y,
                velocity: 0.0,
                smoothed_velocity: 0.0,
            },
            smoothing,
            rest,
        }
    }

    /// Feed this frame's scroll offset; returns the smoothed velocity
    pub fn update(&mut self, scroll_y: f32) -> f32 {
        let s = &mut self.state;
        s.current_y = scroll_y;
        let delta = (s.current_y - s.last_y).abs();
        s.velocity = delta;
        s.smoothed_velocity += (delta - s.smoothed_velocity) * self.smoothing;
        // Settle instead of creeping toward zero forever
        if delta == 0.0 && s.smoothed_velocity < self.rest {
            s.smoothed_velocity = 0.0;
        }
        s.last_y = s.current_y;
        s.smoothed_velocity
    }

    #[inline]
    pub fn smoothed(&self) -> f32 {
        self.state.smoothed_velocity
    }

    #[inline]
    pub fn state(&self) -> &ScrollState {
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_rest() {
        let mut est = ScrollVelocity::new(500.0);
        assert_eq!(est.update(500.0), 0.0);
        assert_eq!(est.state().velocity, 0.0);
    }

    #[test]
    fn test_jump_is_smoothed() {
        let mut est = ScrollVelocity::new(0.0);
        let v = est.update(100.0);
        assert!((v - 10.0).abs() < 1e-4);
        assert_eq!(est.state().velocity, 100.0);
        assert_eq!(est.state().last_y, 100.0);
    }

    #[test]
    fn test_direction_is_ignored() {
        let mut up = ScrollVelocity::new(100.0);
        let mut down = ScrollVelocity::new(100.0);
        assert_eq!(up.update(50.0), down.update(150.0));
    }

    #[test]
    fn test_steady_scroll_converges_to_delta() {
        let mut est = ScrollVelocity::new(0.0);
        let mut y = 0.0;
        for _ in 0..200 {
            y += 12.0;
            est.update(y);
        }
        assert!((est.smoothed() - 12.0).abs() < 0.01);
    }

    #[test]
    fn test_held_scroll_decays_to_zero() {
        let mut est = ScrollVelocity::new(0.0);
        est.update(400.0);

        let mut prev = est.smoothed();
        for _ in 0..30 {
            let v = est.update(400.0);
            assert!(v < prev);
            prev = v;
        }
        for _ in 0..200 {
            est.update(400.0);
        }
        assert_eq!(est.smoothed(), 0.0);
    }

    #[test]
    fn test_single_frame_jitter_is_damped() {
        let mut est = ScrollVelocity::new(0.0);
        let v = est.update(3.0);
        est.update(3.0);
        assert!(v < 1.0);
    }
}
