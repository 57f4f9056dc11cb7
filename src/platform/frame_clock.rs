//! Frame timing
//!
//! Turns `requestAnimationFrame` timestamps (milliseconds) into clamped
//! per-frame deltas (seconds).

use crate::consts::{FRAME_DT, MAX_FRAME_DT};

#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_time: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delta since the previous timestamp
    ///
    /// The first frame gets a nominal delta; long gaps (hidden tab) are
    /// clamped so walks don't jump.
    pub fn advance(&mut self, time_ms: f64) -> f32 {
        let dt = match self.last_time {
            Some(last) => ((time_ms - last) / 1000.0) as f32,
            None => FRAME_DT,
        };
        self.last_time = Some(time_ms);
        dt.clamp(0.0, MAX_FRAME_DT)
    }

    /// Forget the last timestamp (loop restarted)
    pub fn reset(&mut self) {
        self.last_time = None;
    }
}
