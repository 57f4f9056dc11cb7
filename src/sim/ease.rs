//! Easing curves
//!
//! Used for the walk bob and for skewing the baseline spread toward the
//! foreground.

/// Easing curves over normalized progress
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ease {
    Linear,
    QuadIn,
    QuadOut,
}

impl Ease {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::QuadIn => t * t,
            Self::QuadOut => 1.0 - (1.0 - t) * (1.0 - t),
        }
    }
}

/// Position within a repeating yoyo: 0 -> 1 -> 0 -> 1 ... every `period`
///
/// Each half-cycle is eased; the return leg plays the same curve in reverse.
pub fn yoyo(elapsed: f32, period: f32, ease: Ease) -> f32 {
    if period <= 0.0 {
        return 0.0;
    }
    let phase = (elapsed / period).max(0.0);
    let cycle = phase.floor();
    let frac = phase - cycle;
    if cycle as u64 % 2 == 0 {
        ease.apply(frac)
    } else {
        ease.apply(1.0 - frac)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_are_stable() {
        for ease in [Ease::Linear, Ease::QuadIn, Ease::QuadOut] {
            assert_eq!(ease.apply(0.0), 0.0);
            assert_eq!(ease.apply(1.0), 1.0);
        }
    }

    #[test]
    fn test_quad_in_favors_small_values() {
        assert!(Ease::QuadIn.apply(0.5) < 0.5);
        assert!(Ease::QuadOut.apply(0.5) > 0.5);
    }

    #[test]
    fn test_yoyo_returns_to_start() {
        let p = 0.25;
        assert_eq!(yoyo(0.0, p, Ease::QuadOut), 0.0);
        assert!((yoyo(0.25, p, Ease::QuadOut) - 1.0).abs() < 1e-5);
        assert!(yoyo(0.5, p, Ease::QuadOut).abs() < 1e-5);
        let rising = yoyo(0.1, p, Ease::Linear);
        let falling = yoyo(0.4, p, Ease::Linear);
        assert!((rising - falling).abs() < 1e-5);
    }
}
