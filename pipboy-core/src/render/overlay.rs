//! Overlay frame clock
//!
//! With `N` precomputed overlay frames the counter runs over `[0, 2N)`.
//! The first `N` ticks after a reset hold frame 0 (the freshly focused
//! look); the next `N` ticks walk the distortion band down the screen.

/// Cycling counter selecting the overlay frame for each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OverlayClock {
    frames: usize,
    counter: usize,
}

impl OverlayClock {
    /// Create a clock for `frames` overlay images, starting at 0
    pub const fn new(frames: usize) -> Self {
        Self { frames, counter: 0 }
    }

    /// Number of overlay frames (`N`)
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Length of one full cycle (`2N`)
    pub fn period(&self) -> usize {
        self.frames * 2
    }

    /// Current counter value
    pub fn counter(&self) -> usize {
        self.counter
    }

    /// Restart the settle phase (called by the focus-in effect)
    pub fn reset(&mut self) {
        self.counter = 0;
    }

    /// Overlay frame to apply this tick
    ///
    /// `max(0, counter - N)`
    pub fn frame_index(&self) -> usize {
        self.counter.saturating_sub(self.frames)
    }

    /// Step to the next tick
    ///
    /// Returns true when the counter wrapped back to 0.
    pub fn advance(&mut self) -> bool {
        if self.frames == 0 {
            return false;
        }
        self.counter += 1;
        if self.counter >= self.period() {
            self.counter = 0;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_settle_then_animate() {
        let mut clock = OverlayClock::new(3);
        let mut seen = [0usize; 6];
        for slot in seen.iter_mut() {
            *slot = clock.frame_index();
            clock.advance();
        }
        assert_eq!(seen, [0, 0, 0, 0, 1, 2]);
        assert_eq!(clock.counter(), 0);
    }

    #[test]
    fn test_wrap_reported_once_per_period() {
        let mut clock = OverlayClock::new(4);
        let wraps = (0..16).filter(|_| clock.advance()).count();
        assert_eq!(wraps, 2);
    }

    #[test]
    fn test_reset_restarts_settle_phase() {
        let mut clock = OverlayClock::new(5);
        for _ in 0..7 {
            clock.advance();
        }
        assert_eq!(clock.frame_index(), 2);
        clock.reset();
        assert_eq!(clock.frame_index(), 0);
    }

    #[test]
    fn test_empty_clock_stays_at_zero() {
        let mut clock = OverlayClock::new(0);
        assert!(!clock.advance());
        assert_eq!(clock.frame_index(), 0);
    }

    proptest! {
        #[test]
        fn prop_overlay_index_law(n in 1usize..64, ticks in 0usize..512) {
            let mut clock = OverlayClock::new(n);
            for _ in 0..ticks {
                clock.advance();
            }
            let t = ticks % (2 * n);
            prop_assert_eq!(clock.counter(), t);
            if t < n {
                prop_assert_eq!(clock.frame_index(), 0);
            } else {
                prop_assert_eq!(clock.frame_index(), t - n);
            }
            prop_assert!(clock.frame_index() < n);
        }
    }
}
