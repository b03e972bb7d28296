//! Focus-in resolution divisors
//!
//! The focus effect redraws the canvas blurred at `1/4`, then `1/2`, then
//! full resolution. The divisor halves while it stays at least 1.

/// Coarsest divisor used by the focus-in effect
pub const MAX_FOCUS_DIVISOR: u32 = 4;

/// Geometric divisor sequence `max, max/2, ..., 1`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusDivisors {
    next: u32,
}

impl FocusDivisors {
    /// Start a sequence at `max_div`
    pub const fn new(max_div: u32) -> Self {
        Self { next: max_div }
    }
}

impl Default for FocusDivisors {
    fn default() -> Self {
        Self::new(MAX_FOCUS_DIVISOR)
    }
}

impl Iterator for FocusDivisors {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        if self.next == 0 {
            return None;
        }
        let current = self.next;
        self.next /= 2;
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::vec::Vec;

    #[test]
    fn test_default_sequence() {
        let steps: Vec<u32> = FocusDivisors::default().collect();
        assert_eq!(steps, [4, 2, 1]);
    }

    #[test]
    fn test_non_power_of_two() {
        let steps: Vec<u32> = FocusDivisors::new(6).collect();
        assert_eq!(steps, [6, 3, 1]);
    }

    #[test]
    fn test_restartable() {
        let seq = FocusDivisors::new(2);
        assert_eq!(seq.count(), 2);
        assert_eq!(seq.count(), 2);
        assert_eq!(FocusDivisors::new(0).count(), 0);
    }
}
