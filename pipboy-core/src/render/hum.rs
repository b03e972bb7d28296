//! Background hum volume drift

/// Largest per-frame volume change
pub const HUM_DRIFT: f32 = 0.05;

/// Hum volume bounded to `[min, max]`
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HumVolume {
    volume: f32,
    min: f32,
    max: f32,
}

impl HumVolume {
    /// Create a hum volume, clamping the starting level into range
    pub fn new(initial: f32, min: f32, max: f32) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            volume: initial.clamp(min, max),
            min,
            max,
        }
    }

    /// Current volume
    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Apply one frame of drift
    ///
    /// - `delta`: random offset, expected within `±HUM_DRIFT`; larger values
    ///   are limited to that range
    pub fn drift(&mut self, delta: f32) -> f32 {
        let delta = delta.clamp(-HUM_DRIFT, HUM_DRIFT);
        self.volume = (self.volume + delta).clamp(self.min, self.max);
        self.volume
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamped_at_bounds() {
        let mut hum = HumVolume::new(0.5, 0.3, 0.55);
        hum.drift(0.05);
        hum.drift(0.05);
        assert_eq!(hum.volume(), 0.55);
        for _ in 0..20 {
            hum.drift(-0.05);
        }
        assert_eq!(hum.volume(), 0.3);
    }

    #[test]
    fn test_oversized_delta_limited() {
        let mut hum = HumVolume::new(0.5, 0.0, 1.0);
        let v = hum.drift(0.4);
        assert!((v - 0.55).abs() < 1e-6);
    }

    #[test]
    fn test_initial_clamped_and_bounds_ordered() {
        let hum = HumVolume::new(2.0, 0.9, 0.1);
        assert_eq!(hum.volume(), 0.9);
    }
}
