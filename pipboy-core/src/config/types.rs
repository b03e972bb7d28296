//! Configuration type definitions

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of tabs selectable from the pad's tab switch
pub const TAB_COUNT: usize = 3;

/// Number of modes per tab (pad's mode switch positions)
pub const MODES_PER_TAB: usize = 5;

/// 8-bit RGB color
pub type Rgb = [u8; 3];

/// Green added over the whole frame in torch mode
pub const TORCH_TINT: Rgb = [0, 128, 0];

/// Canvas and timing settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CanvasConfig {
    /// Canvas width in pixels (before scaling to the display)
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Target frame rate
    pub fps: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 320,
            height: 240,
            fps: 15,
        }
    }
}

/// Hum volume bounds
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HumConfig {
    /// Quietest hum level
    #[cfg_attr(feature = "serde", serde(rename = "min_hum_volume"))]
    pub min_volume: f32,
    /// Loudest hum level
    #[cfg_attr(feature = "serde", serde(rename = "max_hum_volume"))]
    pub max_volume: f32,
}

impl Default for HumConfig {
    fn default() -> Self {
        Self {
            min_volume: 0.7,
            max_volume: 1.0,
        }
    }
}

/// Optional hardware/feature toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Features {
    /// Read the control pad over serial
    pub serial: bool,
    /// Play sounds
    pub sound: bool,
    /// Run the camera capture thread (V.A.T.S. tab)
    pub camera: bool,
    /// Skip the boot logo
    pub quickload: bool,
}

/// Everything the engine core reads
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EngineConfig {
    pub canvas: CanvasConfig,
    /// Color multiplied over every overlay frame
    pub tint: Rgb,
    pub hum: HumConfig,
    pub features: Features,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            canvas: CanvasConfig::default(),
            tint: [26, 255, 128],
            hum: HumConfig::default(),
            features: Features::default(),
        }
    }
}

impl EngineConfig {
    /// Frame period in microseconds
    pub fn frame_period_us(&self) -> u64 {
        1_000_000 / u64::from(self.canvas.fps.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_period() {
        let mut config = EngineConfig::default();
        assert_eq!(config.frame_period_us(), 66_666);
        config.canvas.fps = 0;
        assert_eq!(config.frame_period_us(), 1_000_000);
    }

    #[test]
    fn test_defaults_all_features_off() {
        let features = Features::default();
        assert!(!features.serial && !features.sound && !features.camera && !features.quickload);
    }
}
