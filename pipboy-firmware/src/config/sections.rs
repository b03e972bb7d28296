//! pipboy.toml sections
//!
//! Every field has a default, so a partial file is valid.

use std::path::PathBuf;

use pipboy_core::config::{CanvasConfig, EngineConfig, Features, HumConfig, Rgb};
use serde::Deserialize;

/// Complete configuration file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PipboyConfig {
    pub display: DisplaySection,
    pub tint: TintSection,
    pub sound: SoundSection,
    pub serial: SerialSection,
    pub camera: CameraSection,
    pub assets: AssetsSection,
    pub boot: BootSection,
    pub gps: GpsSection,
}

/// Output device
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Linux framebuffer device
    #[default]
    Framebuffer,
    /// Frames kept in memory (headless)
    Memory,
}

/// `[display]`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DisplaySection {
    #[serde(flatten)]
    pub canvas: CanvasConfig,
    pub backend: BackendKind,
    pub device: PathBuf,
}

impl Default for DisplaySection {
    fn default() -> Self {
        Self {
            canvas: CanvasConfig::default(),
            backend: BackendKind::Framebuffer,
            device: PathBuf::from("/dev/fb0"),
        }
    }
}

/// `[tint]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TintSection {
    pub color: Rgb,
}

impl Default for TintSection {
    fn default() -> Self {
        Self {
            color: EngineConfig::default().tint,
        }
    }
}

/// `[sound]`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SoundSection {
    pub enabled: bool,
    #[serde(flatten)]
    pub hum: HumConfig,
    /// Player command; the cue file path is appended
    pub player: Vec<String>,
    pub directory: PathBuf,
    /// Player argument carrying the hum volume, `{}` is replaced by 0-100
    pub hum_volume_arg: Option<String>,
}

impl Default for SoundSection {
    fn default() -> Self {
        Self {
            enabled: false,
            hum: HumConfig::default(),
            player: vec!["aplay".into(), "-q".into()],
            directory: PathBuf::from("sounds"),
            hum_volume_arg: None,
        }
    }
}

/// `[serial]`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SerialSection {
    pub enabled: bool,
    pub device: PathBuf,
    pub baudrate: u32,
    /// Gauge mode written to the pad once at startup
    pub gauge_mode: Option<u8>,
}

impl Default for SerialSection {
    fn default() -> Self {
        Self {
            enabled: false,
            device: PathBuf::from("/dev/ttyUSB0"),
            baudrate: 9600,
            gauge_mode: Some(2),
        }
    }
}

/// `[camera]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CameraSection {
    pub enabled: bool,
    /// Capture command; empty means `rpicam-vid` at the canvas size
    pub command: Vec<String>,
}

/// `[assets]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AssetsSection {
    /// Image directory; unset uses generated placeholders
    pub directory: Option<PathBuf>,
}

/// `[boot]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BootSection {
    /// Skip the boot logo
    pub quickload: bool,
    /// How long the logo stays up
    pub logo_hold_ms: u64,
}

impl Default for BootSection {
    fn default() -> Self {
        Self {
            quickload: false,
            logo_hold_ms: 4200,
        }
    }
}

/// `[gps]`
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct GpsSection {
    pub latitude: f64,
    pub longitude: f64,
}

impl Default for GpsSection {
    fn default() -> Self {
        Self {
            latitude: 51.5073,
            longitude: -0.1277,
        }
    }
}

impl PipboyConfig {
    /// The subset the engine core reads
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            canvas: self.display.canvas,
            tint: self.tint.color,
            hum: self.sound.hum,
            features: Features {
                serial: self.serial.enabled,
                sound: self.sound.enabled,
                camera: self.camera.enabled,
                quickload: self.boot.quickload,
            },
        }
    }
}
