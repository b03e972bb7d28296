//! Boot sequence
//!
//! 1. RobCo terminal text, one line per generated overlay frame
//! 2. GPS fix
//! 3. Map pre-render, announced with the tape sounds
//! 4. Boot logo (skipped on quick-load)

use pipboy_core::config::EngineConfig;
use pipboy_core::state::Cue;
use pipboy_display::overlay::{prepare_background, OverlayBuilder};
use pipboy_display::{Canvas, DisplayBackend, DisplayError, FrameCompositor};
use pipboy_drivers::{GpsSource, SoundOutput};
use tracing::info;

use crate::assets::Assets;
use crate::pages::map::{MapKind, MapPage};
use crate::pages::Maps;

/// Terminal text printed while the overlay frames are generated
pub const BOOT_TEXT: [&str; 22] = [
    "WELCOME TO ROBCO INDUSTRIES (TM) TERMLINK",
    ">SET TERMINAL/INQUIRE",
    "",
    "RIT-V300",
    "",
    ">SET FILE/PROTECTION=OWNER:RWED ACCOUNTS.F",
    ">SET HALT RESTART/MAINT",
    "",
    "Initializing Robco Industries(TM) MF Boot Agent v2.3.0",
    "RETROS BIOS",
    "RBIOS-4.02.08.00 52EE5.E7.E8",
    "Copyright 2201-2203 Robco Ind.",
    "Uppermem: 64 KB",
    "Root (5A8)",
    "Maintenance Mode",
    "",
    ">RUN DEBUG/ACCOUNTS.F",
    "",
    "ROBCO INDUSTRIES UNIFIED OPERATING SYSTEM",
    "COPYRIGHT 2075-2077 ROBCO INDUSTRIES",
    "",
    ">PIP-BOY.INIT",
];

/// Everything boot prepares for the engine
pub struct Booted {
    pub compositor: FrameCompositor,
    pub maps: Maps,
}

/// Generate the overlay frames and maps
pub fn prepare(
    config: &EngineConfig,
    assets: &Assets,
    gps: &mut dyn GpsSource,
    sound: &mut dyn SoundOutput,
) -> Booted {
    let (width, height) = (config.canvas.width, config.canvas.height);
    let background = prepare_background(&assets.background, width, height);
    let mut builder =
        OverlayBuilder::new(&assets.scanline, &assets.distort, config.tint, width, height);

    let mut lines = BOOT_TEXT.iter();
    let mut overlays = Vec::with_capacity(builder.remaining());
    loop {
        let line = lines.next();
        let frame = builder.next();
        if line.is_none() && frame.is_none() {
            break;
        }
        if let Some(line) = line {
            info!("{}", line);
        }
        overlays.extend(frame);
    }
    info!("{} overlay frames generated", overlays.len());

    let coords = gps.get_coords();
    info!("position {:.4}, {:.4}", coords.latitude, coords.longitude);

    info!(">MAPS.DOWNLOAD");
    info!("    Downloading Local map...");
    sound.play(Cue::TapeStart);
    let local = MapPage::render(MapKind::Local, coords, width, height);
    info!("    Downloading World map...");
    sound.play(Cue::TapeStart);
    let world = MapPage::render(MapKind::World, coords, width, height);
    sound.play(Cue::TapeStop);

    Booted {
        compositor: FrameCompositor::new(width, height, background, overlays),
        maps: Maps { local, world },
    }
}

/// Focus the boot logo in and play the boot chime
///
/// The caller holds the logo on screen afterwards.
pub fn show_logo(
    compositor: &mut FrameCompositor,
    logo: &Canvas,
    sound: &mut dyn SoundOutput,
    display: &mut dyn DisplayBackend,
) -> Result<(), DisplayError> {
    compositor.focus_in(logo, display)?;
    sound.play(Cue::Bootup);
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use pipboy_core::config::CanvasConfig;
    use pipboy_display::MemoryBackend;
    use pipboy_drivers::{Coords, FixedPosition};
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records every cue and hum volume
    #[derive(Clone, Default)]
    pub(crate) struct RecordingSound {
        pub cues: Rc<RefCell<Vec<Cue>>>,
        pub volumes: Rc<RefCell<Vec<f32>>>,
    }

    impl SoundOutput for RecordingSound {
        fn play(&mut self, cue: Cue) {
            self.cues.borrow_mut().push(cue);
        }

        fn set_hum_volume(&mut self, volume: f32) {
            self.volumes.borrow_mut().push(volume);
        }
    }

    pub(crate) fn small_config() -> EngineConfig {
        EngineConfig {
            canvas: CanvasConfig {
                width: 80,
                height: 60,
                fps: 15,
            },
            ..EngineConfig::default()
        }
    }

    #[test]
    fn test_prepare_generates_overlays_and_maps() {
        let config = small_config();
        let assets = Assets::generated(80, 60);
        let mut gps = FixedPosition(Coords::new(51.5, -0.12));
        let mut sound = RecordingSound::default();

        let booted = prepare(&config, &assets, &mut gps, &mut sound);
        // band of 15 rows starting at -15, 1 row per frame, until y < 60
        assert_eq!(booted.compositor.clock().frames(), 75);
        assert_eq!(booted.maps.local.kind(), MapKind::Local);
        assert_eq!(
            *sound.cues.borrow(),
            vec![Cue::TapeStart, Cue::TapeStart, Cue::TapeStop]
        );
    }

    #[test]
    fn test_logo_focus_presents_three_frames() {
        let config = small_config();
        let assets = Assets::generated(80, 60);
        let mut sound = RecordingSound::default();
        let mut booted = prepare(
            &config,
            &assets,
            &mut FixedPosition(Coords::new(0.0, 0.0)),
            &mut sound,
        );
        let mut display = MemoryBackend::new(160, 120, 4);

        show_logo(&mut booted.compositor, &assets.logo, &mut sound, &mut display).unwrap();
        assert_eq!(display.presented(), 3);
        assert_eq!(sound.cues.borrow().last(), Some(&Cue::Bootup));
    }
}
