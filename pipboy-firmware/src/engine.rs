//! Engine: state controller driving one frame per tick
//!
//! The engine owns everything the render loop touches:
//! - Engine state (page selection, torch, serial line buffer)
//! - The tab registry and the frame compositor
//! - Display, sound and serial collaborators
//!
//! One [`step`](Engine::step) is one tick:
//!
//! ```text
//! serial bytes ─┐
//!               ├─► InputNormalizer ─► PageState::apply ─► reset_page
//! local events ─┘                                              │
//!                    draw_all ◄─ ctrl_events ◄─ update_canvas ◄─ draw_tab
//! ```

use core::fmt::Debug;

use pipboy_core::config::EngineConfig;
use pipboy_core::input::{InputNormalizer, RawInput};
use pipboy_core::render::{HumVolume, HUM_DRIFT};
use pipboy_core::state::{Cue, EngineState, PageState};
use pipboy_display::{DisplayBackend, DisplayError, FrameCompositor, OverlayPolicy, PageRegistry};
use pipboy_drivers::SoundOutput;
use pipboy_hal::UartRx;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::pages::CueQueue;
use crate::serial::SerialInput;

/// Result of one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepOutcome {
    /// Exit was requested; nothing was drawn
    pub exit: bool,
    /// The overlay clock wrapped (frame rate report point)
    pub wrapped: bool,
}

/// State controller
pub struct Engine<U> {
    state: EngineState,
    registry: PageRegistry,
    compositor: FrameCompositor,
    display: Box<dyn DisplayBackend>,
    sound: Box<dyn SoundOutput>,
    serial: SerialInput<U>,
    /// Cues requested by pages
    cues: CueQueue,
    hum: HumVolume,
    rng: StdRng,
}

impl<U> Engine<U>
where
    U: UartRx,
    U::Error: Debug,
{
    /// Create an engine on the first tab, first mode, torch off
    pub fn new(
        config: &EngineConfig,
        registry: PageRegistry,
        compositor: FrameCompositor,
        display: Box<dyn DisplayBackend>,
        sound: Box<dyn SoundOutput>,
        serial: SerialInput<U>,
        cues: CueQueue,
    ) -> Self {
        let hum = config.hum;
        Self {
            state: EngineState::new(),
            registry,
            compositor,
            display,
            sound,
            serial,
            cues,
            hum: HumVolume::new(hum.max_volume, hum.min_volume, hum.max_volume),
            rng: StdRng::from_entropy(),
        }
    }

    /// Current page selection
    pub fn state(&self) -> PageState {
        self.state.page
    }

    pub fn compositor(&self) -> &FrameCompositor {
        &self.compositor
    }

    pub fn serial_enabled(&self) -> bool {
        self.serial.is_enabled()
    }

    /// Bring up the first page
    ///
    /// Starts the hum, resets the active page and focuses it in with the
    /// tab change sound.
    pub fn start(&mut self) -> Result<(), DisplayError> {
        self.sound.play(Cue::Start);
        self.sound.play(Cue::Hum);
        self.sound.set_hum_volume(self.hum.volume());

        let (tab, mode) = self.state.page.page_key();
        if let Some(t) = self.registry.get_mut(tab) {
            t.content_mut().reset_page(mode);
        }
        play_cues(&self.cues, self.sound.as_mut());

        if let Some(t) = self.registry.get_mut(tab) {
            let (composite, _) = self.compositor.draw_tab(t, (tab, mode));
            self.sound.play(Cue::ChangeTab);
            self.compositor
                .update_canvas(composite, true, self.display.as_mut())?;
        }
        info!("engine started on tab {} mode {}", tab, mode);
        Ok(())
    }

    /// Run one tick
    ///
    /// `local` is the terminal/window event queue drained for this tick.
    pub fn step(&mut self, local: &[RawInput]) -> Result<StepOutcome, DisplayError> {
        let mut normalizer = InputNormalizer::new();
        let serial_line = &mut self.state.serial_line;
        self.serial.poll(|byte| {
            if let Err(e) = normalizer.feed_serial(serial_line, byte) {
                debug!("serial line dropped: {:?}", e);
            }
        });
        for &event in local {
            normalizer.feed_local(event);
        }
        let input = normalizer.finish();

        if input.exit {
            info!("exit requested");
            return Ok(StepOutcome {
                exit: true,
                wrapped: false,
            });
        }
        if input.dropped_events > 0 {
            warn!("{} page events dropped this tick", input.dropped_events);
        }

        let registry = &self.registry;
        let transition = self.state.page.apply(&input.requests, registry.len(), |t| {
            registry.mode_count(t)
        });
        let (tab, mode) = self.state.page.page_key();

        if transition.any() {
            debug!("page {}/{} torch {}", tab, mode, transition.torch);
            if let Some(t) = self.registry.get_mut(tab) {
                t.content_mut().reset_page(mode);
            }
            play_cues(&self.cues, self.sound.as_mut());
        }

        let mut policy = OverlayPolicy::Animated;
        if let Some(t) = self.registry.get_mut(tab) {
            let (composite, rebuilt) = self.compositor.draw_tab(t, (tab, mode));
            if transition.any() || rebuilt {
                let cue = transition.cue();
                if let Some(cue) = cue {
                    self.sound.play(cue);
                }
                let focus = cue == Some(Cue::ChangeTab);
                self.compositor
                    .update_canvas(composite, focus, self.display.as_mut())?;
            }

            if !input.events.is_empty() {
                t.content_mut().ctrl_events(&input.events, mode);
                play_cues(&self.cues, self.sound.as_mut());
            }

            let content = t.content();
            policy =
                OverlayPolicy::for_tab(content.suppresses_default_tint(), content.shows_tint());
        }

        let wrapped = self
            .compositor
            .draw_all(policy, self.state.page.torch, self.display.as_mut())?;

        let volume = self.hum.drift(self.rng.gen_range(-HUM_DRIFT..=HUM_DRIFT));
        self.sound.set_hum_volume(volume);

        Ok(StepOutcome {
            exit: false,
            wrapped,
        })
    }

    /// Release the serial port
    pub fn shutdown(&mut self) {
        self.serial.close();
        info!("engine stopped");
    }
}

/// Play and clear the cues pages asked for
fn play_cues(cues: &CueQueue, sound: &mut dyn SoundOutput) {
    let pending: Vec<Cue> = cues.borrow_mut().drain(..).collect();
    for cue in pending {
        sound.play(cue);
    }
}
