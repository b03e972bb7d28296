//! V.A.T.S. tab: live camera view
//!
//! Frames come from the capture thread through a single-slot signal and
//! are only taken while this tab is drawn. The tab opts out of the
//! animated overlay; the Tinted mode switches the tint off entirely.

use image::imageops::{self, FilterType};
use pipboy_core::state::{Cue, PageEvent};
use pipboy_display::canvas::{self, Canvas};
use pipboy_display::page::HeaderFn;
use pipboy_display::text::{self, DIM_INK, TITLE_FONT};
use pipboy_display::TabContent;
use pipboy_drivers::FrameSignal;
use tracing::{debug, info};

use super::CueQueue;

pub const NAME: &str = "V.A.T.S.";

pub const MODE_NAMES: [&str; 5] = ["Light", "Contrast", "Exposure", "Mode", "Tinted"];

/// Mode whose Select toggles the tint
const TINTED_MODE: usize = 4;

/// Camera-backed tab
pub struct VatsTab {
    camera: Option<&'static FrameSignal>,
    cues: CueQueue,
    header: HeaderFn,
    canvas: Canvas,
    changed: bool,
    show_tint: bool,
    frames: usize,
}

impl VatsTab {
    /// - `camera`: frame handoff, `None` when no capture thread runs
    /// - `cues`: sounds requested by the tab, drained by the engine
    pub fn new(
        camera: Option<&'static FrameSignal>,
        cues: CueQueue,
        header: HeaderFn,
        width: u32,
        height: u32,
    ) -> Self {
        let mut canvas = canvas::blank(width, height);
        let label = if camera.is_some() { "NO SIGNAL" } else { "NO CAMERA" };
        let y = height as i32 / 2 - 6;
        text::draw_text_centered(&mut canvas, label, width as i32 / 2, y, TITLE_FONT, DIM_INK);
        Self {
            camera,
            cues,
            header,
            canvas,
            changed: true,
            show_tint: true,
            frames: 0,
        }
    }

    /// Camera frames shown so far
    pub fn frames(&self) -> usize {
        self.frames
    }

    fn take_frame(&mut self) {
        let Some(frame) = self.camera.and_then(|slot| slot.try_take()) else {
            return;
        };
        let (width, height) = self.canvas.dimensions();
        self.canvas = if frame.dimensions() == (width, height) {
            frame
        } else {
            imageops::resize(&frame, width, height, FilterType::Triangle)
        };
        self.frames += 1;
        self.changed = true;
    }
}

impl TabContent for VatsTab {
    fn name(&self) -> &str {
        NAME
    }

    fn mode_names(&self) -> &[&'static str] {
        &MODE_NAMES
    }

    fn header_text(&self) -> Vec<String> {
        let mut lines = vec![NAME.to_string()];
        lines.extend((self.header)());
        lines
    }

    fn draw_page(&mut self, _mode: usize) -> (&Canvas, bool) {
        self.take_frame();
        let changed = std::mem::replace(&mut self.changed, false);
        (&self.canvas, changed)
    }

    fn reset_page(&mut self, _mode: usize) {
        self.cues.borrow_mut().push(Cue::CameraStart);
    }

    fn ctrl_events(&mut self, events: &[PageEvent], mode: usize) {
        for event in events {
            if *event != PageEvent::Select {
                continue;
            }
            if mode == TINTED_MODE {
                self.show_tint = !self.show_tint;
                debug!("camera tint {}", if self.show_tint { "on" } else { "off" });
            } else {
                info!("Snap!");
                self.changed = true;
            }
        }
    }

    fn suppresses_default_tint(&self) -> bool {
        true
    }

    fn shows_tint(&self) -> bool {
        self.show_tint
    }
}
