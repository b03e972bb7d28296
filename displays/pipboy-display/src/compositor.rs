//! Frame compositor
//!
//! Two paths produce output:
//!
//! - [`draw_tab`](FrameCompositor::draw_tab) rebuilds the active tab's
//!   composite (page + header + footer) when something changed, and
//!   [`update_canvas`](FrameCompositor::update_canvas) bakes the background
//!   into it to form the screen canvas.
//! - [`draw_all`](FrameCompositor::draw_all) runs every tick: screen canvas
//!   times the current overlay frame, plus torch green, scaled and
//!   presented.
//!
//! [`focus_in`](FrameCompositor::focus_in) is the blocking blur-to-sharp
//! transition used on tab changes and for the boot logo.

use pipboy_core::config::{Rgb as Color, TORCH_TINT};
use pipboy_core::render::{FocusDivisors, OverlayClock, MAX_FOCUS_DIVISOR};
use tracing::trace;

use crate::backend::{DisplayBackend, DisplayError};
use crate::canvas::{self, Canvas};
use crate::registry::Tab;

/// Which overlay frame a tab gets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayPolicy {
    /// Follow the overlay clock (settle, then animate)
    Animated,
    /// Always the settled first frame
    FirstFrame,
    /// No overlay at all
    Untinted,
}

impl OverlayPolicy {
    /// Policy for a tab's tint capabilities
    pub fn for_tab(suppresses_default_tint: bool, shows_tint: bool) -> Self {
        match (suppresses_default_tint, shows_tint) {
            (false, _) => OverlayPolicy::Animated,
            (true, true) => OverlayPolicy::FirstFrame,
            (true, false) => OverlayPolicy::Untinted,
        }
    }
}

/// Layers everything into the output frame
pub struct FrameCompositor {
    width: u32,
    height: u32,
    background: Canvas,
    overlays: Vec<Canvas>,
    clock: OverlayClock,
    torch_tint: Color,
    screen: Canvas,
    drawn_page: Option<(usize, usize)>,
}

impl FrameCompositor {
    /// Create a compositor
    ///
    /// - `background`: prepared background (canvas sized)
    /// - `overlays`: precomputed overlay frames; an empty list behaves as a
    ///   single white (identity) frame
    pub fn new(width: u32, height: u32, background: Canvas, overlays: Vec<Canvas>) -> Self {
        let mut overlays = overlays;
        if overlays.is_empty() {
            overlays.push(canvas::solid(width, height, [255, 255, 255]));
        }
        let clock = OverlayClock::new(overlays.len());
        Self {
            width,
            height,
            background,
            overlays,
            clock,
            torch_tint: TORCH_TINT,
            screen: canvas::blank(width, height),
            drawn_page: None,
        }
    }

    /// Canvas size `(width, height)`
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn clock(&self) -> &OverlayClock {
        &self.clock
    }

    /// Current screen canvas (background already baked in)
    pub fn screen(&self) -> &Canvas {
        &self.screen
    }

    /// Last `(tab, mode)` drawn by [`draw_tab`](Self::draw_tab)
    pub fn drawn_page(&self) -> Option<(usize, usize)> {
        self.drawn_page
    }

    /// Normal draw of the active tab
    ///
    /// The composite is rebuilt when the page or header changed, or when
    /// `key` differs from the last drawn page.
    pub fn draw_tab<'t>(&mut self, tab: &'t mut Tab, key: (usize, usize)) -> (&'t Canvas, bool) {
        let different_page = self.drawn_page != Some(key);
        self.drawn_page = Some(key);
        tab.compose(key.1, different_page)
    }

    /// Replace the screen canvas with a tab composite
    ///
    /// With `focus` set, the focus-in transition plays first. The background
    /// is baked into the new screen canvas either way.
    pub fn update_canvas(
        &mut self,
        composite: &Canvas,
        focus: bool,
        display: &mut dyn DisplayBackend,
    ) -> Result<(), DisplayError> {
        if focus {
            self.focus_in(composite, display)?;
        }
        self.screen.clone_from(composite);
        canvas::add(&mut self.screen, &self.background);
        Ok(())
    }

    /// Blur-to-sharp transition
    ///
    /// Presents one frame per focus divisor without returning to the caller,
    /// then restarts the overlay clock.
    pub fn focus_in(
        &mut self,
        target: &Canvas,
        display: &mut dyn DisplayBackend,
    ) -> Result<(), DisplayError> {
        self.clock.reset();
        let dim = canvas::gray((255 / MAX_FOCUS_DIVISOR) as u8);

        for div in FocusDivisors::new(MAX_FOCUS_DIVISOR) {
            trace!("focus step 1/{}", div);
            let small = canvas::smooth_scale(target, self.width / div, self.height / div);
            let blur = canvas::smooth_scale(&small, self.width, self.height);

            let mut frame = target.clone();
            canvas::fill_multiply(&mut frame, dim);
            canvas::add(&mut frame, &blur);
            canvas::add(&mut frame, &self.background);
            canvas::multiply(&mut frame, &self.overlays[0]);
            present_scaled(&frame, display)?;
        }
        Ok(())
    }

    /// Compose the output frame for this tick without presenting it
    pub fn compose(&self, policy: OverlayPolicy, torch: bool) -> Canvas {
        let mut frame = self.screen.clone();
        let overlay = match policy {
            OverlayPolicy::Animated => self.overlays.get(self.clock.frame_index()),
            OverlayPolicy::FirstFrame => self.overlays.first(),
            OverlayPolicy::Untinted => None,
        };
        if let Some(overlay) = overlay {
            canvas::multiply(&mut frame, overlay);
        }
        if torch {
            canvas::fill_add(&mut frame, self.torch_tint);
        }
        frame
    }

    /// Final present for this tick
    ///
    /// Returns true when the overlay clock wrapped (once per `2N` ticks).
    pub fn draw_all(
        &mut self,
        policy: OverlayPolicy,
        torch: bool,
        display: &mut dyn DisplayBackend,
    ) -> Result<bool, DisplayError> {
        let frame = self.compose(policy, torch);
        present_scaled(&frame, display)?;
        Ok(self.clock.advance())
    }
}

fn present_scaled(frame: &Canvas, display: &mut dyn DisplayBackend) -> Result<(), DisplayError> {
    let (w, h) = display.resolution();
    if frame.dimensions() == (w, h) {
        display.present(frame)
    } else {
        display.present(&canvas::scale(frame, w, h))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use crate::page::tests::ProbePage;
    use crate::page::ModeTab;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn overlays(n: u8) -> Vec<Canvas> {
        (0..n).map(|i| canvas::solid(4, 4, [255 - i, 255, 255])).collect()
    }

    #[test]
    fn test_policy_for_tab() {
        assert_eq!(OverlayPolicy::for_tab(false, false), OverlayPolicy::Animated);
        assert_eq!(OverlayPolicy::for_tab(true, true), OverlayPolicy::FirstFrame);
        assert_eq!(OverlayPolicy::for_tab(true, false), OverlayPolicy::Untinted);
    }

    #[test]
    fn test_torch_added_after_overlay_multiply() {
        let background = canvas::blank(4, 4);
        let overlay = canvas::solid(4, 4, [128, 128, 128]);
        let mut compositor = FrameCompositor::new(4, 4, background, vec![overlay]);
        let mut display = MemoryBackend::new(4, 4, 1);

        compositor
            .update_canvas(&canvas::solid(4, 4, [200, 200, 200]), false, &mut display)
            .unwrap();
        let frame = compositor.compose(OverlayPolicy::Animated, true);
        // 200 * 128 / 256 = 100, then + (0, 128, 0)
        assert_eq!(frame.get_pixel(0, 0).0, [100, 228, 100]);

        compositor
            .update_canvas(&canvas::solid(4, 4, [255, 255, 255]), false, &mut display)
            .unwrap();
        let frame = compositor.compose(OverlayPolicy::Untinted, true);
        assert_eq!(frame.get_pixel(0, 0).0, [255, 255, 255]);
    }

    #[test]
    fn test_background_baked_on_update() {
        let background = canvas::solid(4, 4, [30, 30, 30]);
        let mut compositor = FrameCompositor::new(4, 4, background, Vec::new());
        let mut display = MemoryBackend::new(4, 4, 1);
        compositor
            .update_canvas(&canvas::solid(4, 4, [10, 0, 0]), false, &mut display)
            .unwrap();
        assert_eq!(compositor.screen().get_pixel(1, 1).0, [40, 30, 30]);
        assert_eq!(display.presented(), 0);
    }

    #[test]
    fn test_focus_in_presents_three_frames_and_resets_clock() {
        let mut compositor = FrameCompositor::new(8, 8, canvas::blank(8, 8), overlays(2));
        let mut display = MemoryBackend::new(16, 16, 8);
        for _ in 0..3 {
            compositor
                .draw_all(OverlayPolicy::Animated, false, &mut display)
                .unwrap();
        }
        assert_eq!(compositor.clock().counter(), 3);

        compositor
            .update_canvas(&canvas::solid(8, 8, [100, 100, 100]), true, &mut display)
            .unwrap();
        assert_eq!(display.presented(), 6);
        assert_eq!(compositor.clock().counter(), 0);
        // last focus step is full resolution: 100 * 63 / 256 + 100
        assert_eq!(display.last().map(|f| f.get_pixel(5, 5).0), Some([125, 125, 125]));
    }

    #[test]
    fn test_overlay_index_follows_clock() {
        let mut compositor = FrameCompositor::new(4, 4, canvas::blank(4, 4), overlays(3));
        let mut display = MemoryBackend::new(4, 4, 1);
        compositor
            .update_canvas(&canvas::solid(4, 4, [255, 255, 255]), false, &mut display)
            .unwrap();

        let mut reds = Vec::new();
        let mut wraps = 0;
        for _ in 0..6 {
            reds.push(compositor.compose(OverlayPolicy::Animated, false).get_pixel(0, 0).0[0]);
            if compositor
                .draw_all(OverlayPolicy::Animated, false, &mut display)
                .unwrap()
            {
                wraps += 1;
            }
        }
        assert_eq!(reds, vec![255, 255, 255, 255, 254, 253]);
        assert_eq!(wraps, 1);

        // first-frame policy ignores the clock
        for _ in 0..5 {
            compositor
                .draw_all(OverlayPolicy::Animated, false, &mut display)
                .unwrap();
        }
        let red = compositor.compose(OverlayPolicy::FirstFrame, false).get_pixel(0, 0).0[0];
        assert_eq!(red, 255);
    }

    #[test]
    fn test_draw_tab_rebuilds_on_key_change_only() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let content = ModeTab::new(
            "STATS",
            vec![("Status", ProbePage::boxed(1, &log)), ("Skills", ProbePage::boxed(2, &log))],
            Box::new(Vec::new),
            8,
            8,
        );
        let mut tab = Tab::new(Box::new(content), 8, 8);
        let mut compositor = FrameCompositor::new(8, 8, canvas::blank(8, 8), Vec::new());

        assert!(compositor.draw_tab(&mut tab, (0, 0)).1);
        assert!(!compositor.draw_tab(&mut tab, (0, 0)).1);
        assert!(!compositor.draw_tab(&mut tab, (0, 0)).1);
        // page 2 is still dirty, and the key moved
        assert!(compositor.draw_tab(&mut tab, (0, 1)).1);
        // clean page, but back to a different key
        assert!(compositor.draw_tab(&mut tab, (0, 0)).1);
        assert_eq!(compositor.drawn_page(), Some((0, 0)));
    }

    #[test]
    fn test_draw_all_scales_to_display() {
        let mut compositor = FrameCompositor::new(4, 4, canvas::blank(4, 4), Vec::new());
        let mut display = MemoryBackend::new(8, 6, 1);
        compositor
            .draw_all(OverlayPolicy::Animated, false, &mut display)
            .unwrap();
        assert_eq!(display.last().map(|f| f.dimensions()), Some((8, 6)));
    }
}
