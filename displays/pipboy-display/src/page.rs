//! Page contract
//!
//! Every renderable unit implements one of two traits:
//!
//! - [`Page`]: a single mode's content (a list, a map, the camera view)
//! - [`TabContent`]: a whole tab, dispatching to its mode pages
//!
//! The engine and compositor only see `Box<dyn TabContent>`. Drawing is
//! infallible; a page with nothing to show returns its blank canvas.

use pipboy_core::state::PageEvent;

use crate::canvas::Canvas;

/// A single mode page
pub trait Page {
    /// Render the page
    ///
    /// Returns the cached image and whether it changed since the last call.
    fn draw_page(&mut self) -> (&Canvas, bool);

    /// Called when the page becomes active (or is re-activated)
    fn reset_page(&mut self) {}

    /// Consume this tick's events
    fn ctrl_events(&mut self, _events: &[PageEvent]) {}
}

/// A tab: name, mode pages and header status
pub trait TabContent {
    /// Tab name shown first in the header
    fn name(&self) -> &str;

    /// Footer label for each mode
    fn mode_names(&self) -> &[&'static str];

    /// Number of modes
    fn mode_count(&self) -> usize {
        self.mode_names().len()
    }

    /// Header lines: the tab name, then up to four status strings
    fn header_text(&self) -> Vec<String>;

    /// Render the page for `mode`
    fn draw_page(&mut self, mode: usize) -> (&Canvas, bool);

    /// `mode` became active
    fn reset_page(&mut self, _mode: usize) {}

    /// Deliver events to the page for `mode`
    fn ctrl_events(&mut self, _events: &[PageEvent], _mode: usize) {}

    /// The tab manages its own tint instead of the animated overlay
    fn suppresses_default_tint(&self) -> bool {
        false
    }

    /// Whether any overlay should be applied at all
    ///
    /// Only consulted when [`suppresses_default_tint`](Self::suppresses_default_tint)
    /// is true.
    fn shows_tint(&self) -> bool {
        true
    }
}

/// Header text provider for a [`ModeTab`]
pub type HeaderFn = Box<dyn Fn() -> Vec<String>>;

/// Tab built from a list of mode pages
///
/// Several modes may share one page slot (the items tab shows every
/// category on one list page).
pub struct ModeTab {
    name: String,
    mode_names: Vec<&'static str>,
    pages: Vec<Box<dyn Page>>,
    slots: Vec<usize>,
    header: HeaderFn,
    blank: Canvas,
}

impl ModeTab {
    /// One page per mode
    pub fn new(
        name: impl Into<String>,
        modes: Vec<(&'static str, Box<dyn Page>)>,
        header: HeaderFn,
        width: u32,
        height: u32,
    ) -> Self {
        let (mode_names, pages): (Vec<_>, Vec<_>) = modes.into_iter().unzip();
        let slots = (0..pages.len()).collect();
        Self {
            name: name.into(),
            mode_names,
            pages,
            slots,
            header,
            blank: Canvas::new(width, height),
        }
    }

    /// One page shared by every mode
    pub fn shared(
        name: impl Into<String>,
        mode_names: Vec<&'static str>,
        page: Box<dyn Page>,
        header: HeaderFn,
        width: u32,
        height: u32,
    ) -> Self {
        let slots = vec![0; mode_names.len()];
        Self {
            name: name.into(),
            mode_names,
            pages: vec![page],
            slots,
            header,
            blank: Canvas::new(width, height),
        }
    }

    fn page_mut(&mut self, mode: usize) -> Option<&mut Box<dyn Page>> {
        let slot = *self.slots.get(mode)?;
        self.pages.get_mut(slot)
    }
}

impl TabContent for ModeTab {
    fn name(&self) -> &str {
        &self.name
    }

    fn mode_names(&self) -> &[&'static str] {
        &self.mode_names
    }

    fn header_text(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(5);
        lines.push(self.name.clone());
        lines.extend((self.header)());
        lines
    }

    fn draw_page(&mut self, mode: usize) -> (&Canvas, bool) {
        let slot = self.slots.get(mode).copied();
        match slot.and_then(|s| self.pages.get_mut(s)) {
            Some(page) => page.draw_page(),
            None => (&self.blank, false),
        }
    }

    fn reset_page(&mut self, mode: usize) {
        if let Some(page) = self.page_mut(mode) {
            page.reset_page();
        }
    }

    fn ctrl_events(&mut self, events: &[PageEvent], mode: usize) {
        if let Some(page) = self.page_mut(mode) {
            page.ctrl_events(events);
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Records calls and returns a canvas filled with its id
    pub(crate) struct ProbePage {
        pub id: u8,
        pub canvas: Canvas,
        pub dirty: bool,
        pub log: Rc<RefCell<Vec<String>>>,
    }

    impl ProbePage {
        pub fn boxed(id: u8, log: &Rc<RefCell<Vec<String>>>) -> Box<dyn Page> {
            Box::new(Self {
                id,
                canvas: Canvas::from_pixel(8, 8, image::Rgb([id, id, id])),
                dirty: true,
                log: Rc::clone(log),
            })
        }
    }

    impl Page for ProbePage {
        fn draw_page(&mut self) -> (&Canvas, bool) {
            let changed = std::mem::replace(&mut self.dirty, false);
            (&self.canvas, changed)
        }

        fn reset_page(&mut self) {
            self.log.borrow_mut().push(format!("reset {}", self.id));
        }

        fn ctrl_events(&mut self, events: &[PageEvent]) {
            self.log
                .borrow_mut()
                .push(format!("events {} x{}", self.id, events.len()));
        }
    }

    fn no_header() -> HeaderFn {
        Box::new(Vec::new)
    }

    #[test]
    fn test_dispatch_by_mode() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut tab = ModeTab::new(
            "STATS",
            vec![("Status", ProbePage::boxed(1, &log)), ("Skills", ProbePage::boxed(2, &log))],
            no_header(),
            8,
            8,
        );

        let (img, changed) = tab.draw_page(1);
        assert_eq!(img.get_pixel(0, 0).0, [2, 2, 2]);
        assert!(changed);
        let (_, changed) = tab.draw_page(1);
        assert!(!changed);

        tab.reset_page(0);
        tab.ctrl_events(&[PageEvent::Select], 1);
        assert_eq!(*log.borrow(), vec!["reset 1", "events 2 x1"]);
    }

    #[test]
    fn test_shared_page_serves_all_modes() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut tab = ModeTab::shared(
            "ITEMS",
            vec!["Weapons", "Apparel", "Aid"],
            ProbePage::boxed(7, &log),
            no_header(),
            8,
            8,
        );
        assert_eq!(tab.mode_count(), 3);
        assert_eq!(tab.draw_page(2).0.get_pixel(0, 0).0, [7, 7, 7]);
        tab.reset_page(1);
        assert_eq!(*log.borrow(), vec!["reset 7"]);
    }

    #[test]
    fn test_unknown_mode_blank() {
        let mut tab = ModeTab::new("DATA", Vec::new(), no_header(), 4, 4);
        let (img, changed) = tab.draw_page(3);
        assert!(!changed);
        assert_eq!(img.dimensions(), (4, 4));
    }

    #[test]
    fn test_header_text_starts_with_name() {
        let tab = ModeTab::new(
            "STATS",
            Vec::new(),
            Box::new(|| vec!["LVL 14".to_string()]),
            4,
            4,
        );
        assert_eq!(tab.header_text(), vec!["STATS", "LVL 14"]);
        assert!(!tab.suppresses_default_tint());
        assert!(tab.shows_tint());
    }
}
