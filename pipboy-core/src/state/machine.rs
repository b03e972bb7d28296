//! State machine definition
//!
//! Everything the compositor shows is a function of the active tab, the
//! active mode within it, and the torch flag.

use pipboy_protocol::LineParser;

use super::events::Cue;

/// Active page selection plus torch flag
///
/// `Copy` so the controller can snapshot it at the start of a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PageState {
    /// Active tab index
    pub tab: usize,
    /// Active mode index within the tab
    pub mode: usize,
    /// Torch (flashlight) mode
    pub torch: bool,
}

/// State changes requested by inputs during one tick
///
/// Each field keeps only the most recent request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StateRequests {
    pub tab: Option<usize>,
    pub mode: Option<usize>,
    pub torch: Option<bool>,
}

/// What moved during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transition {
    pub changed_tab: bool,
    pub changed_mode: bool,
    pub changed_torch: bool,
    /// Torch flag after the tick
    pub torch: bool,
}

impl Transition {
    /// Returns true if the active page must be reset this tick
    pub fn any(&self) -> bool {
        self.changed_tab || self.changed_mode || self.changed_torch
    }

    /// Notification cue for this transition
    ///
    /// A tab change wins over a torch change in the same tick; the tab cue
    /// also triggers the focus-in effect.
    pub fn cue(&self) -> Option<Cue> {
        if self.changed_tab {
            Some(Cue::ChangeTab)
        } else if self.changed_torch {
            Some(if self.torch { Cue::LightOn } else { Cue::LightOff })
        } else {
            None
        }
    }
}

impl PageState {
    /// Apply a tick's requests and report what changed
    ///
    /// - `tab_count`: number of registered tabs; out-of-range tab requests
    ///   are ignored
    /// - `mode_count`: number of modes for a given tab; the mode index is
    ///   clamped to the last mode of the resulting tab
    pub fn apply(
        &mut self,
        requests: &StateRequests,
        tab_count: usize,
        mode_count: impl Fn(usize) -> usize,
    ) -> Transition {
        let before = *self;

        if let Some(tab) = requests.tab {
            if tab < tab_count {
                self.tab = tab;
            }
        }
        if let Some(mode) = requests.mode {
            self.mode = mode;
        }
        if let Some(torch) = requests.torch {
            self.torch = torch;
        }

        let modes = mode_count(self.tab);
        if modes > 0 && self.mode >= modes {
            self.mode = modes - 1;
        }

        Transition {
            changed_tab: self.tab != before.tab,
            changed_mode: self.mode != before.mode,
            changed_torch: self.torch != before.torch,
            torch: self.torch,
        }
    }

    /// Key identifying the drawn page
    pub fn page_key(&self) -> (usize, usize) {
        (self.tab, self.mode)
    }
}

/// Complete engine state owned by the render loop
///
/// The serial line buffer lives here so a partial line survives across
/// ticks; only the input normalizer touches it.
#[derive(Debug, Clone, Default)]
pub struct EngineState {
    pub page: PageState,
    pub serial_line: LineParser,
}

impl EngineState {
    /// Create state pointing at the first tab and mode, torch off
    pub const fn new() -> Self {
        Self {
            page: PageState {
                tab: 0,
                mode: 0,
                torch: false,
            },
            serial_line: LineParser::new(),
        }
    }
}
