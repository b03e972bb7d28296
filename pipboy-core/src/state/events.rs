//! Events delivered to pages and cues sent to the sound collaborator

use heapless::Vec;
use pipboy_protocol::Line;

/// Maximum discrete page events collected in one tick
///
/// The pad sends a handful of lines per second; anything past this in a
/// single tick is dropped.
pub const MAX_PAGE_EVENTS: usize = 32;

/// Event consumed by the active page
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PageEvent {
    /// Select button, Return key or mouse click
    Select,
    /// Accumulated pointer movement and scroll for the tick
    PointerDelta { dx: i32, dy: i32, scroll: i32 },
    /// Sensor line passed through verbatim (`volts...`, `temp...`)
    RawCommand(Line),
}

/// Ordered list of page events for one tick
pub type PageEvents = Vec<PageEvent, MAX_PAGE_EVENTS>;

/// Notification cues
///
/// Each cue names a sound in the sound bank. `Hum` is the looping ambient
/// track whose volume drifts every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Cue {
    Start,
    LightOn,
    LightOff,
    ChangeTab,
    TapeStart,
    TapeStop,
    CameraStart,
    Bootup,
    Hum,
}

impl Cue {
    /// All cues, in sound bank load order
    pub const ALL: [Cue; 9] = [
        Cue::Start,
        Cue::LightOn,
        Cue::LightOff,
        Cue::ChangeTab,
        Cue::TapeStart,
        Cue::TapeStop,
        Cue::CameraStart,
        Cue::Bootup,
        Cue::Hum,
    ];

    /// Sound bank key for this cue
    pub fn key(self) -> &'static str {
        match self {
            Cue::Start => "start",
            Cue::LightOn => "lighton",
            Cue::LightOff => "lightoff",
            Cue::ChangeTab => "changetab",
            Cue::TapeStart => "tapestart",
            Cue::TapeStop => "tapestop",
            Cue::CameraStart => "camerastart",
            Cue::Bootup => "bootup",
            Cue::Hum => "hum",
        }
    }
}
