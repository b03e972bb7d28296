//! Tab contents
//!
//! Three tabs are registered at startup: STATS, then ITEMS or V.A.T.S.
//! (the camera tab takes the second slot when capture is enabled), then
//! DATA.

pub mod data;
pub mod items;
pub mod list;
pub mod map;
pub mod stats;
pub mod vats;

use std::cell::RefCell;
use std::fmt::Display;
use std::rc::Rc;

use chrono::{DateTime, Local, TimeZone};
use pipboy_core::state::Cue;
use pipboy_display::{PageRegistry, Tab, TabContent};
use pipboy_drivers::FrameSignal;

use self::map::MapPage;
use self::vats::VatsTab;

/// Sounds requested by pages, played by the engine after dispatch
pub type CueQueue = Rc<RefCell<Vec<Cue>>>;

/// The two pre-rendered map pages
pub struct Maps {
    pub local: MapPage,
    pub world: MapPage,
}

/// Header clock, `d.m.yyyy, H:MM`
pub fn clock_string<Tz>(now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    now.format("%-d.%-m.%Y, %-H:%M").to_string()
}

fn local_clock() -> String {
    clock_string(&Local::now())
}

/// Create every tab
///
/// - `camera`: frame handoff when capture is enabled; selects V.A.T.S.
///   over ITEMS
pub fn build_registry(
    maps: Maps,
    camera: Option<&'static FrameSignal>,
    cues: &CueQueue,
    width: u32,
    height: u32,
) -> PageRegistry {
    let stats = stats::tab(Box::new(stats::header_text), width, height);
    let second: Box<dyn TabContent> = match camera {
        Some(_) => {
            let header = Box::new(|| vec![String::new(), local_clock()]);
            Box::new(VatsTab::new(camera, Rc::clone(cues), header, width, height))
        }
        None => Box::new(items::tab(Box::new(items::header_text), width, height)),
    };
    let data = data::tab(
        maps.local,
        maps.world,
        Box::new(|| vec![local_clock()]),
        width,
        height,
    );

    PageRegistry::new(vec![
        Tab::new(Box::new(stats), width, height),
        Tab::new(second, width, height),
        Tab::new(Box::new(data), width, height),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::map::MapKind;
    use chrono::Utc;
    use pipboy_drivers::Coords;

    fn maps() -> Maps {
        let here = Coords::new(0.0, 0.0);
        Maps {
            local: MapPage::render(MapKind::Local, here, 32, 32),
            world: MapPage::render(MapKind::World, here, 32, 32),
        }
    }

    #[test]
    fn test_clock_format() {
        let t = Utc.with_ymd_and_hms(2077, 10, 3, 9, 5, 0).unwrap();
        assert_eq!(clock_string(&t), "3.10.2077, 9:05");
        let t = Utc.with_ymd_and_hms(2013, 1, 23, 14, 30, 0).unwrap();
        assert_eq!(clock_string(&t), "23.1.2013, 14:30");
    }

    #[test]
    fn test_items_tab_without_camera() {
        let cues = CueQueue::default();
        let registry = build_registry(maps(), None, &cues, 32, 32);
        assert_eq!(registry.len(), 3);
        let names: Vec<&str> = (0..3)
            .filter_map(|i| registry.get(i))
            .map(|t| t.content().name())
            .collect();
        assert_eq!(names, vec!["STATS", "ITEMS", "DATA"]);
    }

    #[test]
    fn test_camera_replaces_items() {
        static SLOT: FrameSignal = FrameSignal::new();
        let cues = CueQueue::default();
        let registry = build_registry(maps(), Some(&SLOT), &cues, 32, 32);
        let second = registry.get(1).map(|t| t.content().name().to_string());
        assert_eq!(second.as_deref(), Some("V.A.T.S."));
        assert!(registry.get(1).is_some_and(|t| t.content().suppresses_default_tint()));
    }
}
