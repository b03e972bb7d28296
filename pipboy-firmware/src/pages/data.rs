//! DATA tab: maps, quest log, notes and radio

use pipboy_display::canvas::{self, Canvas};
use pipboy_display::page::HeaderFn;
use pipboy_display::{ModeTab, Page};

use super::list::{ListEntry, ListPage};
use super::map::MapPage;

pub const NAME: &str = "DATA";

pub const MODE_NAMES: [&str; 5] = ["Local Map", "World Map", "Quests", "Misc", "Radio"];

const QUESTS: [(&str, bool); 5] = [
    ("Following in His Footsteps", true),
    ("Galaxy News Radio", false),
    ("Scientific Pursuits", false),
    ("The Wasteland Survival Guide", false),
    ("Blood Ties", false),
];

const NOTES: [&str; 4] = [
    "Vault 101 Door Code",
    "Megaton Bomb Schematics",
    "Moira's Survival Notes",
    "Holotape: Dad's Message",
];

/// Page with nothing on it yet (the radio)
pub struct BlankPage {
    canvas: Canvas,
    changed: bool,
}

impl BlankPage {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            canvas: canvas::blank(width, height),
            changed: true,
        }
    }
}

impl Page for BlankPage {
    fn draw_page(&mut self) -> (&Canvas, bool) {
        (&self.canvas, std::mem::replace(&mut self.changed, false))
    }
}

/// Build the DATA tab around the two pre-rendered maps
pub fn tab(local: MapPage, world: MapPage, header: HeaderFn, width: u32, height: u32) -> ModeTab {
    let quests = QUESTS
        .iter()
        .map(|&(name, active)| {
            let entry = ListEntry::new(name);
            if active {
                entry.marked()
            } else {
                entry
            }
        })
        .collect();
    let notes = NOTES.iter().map(|n| ListEntry::new(*n)).collect();
    ModeTab::new(
        NAME,
        vec![
            (MODE_NAMES[0], Box::new(local) as Box<dyn Page>),
            (MODE_NAMES[1], Box::new(world)),
            (MODE_NAMES[2], Box::new(ListPage::new(quests, width, height))),
            (MODE_NAMES[3], Box::new(ListPage::new(notes, width, height))),
            (MODE_NAMES[4], Box::new(BlankPage::new(width, height))),
        ],
        header,
        width,
        height,
    )
}
