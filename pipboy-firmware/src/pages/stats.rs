//! STATS tab
//!
//! The Status page doubles as the sensor readout: the pad forwards
//! `volts...` and `temp...` lines, and the latest of each is shown under
//! the condition bars.

use pipboy_core::state::PageEvent;
use pipboy_display::canvas::{self, Canvas};
use pipboy_display::header::HEADER_HEIGHT;
use pipboy_display::page::HeaderFn;
use pipboy_display::text::{self, BODY_FONT, DIM_INK, INK, TITLE_FONT};
use pipboy_display::{ModeTab, Page};

use super::list::{ListEntry, ListPage};

pub const NAME: &str = "STATS";

pub const MODE_NAMES: [&str; 5] = ["Status", "S.P.E.C.I.A.L.", "Skills", "Perks", "General"];

/// Body part condition, 0 to 100
const CONDITION: [(&str, u32); 6] = [
    ("Head", 100),
    ("L.Arm", 85),
    ("R.Arm", 100),
    ("Torso", 70),
    ("L.Leg", 100),
    ("R.Leg", 90),
];

const SPECIAL: [(&str, &str); 7] = [
    ("Strength", "6"),
    ("Perception", "7"),
    ("Endurance", "5"),
    ("Charisma", "4"),
    ("Intelligence", "8"),
    ("Agility", "6"),
    ("Luck", "5"),
];

const SKILLS: [(&str, &str); 13] = [
    ("Barter", "34"),
    ("Big Guns", "21"),
    ("Energy Weapons", "45"),
    ("Explosives", "30"),
    ("Lockpick", "62"),
    ("Medicine", "55"),
    ("Melee Weapons", "27"),
    ("Repair", "70"),
    ("Science", "81"),
    ("Small Guns", "58"),
    ("Sneak", "40"),
    ("Speech", "36"),
    ("Unarmed", "19"),
];

const PERKS: [&str; 6] = [
    "Black Widow",
    "Comprehension",
    "Educated",
    "Gun Nut",
    "Intense Training",
    "Swift Learner",
];

const GENERAL: [(&str, &str); 6] = [
    ("Quests Completed", "12"),
    ("Locations Discovered", "48"),
    ("People Killed", "3"),
    ("Creatures Killed", "91"),
    ("Locks Picked", "17"),
    ("Computers Hacked", "9"),
];

/// Condition bars plus the pad's sensor readings
pub struct StatusPage {
    canvas: Canvas,
    changed: bool,
    volts: Option<String>,
    temp: Option<String>,
}

impl StatusPage {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            canvas: canvas::blank(width, height),
            changed: true,
            volts: None,
            temp: None,
        }
    }

    pub fn volts(&self) -> Option<&str> {
        self.volts.as_deref()
    }

    pub fn temp(&self) -> Option<&str> {
        self.temp.as_deref()
    }

    fn record(&mut self, line: &str) {
        let (slot, value) = if let Some(v) = line.strip_prefix("volts") {
            (&mut self.volts, v)
        } else if let Some(t) = line.strip_prefix("temp") {
            (&mut self.temp, t)
        } else {
            return;
        };
        let value = value.trim_start_matches([':', '=', ' ']);
        if slot.as_deref() != Some(value) {
            *slot = Some(value.to_string());
            self.changed = true;
        }
    }

    fn redraw(&mut self) {
        let (width, _) = self.canvas.dimensions();
        self.canvas.fill(0);

        let center = width as i32 / 2;
        let mut y = HEADER_HEIGHT as i32 + 8;
        text::draw_text_centered(&mut self.canvas, "CONDITION", center, y, TITLE_FONT, INK);
        y += 18;

        let bar_x = center - 20;
        let bar_width = (width as i32 / 3).max(20) as u32;
        for (part, condition) in CONDITION {
            text::draw_text_right(&mut self.canvas, part, bar_x - 8, y, BODY_FONT, DIM_INK);
            text::draw_rect(&mut self.canvas, bar_x, y + 1, bar_width, 7, DIM_INK);
            let filled = bar_width.saturating_sub(2) * condition / 100;
            text::fill_rect(&mut self.canvas, bar_x + 1, y + 2, filled, 5, INK);
            y += 12;
        }

        y += 6;
        let volts = format!("Battery {}", self.volts.as_deref().unwrap_or("--"));
        let temp = format!("Temp {}", self.temp.as_deref().unwrap_or("--"));
        text::draw_text(&mut self.canvas, &volts, 14, y, BODY_FONT, INK);
        text::draw_text_right(&mut self.canvas, &temp, width as i32 - 14, y, BODY_FONT, INK);
    }
}

impl Page for StatusPage {
    fn draw_page(&mut self) -> (&Canvas, bool) {
        let changed = std::mem::replace(&mut self.changed, false);
        if changed {
            self.redraw();
        }
        (&self.canvas, changed)
    }

    fn ctrl_events(&mut self, events: &[PageEvent]) {
        for event in events {
            if let PageEvent::RawCommand(line) = event {
                self.record(line.as_str());
            }
        }
    }
}

fn valued(rows: &[(&str, &str)]) -> Vec<ListEntry> {
    rows.iter()
        .map(|(label, value)| ListEntry::new(*label).with_value(*value))
        .collect()
}

/// Build the STATS tab
pub fn tab(header: HeaderFn, width: u32, height: u32) -> ModeTab {
    let perks = PERKS.iter().map(|p| ListEntry::new(*p)).collect();
    ModeTab::new(
        NAME,
        vec![
            (MODE_NAMES[0], Box::new(StatusPage::new(width, height)) as Box<dyn Page>),
            (MODE_NAMES[1], Box::new(ListPage::new(valued(&SPECIAL), width, height))),
            (MODE_NAMES[2], Box::new(ListPage::new(valued(&SKILLS), width, height))),
            (MODE_NAMES[3], Box::new(ListPage::new(perks, width, height))),
            (MODE_NAMES[4], Box::new(ListPage::new(valued(&GENERAL), width, height))),
        ],
        header,
        width,
        height,
    )
}

/// Status strings for the STATS header
pub fn header_text() -> Vec<String> {
    ["LVL 14", "HP 210/210", "AP 81/81", "XP 1940/2300"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pipboy_display::TabContent;
    use pipboy_protocol::Line;

    fn raw(text: &str) -> PageEvent {
        let mut line = Line::new();
        line.push_str(text).unwrap();
        PageEvent::RawCommand(line)
    }

    #[test]
    fn test_status_keeps_latest_readings() {
        let mut page = StatusPage::new(320, 240);
        page.draw_page();

        page.ctrl_events(&[raw("volts3.9"), raw("temp22"), raw("volts3.8")]);
        assert_eq!(page.volts(), Some("3.8"));
        assert_eq!(page.temp(), Some("22"));
        assert!(page.draw_page().1);

        // same reading again: nothing to redraw
        page.ctrl_events(&[raw("temp22")]);
        assert!(!page.draw_page().1);
    }

    #[test]
    fn test_status_ignores_other_events() {
        let mut page = StatusPage::new(320, 240);
        page.draw_page();
        page.ctrl_events(&[PageEvent::Select]);
        assert!(!page.draw_page().1);
        assert_eq!(page.volts(), None);
    }

    #[test]
    fn test_tab_layout() {
        let tab = tab(Box::new(header_text), 320, 240);
        assert_eq!(tab.mode_names(), &MODE_NAMES);
        assert_eq!(tab.header_text()[0], "STATS");
        assert_eq!(tab.header_text().len(), 5);
    }
}
