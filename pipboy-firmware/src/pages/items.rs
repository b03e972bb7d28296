//! ITEMS tab: one inventory list shared by every category

use pipboy_display::page::HeaderFn;
use pipboy_display::ModeTab;

use super::list::{ListEntry, ListPage};

pub const NAME: &str = "ITEMS";

pub const MODE_NAMES: [&str; 5] = ["Weapons", "Apparel", "Aid", "Misc", "Ammo"];

const INVENTORY: [(&str, &str, bool); 10] = [
    ("10mm Pistol", "1", true),
    ("Hunting Rifle", "1", false),
    ("Vault 101 Jumpsuit", "1", true),
    ("Leather Armor", "1", false),
    ("Stimpak", "12", false),
    ("RadAway", "4", false),
    ("Nuka-Cola", "7", false),
    ("Bobby Pin", "23", false),
    ("10mm Round", "148", false),
    (".32 Caliber Round", "61", false),
];

/// Build the ITEMS tab
pub fn tab(header: HeaderFn, width: u32, height: u32) -> ModeTab {
    let entries = INVENTORY
        .iter()
        .map(|&(label, count, equipped)| {
            let entry = ListEntry::new(label).with_value(count);
            if equipped {
                entry.marked()
            } else {
                entry
            }
        })
        .collect();
    ModeTab::shared(
        NAME,
        MODE_NAMES.to_vec(),
        Box::new(ListPage::new(entries, width, height)),
        header,
        width,
        height,
    )
}

/// Status strings for the ITEMS header
pub fn header_text() -> Vec<String> {
    ["Wg 180/200", "HP 210/210", "DT 19.0", "Caps 3014"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pipboy_core::state::PageEvent;
    use pipboy_display::TabContent;

    #[test]
    fn test_header_matches_inventory_status() {
        let tab = tab(Box::new(header_text), 320, 240);
        assert_eq!(
            tab.header_text(),
            vec!["ITEMS", "Wg 180/200", "HP 210/210", "DT 19.0", "Caps 3014"]
        );
    }

    #[test]
    fn test_modes_share_one_page() {
        let mut tab = tab(Box::new(header_text), 320, 240);
        assert_eq!(tab.mode_count(), 5);
        assert!(tab.draw_page(0).1);
        // same page behind another category, already drawn
        assert!(!tab.draw_page(3).1);

        tab.ctrl_events(&[PageEvent::Select], 4);
        assert!(tab.draw_page(1).1);
    }
}
