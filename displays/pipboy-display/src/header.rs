//! Tab header and footer rendering

use std::fmt::Write;

use crate::canvas::{self, Canvas};
use crate::text::{self, BODY_FONT, DIM_INK, INK, TITLE_FONT};

/// Header band height in pixels
pub const HEADER_HEIGHT: u32 = 22;

/// Footer band height in pixels
pub const FOOTER_HEIGHT: u32 = 18;

/// Gap between status strings
const STATUS_GAP: i32 = 10;

/// Side margin for header and footer rules
const MARGIN: i32 = 6;

/// Maximum status strings shown next to the tab name
pub const MAX_STATUS_LINES: usize = 4;

/// Cached header image
///
/// The header only redraws when its text differs from the last render,
/// which for most tabs means once a minute when the clock string rolls.
#[derive(Debug, Clone)]
pub struct Header {
    canvas: Canvas,
    text: Vec<String>,
    rendered: bool,
}

impl Header {
    /// Create a header layer for a canvas of the given size
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            canvas: canvas::blank(width, height),
            text: Vec::new(),
            rendered: false,
        }
    }

    /// Render `lines` (tab name first) if they changed
    ///
    /// Returns the header layer and whether it was redrawn.
    pub fn render(&mut self, lines: &[String]) -> (&Canvas, bool) {
        if self.rendered && self.text == lines {
            return (&self.canvas, false);
        }
        self.text.clear();
        self.text.extend_from_slice(lines);
        self.rendered = true;
        self.redraw();
        (&self.canvas, true)
    }

    /// Last rendered text
    pub fn text(&self) -> &[String] {
        &self.text
    }

    fn redraw(&mut self) {
        let width = self.canvas.width() as i32;
        let rule_y = HEADER_HEIGHT as i32 - 4;
        let canvas = &mut self.canvas;
        canvas.fill(0);

        let mut lines = self.text.iter();
        let name_right = match lines.next() {
            Some(name) => {
                text::draw_text(canvas, name, MARGIN + 6, 2, TITLE_FONT, INK);
                MARGIN + 6 + text::text_width(name, TITLE_FONT) as i32
            }
            None => MARGIN,
        };

        // status strings stack right to left
        let status: Vec<&String> = lines.take(MAX_STATUS_LINES).collect();
        let mut x = width - MARGIN - 4;
        for item in status.iter().rev() {
            if item.is_empty() {
                continue;
            }
            let w = text::text_width(item, BODY_FONT) as i32;
            if x - w <= name_right {
                break;
            }
            text::draw_text_right(canvas, item, x, 5, BODY_FONT, INK);
            text::draw_line(canvas, (x - w - 3, rule_y - 6), (x - w - 3, rule_y), DIM_INK);
            x -= w + STATUS_GAP;
        }

        text::draw_line(canvas, (MARGIN, rule_y), (width - MARGIN - 1, rule_y), INK);
        text::draw_line(canvas, (MARGIN, rule_y), (MARGIN, rule_y + 4), INK);
        text::draw_line(
            canvas,
            (width - MARGIN - 1, rule_y),
            (width - MARGIN - 1, rule_y + 4),
            INK,
        );
    }
}

/// Render one footer image per mode, each bracketing its own mode name
pub fn footer_images(mode_names: &[&str], width: u32, height: u32) -> Vec<Canvas> {
    (0..mode_names.len())
        .map(|active| footer_image(mode_names, active, width, height))
        .collect()
}

fn footer_image(mode_names: &[&str], active: usize, width: u32, height: u32) -> Canvas {
    let mut footer = canvas::blank(width, height);
    let top = height as i32 - FOOTER_HEIGHT as i32;
    let rule_y = top + 2;
    let w = width as i32;

    text::draw_line(&mut footer, (MARGIN, rule_y), (w - MARGIN - 1, rule_y), DIM_INK);

    let slots = mode_names.len().max(1) as i32;
    let slot_width = (w - 2 * MARGIN) / slots;
    for (i, name) in mode_names.iter().enumerate() {
        let center = MARGIN + slot_width * i as i32 + slot_width / 2;
        let text_y = rule_y + 4;
        if i == active {
            let mut label = String::new();
            let _ = write!(label, "[{name}]");
            text::draw_text_centered(&mut footer, &label, center, text_y, BODY_FONT, INK);
        } else {
            text::draw_text_centered(&mut footer, name, center, text_y, BODY_FONT, DIM_INK);
        }
    }
    footer
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_header_redraws_only_on_change() {
        let mut header = Header::new(320, 240);
        let text = lines(&["STATS", "LVL 14", "HP 210/210"]);

        let (_, changed) = header.render(&text);
        assert!(changed);
        let (_, changed) = header.render(&text);
        assert!(!changed);

        let text = lines(&["STATS", "LVL 15", "HP 210/210"]);
        let (_, changed) = header.render(&text);
        assert!(changed);
        assert_eq!(header.text()[1], "LVL 15");
    }

    #[test]
    fn test_header_first_render_even_if_empty() {
        let mut header = Header::new(64, 32);
        let (_, changed) = header.render(&[]);
        assert!(changed);
    }

    #[test]
    fn test_header_stays_in_band() {
        let mut header = Header::new(320, 240);
        let (img, _) = header.render(&lines(&["ITEMS", "Wg 180/200", "Caps 3014"]));
        let below = img
            .enumerate_pixels()
            .any(|(_, y, p)| y >= HEADER_HEIGHT + 2 && p.0 != [0, 0, 0]);
        assert!(!below);
    }

    #[test]
    fn test_footer_one_per_mode() {
        let names = ["Weapons", "Apparel", "Aid", "Misc", "Ammo"];
        let footers = footer_images(&names, 320, 240);
        assert_eq!(footers.len(), 5);
        assert_ne!(footers[0], footers[1]);
        for footer in &footers {
            let stray = footer
                .enumerate_pixels()
                .any(|(_, y, p)| y < 240 - FOOTER_HEIGHT && p.0 != [0, 0, 0]);
            assert!(!stray);
        }
    }
}
