//! Scrollable list page
//!
//! Used for inventory categories and the stats tables. Scroll deltas move
//! the cursor, `Select` toggles the mark on the entry under it.

use pipboy_core::state::PageEvent;
use pipboy_display::canvas::{self, Canvas};
use pipboy_display::header::{FOOTER_HEIGHT, HEADER_HEIGHT};
use pipboy_display::text::{self, BODY_FONT, DIM_INK, INK};
use pipboy_display::Page;

/// Row pitch in pixels
const ROW_HEIGHT: u32 = 12;

/// Left edge of the entry labels
const LIST_X: i32 = 14;

/// Space above the first row
const TOP_PAD: u32 = 6;

/// One list row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEntry {
    pub label: String,
    /// Right-aligned value column
    pub value: Option<String>,
    pub marked: bool,
}

impl ListEntry {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: None,
            marked: false,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn marked(mut self) -> Self {
        self.marked = true;
        self
    }
}

/// Cursor-driven list
pub struct ListPage {
    entries: Vec<ListEntry>,
    cursor: usize,
    /// First visible row
    top: usize,
    canvas: Canvas,
    changed: bool,
}

impl ListPage {
    pub fn new(entries: Vec<ListEntry>, width: u32, height: u32) -> Self {
        Self {
            entries,
            cursor: 0,
            top: 0,
            canvas: canvas::blank(width, height),
            changed: true,
        }
    }

    pub fn entries(&self) -> &[ListEntry] {
        &self.entries
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn visible_rows(&self) -> usize {
        let (_, height) = self.canvas.dimensions();
        let body = height.saturating_sub(HEADER_HEIGHT + FOOTER_HEIGHT + TOP_PAD);
        (body / ROW_HEIGHT).max(1) as usize
    }

    /// Positive scroll moves the cursor up the list
    fn scroll(&mut self, amount: i32) {
        if self.entries.is_empty() || amount == 0 {
            return;
        }
        let last = self.entries.len() as i64 - 1;
        let target = (self.cursor as i64 - i64::from(amount)).clamp(0, last) as usize;
        if target == self.cursor {
            return;
        }
        self.cursor = target;

        let rows = self.visible_rows();
        if self.cursor < self.top {
            self.top = self.cursor;
        } else if self.cursor >= self.top + rows {
            self.top = self.cursor + 1 - rows;
        }
        self.changed = true;
    }

    fn toggle(&mut self) {
        if let Some(entry) = self.entries.get_mut(self.cursor) {
            entry.marked = !entry.marked;
            self.changed = true;
        }
    }

    fn redraw(&mut self) {
        let (width, _) = self.canvas.dimensions();
        let rows = self.visible_rows();
        self.canvas.fill(0);

        let first_y = (HEADER_HEIGHT + TOP_PAD) as i32;
        let visible = self.entries.iter().enumerate().skip(self.top).take(rows);
        for (row, (index, entry)) in visible.enumerate() {
            let y = first_y + row as i32 * ROW_HEIGHT as i32;
            let ink = if entry.marked { INK } else { DIM_INK };
            if entry.marked {
                text::fill_rect(&mut self.canvas, LIST_X - 8, y + 3, 4, 4, INK);
            }
            text::draw_text(&mut self.canvas, &entry.label, LIST_X, y, BODY_FONT, ink);
            if let Some(value) = &entry.value {
                let right = width as i32 - LIST_X;
                text::draw_text_right(&mut self.canvas, value, right, y, BODY_FONT, ink);
            }
            if index == self.cursor {
                let box_width = width.saturating_sub(2 * LIST_X as u32 - 8);
                text::draw_rect(&mut self.canvas, LIST_X - 4, y - 1, box_width, ROW_HEIGHT, INK);
            }
        }
    }
}

impl Page for ListPage {
    fn draw_page(&mut self) -> (&Canvas, bool) {
        let changed = std::mem::replace(&mut self.changed, false);
        if changed {
            self.redraw();
        }
        (&self.canvas, changed)
    }

    fn ctrl_events(&mut self, events: &[PageEvent]) {
        for event in events {
            match event {
                PageEvent::Select => self.toggle(),
                PageEvent::PointerDelta { scroll, .. } => self.scroll(*scroll),
                PageEvent::RawCommand(_) => {}
            }
        }
    }
}
