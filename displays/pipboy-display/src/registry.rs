//! Tab registry
//!
//! Tabs are created once at startup and never added or removed. Each tab
//! owns its content, its header cache, one footer image per mode and the
//! composite canvas built from them.

use tracing::debug;

use crate::canvas::{self, Canvas};
use crate::header::{footer_images, Header};
use crate::page::TabContent;

/// A registered tab with its cached layers
pub struct Tab {
    content: Box<dyn TabContent>,
    header: Header,
    footers: Vec<Canvas>,
    canvas: Canvas,
}

impl Tab {
    /// Wrap tab content, pre-rendering its footers
    pub fn new(content: Box<dyn TabContent>, width: u32, height: u32) -> Self {
        let footers = footer_images(content.mode_names(), width, height);
        Self {
            content,
            header: Header::new(width, height),
            footers,
            canvas: canvas::blank(width, height),
        }
    }

    pub fn content(&self) -> &dyn TabContent {
        self.content.as_ref()
    }

    pub fn content_mut(&mut self) -> &mut dyn TabContent {
        self.content.as_mut()
    }

    pub fn mode_count(&self) -> usize {
        self.content.mode_count()
    }

    /// Last composite canvas
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Draw the page and header for `mode`, rebuilding the composite if
    /// either changed or `force` is set
    ///
    /// Returns the composite and whether it was rebuilt.
    pub fn compose(&mut self, mode: usize, force: bool) -> (&Canvas, bool) {
        let lines = self.content.header_text();
        let (header, header_changed) = self.header.render(&lines);
        let (page, page_changed) = self.content.draw_page(mode);

        if !(page_changed || header_changed || force) {
            return (&self.canvas, false);
        }

        if page.dimensions() == self.canvas.dimensions() {
            self.canvas.clone_from(page);
        } else {
            self.canvas.fill(0);
            canvas::add(&mut self.canvas, page);
        }
        canvas::add(&mut self.canvas, header);
        if let Some(footer) = self.footers.get(mode) {
            canvas::add(&mut self.canvas, footer);
        }
        (&self.canvas, true)
    }
}

/// Fixed, ordered set of tabs
pub struct PageRegistry {
    tabs: Vec<Tab>,
}

impl PageRegistry {
    pub fn new(tabs: Vec<Tab>) -> Self {
        debug!("page registry: {} tabs", tabs.len());
        Self { tabs }
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Tab> {
        self.tabs.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Tab> {
        self.tabs.get_mut(index)
    }

    /// Mode count of a tab (0 for unknown tabs)
    pub fn mode_count(&self, index: usize) -> usize {
        self.tabs.get(index).map_or(0, Tab::mode_count)
    }
}
