//! Map pages
//!
//! Without a tile service the map is a graticule drawn around the GPS fix:
//! an equirectangular projection twice the canvas size, rendered once at
//! boot. Pointer deltas pan a canvas-sized window across it.

use image::imageops;
use image::Rgb;
use pipboy_core::state::PageEvent;
use pipboy_display::canvas::{self, Canvas};
use pipboy_display::header::{FOOTER_HEIGHT, HEADER_HEIGHT};
use pipboy_display::text::{self, BODY_FONT, DIM_INK, INK};
use pipboy_display::Page;
use pipboy_drivers::Coords;
use tracing::debug;

/// Map image size relative to the canvas
const MAP_SCALE: u32 = 2;

/// Half size of the position marker
const MARKER: i32 = 5;

/// Map flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapKind {
    /// Street-level map centred on the fix
    Local,
    /// Whole world with the fix marked
    World,
}

impl MapKind {
    /// Horizontal span of the full map image, in degrees
    fn span(self) -> f64 {
        match self {
            MapKind::Local => 0.05,
            MapKind::World => 360.0,
        }
    }

    /// Degrees between grid lines
    fn grid(self) -> f64 {
        match self {
            MapKind::Local => 0.005,
            MapKind::World => 30.0,
        }
    }

    fn title(self) -> &'static str {
        match self {
            MapKind::Local => "LOCAL MAP",
            MapKind::World => "WORLD MAP",
        }
    }
}

/// Pre-rendered, pannable map
pub struct MapPage {
    kind: MapKind,
    map: Canvas,
    /// Top-left corner of the visible window in map pixels
    offset: (i64, i64),
    canvas: Canvas,
    changed: bool,
}

impl MapPage {
    /// Render the map for `coords`
    ///
    /// This is the slow part of boot on a Pi; call it once.
    pub fn render(kind: MapKind, coords: Coords, width: u32, height: u32) -> Self {
        let map_w = width * MAP_SCALE;
        let map_h = height * MAP_SCALE;
        let projection = Projection::new(kind, coords, map_w, map_h);
        let mut map = canvas::blank(map_w, map_h);
        draw_graticule(&mut map, &projection, kind);

        let (mx, my) = projection.project(coords.latitude, coords.longitude);
        text::draw_line(&mut map, (mx - MARKER, my), (mx + MARKER, my), INK);
        text::draw_line(&mut map, (mx, my - MARKER), (mx, my + MARKER), INK);
        text::draw_rect(&mut map, mx - MARKER, my - MARKER, 11, 11, INK);
        debug!("{:?} map rendered around {:?}", kind, coords);

        let mut page = Self {
            kind,
            map,
            offset: (0, 0),
            canvas: canvas::blank(width, height),
            changed: true,
        };
        page.offset = page.clamp_offset(
            i64::from(mx) - i64::from(width / 2),
            i64::from(my) - i64::from(height / 2),
        );
        page
    }

    pub fn kind(&self) -> MapKind {
        self.kind
    }

    pub fn offset(&self) -> (i64, i64) {
        self.offset
    }

    fn clamp_offset(&self, x: i64, y: i64) -> (i64, i64) {
        let (map_w, map_h) = self.map.dimensions();
        let (w, h) = self.canvas.dimensions();
        (
            x.clamp(0, i64::from(map_w - w)),
            y.clamp(0, i64::from(map_h - h)),
        )
    }

    /// Pad "up" has positive `dy`; the window moves up the map
    fn pan(&mut self, dx: i32, dy: i32) {
        let target = self.clamp_offset(
            self.offset.0 + i64::from(dx),
            self.offset.1 - i64::from(dy),
        );
        if target != self.offset {
            self.offset = target;
            self.changed = true;
        }
    }

    fn redraw(&mut self) {
        let (width, height) = self.canvas.dimensions();
        let (x, y) = (self.offset.0 as u32, self.offset.1 as u32);
        self.canvas = imageops::crop_imm(&self.map, x, y, width, height).to_image();

        // keep the bands under the header and footer clear
        let footer_top = height.saturating_sub(FOOTER_HEIGHT);
        for row in (0..HEADER_HEIGHT.min(height)).chain(footer_top..height) {
            for col in 0..width {
                self.canvas.put_pixel(col, row, Rgb([0, 0, 0]));
            }
        }

        let label_y = footer_top as i32 - 12;
        text::draw_text(&mut self.canvas, self.kind.title(), 6, label_y, BODY_FONT, DIM_INK);
    }
}

impl Page for MapPage {
    fn draw_page(&mut self) -> (&Canvas, bool) {
        let changed = std::mem::replace(&mut self.changed, false);
        if changed {
            self.redraw();
        }
        (&self.canvas, changed)
    }

    fn ctrl_events(&mut self, events: &[PageEvent]) {
        for event in events {
            if let PageEvent::PointerDelta { dx, dy, .. } = event {
                self.pan(*dx, *dy);
            }
        }
    }
}

/// Degrees to map pixels
struct Projection {
    center: (f64, f64),
    /// Pixels per degree, both axes
    scale: f64,
    map_w: u32,
    map_h: u32,
}

impl Projection {
    fn new(kind: MapKind, coords: Coords, map_w: u32, map_h: u32) -> Self {
        let center = match kind {
            MapKind::Local => (coords.latitude, coords.longitude),
            MapKind::World => (0.0, 0.0),
        };
        Self {
            center,
            scale: f64::from(map_w) / kind.span(),
            map_w,
            map_h,
        }
    }

    fn project(&self, lat: f64, lon: f64) -> (i32, i32) {
        let x = f64::from(self.map_w) / 2.0 + (lon - self.center.1) * self.scale;
        let y = f64::from(self.map_h) / 2.0 - (lat - self.center.0) * self.scale;
        (x.round() as i32, y.round() as i32)
    }

    /// Visible `(min_lat, max_lat, min_lon, max_lon)`
    fn bounds(&self) -> (f64, f64, f64, f64) {
        let half_lon = f64::from(self.map_w) / 2.0 / self.scale;
        let half_lat = f64::from(self.map_h) / 2.0 / self.scale;
        (
            self.center.0 - half_lat,
            self.center.0 + half_lat,
            self.center.1 - half_lon,
            self.center.1 + half_lon,
        )
    }
}

fn grid_lines(min: f64, max: f64, step: f64) -> impl Iterator<Item = f64> {
    let first = (min / step).ceil() as i64;
    let last = (max / step).floor() as i64;
    (first..=last).map(move |i| i as f64 * step)
}

fn draw_graticule(map: &mut Canvas, projection: &Projection, kind: MapKind) {
    let (w, h) = map.dimensions();
    let step = kind.grid();
    let decimals = if kind == MapKind::Local { 3 } else { 0 };
    let (min_lat, max_lat, min_lon, max_lon) = projection.bounds();

    for lon in grid_lines(min_lon, max_lon, step) {
        let (x, _) = projection.project(0.0, lon);
        text::draw_line(map, (x, 0), (x, h as i32 - 1), DIM_INK);
    }
    for lat in grid_lines(min_lat.max(-90.0), max_lat.min(90.0), step) {
        let (_, y) = projection.project(lat, projection.center.1);
        text::draw_line(map, (0, y), (w as i32 - 1, y), DIM_INK);
        let label = format!("{:.*}", decimals, lat);
        text::draw_text(map, &label, 2, y + 2, BODY_FONT, DIM_INK);
    }
}
