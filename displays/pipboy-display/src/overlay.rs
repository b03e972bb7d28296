//! Background and overlay frame preparation
//!
//! The overlay sequence is built once at boot. Each frame is the tiled
//! scanline texture with the distortion band added at a lower position,
//! multiplied by the tint color. [`OverlayBuilder`] yields one frame per
//! call so the boot sequence can interleave its console text.

use pipboy_core::config::Rgb as Color;

use crate::canvas::{self, Canvas};

/// Number of scanline strips tiled down the canvas
pub const SCANLINE_COUNT: u32 = 60;

/// Gray applied over the scanlines after the self-multiply (`0.7 * 255`)
pub const SCANLINE_DARKEN: u8 = 178;

/// Gray added to the background so black areas still glow
pub const BACKGROUND_LIFT: u8 = 30;

/// The distortion band is a quarter of the canvas height
pub const DISTORT_DIVISOR: u32 = 4;

/// The band moves a fortieth of the canvas height per frame
pub const DISTORT_SPEED_DIVISOR: u32 = 40;

/// Fit the background image to the canvas and lift its blacks
pub fn prepare_background(source: &Canvas, width: u32, height: u32) -> Canvas {
    let mut background = canvas::smooth_scale(source, width, height);
    canvas::fill_add(&mut background, canvas::gray(BACKGROUND_LIFT));
    background
}

/// Tile the scanline strip over the canvas
///
/// The tiled texture is multiplied by itself for contrast, then darkened.
pub fn prepare_scanlines(strip: &Canvas, width: u32, height: u32) -> Canvas {
    let strip_height = (height / SCANLINE_COUNT).max(1);
    let strip = canvas::smooth_scale(strip, width, strip_height);

    let mut scanlines = canvas::blank(width, height);
    let mut y = 0;
    while y < height {
        canvas::add_at(&mut scanlines, &strip, 0, i64::from(y));
        y += strip_height;
    }

    let copy = scanlines.clone();
    canvas::multiply(&mut scanlines, &copy);
    canvas::fill_multiply(&mut scanlines, canvas::gray(SCANLINE_DARKEN));
    scanlines
}

/// Incremental overlay frame generator
///
/// Starts with the band just above the canvas and stops once the band top
/// passes the bottom edge.
pub struct OverlayBuilder {
    scanlines: Canvas,
    distort: Canvas,
    tint: Color,
    y: i64,
    speed: i64,
    height: i64,
}

impl OverlayBuilder {
    /// Prepare a generator from the raw scanline and distortion strips
    pub fn new(
        scanline_strip: &Canvas,
        distort_strip: &Canvas,
        tint: Color,
        width: u32,
        height: u32,
    ) -> Self {
        let scanlines = prepare_scanlines(scanline_strip, width, height);
        let band_height = (height / DISTORT_DIVISOR).max(1);
        let distort = canvas::smooth_scale(distort_strip, width, band_height);
        Self {
            scanlines,
            distort,
            tint,
            y: -i64::from(band_height),
            speed: i64::from((height / DISTORT_SPEED_DIVISOR).max(1)),
            height: i64::from(height),
        }
    }

    /// Frames still to be produced
    pub fn remaining(&self) -> usize {
        if self.y >= self.height {
            0
        } else {
            ((self.height - self.y + self.speed - 1) / self.speed) as usize
        }
    }
}

impl Iterator for OverlayBuilder {
    type Item = Canvas;

    fn next(&mut self) -> Option<Canvas> {
        if self.y >= self.height {
            return None;
        }
        let mut frame = self.scanlines.clone();
        canvas::add_at(&mut frame, &self.distort, 0, self.y);
        canvas::fill_multiply(&mut frame, self.tint);
        self.y += self.speed;
        Some(frame)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}
