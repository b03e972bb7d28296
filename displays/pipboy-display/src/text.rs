//! `embedded-graphics` drawing onto RGB canvases
//!
//! Header, footer and the content pages all draw white text and rules;
//! the overlay tint turns them green at present time.

use core::convert::Infallible;

use embedded_graphics::mono_font::ascii::{FONT_6X10, FONT_8X13};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};
use image::Rgb;

use crate::canvas::Canvas;

/// Foreground color for all UI drawing
pub const INK: Rgb888 = Rgb888::WHITE;

/// Dimmed foreground (secondary text, rules)
pub const DIM_INK: Rgb888 = Rgb888::new(150, 150, 150);

/// Font for body text
pub const BODY_FONT: &MonoFont<'static> = &FONT_6X10;

/// Font for tab names and headings
pub const TITLE_FONT: &MonoFont<'static> = &FONT_8X13;

/// `DrawTarget` view over a canvas
///
/// Pixels outside the canvas are clipped.
pub struct CanvasTarget<'a> {
    canvas: &'a mut Canvas,
}

impl<'a> CanvasTarget<'a> {
    pub fn new(canvas: &'a mut Canvas) -> Self {
        Self { canvas }
    }
}

impl OriginDimensions for CanvasTarget<'_> {
    fn size(&self) -> Size {
        Size::new(self.canvas.width(), self.canvas.height())
    }
}

impl DrawTarget for CanvasTarget<'_> {
    type Color = Rgb888;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let (w, h) = self.canvas.dimensions();
        for Pixel(p, color) in pixels {
            if p.x < 0 || p.y < 0 || p.x as u32 >= w || p.y as u32 >= h {
                continue;
            }
            self.canvas
                .put_pixel(p.x as u32, p.y as u32, Rgb([color.r(), color.g(), color.b()]));
        }
        Ok(())
    }
}

/// Draw `text` with its top-left corner at `(x, y)`
pub fn draw_text(
    canvas: &mut Canvas,
    text: &str,
    x: i32,
    y: i32,
    font: &MonoFont<'_>,
    color: Rgb888,
) {
    draw_aligned(canvas, text, x, y, font, color, Alignment::Left);
}

/// Draw `text` with its top-right corner at `(x, y)`
pub fn draw_text_right(
    canvas: &mut Canvas,
    text: &str,
    x: i32,
    y: i32,
    font: &MonoFont<'_>,
    color: Rgb888,
) {
    draw_aligned(canvas, text, x, y, font, color, Alignment::Right);
}

/// Draw `text` horizontally centered on `x`
pub fn draw_text_centered(
    canvas: &mut Canvas,
    text: &str,
    x: i32,
    y: i32,
    font: &MonoFont<'_>,
    color: Rgb888,
) {
    draw_aligned(canvas, text, x, y, font, color, Alignment::Center);
}

fn draw_aligned(
    canvas: &mut Canvas,
    text: &str,
    x: i32,
    y: i32,
    font: &MonoFont<'_>,
    color: Rgb888,
    alignment: Alignment,
) {
    let style = MonoTextStyle::new(font, color);
    let layout = TextStyleBuilder::new()
        .alignment(alignment)
        .baseline(Baseline::Top)
        .build();
    let mut target = CanvasTarget::new(canvas);
    let _ = Text::with_text_style(text, Point::new(x, y), style, layout).draw(&mut target);
}

/// Pixel width of `text` in `font`
pub fn text_width(text: &str, font: &MonoFont<'_>) -> u32 {
    let chars = text.chars().count() as u32;
    chars * (font.character_size.width + font.character_spacing)
}

/// One-pixel line from `a` to `b`
pub fn draw_line(canvas: &mut Canvas, a: (i32, i32), b: (i32, i32), color: Rgb888) {
    let mut target = CanvasTarget::new(canvas);
    let _ = Line::new(Point::new(a.0, a.1), Point::new(b.0, b.1))
        .into_styled(PrimitiveStyle::with_stroke(color, 1))
        .draw(&mut target);
}

/// Rectangle outline
pub fn draw_rect(canvas: &mut Canvas, x: i32, y: i32, width: u32, height: u32, color: Rgb888) {
    let mut target = CanvasTarget::new(canvas);
    let _ = Rectangle::new(Point::new(x, y), Size::new(width, height))
        .into_styled(PrimitiveStyle::with_stroke(color, 1))
        .draw(&mut target);
}

/// Filled rectangle
pub fn fill_rect(canvas: &mut Canvas, x: i32, y: i32, width: u32, height: u32, color: Rgb888) {
    let mut target = CanvasTarget::new(canvas);
    let _ = Rectangle::new(Point::new(x, y), Size::new(width, height))
        .into_styled(PrimitiveStyle::with_fill(color))
        .draw(&mut target);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::blank;

    fn lit(canvas: &Canvas) -> usize {
        canvas.pixels().filter(|p| p.0 != [0, 0, 0]).count()
    }

    #[test]
    fn test_text_draws_pixels() {
        let mut canvas = blank(64, 16);
        draw_text(&mut canvas, "STAT", 0, 0, BODY_FONT, INK);
        assert!(lit(&canvas) > 0);
    }

    #[test]
    fn test_offscreen_text_clipped() {
        let mut canvas = blank(16, 16);
        draw_text(&mut canvas, "ITEMS", -500, -500, BODY_FONT, INK);
        assert_eq!(lit(&canvas), 0);
    }

    #[test]
    fn test_right_aligned_ends_at_x() {
        let mut canvas = blank(64, 16);
        draw_text_right(&mut canvas, "HP", 40, 0, BODY_FONT, INK);
        let max_x = canvas
            .enumerate_pixels()
            .filter(|(_, _, p)| p.0 != [0, 0, 0])
            .map(|(x, _, _)| x)
            .max();
        assert!(max_x.is_some_and(|x| x < 40));
    }

    #[test]
    fn test_text_width() {
        assert_eq!(text_width("abc", BODY_FONT), 18);
    }

    #[test]
    fn test_rect_outline() {
        let mut canvas = blank(8, 8);
        draw_rect(&mut canvas, 0, 0, 8, 8, INK);
        assert_eq!(canvas.get_pixel(0, 0).0, [255, 255, 255]);
        assert_eq!(canvas.get_pixel(4, 4).0, [0, 0, 0]);
    }
}
