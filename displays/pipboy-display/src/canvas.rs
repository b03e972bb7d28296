//! Raster blend operations
//!
//! All layers are 8-bit RGB buffers. Blends saturate per channel:
//!
//! - add: `min(a + b, 255)`
//! - multiply: `(a * b + 255) >> 8`, so white is the identity and black
//!   clears
//!
//! Blends between differently sized buffers only touch the overlapping
//! region, with the source placed at an offset that may be negative.

use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use pipboy_core::config::Rgb as Color;

/// A drawable layer
pub type Canvas = RgbImage;

/// Black canvas of the given size
pub fn blank(width: u32, height: u32) -> Canvas {
    RgbImage::new(width, height)
}

/// Canvas filled with a single color
pub fn solid(width: u32, height: u32, color: Color) -> Canvas {
    RgbImage::from_pixel(width, height, Rgb(color))
}

/// Gray level as a color (`v` in `0..=255`)
pub fn gray(v: u8) -> Color {
    [v, v, v]
}

#[inline]
fn add_channel(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

#[inline]
fn mul_channel(a: u8, b: u8) -> u8 {
    ((u16::from(a) * u16::from(b) + 255) >> 8) as u8
}

/// `dst += src`
pub fn add(dst: &mut Canvas, src: &Canvas) {
    blend_at(dst, src, 0, 0, add_channel);
}

/// `dst += src` with `src` placed at `(x, y)`
pub fn add_at(dst: &mut Canvas, src: &Canvas, x: i64, y: i64) {
    blend_at(dst, src, x, y, add_channel);
}

/// `dst *= src`
pub fn multiply(dst: &mut Canvas, src: &Canvas) {
    blend_at(dst, src, 0, 0, mul_channel);
}

/// Add a constant color to every pixel
pub fn fill_add(dst: &mut Canvas, color: Color) {
    fill_with(dst, color, add_channel);
}

/// Multiply every pixel by a constant color
pub fn fill_multiply(dst: &mut Canvas, color: Color) {
    fill_with(dst, color, mul_channel);
}

/// Bilinear resize (used for blur and asset fitting)
pub fn smooth_scale(src: &Canvas, width: u32, height: u32) -> Canvas {
    if src.dimensions() == (width, height) {
        return src.clone();
    }
    imageops::resize(src, width.max(1), height.max(1), FilterType::Triangle)
}

/// Nearest-neighbour resize (used to fit the display)
pub fn scale(src: &Canvas, width: u32, height: u32) -> Canvas {
    if src.dimensions() == (width, height) {
        return src.clone();
    }
    imageops::resize(src, width.max(1), height.max(1), FilterType::Nearest)
}

fn fill_with(dst: &mut Canvas, color: Color, op: fn(u8, u8) -> u8) {
    for px in dst.pixels_mut() {
        for (c, k) in px.0.iter_mut().zip(color) {
            *c = op(*c, k);
        }
    }
}

fn blend_at(dst: &mut Canvas, src: &Canvas, x: i64, y: i64, op: fn(u8, u8) -> u8) {
    let (dw, dh) = (i64::from(dst.width()), i64::from(dst.height()));
    let (sw, sh) = (i64::from(src.width()), i64::from(src.height()));

    // Same size, no offset: straight over the raw buffers
    if x == 0 && y == 0 && dw == sw && dh == sh {
        for (d, s) in dst.iter_mut().zip(src.iter()) {
            *d = op(*d, *s);
        }
        return;
    }

    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + sw).min(dw);
    let y1 = (y + sh).min(dh);
    if x0 >= x1 || y0 >= y1 {
        return;
    }

    let span = ((x1 - x0) * 3) as usize;
    let dst_stride = (dw * 3) as usize;
    let src_stride = (sw * 3) as usize;
    let src_raw = src.as_raw();
    let dst_raw: &mut [u8] = dst;

    for row in y0..y1 {
        let d_start = row as usize * dst_stride + x0 as usize * 3;
        let s_start = (row - y) as usize * src_stride + (x0 - x) as usize * 3;
        let d = &mut dst_raw[d_start..d_start + span];
        let s = &src_raw[s_start..s_start + span];
        for (dc, sc) in d.iter_mut().zip(s) {
            *dc = op(*dc, *sc);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_add_saturates() {
        let mut dst = solid(2, 2, [200, 10, 0]);
        add(&mut dst, &solid(2, 2, [100, 10, 0]));
        assert_eq!(dst.get_pixel(1, 1).0, [255, 20, 0]);
    }

    #[test]
    fn test_multiply_identity_and_zero() {
        let mut dst = solid(1, 1, [37, 200, 255]);
        multiply(&mut dst, &solid(1, 1, [255, 255, 255]));
        assert_eq!(dst.get_pixel(0, 0).0, [37, 200, 255]);

        multiply(&mut dst, &solid(1, 1, [0, 0, 0]));
        assert_eq!(dst.get_pixel(0, 0).0, [0, 0, 0]);
    }

    #[test]
    fn test_multiply_half() {
        let mut dst = solid(1, 1, [200, 100, 0]);
        fill_multiply(&mut dst, gray(128));
        assert_eq!(dst.get_pixel(0, 0).0, [100, 50, 0]);
    }

    #[test]
    fn test_add_at_negative_offset_clips() {
        let mut dst = blank(4, 4);
        let src = solid(4, 2, [10, 10, 10]);
        add_at(&mut dst, &src, 0, -1);
        assert_eq!(dst.get_pixel(0, 0).0, [10, 10, 10]);
        assert_eq!(dst.get_pixel(0, 1).0, [0, 0, 0]);
    }

    #[test]
    fn test_add_at_outside_is_noop() {
        let mut dst = blank(4, 4);
        add_at(&mut dst, &solid(4, 2, [10, 10, 10]), 0, 4);
        add_at(&mut dst, &solid(4, 2, [10, 10, 10]), 0, -2);
        assert!(dst.pixels().all(|p| p.0 == [0, 0, 0]));
    }

    #[test]
    fn test_add_smaller_source() {
        let mut dst = blank(4, 4);
        add_at(&mut dst, &solid(2, 2, [1, 2, 3]), 1, 1);
        assert_eq!(dst.get_pixel(0, 0).0, [0, 0, 0]);
        assert_eq!(dst.get_pixel(1, 1).0, [1, 2, 3]);
        assert_eq!(dst.get_pixel(2, 2).0, [1, 2, 3]);
        assert_eq!(dst.get_pixel(3, 3).0, [0, 0, 0]);
    }

    #[test]
    fn test_scale_dimensions() {
        let src = solid(4, 3, [9, 9, 9]);
        assert_eq!(scale(&src, 8, 6).dimensions(), (8, 6));
        assert_eq!(smooth_scale(&src, 2, 1).dimensions(), (2, 1));
        assert_eq!(smooth_scale(&src, 0, 0).dimensions(), (1, 1));
    }

    proptest! {
        #[test]
        fn prop_add_at_touches_only_overlap(
            x in -12i64..12,
            y in -12i64..12,
            sw in 1u32..10,
            sh in 1u32..10,
        ) {
            let mut dst = blank(8, 8);
            add_at(&mut dst, &solid(sw, sh, [1, 1, 1]), x, y);
            for (px, py, p) in dst.enumerate_pixels() {
                let (px, py) = (i64::from(px), i64::from(py));
                let inside = px >= x && px < x + i64::from(sw) && py >= y && py < y + i64::from(sh);
                prop_assert_eq!(p.0[0], u8::from(inside));
            }
        }
    }
}
