//! Static image assets
//!
//! The skin is four images: the screen background, a scanline strip, a
//! distortion strip and the boot logo. They load from PNG files when an
//! asset directory is configured; otherwise plain generated stand-ins are
//! used so the engine runs without any files.

use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};
use pipboy_display::canvas::{self, Canvas};
use pipboy_display::text::{self, BODY_FONT, INK, TITLE_FONT};
use thiserror::Error;
use tracing::{debug, info};

/// Asset loading errors (startup-fatal)
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to load {name} from {path}: {source}")]
    Load {
        name: &'static str,
        path: PathBuf,
        source: image::ImageError,
    },
}

/// Decoded skin images
#[derive(Debug, Clone)]
pub struct Assets {
    pub background: Canvas,
    pub scanline: Canvas,
    pub distort: Canvas,
    /// Canvas-sized boot logo
    pub logo: Canvas,
}

impl Assets {
    /// Load from `directory`, or generate when `None`
    pub fn load(directory: Option<&Path>, width: u32, height: u32) -> Result<Self, AssetError> {
        match directory {
            Some(dir) => {
                let assets = Self {
                    background: load_png(dir, "background")?,
                    scanline: load_png(dir, "scanline")?,
                    distort: load_png(dir, "distort")?,
                    logo: canvas::smooth_scale(&load_png(dir, "bootupLogo")?, width, height),
                };
                info!("assets loaded from {}", dir.display());
                Ok(assets)
            }
            None => {
                info!("no asset directory, using generated assets");
                Ok(Self::generated(width, height))
            }
        }
    }

    /// Stand-in skin drawn in code
    pub fn generated(width: u32, height: u32) -> Self {
        Self {
            background: generated_background(width, height),
            scanline: strip(&[70, 150, 230, 255, 230, 150, 70, 40]),
            distort: strip(&[0, 6, 14, 26, 40, 26, 14, 6, 0]),
            logo: generated_logo(width, height),
        }
    }
}

fn load_png(dir: &Path, name: &'static str) -> Result<Canvas, AssetError> {
    let path = dir.join(name).with_extension("png");
    let image = image::open(&path).map_err(|source| AssetError::Load {
        name,
        path: path.clone(),
        source,
    })?;
    debug!("loaded {} ({}x{})", path.display(), image.width(), image.height());
    Ok(image.to_rgb8())
}

/// One pixel wide gray strip, one row per level
fn strip(levels: &[u8]) -> Canvas {
    RgbImage::from_fn(1, levels.len() as u32, |_, y| {
        let v = levels[y as usize];
        Rgb([v, v, v])
    })
}

/// Dim radial falloff from the centre
fn generated_background(width: u32, height: u32) -> Canvas {
    let (cx, cy) = (width as f32 / 2.0, height as f32 / 2.0);
    let reach = (cx * cx + cy * cy).sqrt().max(1.0);
    RgbImage::from_fn(width, height, |x, y| {
        let (dx, dy) = (x as f32 - cx, y as f32 - cy);
        let falloff = 1.0 - (dx * dx + dy * dy).sqrt() / reach;
        let v = (12.0 + 28.0 * falloff) as u8;
        Rgb([v, v, v])
    })
}

fn generated_logo(width: u32, height: u32) -> Canvas {
    let mut logo = canvas::blank(width, height);
    let cx = width as i32 / 2;
    let cy = height as i32 / 2;
    text::draw_rect(&mut logo, cx - 60, cy - 34, 120, 52, INK);
    text::draw_text_centered(&mut logo, "VAULT-TEC", cx, cy - 22, TITLE_FONT, INK);
    text::draw_text_centered(&mut logo, "PIP-BOY 3000", cx, cy - 4, BODY_FONT, INK);
    text::draw_text_centered(&mut logo, "ROBCO INDUSTRIES", cx, cy + 26, BODY_FONT, INK);
    logo
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_assets() {
        let assets = Assets::generated(320, 240);
        assert_eq!(assets.background.dimensions(), (320, 240));
        assert_eq!(assets.logo.dimensions(), (320, 240));
        assert_eq!(assets.scanline.dimensions(), (1, 8));
        assert_eq!(assets.distort.get_pixel(0, 4).0, [40, 40, 40]);
        // brighter in the middle than in the corner
        let background = &assets.background;
        assert!(background.get_pixel(160, 120).0[0] > background.get_pixel(0, 0).0[0]);
        assert!(assets.logo.pixels().any(|p| p.0 == [255, 255, 255]));
    }

    #[test]
    fn test_missing_directory_fails() {
        let err = Assets::load(Some(Path::new("/nonexistent/pipboy-assets")), 32, 32);
        assert!(matches!(
            err,
            Err(AssetError::Load {
                name: "background",
                ..
            })
        ));
    }

    #[test]
    fn test_no_directory_generates() {
        let assets = Assets::load(None, 64, 48).unwrap();
        assert_eq!(assets.background.dimensions(), (64, 48));
    }
}
