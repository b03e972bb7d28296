//! Linux framebuffer backend
//!
//! Writes frames straight into `/dev/fbN`. Geometry comes from sysfs:
//!
//! - `/sys/class/graphics/fbN/virtual_size`: `"width,height"`
//! - `/sys/class/graphics/fbN/bits_per_pixel`: 16 or 32
//! - `/sys/class/graphics/fbN/stride`: bytes per line (optional)

use std::fs::{self, File, OpenOptions};
use std::io::{Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::backend::{DisplayBackend, DisplayError};
use crate::canvas::Canvas;

/// Framebuffer device backend
pub struct FramebufferBackend {
    file: File,
    width: u32,
    height: u32,
    bpp: u32,
    stride: usize,
    buffer: Vec<u8>,
}

impl FramebufferBackend {
    /// Open a framebuffer device such as `/dev/fb0`
    pub fn open(device: impl AsRef<Path>) -> Result<Self, DisplayError> {
        let device = device.as_ref();
        let name = device.file_name().and_then(|n| n.to_str()).ok_or_else(|| {
            DisplayError::Geometry(format!("bad device path {}", device.display()))
        })?;
        let sysfs = PathBuf::from("/sys/class/graphics").join(name);

        let (width, height) = parse_virtual_size(&read_sysfs(&sysfs, "virtual_size")?)?;
        let bpp = parse_number(&read_sysfs(&sysfs, "bits_per_pixel")?)?;
        if bpp != 16 && bpp != 32 {
            return Err(DisplayError::UnsupportedDepth(bpp));
        }
        let min_stride = width as usize * (bpp as usize / 8);
        let stride = read_sysfs(&sysfs, "stride")
            .ok()
            .and_then(|s| parse_number(&s).ok())
            .map_or(min_stride, |s| (s as usize).max(min_stride));

        let file = OpenOptions::new()
            .write(true)
            .open(device)
            .map_err(|source| DisplayError::Open {
                path: device.to_path_buf(),
                source,
            })?;

        info!(
            "framebuffer {}: {}x{} {} bpp, stride {}",
            device.display(),
            width,
            height,
            bpp,
            stride
        );

        Ok(Self {
            file,
            width,
            height,
            bpp,
            stride,
            buffer: vec![0; stride * height as usize],
        })
    }
}

impl DisplayBackend for FramebufferBackend {
    fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn present(&mut self, frame: &Canvas) -> Result<(), DisplayError> {
        encode_frame(frame, self.bpp, self.stride, &mut self.buffer)?;
        self.file.seek(SeekFrom::Start(0))?;
        self.file.write_all(&self.buffer)?;
        Ok(())
    }
}

fn read_sysfs(dir: &Path, attr: &str) -> Result<String, DisplayError> {
    fs::read_to_string(dir.join(attr)).map_err(|source| DisplayError::Open {
        path: dir.join(attr),
        source,
    })
}

fn parse_number(s: &str) -> Result<u32, DisplayError> {
    s.trim()
        .parse()
        .map_err(|_| DisplayError::Geometry(format!("not a number: {:?}", s.trim())))
}

fn parse_virtual_size(s: &str) -> Result<(u32, u32), DisplayError> {
    let (w, h) = s
        .trim()
        .split_once(',')
        .ok_or_else(|| DisplayError::Geometry(format!("bad virtual_size {:?}", s.trim())))?;
    let (w, h) = (parse_number(w)?, parse_number(h)?);
    if w == 0 || h == 0 {
        return Err(DisplayError::Geometry(format!("zero-sized display {w}x{h}")));
    }
    Ok((w, h))
}

/// Convert an RGB frame into framebuffer memory layout
///
/// - 16 bpp: RGB565, little endian
/// - 32 bpp: XRGB8888, little endian (`B G R 0xFF` in memory)
fn encode_frame(
    frame: &Canvas,
    bpp: u32,
    stride: usize,
    out: &mut [u8],
) -> Result<(), DisplayError> {
    let bytes_pp = (bpp / 8) as usize;
    let rows = out.len() / stride.max(1);
    if frame.height() as usize > rows || frame.width() as usize * bytes_pp > stride {
        return Err(DisplayError::Geometry(format!(
            "frame {:?} larger than framebuffer",
            frame.dimensions()
        )));
    }

    for (y, row) in frame.rows().enumerate() {
        let line = &mut out[y * stride..(y + 1) * stride];
        for (px, dst) in row.zip(line.chunks_exact_mut(bytes_pp)) {
            let [r, g, b] = px.0;
            match bpp {
                16 => {
                    let v = (u16::from(r >> 3) << 11)
                        | (u16::from(g >> 2) << 5)
                        | u16::from(b >> 3);
                    dst.copy_from_slice(&v.to_le_bytes());
                }
                32 => dst.copy_from_slice(&[b, g, r, 0xFF]),
                other => return Err(DisplayError::UnsupportedDepth(other)),
            }
        }
    }
    Ok(())
}
