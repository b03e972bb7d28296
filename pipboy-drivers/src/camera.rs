//! Camera capture
//!
//! The capture command (by default `rpicam-vid` writing MJPEG to stdout)
//! runs as a child process. A dedicated thread splits its output into JPEG
//! frames, decodes them and hands the newest one over through a
//! single-slot [`Signal`]. An unread frame is replaced by the next one, so
//! the consumer only ever sees the latest complete image.
//!
//! The thread is fail-silent: spawn, read or decode problems are logged and
//! the V.A.T.S. page keeps showing its default canvas.

use std::io::{self, Read};
use std::process::{Child, Command, Stdio};
use std::thread::{self, JoinHandle};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use image::imageops::{self, FilterType};
use image::{ImageFormat, RgbImage};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Single-slot handoff of the latest decoded frame
pub type FrameSignal = Signal<CriticalSectionRawMutex, RgbImage>;

/// JPEG start-of-image marker
const SOI: [u8; 2] = [0xFF, 0xD8];

/// JPEG end-of-image marker
const EOI: [u8; 2] = [0xFF, 0xD9];

/// Bytes read from the capture pipe at once
const READ_CHUNK: usize = 16 * 1024;

/// A frame larger than this is assumed corrupt and dropped
const MAX_FRAME_BYTES: usize = 4 * 1024 * 1024;

/// Camera errors
#[derive(Debug, Error)]
pub enum CameraError {
    #[error("capture command is empty")]
    NoCommand,
    #[error("failed to start {program}: {source}")]
    Spawn { program: String, source: io::Error },
    #[error("capture process has no stdout")]
    NoOutput,
    #[error("capture read failed: {0}")]
    Read(#[from] io::Error),
}

/// Capture settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraConfig {
    /// Program and arguments; must write MJPEG to stdout
    pub command: Vec<String>,
    /// Frames are resized to this size if they differ
    pub width: u32,
    pub height: u32,
}

impl CameraConfig {
    /// Default `rpicam-vid` invocation for a given frame size
    pub fn rpicam(width: u32, height: u32) -> Self {
        let command = [
            "rpicam-vid",
            "-t",
            "0",
            "-n",
            "--codec",
            "mjpeg",
            "--width",
            &width.to_string(),
            "--height",
            &height.to_string(),
            "-o",
            "-",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        Self {
            command,
            width,
            height,
        }
    }
}

/// Splits an MJPEG byte stream into complete JPEG images
///
/// Bytes before a start marker are discarded. A frame whose end marker
/// does not show up within `MAX_FRAME_BYTES` is dropped.
#[derive(Debug, Default)]
pub struct JpegSplitter {
    buffer: Vec<u8>,
}

impl JpegSplitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes held for an incomplete frame
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Append stream bytes and return every frame they completed
    pub fn push(&mut self, data: &[u8]) -> Vec<Vec<u8>> {
        self.buffer.extend_from_slice(data);
        let mut frames = Vec::new();

        loop {
            let Some(start) = find(&self.buffer, &SOI, 0) else {
                // keep a trailing 0xFF, it may be half of the next marker
                let keep = usize::from(self.buffer.last() == Some(&0xFF));
                let cut = self.buffer.len() - keep;
                self.buffer.drain(..cut);
                break;
            };
            if start > 0 {
                self.buffer.drain(..start);
            }
            match find(&self.buffer, &EOI, SOI.len()) {
                Some(end) => {
                    let frame: Vec<u8> = self.buffer.drain(..end + EOI.len()).collect();
                    frames.push(frame);
                }
                None => {
                    if self.buffer.len() > MAX_FRAME_BYTES {
                        debug!("dropping oversized camera frame ({} bytes)", self.buffer.len());
                        self.buffer.clear();
                    }
                    break;
                }
            }
        }
        frames
    }
}

fn find(haystack: &[u8], needle: &[u8; 2], from: usize) -> Option<usize> {
    haystack
        .get(from..)?
        .windows(2)
        .position(|w| w == needle)
        .map(|p| p + from)
}

/// Decode one JPEG and fit it to the canvas
pub fn decode_frame(jpeg: &[u8], width: u32, height: u32) -> Result<RgbImage, image::ImageError> {
    let image = image::load_from_memory_with_format(jpeg, ImageFormat::Jpeg)?.to_rgb8();
    if image.dimensions() == (width, height) {
        Ok(image)
    } else {
        Ok(imageops::resize(&image, width, height, FilterType::Triangle))
    }
}

/// Read a capture stream until it ends, publishing every decoded frame
///
/// Returns the number of frames published. Undecodable frames are skipped.
pub fn pump_frames<R: Read>(
    mut reader: R,
    width: u32,
    height: u32,
    slot: &FrameSignal,
) -> Result<usize, CameraError> {
    let mut splitter = JpegSplitter::new();
    let mut chunk = vec![0u8; READ_CHUNK];
    let mut published = 0;

    loop {
        let n = match reader.read(&mut chunk) {
            Ok(0) => return Ok(published),
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        for jpeg in splitter.push(&chunk[..n]) {
            match decode_frame(&jpeg, width, height) {
                Ok(frame) => {
                    slot.signal(frame);
                    published += 1;
                }
                Err(e) => debug!("skipping camera frame: {}", e),
            }
        }
    }
}

/// Kills and reaps the capture process on every exit path
struct ChildGuard(Child);

impl Drop for ChildGuard {
    fn drop(&mut self) {
        if let Err(e) = self.0.kill() {
            debug!("camera process already gone: {}", e);
        }
        let _ = self.0.wait();
        info!("camera process stopped");
    }
}

fn run_capture(config: &CameraConfig, slot: &FrameSignal) -> Result<usize, CameraError> {
    let (program, args) = config.command.split_first().ok_or(CameraError::NoCommand)?;
    let child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|source| CameraError::Spawn {
            program: program.clone(),
            source,
        })?;
    let mut guard = ChildGuard(child);
    info!("camera process started: {}", program);

    let stdout = guard.0.stdout.take().ok_or(CameraError::NoOutput)?;
    pump_frames(stdout, config.width, config.height, slot)
}

/// Start the capture thread
///
/// The thread is detached from the render loop; dropping the handle does
/// not stop it. Process exit is never blocked on it.
pub fn spawn_capture(
    config: CameraConfig,
    slot: &'static FrameSignal,
) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("camera".into())
        .spawn(move || {
            info!("Camera thread started");
            match run_capture(&config, slot) {
                Ok(n) => info!("camera stream ended after {} frames", n),
                Err(e) => warn!("camera unavailable: {}", e),
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use std::io::Cursor;

    fn jpeg(color: [u8; 3]) -> Vec<u8> {
        let img = RgbImage::from_pixel(16, 16, Rgb(color));
        let mut out = Vec::new();
        img.write_to(&mut Cursor::new(&mut out), ImageFormat::Jpeg)
            .unwrap();
        out
    }

    #[test]
    fn test_splitter_whole_frames() {
        let mut splitter = JpegSplitter::new();
        let frames = splitter.push(&[0x00, 0xFF, 0xD8, 1, 2, 0xFF, 0xD9, 0xFF, 0xD8, 3]);
        assert_eq!(frames, vec![vec![0xFF, 0xD8, 1, 2, 0xFF, 0xD9]]);
        assert_eq!(splitter.pending(), 3);

        let frames = splitter.push(&[0xFF, 0xD9]);
        assert_eq!(frames, vec![vec![0xFF, 0xD8, 3, 0xFF, 0xD9]]);
        assert_eq!(splitter.pending(), 0);
    }

    #[test]
    fn test_splitter_marker_across_chunks() {
        let mut splitter = JpegSplitter::new();
        assert!(splitter.push(&[7, 7, 0xFF]).is_empty());
        assert_eq!(splitter.pending(), 1);
        assert!(splitter.push(&[0xD8, 5, 0xFF]).is_empty());
        let frames = splitter.push(&[0xD9]);
        assert_eq!(frames, vec![vec![0xFF, 0xD8, 5, 0xFF, 0xD9]]);
    }

    #[test]
    fn test_splitter_eoi_not_inside_soi() {
        // FF D8 D9 must not be read as SOI immediately followed by EOI
        let mut splitter = JpegSplitter::new();
        assert!(splitter.push(&[0xFF, 0xD8, 0xD9]).is_empty());
    }

    #[test]
    fn test_latest_frame_wins() {
        let slot = FrameSignal::new();
        let mut stream = jpeg([255, 0, 0]);
        stream.extend(jpeg([0, 0, 255]));

        let published = pump_frames(Cursor::new(stream), 8, 8, &slot).unwrap();
        assert_eq!(published, 2);

        let frame = slot.try_take().unwrap();
        assert_eq!(frame.dimensions(), (8, 8));
        let [r, _, b] = frame.get_pixel(4, 4).0;
        assert!(b > 200 && r < 50);
        assert!(slot.try_take().is_none());
    }

    #[test]
    fn test_corrupt_frame_skipped() {
        let slot = FrameSignal::new();
        let mut stream = vec![0xFF, 0xD8, 0, 0, 0xFF, 0xD9];
        stream.extend(jpeg([0, 255, 0]));
        let published = pump_frames(Cursor::new(stream), 16, 16, &slot).unwrap();
        assert_eq!(published, 1);
        assert!(slot.try_take().is_some());
    }

    #[test]
    fn test_missing_program_fails_quietly() {
        let slot = FrameSignal::new();
        let config = CameraConfig {
            command: vec!["/nonexistent/pipboy-camera".into()],
            width: 8,
            height: 8,
        };
        assert!(matches!(
            run_capture(&config, &slot),
            Err(CameraError::Spawn { .. })
        ));
        let empty = CameraConfig {
            command: Vec::new(),
            ..config
        };
        assert!(matches!(run_capture(&empty, &slot), Err(CameraError::NoCommand)));
    }

    #[test]
    fn test_rpicam_command() {
        let config = CameraConfig::rpicam(320, 240);
        assert_eq!(config.command[0], "rpicam-vid");
        assert!(config.command.contains(&"mjpeg".to_string()));
    }
}
