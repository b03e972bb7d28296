//! Display backend trait
//!
//! Defines the interface the compositor presents frames through.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::canvas::Canvas;

/// Display backend errors
#[derive(Debug, Error)]
pub enum DisplayError {
    /// Device node could not be opened
    #[error("failed to open display {path}: {source}")]
    Open { path: PathBuf, source: io::Error },
    /// Geometry could not be read or makes no sense
    #[error("invalid display geometry: {0}")]
    Geometry(String),
    /// Pixel depth the backend cannot convert to
    #[error("unsupported framebuffer depth: {0} bpp")]
    UnsupportedDepth(u32),
    /// Write to the device failed
    #[error("display write failed: {0}")]
    Io(#[from] io::Error),
}

/// Display backend trait
///
/// Implementations take a finished RGB frame already scaled to
/// [`resolution`](Self::resolution) and put it on screen.
pub trait DisplayBackend {
    /// Physical resolution `(width, height)`
    fn resolution(&self) -> (u32, u32);

    /// Show a frame
    fn present(&mut self, frame: &Canvas) -> Result<(), DisplayError>;
}

impl<D: DisplayBackend + ?Sized> DisplayBackend for Box<D> {
    fn resolution(&self) -> (u32, u32) {
        (**self).resolution()
    }

    fn present(&mut self, frame: &Canvas) -> Result<(), DisplayError> {
        (**self).present(frame)
    }
}

/// Backend that keeps the presented frames in memory
///
/// Used for headless runs and tests. Only the most recent `keep` frames are
/// retained; `presented` counts all of them.
#[derive(Debug, Clone)]
pub struct MemoryBackend {
    resolution: (u32, u32),
    keep: usize,
    frames: Vec<Canvas>,
    presented: usize,
}

impl MemoryBackend {
    pub fn new(width: u32, height: u32, keep: usize) -> Self {
        Self {
            resolution: (width, height),
            keep: keep.max(1),
            frames: Vec::new(),
            presented: 0,
        }
    }

    /// Total frames presented
    pub fn presented(&self) -> usize {
        self.presented
    }

    /// Retained frames, oldest first
    pub fn frames(&self) -> &[Canvas] {
        &self.frames
    }

    /// Most recent frame
    pub fn last(&self) -> Option<&Canvas> {
        self.frames.last()
    }
}

impl DisplayBackend for MemoryBackend {
    fn resolution(&self) -> (u32, u32) {
        self.resolution
    }

    fn present(&mut self, frame: &Canvas) -> Result<(), DisplayError> {
        if frame.dimensions() != self.resolution {
            return Err(DisplayError::Geometry(format!(
                "frame {:?} does not match display {:?}",
                frame.dimensions(),
                self.resolution
            )));
        }
        if self.frames.len() == self.keep {
            self.frames.remove(0);
        }
        self.frames.push(frame.clone());
        self.presented += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas;

    #[test]
    fn test_memory_backend_keeps_latest() {
        let mut display = MemoryBackend::new(2, 2, 2);
        for v in 1..=3u8 {
            display.present(&canvas::solid(2, 2, [v, v, v])).unwrap();
        }
        assert_eq!(display.presented(), 3);
        assert_eq!(display.frames().len(), 2);
        assert_eq!(display.last().map(|f| f.get_pixel(0, 0).0), Some([3, 3, 3]));
    }

    #[test]
    fn test_memory_backend_rejects_wrong_size() {
        let mut display = MemoryBackend::new(4, 4, 1);
        let err = display.present(&canvas::blank(2, 2));
        assert!(matches!(err, Err(DisplayError::Geometry(_))));
        assert_eq!(display.presented(), 0);
    }

    #[test]
    fn test_boxed_backend() {
        let mut display: Box<dyn DisplayBackend> = Box::new(MemoryBackend::new(3, 1, 1));
        assert_eq!(display.resolution(), (3, 1));
        assert!(display.present(&canvas::blank(3, 1)).is_ok());
    }
}
