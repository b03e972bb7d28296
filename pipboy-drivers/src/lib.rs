//! Peripheral drivers
//!
//! Concrete implementations of the collaborators the engine talks to:
//!
//! - Camera: external MJPEG capture process, decoded on its own thread
//! - Sound: cue playback through an external player, or silent
//! - GPS: coordinate source used once at boot
//!
//! None of these are allowed to take the render loop down. The camera
//! thread fails silently and sound playback errors are logged and dropped.

#![deny(unsafe_code)]

pub mod camera;
pub mod gps;
pub mod sound;

pub use camera::{spawn_capture, CameraConfig, CameraError, FrameSignal, JpegSplitter};
pub use gps::{Coords, FixedPosition, GpsSource};
pub use sound::{CommandSound, SilentSound, SoundOutput};
