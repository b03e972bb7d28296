//! Cross-task handoffs
//!
//! The render loop is the only consumer of everything here.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use pipboy_drivers::FrameSignal;

/// Latest decoded camera frame (written by the capture thread)
pub static CAMERA_FRAME: FrameSignal = Signal::new();

/// Process exit code, signalled once the render task has torn down
pub static SHUTDOWN: Signal<CriticalSectionRawMutex, i32> = Signal::new();
