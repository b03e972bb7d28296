//! Linux implementation of the Pip-Boy HAL
//!
//! Backs the [`pipboy_hal`] traits with termios character devices so the
//! engine can talk to the control pad on `/dev/ttyACM0`, `/dev/serial0` and
//! friends.

#![deny(unsafe_code)]

pub mod uart;

pub use uart::{SerialError, SerialPort};
