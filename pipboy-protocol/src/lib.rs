//! Control Pad Serial Protocol
//!
//! This crate defines the line-oriented protocol spoken by the wrist control
//! pad (rotary switch, buttons and sensors on a microcontroller) towards the
//! Pi that drives the display.
//!
//! # Protocol Overview
//!
//! Every message is one ASCII line terminated by `\n` or `\r`:
//! ```text
//! ┌──────────────────────────────┬────────────┐
//! │ COMMAND                      │ TERMINATOR │
//! │ 1–64B ASCII                  │ \n or \r   │
//! └──────────────────────────────┴────────────┘
//! ```
//!
//! The vocabulary is fixed (see [`Command`]). Lines outside it are dropped
//! without error; the pad firmware is free to chatter.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod commands;
pub mod line;

pub use commands::{encode_gauge_mode, Command, MOUSE_STEP};
pub use line::{Line, LineError, LineParser, MAX_LINE_LEN};
