//! Board-agnostic logic for the Pip-Boy display engine
//!
//! This crate contains all engine logic that does not touch pixels or
//! devices:
//!
//! - Engine state (active tab, mode, torch) and transition detection
//! - Page events and notification cues
//! - Input normalization (serial lines + local keys/mouse into one model)
//! - Render timing helpers (overlay frame clock, focus divisors, hum drift)
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod input;
pub mod render;
pub mod state;
