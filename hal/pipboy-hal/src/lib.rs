//! Pip-Boy Hardware Abstraction Layer
//!
//! This crate defines the hardware abstraction traits the engine needs from
//! its host board. Today that is only the serial link to the control pad; the
//! display and camera are reached through std-only crates.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (pipboy-firmware)          │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  pipboy-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ pipboy-hal-   │
//!             │    linux      │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`uart::UartTx`], [`uart::UartRx`] - Serial communication

#![no_std]
#![deny(unsafe_code)]

pub mod uart;

// Re-export key traits at crate root for convenience
pub use uart::{UartConfig, UartError, UartRx, UartTx};
