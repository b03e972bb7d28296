//! Configuration loading and parsing
//!
//! Loads pipboy.toml from `--config` or the copy embedded at build time.

pub mod loader;
pub mod sections;

pub use loader::load_config;
pub use sections::{BackendKind, PipboyConfig};
