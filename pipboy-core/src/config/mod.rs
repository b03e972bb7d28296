//! Configuration types
//!
//! Board-agnostic configuration consumed read-only by the engine. The
//! firmware fills these from TOML.

pub mod types;

pub use types::*;
