//! Render timing helpers
//!
//! The pixel work lives in `pipboy-display`; these are the small pieces of
//! bookkeeping that decide *which* overlay frame, *which* blur level and
//! *how loud* the hum is on a given tick.

pub mod focus;
pub mod hum;
pub mod overlay;

pub use focus::{FocusDivisors, MAX_FOCUS_DIVISOR};
pub use hum::{HumVolume, HUM_DRIFT};
pub use overlay::OverlayClock;
