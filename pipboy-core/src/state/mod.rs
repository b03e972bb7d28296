//! Engine state machine
//!
//! The UI state is the triple `(tab, mode, torch)`. Inputs only *request*
//! changes; the controller applies them once per tick and reports which
//! parts actually moved.

pub mod events;
pub mod machine;

pub use events::{Cue, PageEvent, PageEvents, MAX_PAGE_EVENTS};
pub use machine::{EngineState, PageState, StateRequests, Transition};
