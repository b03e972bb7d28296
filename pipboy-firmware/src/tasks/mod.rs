//! Embassy tasks
//!
//! The render loop is the only task; the camera runs on its own thread.

pub mod render;

pub use render::render_task;
