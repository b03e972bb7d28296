//! Frame compositing and display output for the Pip-Boy
//!
//! This crate provides:
//! - Raster blend operations (`canvas`) with saturating add/multiply
//! - Overlay frame generation (scanlines, distortion band, tint)
//! - Header/footer rendering with `embedded-graphics` mono fonts
//! - The page contract (`Page`, `TabContent`) and the tab registry
//! - `FrameCompositor`, which layers everything into the output frame
//! - `DisplayBackend` implementations (Linux framebuffer, in-memory)
//!
//! # Layer order
//!
//! ```text
//! page ⊕ header ⊕ footer        (tab canvas, rebuilt only when dirty)
//!      ⊕ background             (baked into the screen canvas)
//!      ⊗ overlay frame          (scanlines + distortion + tint)
//!      ⊕ torch green            (torch mode only)
//!      → scale → present
//! ```

pub mod backend;
pub mod canvas;
pub mod compositor;
pub mod framebuffer;
pub mod header;
pub mod overlay;
pub mod page;
pub mod registry;
pub mod text;

// Re-export key types
pub use backend::{DisplayBackend, DisplayError, MemoryBackend};
pub use canvas::Canvas;
pub use compositor::{FrameCompositor, OverlayPolicy};
pub use framebuffer::FramebufferBackend;
pub use page::{ModeTab, Page, TabContent};
pub use registry::{PageRegistry, Tab};
