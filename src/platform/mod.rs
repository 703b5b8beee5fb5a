//! Browser platform layer
//!
//! Handles the browser side of the game:
//! - LocalStorage access
//! - 2D canvas drawing
//! - The overlay DOM and its readouts
//! - The animation frame loop (cancelled when dropped)

pub mod canvas;
pub mod frame_loop;
pub mod overlay;
pub mod storage;

pub use canvas::CanvasSurface;
pub use frame_loop::FrameLoop;
pub use overlay::Overlay;
