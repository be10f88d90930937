//! Rendering module
//!
//! The simulation is turned into plain draw commands (`shapes`), which a
//! backend executes. The browser backend draws with Canvas2D.

pub mod command;
pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;
pub use command::{Color, DrawCommand, Glow, Paint};
pub use shapes::frame_commands;
