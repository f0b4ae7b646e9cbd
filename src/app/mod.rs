//! Application root - owns one instance of every core component.
//!
//! This module is organized into several submodules:
//! - `state` - The Petriboard struct and the canvas collaborator seam
//! - `lifecycle` - Construction, wiring and the per-frame tick
//! - `file_handlers` - Opening, exporting and deleting the current net

mod file_handlers;
mod lifecycle;
mod state;

pub use state::{CanvasHandle, Petriboard};
