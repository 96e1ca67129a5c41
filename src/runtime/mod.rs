//! Runtime module - winit/platform integration
//!
//! - `app` - ApplicationHandler, window and frame loop
//! - `input` - Mouse/touch event to message mapping

pub mod app;
pub mod input;

pub use app::App;
