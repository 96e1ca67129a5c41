//! Dialogs - draggable swinging panels on a software canvas
//!
//! This crate provides the scene (ordered panels, hit-testing, single-pointer
//! drag ownership, per-frame drawing), the panel contract with its dialog
//! implementation, and the pixel-buffer canvas the window runtime presents.

pub mod canvas;
pub mod cli;
pub mod color;
pub mod config;
pub mod config_paths;
pub mod messages;
pub mod panel;
pub mod perf;
pub mod point;
pub mod scene;
pub mod tracing;
pub mod update;
pub mod view;

// Re-export commonly used types
pub use canvas::Canvas;
pub use color::Color;
pub use config::AppConfig;
pub use messages::Msg;
pub use panel::{DialogPanel, Panel, PanelId};
pub use point::Point;
pub use scene::Scene;
