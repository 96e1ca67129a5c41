//! Message types for the Elm-style architecture
//!
//! Host input (window events, screenshot scenario steps) is translated into
//! `Msg` values and applied to the scene by [`crate::update::update`].

/// Input notifications the scene reacts to
///
/// Coordinates are logical stage coordinates. The frame tick is not a message:
/// it needs a canvas and is driven directly by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Msg {
    /// Viewport changed size (also sent once at startup)
    Resize { width: f64, height: f64 },
    PointerDown { x: f64, y: f64 },
    PointerMove { x: f64, y: f64 },
    PointerUp,
}
