//! Panel system - the draggable units the scene orders, hit-tests and draws
//!
//! ## Architecture
//!
//! - `PanelId`: Stable identity of a panel, independent of paint order
//! - `Panel` trait: The capability set the scene depends on (resize,
//!   hit-test/drag lifecycle, per-frame draw, drag anchor)
//! - `DialogPanel`: The swinging card panel shown by the application
//!
//! The scene never looks inside a panel. Adding a visually different kind of
//! panel means implementing `Panel`; the scene does not change.

mod dialog;

pub use dialog::{DialogPanel, DialogStyle};

use crate::canvas::Canvas;
use crate::point::Point;

/// Identity of a panel within a scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PanelId(pub usize);

impl std::fmt::Display for PanelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "panel#{}", self.0)
    }
}

/// Contract between the scene and a panel
///
/// `pointer_move` and `up` may arrive while the panel is not dragging (the
/// scene routes them to whichever panel is frontmost). Implementations must
/// treat those calls as silent no-ops.
pub trait Panel {
    fn id(&self) -> PanelId;

    /// Re-layout for a new stage size. Called once at startup and on every
    /// viewport resize.
    fn resize(&mut self, stage_width: f64, stage_height: f64);

    /// Hit-test a pointer-down. On a hit the panel enters its dragging state
    /// and returns `true`.
    fn down(&mut self, point: Point) -> bool;

    /// Follow the pointer while dragging
    fn pointer_move(&mut self, point: Point);

    /// End any drag in progress
    fn up(&mut self);

    /// Draw the panel for the current frame
    fn animate(&mut self, canvas: &mut dyn Canvas);

    /// Drag anchor, the far end of the drag guide
    fn center_pos(&self) -> Point;
}
