//! Pointer input translation
//!
//! Maps mouse and touch input onto the scene's single pointer:
//! - Positions arrive in physical pixels and are divided by the scale factor
//! - The left mouse button drives down/up at the last cursor position
//! - The first finger to touch down owns the pointer until it lifts; other
//!   fingers are ignored

use winit::event::TouchPhase;

use dialogs::messages::Msg;

#[derive(Debug, Default)]
pub struct PointerTracker {
    /// Last cursor position in logical coordinates
    cursor: Option<(f64, f64)>,
    /// Touch id currently driving the pointer
    active_touch: Option<u64>,
}

impl PointerTracker {
    pub fn cursor_moved(&mut self, x: f64, y: f64, scale_factor: f64) -> Msg {
        let (x, y) = to_logical(x, y, scale_factor);
        self.cursor = Some((x, y));
        Msg::PointerMove { x, y }
    }

    pub fn cursor_left(&mut self) {
        self.cursor = None;
    }

    /// Left button press/release. A press before any cursor movement has no
    /// position and is dropped.
    pub fn left_button(&mut self, pressed: bool) -> Option<Msg> {
        if pressed {
            let (x, y) = self.cursor?;
            Some(Msg::PointerDown { x, y })
        } else {
            Some(Msg::PointerUp)
        }
    }

    pub fn touch(
        &mut self,
        id: u64,
        phase: TouchPhase,
        x: f64,
        y: f64,
        scale_factor: f64,
    ) -> Option<Msg> {
        let (x, y) = to_logical(x, y, scale_factor);
        match phase {
            TouchPhase::Started if self.active_touch.is_none() => {
                self.active_touch = Some(id);
                Some(Msg::PointerDown { x, y })
            }
            TouchPhase::Moved if self.active_touch == Some(id) => Some(Msg::PointerMove { x, y }),
            TouchPhase::Ended | TouchPhase::Cancelled if self.active_touch == Some(id) => {
                self.active_touch = None;
                Some(Msg::PointerUp)
            }
            _ => None,
        }
    }
}

fn to_logical(x: f64, y: f64, scale_factor: f64) -> (f64, f64) {
    if scale_factor > 0.0 {
        (x / scale_factor, y / scale_factor)
    } else {
        (x, y)
    }
}
