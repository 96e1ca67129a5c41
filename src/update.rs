//! Update function for the Elm-style architecture

use crate::messages::Msg;
use crate::scene::Scene;

/// Apply a message to the scene
pub fn update(scene: &mut Scene, msg: Msg) {
    match msg {
        Msg::Resize { width, height } => scene.resize(width, height),
        Msg::PointerDown { x, y } => {
            scene.pointer_down(x, y);
        }
        Msg::PointerMove { x, y } => scene.pointer_move(x, y),
        Msg::PointerUp => scene.pointer_up(),
    }
}
