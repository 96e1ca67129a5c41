//! Drawing surface abstraction
//!
//! The scene and its panels draw through the [`Canvas`] trait rather than a
//! concrete pixel buffer. The window renderer and the screenshot tool use
//! [`crate::view::Frame`]; tests substitute a recording canvas.
//!
//! All coordinates are logical stage coordinates. Implementations apply the
//! device pixel ratio themselves.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::point::Point;

/// Drop shadow applied to filled shapes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shadow {
    #[serde(default)]
    pub offset_x: f64,
    #[serde(default = "default_shadow_offset_y")]
    pub offset_y: f64,
    #[serde(default = "default_shadow_blur")]
    pub blur: f64,
    #[serde(default = "default_shadow_color")]
    pub color: Color,
}

fn default_shadow_offset_y() -> f64 {
    3.0
}

fn default_shadow_blur() -> f64 {
    6.0
}

fn default_shadow_color() -> Color {
    Color::rgba(0, 0, 0, 0x80)
}

impl Default for Shadow {
    fn default() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: default_shadow_offset_y(),
            blur: default_shadow_blur(),
            color: default_shadow_color(),
        }
    }
}

/// The capabilities the scene and panels need from a drawing surface
pub trait Canvas {
    /// Reset a rectangle to the surface background
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    /// Fill a circle (casts the current shadow, if any)
    fn fill_circle(&mut self, center: Point, radius: f64, color: Color);

    /// Stroke a straight line using the current line width
    fn stroke_line(&mut self, from: Point, to: Point, color: Color);

    /// Fill a convex quadrilateral given its corners in order (casts the
    /// current shadow, if any)
    fn fill_quad(&mut self, corners: [Point; 4], color: Color);

    fn set_line_width(&mut self, width: f64);

    fn set_shadow(&mut self, shadow: Option<Shadow>);
}

/// Corners of a `width` x `height` rectangle whose top-left corner sits at
/// `-offset` relative to `pivot`, rotated by `degrees` (clockwise, y down)
/// around `pivot`.
pub fn rotated_rect(
    pivot: Point,
    offset: Point,
    width: f64,
    height: f64,
    degrees: f64,
) -> [Point; 4] {
    let (sin, cos) = degrees.to_radians().sin_cos();
    let local = [
        Point::new(-offset.x, -offset.y),
        Point::new(width - offset.x, -offset.y),
        Point::new(width - offset.x, height - offset.y),
        Point::new(-offset.x, height - offset.y),
    ];
    local.map(|p| Point::new(pivot.x + p.x * cos - p.y * sin, pivot.y + p.x * sin + p.y * cos))
}
