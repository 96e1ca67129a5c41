//! Dialog panel - a card that eases toward the pointer and swings while dragged
//!
//! Position follows a target with exponential easing (`follow_speed` per
//! frame). Horizontal velocity tilts the card up to `max_angle` degrees around
//! the point where it was grabbed, and grabbing off-centre adds a resting tilt
//! for as long as the drag lasts.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{Panel, PanelId};
use crate::canvas::{rotated_rect, Canvas};
use crate::color::Color;
use crate::point::Point;

/// Frame duration in milliseconds the velocity is normalised against
const FRAME_MS: f64 = 1000.0 / 60.0;

/// Geometry and motion tuning for a dialog panel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DialogStyle {
    pub width: f64,
    pub height: f64,
    pub color: Color,
    /// Fraction of the remaining distance covered per frame (0..=1)
    pub follow_speed: f64,
    /// Fraction of the remaining rotation covered per frame (0..=1)
    pub rotate_speed: f64,
    /// Maximum swing in degrees
    pub max_angle: f64,
}

impl Default for DialogStyle {
    fn default() -> Self {
        Self {
            width: 260.0,
            height: 260.0,
            color: Color::rgb(0xF4, 0xE5, 0x5A),
            follow_speed: 0.08,
            rotate_speed: 0.12,
            max_angle: 30.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DialogPanel {
    id: PanelId,
    style: DialogStyle,
    rng: StdRng,
    /// Top-left corner as currently drawn
    pos: Point,
    /// Where `pos` is easing toward
    target: Point,
    prev_pos: Point,
    /// `pos` at the moment the drag started
    start_pos: Point,
    /// Pointer location of the pointer-down that started the drag
    down_pos: Point,
    /// Grab point relative to `pos`; also the swing pivot
    grab: Point,
    center_pos: Point,
    rotation: f64,
    /// Grab position across the width, -0.5 (left edge) to 0.5 (right edge)
    side_value: f64,
    dragging: bool,
}

impl DialogPanel {
    /// Create a panel whose random placement is driven by `seed`
    pub fn new(id: PanelId, style: DialogStyle, seed: u64) -> Self {
        let grab = Point::new(style.width / 2.0, style.height / 2.0);
        Self {
            id,
            style,
            rng: StdRng::seed_from_u64(seed),
            pos: Point::ZERO,
            target: Point::ZERO,
            prev_pos: Point::ZERO,
            start_pos: Point::ZERO,
            down_pos: Point::ZERO,
            grab,
            center_pos: grab,
            rotation: 0.0,
            side_value: 0.0,
            dragging: false,
        }
    }

    /// Place the panel at an exact position, cancelling any easing
    pub fn with_position(mut self, pos: Point) -> Self {
        self.set_position(pos);
        self
    }

    fn set_position(&mut self, pos: Point) {
        self.pos = pos;
        self.target = pos;
        self.prev_pos = pos;
        self.center_pos = pos.add(self.grab);
    }

    pub fn style(&self) -> &DialogStyle {
        &self.style
    }

    pub fn position(&self) -> Point {
        self.pos
    }

    pub fn target(&self) -> Point {
        self.target
    }

    /// Current tilt in degrees
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Advance easing and swing by one frame
    fn step(&mut self) {
        let delta = self.target.subtract(self.pos).scale(self.style.follow_speed);
        self.pos = self.pos.add(delta);
        self.center_pos = self.pos.add(self.grab);

        let dx = self.pos.x - self.prev_pos.x;
        let speed = (dx.abs() / FRAME_MS).clamp(0.0, 1.0);
        let direction = if dx > 0.0 { 1.0 } else { -1.0 };
        let tilt = if self.dragging {
            self.side_value * self.style.max_angle
        } else {
            0.0
        };
        let goal = self.style.max_angle * speed * direction - tilt;
        self.rotation += (goal - self.rotation) * self.style.rotate_speed;

        self.prev_pos = self.pos;
    }
}

impl Panel for DialogPanel {
    fn id(&self) -> PanelId {
        self.id
    }

    fn resize(&mut self, stage_width: f64, stage_height: f64) {
        let max_x = (stage_width - self.style.width).max(0.0);
        let max_y = (stage_height - self.style.height).max(0.0);
        let pos = Point::new(self.rng.gen::<f64>() * max_x, self.rng.gen::<f64>() * max_y);
        self.set_position(pos);
        tracing::trace!(panel = %self.id, x = pos.x, y = pos.y, "placed");
    }

    fn down(&mut self, point: Point) -> bool {
        if !point.collide(self.pos, self.style.width, self.style.height) {
            return false;
        }

        self.dragging = true;
        self.start_pos = self.pos;
        self.down_pos = point;
        self.grab = point.subtract(self.pos);
        self.center_pos = point;
        self.side_value = if self.style.width > 0.0 {
            self.grab.x / self.style.width - 0.5
        } else {
            0.0
        };
        true
    }

    fn pointer_move(&mut self, point: Point) {
        if self.dragging {
            self.target = self.start_pos.add(point.subtract(self.down_pos));
        }
    }

    fn up(&mut self) {
        self.dragging = false;
    }

    fn animate(&mut self, canvas: &mut dyn Canvas) {
        self.step();
        let pivot = self.pos.add(self.grab);
        let corners = rotated_rect(
            pivot,
            self.grab,
            self.style.width,
            self.style.height,
            self.rotation,
        );
        canvas.fill_quad(corners, self.style.color);
    }

    fn center_pos(&self) -> Point {
        self.center_pos
    }
}
