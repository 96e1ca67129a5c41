//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use dialogs::canvas::{Canvas, Shadow};
use dialogs::color::Color;
use dialogs::panel::{Panel, PanelId};
use dialogs::point::Point;
use dialogs::scene::{Scene, SceneStyle};

/// A call a panel received from the scene
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Resize(PanelId, f64, f64),
    Down(PanelId, Point),
    Move(PanelId, Point),
    Up(PanelId),
    Animate(PanelId),
}

pub type CallLog = Rc<RefCell<Vec<Call>>>;

/// Panel that hits inside a fixed square and logs every call
pub struct ScriptedPanel {
    id: PanelId,
    origin: Point,
    size: f64,
    anchor: Point,
    dragging: bool,
    log: CallLog,
}

impl ScriptedPanel {
    pub fn new(id: usize, origin: Point, size: f64, log: &CallLog) -> Self {
        Self {
            id: PanelId(id),
            origin,
            size,
            anchor: Point::new(origin.x + size / 2.0, origin.y + size / 2.0),
            dragging: false,
            log: Rc::clone(log),
        }
    }
}

impl Panel for ScriptedPanel {
    fn id(&self) -> PanelId {
        self.id
    }

    fn resize(&mut self, stage_width: f64, stage_height: f64) {
        self.log
            .borrow_mut()
            .push(Call::Resize(self.id, stage_width, stage_height));
    }

    fn down(&mut self, point: Point) -> bool {
        self.log.borrow_mut().push(Call::Down(self.id, point));
        self.dragging = point.collide(self.origin, self.size, self.size);
        self.dragging
    }

    fn pointer_move(&mut self, point: Point) {
        self.log.borrow_mut().push(Call::Move(self.id, point));
    }

    fn up(&mut self) {
        self.log.borrow_mut().push(Call::Up(self.id));
        self.dragging = false;
    }

    fn animate(&mut self, _canvas: &mut dyn Canvas) {
        self.log.borrow_mut().push(Call::Animate(self.id));
    }

    fn center_pos(&self) -> Point {
        self.anchor
    }
}

/// Three separated panels A(0), B(1), C(2) in order [A, B, C]
///
/// A covers (0,0)-(100,100), B (200,0)-(300,100), C (400,0)-(500,100).
pub fn abc_scene() -> (Scene, CallLog) {
    let log: CallLog = Rc::default();
    let panels: Vec<Box<dyn Panel>> = (0..3)
        .map(|i| {
            Box::new(ScriptedPanel::new(
                i,
                Point::new(i as f64 * 200.0, 0.0),
                100.0,
                &log,
            )) as Box<dyn Panel>
        })
        .collect();
    let scene = Scene::new(panels, SceneStyle::default()).expect("non-empty scene");
    (scene, log)
}

/// Three panels stacked on the same square (0,0)-(100,100)
pub fn stacked_scene() -> (Scene, CallLog) {
    let log: CallLog = Rc::default();
    let panels: Vec<Box<dyn Panel>> = (0..3)
        .map(|i| Box::new(ScriptedPanel::new(i, Point::ZERO, 100.0, &log)) as Box<dyn Panel>)
        .collect();
    let scene = Scene::new(panels, SceneStyle::default()).expect("non-empty scene");
    (scene, log)
}

pub fn ids(raw: &[usize]) -> Vec<PanelId> {
    raw.iter().map(|&i| PanelId(i)).collect()
}

/// Drain and return everything logged so far
pub fn take_calls(log: &CallLog) -> Vec<Call> {
    std::mem::take(&mut *log.borrow_mut())
}

/// A drawing operation captured by `RecordingCanvas`
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Clear(f64, f64, f64, f64),
    Circle(Point, f64, Color),
    Line(Point, Point, Color),
    Quad([Point; 4], Color),
    LineWidth(f64),
    Shadow(Option<Shadow>),
}

#[derive(Debug, Default)]
pub struct RecordingCanvas {
    pub ops: Vec<Op>,
}

impl RecordingCanvas {
    pub fn circles(&self) -> Vec<(Point, f64, Color)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Circle(c, r, color) => Some((*c, *r, *color)),
                _ => None,
            })
            .collect()
    }

    pub fn lines(&self) -> Vec<(Point, Point, Color)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Line(a, b, color) => Some((*a, *b, *color)),
                _ => None,
            })
            .collect()
    }

    pub fn quads(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, Op::Quad(..)))
            .count()
    }
}

impl Canvas for RecordingCanvas {
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ops.push(Op::Clear(x, y, width, height));
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Color) {
        self.ops.push(Op::Circle(center, radius, color));
    }

    fn stroke_line(&mut self, from: Point, to: Point, color: Color) {
        self.ops.push(Op::Line(from, to, color));
    }

    fn fill_quad(&mut self, corners: [Point; 4], color: Color) {
        self.ops.push(Op::Quad(corners, color));
    }

    fn set_line_width(&mut self, width: f64) {
        self.ops.push(Op::LineWidth(width));
    }

    fn set_shadow(&mut self, shadow: Option<Shadow>) {
        self.ops.push(Op::Shadow(shadow));
    }
}
