//! Scene - ordered panels, single-pointer drag ownership and the frame step
//!
//! `order` is the paint order: index 0 is painted first (backmost) and the last
//! slot is painted last (frontmost). Picking a panel up moves it to the last
//! slot. Pointer move/up are always routed to the last slot, which is the
//! panel that was picked up for as long as a drag lasts.
//!
//! The scene never fails: a pointer-down that hits nothing, or a move/up with
//! no drag in progress, are ordinary outcomes.

use anyhow::{ensure, Result};

use crate::canvas::{Canvas, Shadow};
use crate::color::Color;
use crate::config::AppConfig;
use crate::panel::{DialogPanel, Panel, PanelId};
use crate::point::Point;

/// Drawing parameters owned by the scene rather than by any panel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneStyle {
    /// Drag guide colour
    pub accent: Color,
    /// Radius of the guide's end circles
    pub guide_radius: f64,
    /// Default stroke width
    pub line_width: f64,
    /// Default drop shadow for filled shapes
    pub shadow: Option<Shadow>,
}

impl Default for SceneStyle {
    fn default() -> Self {
        Self {
            accent: Color::rgb(0xFF, 0x43, 0x38),
            guide_radius: 8.0,
            line_width: 2.0,
            shadow: Some(Shadow::default()),
        }
    }
}

/// Panels in paint order plus the single drag the pointer currently owns
pub struct Scene {
    order: Vec<Box<dyn Panel>>,
    active_drag: Option<PanelId>,
    pointer: Point,
    stage_width: f64,
    stage_height: f64,
    style: SceneStyle,
}

impl Scene {
    /// Build a scene from panels listed back to front
    pub fn new(panels: Vec<Box<dyn Panel>>, style: SceneStyle) -> Result<Self> {
        ensure!(!panels.is_empty(), "a scene needs at least one panel");
        for (i, panel) in panels.iter().enumerate() {
            ensure!(
                panels[..i].iter().all(|other| other.id() != panel.id()),
                "duplicate {} in scene",
                panel.id()
            );
        }

        Ok(Self {
            order: panels,
            active_drag: None,
            pointer: Point::ZERO,
            stage_width: 0.0,
            stage_height: 0.0,
            style,
        })
    }

    /// Build the application's dialog panels from configuration
    ///
    /// Without a configured seed, placement is random per run.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let base_seed = config.seed.unwrap_or_else(rand::random);
        let panels = (0..config.panel_count)
            .map(|i| {
                let panel = DialogPanel::new(
                    PanelId(i),
                    config.dialog_style(i),
                    base_seed.wrapping_add(i as u64),
                );
                Box::new(panel) as Box<dyn Panel>
            })
            .collect();

        tracing::info!(
            panels = config.panel_count,
            seed = base_seed,
            "Creating scene"
        );
        Self::new(panels, config.scene_style())
    }

    pub fn style(&self) -> &SceneStyle {
        &self.style
    }

    pub fn stage_size(&self) -> (f64, f64) {
        (self.stage_width, self.stage_height)
    }

    /// Last known pointer position
    pub fn pointer(&self) -> Point {
        self.pointer
    }

    /// Panel currently being dragged, if any
    pub fn active_drag(&self) -> Option<PanelId> {
        self.active_drag
    }

    pub fn is_dragging(&self) -> bool {
        self.active_drag.is_some()
    }

    /// Panel ids in paint order (back to front)
    pub fn order(&self) -> Vec<PanelId> {
        self.order.iter().map(|panel| panel.id()).collect()
    }

    pub fn panels(&self) -> impl Iterator<Item = &dyn Panel> {
        self.order.iter().map(|panel| panel.as_ref())
    }

    pub fn panel(&self, id: PanelId) -> Option<&dyn Panel> {
        self.panels().find(|panel| panel.id() == id)
    }

    /// The panel in the last slot
    pub fn frontmost(&self) -> Option<&dyn Panel> {
        self.order.last().map(|panel| panel.as_ref())
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.stage_width = width;
        self.stage_height = height;
        for panel in &mut self.order {
            panel.resize(width, height);
        }
        tracing::debug!(width, height, "Stage resized");
    }

    /// Hit-test front to back; the first panel hit starts a drag and is
    /// promoted to the last slot. Returns the panel picked up.
    pub fn pointer_down(&mut self, x: f64, y: f64) -> Option<PanelId> {
        self.pointer = Point::new(x, y);

        let pointer = self.pointer;
        let index = self
            .order
            .iter_mut()
            .rposition(|panel| panel.down(pointer))?;

        let panel = self.order.remove(index);
        let id = panel.id();
        self.order.push(panel);
        self.active_drag = Some(id);

        tracing::debug!(panel = %id, from_slot = index, x, y, "Drag started");
        Some(id)
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.pointer = Point::new(x, y);
        let pointer = self.pointer;
        if let Some(panel) = self.order.last_mut() {
            panel.pointer_move(pointer);
        }
    }

    pub fn pointer_up(&mut self) {
        if let Some(id) = self.active_drag.take() {
            tracing::debug!(panel = %id, "Drag ended");
        }
        if let Some(panel) = self.order.last_mut() {
            panel.up();
        }
    }

    /// Reset canvas state the frame relies on (line width, drop shadow)
    pub fn apply_canvas_defaults(&self, canvas: &mut dyn Canvas) {
        canvas.set_line_width(self.style.line_width);
        canvas.set_shadow(self.style.shadow);
    }

    /// Draw one frame: clear the stage, draw every panel back to front, then
    /// the drag guide while a drag is active.
    pub fn frame(&mut self, canvas: &mut dyn Canvas) {
        canvas.clear_rect(0.0, 0.0, self.stage_width, self.stage_height);
        for panel in &mut self.order {
            panel.animate(canvas);
        }

        let Some(anchor) = self
            .active_drag
            .and_then(|id| self.panel(id))
            .map(|panel| panel.center_pos())
        else {
            return;
        };

        let accent = self.style.accent;
        let radius = self.style.guide_radius;
        canvas.fill_circle(self.pointer, radius, accent);
        canvas.fill_circle(anchor, radius, accent);
        canvas.stroke_line(self.pointer, anchor, accent);
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("order", &self.order())
            .field("active_drag", &self.active_drag)
            .field("pointer", &self.pointer)
            .field("stage", &(self.stage_width, self.stage_height))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Panel that hits inside a fixed box and counts calls
    struct BoxPanel {
        id: PanelId,
        origin: Point,
        size: f64,
        dragging: bool,
        moves: usize,
        ups: usize,
    }

    impl BoxPanel {
        fn boxed(id: usize, origin: Point, size: f64) -> Box<dyn Panel> {
            Box::new(Self {
                id: PanelId(id),
                origin,
                size,
                dragging: false,
                moves: 0,
                ups: 0,
            })
        }
    }

    impl Panel for BoxPanel {
        fn id(&self) -> PanelId {
            self.id
        }
        fn resize(&mut self, _stage_width: f64, _stage_height: f64) {}
        fn down(&mut self, point: Point) -> bool {
            self.dragging = point.collide(self.origin, self.size, self.size);
            self.dragging
        }
        fn pointer_move(&mut self, _point: Point) {
            self.moves += 1;
        }
        fn up(&mut self) {
            self.ups += 1;
            self.dragging = false;
        }
        fn animate(&mut self, _canvas: &mut dyn Canvas) {}
        fn center_pos(&self) -> Point {
            self.origin
        }
    }

    fn overlapping_scene() -> Scene {
        Scene::new(
            vec![
                BoxPanel::boxed(0, Point::new(0.0, 0.0), 100.0),
                BoxPanel::boxed(1, Point::new(50.0, 50.0), 100.0),
                BoxPanel::boxed(2, Point::new(300.0, 300.0), 100.0),
            ],
            SceneStyle::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_empty_scene_is_rejected() {
        assert!(Scene::new(Vec::new(), SceneStyle::default()).is_err());
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let panels = vec![
            BoxPanel::boxed(3, Point::ZERO, 10.0),
            BoxPanel::boxed(3, Point::ZERO, 10.0),
        ];
        assert!(Scene::new(panels, SceneStyle::default()).is_err());
    }

    #[test]
    fn test_overlap_goes_to_higher_slot() {
        let mut scene = overlapping_scene();
        assert_eq!(scene.pointer_down(75.0, 75.0), Some(PanelId(1)));
        assert_eq!(scene.order(), vec![PanelId(0), PanelId(2), PanelId(1)]);
    }

    #[test]
    fn test_promoted_panel_wins_next_overlap() {
        let mut scene = overlapping_scene();
        scene.pointer_down(10.0, 10.0);
        scene.pointer_up();
        assert_eq!(scene.order(), vec![PanelId(1), PanelId(2), PanelId(0)]);
        assert_eq!(scene.pointer_down(75.0, 75.0), Some(PanelId(0)));
    }

    #[test]
    fn test_miss_keeps_state() {
        let mut scene = overlapping_scene();
        assert_eq!(scene.pointer_down(250.0, 10.0), None);
        assert_eq!(scene.order(), vec![PanelId(0), PanelId(1), PanelId(2)]);
        assert!(!scene.is_dragging());
        assert_eq!(scene.pointer(), Point::new(250.0, 10.0));
    }

    #[test]
    fn test_up_clears_drag_and_is_idempotent() {
        let mut scene = overlapping_scene();
        scene.pointer_down(320.0, 320.0);
        assert_eq!(scene.active_drag(), Some(PanelId(2)));
        scene.pointer_up();
        let order = scene.order();
        scene.pointer_up();
        assert_eq!(scene.active_drag(), None);
        assert_eq!(scene.order(), order);
    }

    #[test]
    fn test_frontmost_is_last_slot() {
        let mut scene = overlapping_scene();
        assert_eq!(scene.frontmost().map(|p| p.id()), Some(PanelId(2)));
        scene.pointer_down(10.0, 10.0);
        assert_eq!(scene.frontmost().map(|p| p.id()), Some(PanelId(0)));
    }
}
