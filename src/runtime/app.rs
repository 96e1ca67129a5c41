use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::{Context as _, Result};
use softbuffer::Context;
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::window::{Window, WindowId};

use dialogs::config::AppConfig;
use dialogs::messages::Msg;
use dialogs::perf::{FramePacer, FrameSchedule, FrameStats, FRAME_INTERVAL};
use dialogs::scene::Scene;
use dialogs::update::update;
use dialogs::view::Renderer;

use super::input::PointerTracker;

const STATS_LOG_INTERVAL: Duration = Duration::from_secs(1);

pub struct App {
    scene: Scene,
    config: AppConfig,
    renderer: Option<Renderer>,
    window: Option<Rc<Window>>,
    context: Option<Context<Rc<Window>>>,
    scale_factor: f64,
    pointer: PointerTracker,
    stats: FrameStats,
    pacer: FramePacer,
    last_stats_log: Instant,
}

impl App {
    pub fn new(scene: Scene, config: AppConfig) -> Self {
        Self {
            scene,
            config,
            renderer: None,
            window: None,
            context: None,
            scale_factor: 1.0,
            pointer: PointerTracker::default(),
            stats: FrameStats::default(),
            pacer: FramePacer::new(FRAME_INTERVAL, Instant::now()),
            last_stats_log: Instant::now(),
        }
    }

    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let window_attributes = Window::default_attributes()
            .with_title("Dialogs")
            .with_inner_size(LogicalSize::new(
                self.config.window_width,
                self.config.window_height,
            ));

        let window = Rc::new(
            event_loop
                .create_window(window_attributes)
                .context("Failed to create window")?,
        );
        let context = Context::new(Rc::clone(&window))
            .map_err(|e| anyhow::anyhow!("Failed to create softbuffer context: {}", e))?;
        let renderer = Renderer::new(Rc::clone(&window), &context, self.config.background)?;

        self.scale_factor = window.scale_factor();
        let size = window.inner_size();
        self.renderer = Some(renderer);
        self.window = Some(Rc::clone(&window));
        self.context = Some(context);

        // Initial layout; the first frame is requested from about_to_wait
        self.resize(size);
        Ok(())
    }

    fn resize(&mut self, size: PhysicalSize<u32>) {
        if let Some(renderer) = &mut self.renderer {
            if let Err(e) = renderer.resize(size.width, size.height) {
                tracing::error!("Resize error: {}", e);
            }
        }
        let logical = size.to_logical::<f64>(self.scale_factor);
        update(
            &mut self.scene,
            Msg::Resize {
                width: logical.width,
                height: logical.height,
            },
        );
    }

    fn handle_event(&mut self, event: &WindowEvent) {
        let msg = match event {
            WindowEvent::Resized(size) => {
                self.resize(*size);
                None
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.scale_factor = *scale_factor;
                if let Some(renderer) = &mut self.renderer {
                    renderer.set_scale_factor(*scale_factor);
                }
                None
            }
            WindowEvent::CursorMoved { position, .. } => Some(self.pointer.cursor_moved(
                position.x,
                position.y,
                self.scale_factor,
            )),
            WindowEvent::CursorLeft { .. } => {
                self.pointer.cursor_left();
                None
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => self.pointer.left_button(*state == ElementState::Pressed),
            WindowEvent::Touch(touch) => self.pointer.touch(
                touch.id,
                touch.phase,
                touch.location.x,
                touch.location.y,
                self.scale_factor,
            ),
            WindowEvent::RedrawRequested => {
                self.render();
                None
            }
            _ => None,
        };

        if let Some(msg) = msg {
            update(&mut self.scene, msg);
        }
    }

    fn render(&mut self) {
        self.pacer.frame_started(Instant::now());
        self.stats.start_frame();
        if let Some(renderer) = &mut self.renderer {
            if let Err(e) = renderer.render(&mut self.scene) {
                tracing::error!("Render error: {}", e);
            }
        }
        self.stats.record_frame_time();
        tracing::trace!(
            render_us = self.stats.last_frame_time.as_micros() as u64,
            "Frame"
        );

        if self.last_stats_log.elapsed() >= STATS_LOG_INTERVAL {
            self.last_stats_log = Instant::now();
            tracing::debug!(
                fps = self.stats.fps(),
                frames = self.stats.total_frames,
                "Render stats"
            );
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.init_window(event_loop) {
                tracing::error!("Failed to initialize window: {:#}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(window) = &self.window else {
            return;
        };
        if window_id != window.id() {
            return;
        }

        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }

        self.handle_event(&event);
    }

    /// The frame loop never stops: once the next frame is due a redraw is
    /// requested, otherwise the loop sleeps until the deadline.
    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(window) = &self.window else {
            event_loop.set_control_flow(ControlFlow::Wait);
            return;
        };

        match self.pacer.schedule(Instant::now()) {
            FrameSchedule::Redraw { retry_at } => {
                window.request_redraw();
                event_loop.set_control_flow(ControlFlow::WaitUntil(retry_at));
            }
            FrameSchedule::WaitUntil(deadline) => {
                event_loop.set_control_flow(ControlFlow::WaitUntil(deadline));
            }
        }
    }
}
