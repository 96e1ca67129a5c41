//! View module - software rendering of the scene
//!
//! `Frame` implements the canvas on top of a pixel buffer; `Renderer` owns the
//! window surface and presents one frame per call.

pub mod frame;

pub use frame::{blend_colors, Frame};

use anyhow::Result;
use softbuffer::Surface;
use std::num::NonZeroU32;
use std::rc::Rc;
use winit::window::Window;

use crate::color::Color;
use crate::scene::Scene;

pub struct Renderer {
    surface: Surface<Rc<Window>, Rc<Window>>,
    /// Softbuffer doesn't guarantee buffer contents are preserved between
    /// frames, so we draw into our own buffer and copy on present.
    back_buffer: Vec<u32>,
    width: u32,
    height: u32,
    scale_factor: f64,
    background: Color,
}

impl Renderer {
    /// Create a new renderer, automatically detecting the window's scale factor
    pub fn new(
        window: Rc<Window>,
        context: &softbuffer::Context<Rc<Window>>,
        background: Color,
    ) -> Result<Self> {
        let scale_factor = window.scale_factor();
        let size = window.inner_size();

        let surface = Surface::new(context, Rc::clone(&window))
            .map_err(|e| anyhow::anyhow!("Failed to create surface: {}", e))?;

        let mut renderer = Self {
            surface,
            back_buffer: Vec::new(),
            width: 0,
            height: 0,
            scale_factor,
            background,
        };
        renderer.resize(size.width, size.height)?;
        Ok(renderer)
    }

    pub fn set_scale_factor(&mut self, scale_factor: f64) {
        self.scale_factor = scale_factor;
    }

    /// Resize surface and back buffer to a new physical size
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        let width = width.max(1);
        let height = height.max(1);
        if width == self.width && height == self.height {
            return Ok(());
        }

        self.width = width;
        self.height = height;
        self.back_buffer
            .resize((width as usize) * (height as usize), 0);

        // Both values are clamped to at least 1 above
        let (Some(w), Some(h)) = (NonZeroU32::new(width), NonZeroU32::new(height)) else {
            return Ok(());
        };
        self.surface
            .resize(w, h)
            .map_err(|e| anyhow::anyhow!("Failed to resize surface: {}", e))?;

        tracing::debug!(width, height, scale = self.scale_factor, "Surface resized");
        Ok(())
    }

    /// Draw one frame of the scene and present it
    pub fn render(&mut self, scene: &mut Scene) -> Result<()> {
        {
            let mut frame = Frame::new(
                &mut self.back_buffer,
                self.width as usize,
                self.height as usize,
            )
            .with_scale(self.scale_factor)
            .with_background(self.background);
            scene.apply_canvas_defaults(&mut frame);
            scene.frame(&mut frame);
        }

        let mut buffer = self
            .surface
            .buffer_mut()
            .map_err(|e| anyhow::anyhow!("Failed to get surface buffer: {}", e))?;
        if buffer.len() == self.back_buffer.len() {
            buffer.copy_from_slice(&self.back_buffer);
        } else {
            // Surface and back buffer disagree mid-resize; skip this frame
            tracing::trace!("Buffer size mismatch, skipping present");
            return Ok(());
        }
        buffer
            .present()
            .map_err(|e| anyhow::anyhow!("Failed to present buffer: {}", e))?;

        Ok(())
    }
}
