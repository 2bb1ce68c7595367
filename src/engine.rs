//! Core rendering engine.
//!
//! The [`Engine`] struct is the frame orchestrator. It owns the color and
//! depth buffers and the projection, clears once per frame, and runs the
//! pipeline for each [`Model`] in caller-chosen order against an explicit
//! [`Scene`] snapshot.

use crate::camera::Camera;
use crate::colors;
use crate::light::Light;
use crate::math::vec3::Vec3;
use crate::model::Model;
use crate::projection::Projection;
use crate::render::{draw_mesh, DrawStats, FrameContext, Renderer};

/// Per-frame state the pipeline reads but never mutates.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    pub camera: Camera,
    pub lights: Vec<Light>,
}

impl Scene {
    pub fn new(camera: Camera, lights: Vec<Light>) -> Self {
        Self { camera, lights }
    }
}

/// What the color buffer is reset to at the start of each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Background {
    Solid(u32),
    /// Vertical gradient from the top row to the bottom row.
    Gradient { top: Vec3, bottom: Vec3 },
}

impl Default for Background {
    fn default() -> Self {
        Background::Gradient {
            top: colors::SKY_TOP,
            bottom: colors::SKY_BOTTOM,
        }
    }
}

/// Totals for one rendered frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub models: usize,
    pub draw: DrawStats,
}

pub struct Engine {
    renderer: Renderer,
    projection: Projection,
    background: Background,
}

impl Engine {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            renderer: Renderer::new(width, height),
            projection: Projection::for_viewport(width, height),
            background: Background::default(),
        }
    }

    pub fn width(&self) -> u32 {
        self.renderer.width()
    }

    pub fn height(&self) -> u32 {
        self.renderer.height()
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Replaces the projection. Its aspect ratio is kept in sync with the
    /// viewport on the next [`Engine::resize`].
    pub fn set_projection(&mut self, projection: Projection) {
        self.projection = projection;
    }

    pub fn background(&self) -> Background {
        self.background
    }

    pub fn set_background(&mut self, background: Background) {
        self.background = background;
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.renderer.resize(width, height);
        self.projection.set_viewport(width, height);
        log::debug!("viewport resized to {}x{}", width, height);
    }

    /// Clears color to the background and depth to the far plane.
    pub fn begin_frame(&mut self) {
        match self.background {
            Background::Solid(color) => self.renderer.clear(color),
            Background::Gradient { top, bottom } => self.renderer.clear_gradient(top, bottom),
        }
    }

    /// Draws one model into the current frame without clearing.
    pub fn draw(&mut self, scene: &Scene, model: &Model) -> DrawStats {
        let frame = FrameContext::new(&scene.camera, &self.projection, &scene.lights);
        draw_mesh(&mut self.renderer.as_framebuffer(), &frame, &model.draw_call())
    }

    /// Renders a full frame: clear, then every model in order.
    pub fn render(&mut self, scene: &Scene, models: &[Model]) -> FrameStats {
        self.begin_frame();

        let frame = FrameContext::new(&scene.camera, &self.projection, &scene.lights);
        let mut buffer = self.renderer.as_framebuffer();
        let mut stats = FrameStats::default();
        for model in models {
            stats.draw += draw_mesh(&mut buffer, &frame, &model.draw_call());
            stats.models += 1;
        }

        log::debug!(
            "frame: {} models, {} faces ({} culled, {} clipped away), {} triangles, {} pixels",
            stats.models,
            stats.draw.faces,
            stats.draw.culled,
            stats.draw.clipped_away,
            stats.draw.triangles,
            stats.draw.pixels
        );
        stats
    }

    /// Packed ARGB8888 pixels of the last frame.
    pub fn pixels(&self) -> &[u32] {
        self.renderer.pixels()
    }

    /// Returns the rendered frame as bytes (ARGB8888 format)
    pub fn frame_buffer(&self) -> &[u8] {
        self.renderer.as_bytes()
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }
}
