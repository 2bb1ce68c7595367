//! Owned frame storage.
//!
//! Provides the [`Renderer`] struct which owns the color and depth buffers
//! and handles per-frame clearing.

use super::framebuffer::{FrameBuffer, DEPTH_CLEAR};
use crate::colors::{self, color_to_packed};
use crate::math::vec3::Vec3;

pub struct Renderer {
    color_buffer: Vec<u32>,
    depth_buffer: Vec<f32>,
    width: u32,
    height: u32,
}

impl Renderer {
    pub fn new(width: u32, height: u32) -> Self {
        let size = (width * height) as usize;
        Self {
            color_buffer: vec![colors::BACKGROUND; size],
            depth_buffer: vec![DEPTH_CLEAR; size],
            width,
            height,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        let size = (width * height) as usize;
        self.color_buffer = vec![colors::BACKGROUND; size];
        self.depth_buffer = vec![DEPTH_CLEAR; size];
        self.width = width;
        self.height = height;
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Fill the color buffer with `color` and reset depth to the far plane.
    pub fn clear(&mut self, color: u32) {
        self.color_buffer.fill(color);
        self.clear_depth();
    }

    /// Fill each row with a vertical gradient from `top` towards `bottom`
    /// (row `y` uses `t = y / height`), and reset depth to the far plane.
    pub fn clear_gradient(&mut self, top: Vec3, bottom: Vec3) {
        let width = self.width as usize;
        let span = self.height.max(1) as f32;
        for (y, row) in self.color_buffer.chunks_exact_mut(width.max(1)).enumerate() {
            row.fill(color_to_packed(top.lerp(bottom, y as f32 / span)));
        }
        self.clear_depth();
    }

    #[inline]
    pub fn clear_depth(&mut self) {
        self.depth_buffer.fill(DEPTH_CLEAR);
    }

    /// Packed ARGB8888 pixels, row-major from the top-left corner.
    pub fn pixels(&self) -> &[u32] {
        &self.color_buffer
    }

    pub fn depths(&self) -> &[f32] {
        &self.depth_buffer
    }

    /// The color buffer as raw bytes, in native endianness, for texture upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.color_buffer)
    }

    /// Get a mutable FrameBuffer view into the color and depth buffers.
    pub fn as_framebuffer(&mut self) -> FrameBuffer<'_> {
        FrameBuffer::new(
            &mut self.color_buffer,
            &mut self.depth_buffer,
            self.width,
            self.height,
        )
    }
}
