//! Perspective projection parameters.
//!
//! The [`Projection`] struct is the single source of truth for all perspective
//! projection parameters (FOV, aspect ratio, near/far planes).

use crate::math::mat4::Mat4;

pub const DEFAULT_FOV_Y_DEGREES: f32 = 45.0;
pub const DEFAULT_Z_NEAR: f32 = 0.1;
pub const DEFAULT_Z_FAR: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view in radians.
    fov_y: f32,
    /// Aspect ratio (width / height).
    aspect_ratio: f32,
    z_near: f32,
    z_far: f32,
}

impl Default for Projection {
    fn default() -> Self {
        Self::from_degrees(
            DEFAULT_FOV_Y_DEGREES,
            4.0 / 3.0,
            DEFAULT_Z_NEAR,
            DEFAULT_Z_FAR,
        )
    }
}

impl Projection {
    /// Creates a new projection with the given parameters.
    ///
    /// # Arguments
    /// * `fov_y` - Vertical field of view in radians
    /// * `aspect_ratio` - Width divided by height
    /// * `z_near` - Near clipping plane distance (must be > 0)
    /// * `z_far` - Far clipping plane distance (must be > z_near)
    pub fn new(fov_y: f32, aspect_ratio: f32, z_near: f32, z_far: f32) -> Self {
        Self {
            fov_y,
            aspect_ratio,
            z_near,
            z_far,
        }
    }

    /// Creates a projection from degrees instead of radians.
    pub fn from_degrees(fov_y_degrees: f32, aspect_ratio: f32, z_near: f32, z_far: f32) -> Self {
        Self::new(fov_y_degrees.to_radians(), aspect_ratio, z_near, z_far)
    }

    /// The default projection for a `width` x `height` viewport.
    pub fn for_viewport(width: u32, height: u32) -> Self {
        let mut projection = Self::default();
        projection.set_viewport(width, height);
        projection
    }

    pub fn fov_y(&self) -> f32 {
        self.fov_y
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    pub fn z_near(&self) -> f32 {
        self.z_near
    }

    pub fn z_far(&self) -> f32 {
        self.z_far
    }

    /// Updates the aspect ratio from viewport dimensions (typically on resize).
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect_ratio = width as f32 / height.max(1) as f32;
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect_ratio, self.z_near, self.z_far)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_4;

    #[test]
    fn from_degrees_converts_correctly() {
        let proj = Projection::from_degrees(45.0, 1.0, 0.1, 100.0);
        assert_relative_eq!(proj.fov_y(), FRAC_PI_4, epsilon = 1e-6);
    }

    #[test]
    fn viewport_sets_aspect_ratio() {
        let proj = Projection::for_viewport(800, 600);
        assert_relative_eq!(proj.aspect_ratio(), 800.0 / 600.0);
        assert_relative_eq!(proj.z_near(), DEFAULT_Z_NEAR);
        assert_relative_eq!(proj.z_far(), DEFAULT_Z_FAR);
    }
}
