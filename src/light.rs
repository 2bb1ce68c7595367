//! Lighting types for the renderer.

use crate::math::vec3::Vec3;

/// Constant attenuation term shared by every point light.
pub const POINT_CONSTANT_ATTENUATION: f32 = 1.0;
pub const DEFAULT_LINEAR_ATTENUATION: f32 = 0.09;
pub const DEFAULT_QUADRATIC_ATTENUATION: f32 = 0.032;

/// A light that illuminates the scene uniformly from one direction.
///
/// Directional lights are ideal for simulating distant light sources like the sun,
/// where all rays are effectively parallel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    /// The normalized direction the light travels (not where it comes from).
    pub direction: Vec3,
    /// Points back toward the light, `-direction`.
    pub inverse_direction: Vec3,
    pub color: Vec3,
    pub intensity: f32,
}

/// A light radiating from a position, fading with distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub color: Vec3,
    pub intensity: f32,
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
}

impl PointLight {
    /// Attenuation factor `1 / (Kc + Kl·d + Kq·d²)` at `distance` from the light.
    #[inline]
    pub fn attenuation(&self, distance: f32) -> f32 {
        1.0 / (self.constant + self.linear * distance + self.quadratic * distance * distance)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    Directional(DirectionalLight),
    Point(PointLight),
}

impl Light {
    /// Create a directional light travelling along `direction`.
    /// The direction is normalized automatically.
    pub fn directional(direction: Vec3, color: Vec3, intensity: f32) -> Self {
        let direction = direction.normalize();
        Light::Directional(DirectionalLight {
            direction,
            inverse_direction: -direction,
            color,
            intensity,
        })
    }

    /// Create a point light with the default linear/quadratic falloff.
    pub fn point(position: Vec3, color: Vec3, intensity: f32) -> Self {
        Self::point_with_attenuation(
            position,
            color,
            intensity,
            DEFAULT_LINEAR_ATTENUATION,
            DEFAULT_QUADRATIC_ATTENUATION,
        )
    }

    pub fn point_with_attenuation(
        position: Vec3,
        color: Vec3,
        intensity: f32,
        linear: f32,
        quadratic: f32,
    ) -> Self {
        Light::Point(PointLight {
            position,
            color,
            intensity,
            constant: POINT_CONSTANT_ATTENUATION,
            linear,
            quadratic,
        })
    }

    /// Moves a point light; directional lights have no position and are left alone.
    pub fn set_position(&mut self, position: Vec3) {
        if let Light::Point(light) = self {
            light.position = position;
        }
    }
}

/// Demo path for animated point lights: a radius-2 circle around the Y axis
/// that bobs between heights 0.5 and 2.5.
pub fn orbit_position(time: f32) -> Vec3 {
    Vec3::new(time.sin() * 2.0, 1.5 + (time * 0.5).cos(), time.cos() * 2.0)
}
