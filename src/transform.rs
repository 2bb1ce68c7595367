//! Model transform for 3D objects.
//!
//! Provides a [`Transform`] struct with a fluent API for managing position,
//! rotation (Euler angles), and scale.

use serde::{Deserialize, Serialize};

use crate::math::{mat4::Mat4, vec3::Vec3};

/// A 3D transform with position, rotation (Euler angles), and scale.
///
/// Mutating methods return `&mut Self` for chaining:
///
/// ```ignore
/// transform
///     .set_position(Vec3::new(5.0, 2.0, 0.0))
///     .rotate_y(0.1)
///     .set_scale_uniform(2.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transform {
    position: [f32; 3],
    /// Euler angles in radians, applied X then Y then Z in the matrix product.
    rotation: [f32; 3],
    scale: [f32; 3],
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            rotation: [0.0; 3],
            scale: [1.0; 3],
        }
    }
}

impl Transform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(&self) -> Vec3 {
        self.position.into()
    }

    pub fn set_position(&mut self, position: Vec3) -> &mut Self {
        self.position = [position.x, position.y, position.z];
        self
    }

    pub fn translate(&mut self, delta: Vec3) -> &mut Self {
        let p = self.position() + delta;
        self.set_position(p)
    }

    pub fn rotation(&self) -> Vec3 {
        self.rotation.into()
    }

    /// Set the rotation (Euler angles in radians).
    pub fn set_rotation(&mut self, rotation: Vec3) -> &mut Self {
        self.rotation = [rotation.x, rotation.y, rotation.z];
        self
    }

    /// Rotate around the Y axis (yaw).
    pub fn rotate_y(&mut self, angle: f32) -> &mut Self {
        self.rotation[1] += angle;
        self
    }

    pub fn scale(&self) -> Vec3 {
        self.scale.into()
    }

    pub fn set_scale(&mut self, scale: Vec3) -> &mut Self {
        self.scale = [scale.x, scale.y, scale.z];
        self
    }

    /// Set uniform scale (same value for x, y, z).
    pub fn set_scale_uniform(&mut self, s: f32) -> &mut Self {
        self.scale = [s; 3];
        self
    }

    /// Generate the model matrix.
    ///
    /// Order: Translation * RotationX * RotationY * RotationZ * Scale
    /// (Scale applied first, then rotations, then translation)
    pub fn to_matrix(&self) -> Mat4 {
        let r = self.rotation();
        Mat4::translation(self.position())
            * Mat4::rotation_x(r.x)
            * Mat4::rotation_y(r.y)
            * Mat4::rotation_z(r.z)
            * Mat4::scaling(self.scale())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default() {
        let t = Transform::default();
        assert_eq!(t.position(), Vec3::ZERO);
        assert_eq!(t.rotation(), Vec3::ZERO);
        assert_eq!(t.scale(), Vec3::ONE);
    }

    #[test]
    fn test_fluent_api() {
        let mut t = Transform::new();
        t.set_position(Vec3::new(1.0, 2.0, 3.0))
            .rotate_y(0.5)
            .set_scale_uniform(2.0);

        assert_eq!(t.position(), Vec3::new(1.0, 2.0, 3.0));
        assert_relative_eq!(t.rotation().y, 0.5);
        assert_eq!(t.scale(), Vec3::splat(2.0));
    }

    #[test]
    fn test_to_matrix_identity() {
        assert_eq!(Transform::default().to_matrix(), Mat4::identity());
    }

    #[test]
    fn test_scale_then_translate() {
        let mut t = Transform::new();
        t.set_position(Vec3::new(0.0, 1.0, 0.0)).set_scale_uniform(3.0);
        let p = t.to_matrix() * Vec3::new(1.0, 0.0, 0.0);
        assert_relative_eq!(p.x, 3.0);
        assert_relative_eq!(p.y, 1.0);
        assert_relative_eq!(p.w, 1.0);
    }

    #[test]
    fn test_deserializes_partial_ron() {
        let t: Transform = ron::from_str("(position: (0.0, -1.0, 0.0))").unwrap();
        assert_eq!(t.position(), Vec3::new(0.0, -1.0, 0.0));
        assert_eq!(t.scale(), Vec3::ONE);
    }
}
