//! Per-vertex records flowing through clipping, screen mapping and rasterization.

use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;
use crate::math::vec4::Vec4;

/// A vertex as it moves through the pipeline.
///
/// `position` is rewritten in place as the stages advance: it holds clip-space
/// xyz after assembly, then screen-space x/y plus NDC depth after screen mapping.
/// `clip_w` keeps the undivided w throughout. `inv_w` is zero until screen
/// mapping assigns `1 / clip_w`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub clip_w: f32,
    pub inv_w: f32,
    pub texcoord: Vec2,
    /// World-space shading normal; not necessarily unit length.
    pub normal: Vec3,
    pub world_position: Vec3,
}

impl Vertex {
    pub fn from_clip(clip: Vec4, texcoord: Vec2, normal: Vec3, world_position: Vec3) -> Self {
        Self {
            position: clip.xyz(),
            clip_w: clip.w,
            inv_w: 0.0,
            texcoord,
            normal,
            world_position,
        }
    }

    /// Attribute-wise linear interpolation in clip space.
    ///
    /// The normal is renormalized. `inv_w` is left for screen mapping to fill in.
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            position: self.position.lerp(other.position, t),
            clip_w: self.clip_w + (other.clip_w - self.clip_w) * t,
            inv_w: 0.0,
            texcoord: self.texcoord.lerp(other.texcoord, t),
            normal: self.normal.lerp(other.normal, t).normalize(),
            world_position: self.world_position.lerp(other.world_position, t),
        }
    }
}

/// Three vertices in a fixed order.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    pub fn new(vertices: [Vertex; 3]) -> Self {
        Self { vertices }
    }

    /// Screen-space positions of the three vertices.
    pub fn positions(&self) -> [Vec3; 3] {
        self.vertices.map(|v| v.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn lerp_interpolates_every_attribute() {
        let a = Vertex::from_clip(
            Vec4::new(0.0, 0.0, 0.0, 1.0),
            Vec2::new(0.0, 0.0),
            Vec3::RIGHT,
            Vec3::ZERO,
        );
        let b = Vertex::from_clip(
            Vec4::new(2.0, 4.0, 6.0, 3.0),
            Vec2::new(1.0, 1.0),
            Vec3::UP,
            Vec3::new(10.0, 0.0, 0.0),
        );
        let mid = a.lerp(&b, 0.5);

        assert_eq!(mid.position, Vec3::new(1.0, 2.0, 3.0));
        assert_relative_eq!(mid.clip_w, 2.0);
        assert_eq!(mid.texcoord, Vec2::new(0.5, 0.5));
        assert_relative_eq!(mid.normal.length(), 1.0, epsilon = 1e-6);
        assert_relative_eq!(mid.normal.x, mid.normal.y);
        assert_eq!(mid.world_position, Vec3::new(5.0, 0.0, 0.0));
    }
}
