//! Edge-function triangle rasterization.
//!
//! Triangles arrive in screen space (see [`super::screen`]). For each pixel in
//! the clamped bounding box the rasterizer:
//!
//! 1. samples the pixel centre `(x + 0.5, y + 0.5)`,
//! 2. computes barycentric weights from three edge functions,
//! 3. rejects the pixel unless all weights are non-negative,
//! 4. depth-tests linearly interpolated NDC z, writing depth on success,
//! 5. interpolates UV and world position perspective-correctly,
//! 6. hands the [`Fragment`] to a [`PixelShader`] and stores the packed color.
//!
//! # Edge Function
//!
//! ```text
//! E(p1, p2, p3) = m.y * n.x - m.x * n.y,   m = p2 - p1,  n = p3 - p1
//! ```
//!
//! `E(a, b, c)` is twice the signed area of the triangle. Dividing the three
//! sub-triangle areas by it yields weights that are positive inside regardless
//! of winding.
//!
//! # References
//!
//! - Juan Pineda, "A Parallel Algorithm for Polygon Rasterization" (1988)
//! - Scratchapixel: <https://www.scratchapixel.com/lessons/3d-basic-rendering/rasterization-practical-implementation>

pub mod shader;

use std::ops::{Add, Mul};

use self::shader::PixelShader;
use super::framebuffer::FrameBuffer;
use super::vertex::Triangle;
use crate::colors::color_to_packed;
use crate::math::{Vec2, Vec3};

/// Triangles whose doubled screen area is below this are skipped.
pub const DEGENERATE_AREA: f32 = 1e-6;

/// Weights returned by [`barycentric`] for a degenerate triangle. Every
/// component is negative, so coverage tests reject it.
pub const DEGENERATE_WEIGHTS: [f32; 3] = [-1.0; 3];

/// Interpolated surface attributes at one covered pixel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fragment {
    pub x: i32,
    pub y: i32,
    /// NDC depth, already written to the depth buffer.
    pub depth: f32,
    pub texcoord: Vec2,
    pub world_position: Vec3,
    /// Unit-length interpolated geometric normal.
    pub normal: Vec3,
}

/// Doubled signed area of `(p1, p2, p3)` in screen space. Only x and y are used.
#[inline]
pub fn edge_function(p1: Vec3, p2: Vec3, p3: Vec3) -> f32 {
    let m = p2 - p1;
    let n = p3 - p1;
    m.y * n.x - m.x * n.y
}

/// Precomputed edge setup for one screen-space triangle.
#[derive(Clone, Copy, Debug)]
pub struct Barycentric {
    a: Vec3,
    b: Vec3,
    c: Vec3,
    inv_area: f32,
}

impl Barycentric {
    /// Returns `None` when the triangle is degenerate.
    pub fn new(a: Vec3, b: Vec3, c: Vec3) -> Option<Self> {
        let area = edge_function(a, b, c);
        if area.abs() < DEGENERATE_AREA {
            return None;
        }
        Some(Self {
            a,
            b,
            c,
            inv_area: 1.0 / area,
        })
    }

    /// Weights `[alpha, beta, gamma]` of `p` relative to `a`, `b`, `c`.
    #[inline]
    pub fn weights(&self, p: Vec3) -> [f32; 3] {
        [
            edge_function(self.b, self.c, p) * self.inv_area,
            edge_function(self.c, self.a, p) * self.inv_area,
            edge_function(self.a, self.b, p) * self.inv_area,
        ]
    }
}

/// Barycentric weights of `p` in triangle `(a, b, c)`, or
/// [`DEGENERATE_WEIGHTS`] when the triangle has no area.
pub fn barycentric(p: Vec3, a: Vec3, b: Vec3, c: Vec3) -> [f32; 3] {
    Barycentric::new(a, b, c).map_or(DEGENERATE_WEIGHTS, |bary| bary.weights(p))
}

/// `true` if every weight is non-negative. NaN weights are never covered.
#[inline]
pub fn is_covered(lambda: [f32; 3]) -> bool {
    lambda.iter().all(|&l| l >= 0.0)
}

/// Perspective-correct interpolation of a per-vertex attribute.
///
/// Interpolates `value / w` and `1 / w` linearly in screen space and divides.
#[inline]
pub fn perspective_interpolate<T>(values: [T; 3], inv_w: [f32; 3], lambda: [f32; 3]) -> T
where
    T: Copy + Add<Output = T> + Mul<f32, Output = T>,
{
    let weights = [
        inv_w[0] * lambda[0],
        inv_w[1] * lambda[1],
        inv_w[2] * lambda[2],
    ];
    let norm = 1.0 / (weights[0] + weights[1] + weights[2]);
    values[0] * (weights[0] * norm)
        + values[1] * (weights[1] * norm)
        + values[2] * (weights[2] * norm)
}

/// Rasterize a screen-space triangle with the given shader.
///
/// Returns the number of pixels that passed the depth test and were shaded.
pub fn rasterize_triangle<S: PixelShader>(
    triangle: &Triangle,
    buffer: &mut FrameBuffer,
    shader: &S,
) -> usize {
    let [v0, v1, v2] = &triangle.vertices;
    let [a, b, c] = triangle.positions();

    let Some(bary) = Barycentric::new(a, b, c) else {
        return 0;
    };

    // Bounding box clamped to the framebuffer. An entirely off-screen
    // triangle ends up with min > max and the loops never run.
    let min_x = (a.x.min(b.x).min(c.x).floor() as i32).max(0);
    let max_x = (a.x.max(b.x).max(c.x).ceil() as i32).min(buffer.width() as i32 - 1);
    let min_y = (a.y.min(b.y).min(c.y).floor() as i32).max(0);
    let max_y = (a.y.max(b.y).max(c.y).ceil() as i32).min(buffer.height() as i32 - 1);

    let inv_w = [v0.inv_w, v1.inv_w, v2.inv_w];
    let texcoords = [v0.texcoord, v1.texcoord, v2.texcoord];
    let world = [v0.world_position, v1.world_position, v2.world_position];

    let mut shaded = 0;
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let p = Vec3::new(x as f32 + 0.5, y as f32 + 0.5, 0.0);
            let lambda = bary.weights(p);
            if !is_covered(lambda) {
                continue;
            }

            let depth = lambda[0] * a.z + lambda[1] * b.z + lambda[2] * c.z;
            if !buffer.test_and_set_depth(x, y, depth) {
                continue;
            }

            let fragment = Fragment {
                x,
                y,
                depth,
                texcoord: perspective_interpolate(texcoords, inv_w, lambda),
                world_position: perspective_interpolate(world, inv_w, lambda),
                normal: (v0.normal * lambda[0] + v1.normal * lambda[1] + v2.normal * lambda[2])
                    .normalize(),
            };
            buffer.set_pixel(x, y, color_to_packed(shader.shade(&fragment)));
            shaded += 1;
        }
    }
    shaded
}
