//! Near-plane clipping in homogeneous clip space.
//!
//! Clipping happens after projection and before the perspective divide.
//! Only the near plane is handled: a vertex is inside when its clip-space
//! `w >= W_NEAR`. Geometry crossing the other frustum planes is left to the
//! rasterizer's bounding-box clamp and the depth test.
//!
//! ```text
//!  inside  | result
//!  --------+------------------------------------------------
//!     3    | the input triangle
//!     2    | two triangles covering the clipped quadrilateral
//!     1    | one smaller triangle
//!     0    | nothing
//! ```

use super::vertex::{Triangle, Vertex};

/// Minimum clip-space `w` a vertex may have. Matches the default projection's
/// near plane and keeps `1 / w` well away from zero in screen mapping.
pub const W_NEAR: f32 = 0.1;

/// Result of clipping one triangle: zero, one or two triangles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Clipped {
    Rejected,
    One(Triangle),
    Two(Triangle, Triangle),
}

impl Clipped {
    pub fn len(&self) -> usize {
        match self {
            Clipped::Rejected => 0,
            Clipped::One(_) => 1,
            Clipped::Two(..) => 2,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Clipped::Rejected)
    }
}

impl IntoIterator for Clipped {
    type Item = Triangle;
    type IntoIter = std::iter::Flatten<std::array::IntoIter<Option<Triangle>, 2>>;

    fn into_iter(self) -> Self::IntoIter {
        let pair = match self {
            Clipped::Rejected => [None, None],
            Clipped::One(a) => [Some(a), None],
            Clipped::Two(a, b) => [Some(a), Some(b)],
        };
        pair.into_iter().flatten()
    }
}

/// The point on edge `inside -> outside` where clip-space `w` equals [`W_NEAR`].
///
/// The partition guarantees `inside.clip_w >= W_NEAR > outside.clip_w`,
/// so the denominator is never zero.
pub fn intersect(inside: &Vertex, outside: &Vertex) -> Vertex {
    debug_assert!(
        inside.clip_w != outside.clip_w,
        "near-plane intersection of an edge with constant w"
    );
    let t = (W_NEAR - inside.clip_w) / (outside.clip_w - inside.clip_w);
    inside.lerp(outside, t)
}

/// Clips a clip-space triangle against the near plane.
pub fn clip_near(triangle: &Triangle) -> Clipped {
    let mut inside = [Vertex::default(); 3];
    let mut outside = [Vertex::default(); 3];
    let (mut n_in, mut n_out) = (0, 0);

    for vertex in &triangle.vertices {
        if vertex.clip_w >= W_NEAR {
            inside[n_in] = *vertex;
            n_in += 1;
        } else {
            outside[n_out] = *vertex;
            n_out += 1;
        }
    }

    match n_in {
        3 => Clipped::One(*triangle),
        2 => {
            let a = intersect(&inside[0], &outside[0]);
            let b = intersect(&inside[1], &outside[0]);
            Clipped::Two(
                Triangle::new([inside[0], inside[1], a]),
                Triangle::new([inside[1], b, a]),
            )
        }
        1 => Clipped::One(Triangle::new([
            inside[0],
            intersect(&inside[0], &outside[0]),
            intersect(&inside[0], &outside[1]),
        ])),
        _ => Clipped::Rejected,
    }
}
