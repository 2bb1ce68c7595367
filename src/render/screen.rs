//! Perspective divide and viewport transform.

use super::vertex::Triangle;
use crate::math::vec3::Vec3;

/// Maps a clipped triangle from clip space to screen space in place.
///
/// For each vertex: `inv_w = 1 / clip_w`, x/y/z are divided by `clip_w`, and
/// NDC x/y in `[-1, 1]` are scaled to pixels with y flipped so the origin is
/// the top-left corner. z stays as NDC depth for the depth test.
pub fn to_screen(triangle: &mut Triangle, width: u32, height: u32) {
    let (w, h) = (width as f32, height as f32);
    for v in &mut triangle.vertices {
        v.inv_w = 1.0 / v.clip_w;
        let ndc = v.position * v.inv_w;
        v.position = Vec3::new((ndc.x + 1.0) * 0.5 * w, (1.0 - ndc.y) * 0.5 * h, ndc.z);
    }
}
