//! Color constants and conversions between linear float RGB and packed ARGB8888.

use crate::math::vec3::Vec3;

pub const BACKGROUND: u32 = 0xFF1E1E1E;

/// Sky gradient endpoints used by the demo background.
pub const SKY_TOP: Vec3 = Vec3::new(0.5, 0.7, 1.0);
pub const SKY_BOTTOM: Vec3 = Vec3::new(0.0, 0.2, 0.4);

/// Packs a float RGB color into ARGB8888 with alpha fixed at 255.
///
/// Each channel is clamped to `[0, 1]` before scaling, so out-of-range
/// lighting results saturate instead of wrapping.
#[inline]
pub fn color_to_packed(color: Vec3) -> u32 {
    let c = color.clamp(0.0, 1.0);
    let r = (c.x * 255.0) as u32;
    let g = (c.y * 255.0) as u32;
    let b = (c.z * 255.0) as u32;
    0xFF00_0000 | (r << 16) | (g << 8) | b
}

/// Unpacks an ARGB8888 color into float RGB in `[0, 1]`, discarding alpha.
#[inline]
pub fn unpack_color(color: u32) -> Vec3 {
    Vec3::new(
        ((color >> 16) & 0xFF) as f32 / 255.0,
        ((color >> 8) & 0xFF) as f32 / 255.0,
        (color & 0xFF) as f32 / 255.0,
    )
}
