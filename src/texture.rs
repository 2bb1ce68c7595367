//! Image surfaces used as color textures and tangent-space normal maps.

use std::path::Path;

use thiserror::Error;

use crate::colors::unpack_color;
use crate::math::vec3::Vec3;

#[derive(Debug, Error)]
pub enum TextureError {
    #[error("failed to decode image: {0}")]
    Image(#[from] image::ImageError),
    #[error("expected {expected} pixels for a {width}x{height} surface, got {actual}")]
    SizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
    #[error("surface dimensions must be non-zero")]
    Empty,
}

/// Read-only access to a 2D grid of RGB pixels.
///
/// Callers are responsible for mapping UVs to pixel coordinates and keeping
/// them in range; see the rasterizer's sampling helpers.
pub trait Surface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    /// Returns the pixel at `(x, y)` (top-left origin) as RGB in `[0, 1]`.
    fn pixel(&self, x: u32, y: u32) -> Vec3;
}

/// A 2D texture held in memory as packed ARGB8888.
#[derive(Clone, Debug)]
pub struct Texture {
    data: Vec<u32>,
    width: u32,
    height: u32,
}

impl Texture {
    /// Load a texture from an image file (PNG, JPG, etc.).
    ///
    /// Whatever the source format, pixels are normalized to opaque RGB.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, TextureError> {
        let img = image::open(path.as_ref())?.to_rgb8();
        let (width, height) = img.dimensions();

        let data = img
            .pixels()
            .map(|p| {
                let [r, g, b] = p.0;
                0xFF00_0000 | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
            })
            .collect();

        log::debug!(
            "loaded texture {}: {}x{}",
            path.as_ref().display(),
            width,
            height
        );
        Self::from_argb(width, height, data)
    }

    /// Builds a texture from row-major packed ARGB8888 pixels.
    pub fn from_argb(width: u32, height: u32, data: Vec<u32>) -> Result<Self, TextureError> {
        if width == 0 || height == 0 {
            return Err(TextureError::Empty);
        }
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(TextureError::SizeMismatch {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// A 1x1 texture of a single packed color.
    pub fn solid(color: u32) -> Self {
        Self {
            data: vec![color],
            width: 1,
            height: 1,
        }
    }
}

impl Surface for Texture {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn pixel(&self, x: u32, y: u32) -> Vec3 {
        unpack_color(self.data[(y * self.width + x) as usize])
    }
}
