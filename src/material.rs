use serde::{Deserialize, Serialize};

/// Per-mesh shading coefficients. Constant across the whole surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub ambient: f32,
    pub diffuse: f32,
    pub specular: f32,
    /// Specular exponent; larger values give tighter highlights.
    pub shininess: f32,
}

impl Material {
    pub const fn new(ambient: f32, diffuse: f32, specular: f32, shininess: f32) -> Self {
        Self {
            ambient,
            diffuse,
            specular,
            shininess,
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new(0.1, 0.7, 0.5, 32.0)
    }
}
