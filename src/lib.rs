//! A CPU software rasterizer.
//!
//! Triangles are culled, transformed, clipped against the near plane and
//! scan-converted with edge functions into a packed ARGB8888 color buffer
//! and a depth buffer. Attributes are interpolated perspective-correctly and
//! shaded per pixel with Blinn-Phong plus a Fresnel rim. SDL2 is only used
//! (behind the `window` feature) to show the finished frame.
//!
//! # Quick Start
//!
//! ```no_run
//! use softshade::prelude::*;
//!
//! let scene = Scene::new(
//!     Camera::new(Vec3::new(0.0, 0.0, 3.0), 5.0, -90.0, 0.0),
//!     vec![Light::directional(Vec3::new(0.0, 0.0, -1.0), Vec3::ONE, 1.0)],
//! );
//! let cube = Model::new("cube", Mesh::cube(), Material::default());
//!
//! let mut engine = Engine::new(800, 600);
//! engine.render(&scene, &[cube]);
//! let pixels: &[u32] = engine.pixels();
//! ```

pub mod camera;
pub mod colors;
pub mod config;
pub mod engine;
pub mod light;
pub mod material;
pub mod math;
pub mod mesh;
pub mod model;
pub mod projection;
pub mod render;
pub mod texture;
pub mod transform;
#[cfg(feature = "window")]
pub mod window;

pub use engine::{Background, Engine, FrameStats, Scene};
pub use mesh::{LoadError, Mesh};
pub use model::Model;
pub use projection::Projection;
pub use texture::{Texture, TextureError};
pub use transform::Transform;

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use softshade::prelude::*;
/// ```
pub mod prelude {
    pub use crate::camera::{Camera, CameraController, InputState};
    pub use crate::config::SceneConfig;
    pub use crate::engine::{Background, Engine, FrameStats, Scene};
    pub use crate::light::Light;
    pub use crate::material::Material;
    pub use crate::math::{Mat4, Vec2, Vec3, Vec4};
    pub use crate::mesh::Mesh;
    pub use crate::model::Model;
    pub use crate::projection::Projection;
    pub use crate::render::{DrawStats, FlatShader, PixelShader};
    pub use crate::texture::Texture;
    pub use crate::transform::Transform;

    #[cfg(feature = "window")]
    pub use crate::window::{FpsCounter, FrameLimiter, Window, WindowEvent};
}
