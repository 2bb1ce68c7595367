//! The geometry-to-pixel pipeline.
//!
//! ```text
//! Mesh ─▶ pipeline (cull, MVP) ─▶ clipper (near plane) ─▶ screen ─▶ rasterizer ─▶ FrameBuffer
//!                                                                     │
//!                                                                PixelShader
//! ```

pub mod clipper;
pub mod framebuffer;
pub mod pipeline;
pub mod rasterizer;
pub mod renderer;
pub mod screen;
pub mod vertex;

pub use framebuffer::FrameBuffer;
pub use pipeline::{draw_mesh, draw_mesh_with_shader, DrawCall, DrawStats, FrameContext};
pub use rasterizer::shader::{BlinnPhongShader, FlatShader, PixelShader};
pub use rasterizer::{rasterize_triangle, Fragment};
pub use renderer::Renderer;
pub use vertex::{Triangle, Vertex};
