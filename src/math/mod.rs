//! Linear algebra kernel: small fixed-size vectors and a row-major 4x4 matrix.
//!
//! Everything here is pure and allocation-free.

pub mod mat4;
pub mod vec2;
pub mod vec3;
pub mod vec4;

pub use mat4::Mat4;
pub use vec2::Vec2;
pub use vec3::Vec3;
pub use vec4::Vec4;
