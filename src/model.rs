//! Drawable objects.
//!
//! A [`Model`] pairs one [`Mesh`] with everything the pipeline needs to draw
//! it: a world transform, a material, and optional color texture and
//! tangent-space normal map.

use crate::material::Material;
use crate::mesh::Mesh;
use crate::render::DrawCall;
use crate::texture::{Surface, Texture};
use crate::transform::Transform;

#[derive(Clone, Debug)]
pub struct Model {
    name: String,
    mesh: Mesh,
    transform: Transform,
    material: Material,
    texture: Option<Texture>,
    normal_map: Option<Texture>,
}

impl Model {
    pub fn new(name: impl Into<String>, mesh: Mesh, material: Material) -> Self {
        Self {
            name: name.into(),
            mesh,
            transform: Transform::default(),
            material,
            texture: None,
            normal_map: None,
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_texture(mut self, texture: Texture) -> Self {
        self.texture = Some(texture);
        self
    }

    pub fn with_normal_map(mut self, normal_map: Texture) -> Self {
        self.normal_map = Some(normal_map);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn material(&self) -> Material {
        self.material
    }

    pub fn texture(&self) -> Option<&Texture> {
        self.texture.as_ref()
    }

    pub fn normal_map(&self) -> Option<&Texture> {
        self.normal_map.as_ref()
    }

    /// Borrows this model as a single pipeline invocation.
    pub fn draw_call(&self) -> DrawCall<'_> {
        DrawCall {
            mesh: &self.mesh,
            model_matrix: self.transform.to_matrix(),
            material: self.material,
            texture: self.texture.as_ref().map(|t| t as &dyn Surface),
            normal_map: self.normal_map.as_ref().map(|t| t as &dyn Surface),
        }
    }
}
