//! Triangle meshes with separate position, texcoord and normal streams.
//!
//! Meshes are read-only input to the pipeline. Each [`Face`] carries three
//! index triples, one per attribute stream, so a vertex may share its position
//! with a neighbour while having a different texture coordinate (UV seams).

use std::path::Path;

use thiserror::Error;

use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;

/// Errors that can occur when loading a mesh.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to load OBJ file: {0}")]
    Obj(#[from] tobj::LoadError),
    #[error("mesh '{0}' contains no faces")]
    Empty(String),
}

/// One triangle of a mesh, as three index triples.
///
/// Index `i` of each array belongs to corner `i` of the triangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Face {
    pub position: [usize; 3],
    pub texcoord: [usize; 3],
    pub normal: [usize; 3],
}

/// A polygon with an arbitrary number of corners, before triangulation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Polygon {
    pub position: Vec<usize>,
    pub texcoord: Vec<usize>,
    pub normal: Vec<usize>,
}

impl Polygon {
    /// A polygon whose texcoord and normal indices equal its position indices.
    pub fn uniform(indices: &[usize]) -> Self {
        Self {
            position: indices.to_vec(),
            texcoord: indices.to_vec(),
            normal: indices.to_vec(),
        }
    }

    /// Fan-triangulates the polygon: corner 0 is paired with each consecutive edge.
    ///
    /// Missing texcoord/normal indices fall back to the position index, which the
    /// mesh accessors then resolve (possibly to a zero default).
    pub fn triangulate(&self) -> impl Iterator<Item = Face> + '_ {
        let corner = move |stream: &[usize], i: usize| {
            stream.get(i).copied().unwrap_or(self.position[i])
        };
        (1..self.position.len().saturating_sub(1)).map(move |i| {
            let corners = [0, i, i + 1];
            Face {
                position: corners.map(|c| self.position[c]),
                texcoord: corners.map(|c| corner(&self.texcoord, c)),
                normal: corners.map(|c| corner(&self.normal, c)),
            }
        })
    }
}

#[derive(Clone, Debug, Default)]
pub struct Mesh {
    name: String,
    positions: Vec<Vec3>,
    texcoords: Vec<Vec2>,
    normals: Vec<Vec3>,
    faces: Vec<Face>,
}

impl Mesh {
    pub fn new(
        name: impl Into<String>,
        positions: Vec<Vec3>,
        texcoords: Vec<Vec2>,
        normals: Vec<Vec3>,
        faces: Vec<Face>,
    ) -> Self {
        Self {
            name: name.into(),
            positions,
            texcoords,
            normals,
            faces,
        }
    }

    /// Builds a mesh from polygons of any corner count, fan-triangulating each one.
    /// Polygons with fewer than three corners produce no faces.
    pub fn from_polygons(
        name: impl Into<String>,
        positions: Vec<Vec3>,
        texcoords: Vec<Vec2>,
        normals: Vec<Vec3>,
        polygons: &[Polygon],
    ) -> Self {
        let faces = polygons.iter().flat_map(Polygon::triangulate).collect();
        Self::new(name, positions, texcoords, normals, faces)
    }

    /// Load a Wavefront OBJ file, merging every object in it into one mesh.
    ///
    /// Polygons are fan-triangulated by the loader. Index streams are kept
    /// separate so UV and normal seams survive.
    pub fn from_obj<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let options = tobj::LoadOptions {
            triangulate: true,
            single_index: false,
            ..Default::default()
        };
        let (models, _materials) = tobj::load_obj(path, &options)?;

        let mut mesh = Mesh {
            name: path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default(),
            ..Default::default()
        };

        for model in &models {
            mesh.append_obj_mesh(&model.mesh);
        }

        if mesh.faces.is_empty() {
            return Err(LoadError::Empty(mesh.name));
        }

        log::debug!(
            "loaded mesh '{}': {} positions, {} texcoords, {} normals, {} faces",
            mesh.name,
            mesh.positions.len(),
            mesh.texcoords.len(),
            mesh.normals.len(),
            mesh.faces.len()
        );
        Ok(mesh)
    }

    fn append_obj_mesh(&mut self, obj: &tobj::Mesh) {
        let position_base = self.positions.len();
        let texcoord_base = self.texcoords.len();
        let normal_base = self.normals.len();

        self.positions.extend(
            obj.positions
                .chunks_exact(3)
                .map(|p| Vec3::new(p[0], p[1], p[2])),
        );
        self.texcoords
            .extend(obj.texcoords.chunks_exact(2).map(|t| Vec2::new(t[0], t[1])));
        self.normals.extend(
            obj.normals
                .chunks_exact(3)
                .map(|n| Vec3::new(n[0], n[1], n[2])),
        );

        // Without an index stream the attribute is absent; usize::MAX reads as zero.
        let stream = |indices: &[u32], base: usize, i: usize| {
            indices
                .get(i)
                .map_or(usize::MAX, |&idx| base + idx as usize)
        };

        for tri in 0..obj.indices.len() / 3 {
            let corners = [tri * 3, tri * 3 + 1, tri * 3 + 2];
            self.faces.push(Face {
                position: corners.map(|i| position_base + obj.indices[i] as usize),
                texcoord: corners.map(|i| stream(&obj.texcoord_indices, texcoord_base, i)),
                normal: corners.map(|i| stream(&obj.normal_indices, normal_base, i)),
            });
        }
    }

    /// A square of side `2 * half_extent` in the XY plane, facing +Z.
    pub fn quad(half_extent: f32) -> Self {
        let h = half_extent;
        Self::from_polygons(
            "quad",
            vec![
                Vec3::new(-h, -h, 0.0),
                Vec3::new(h, -h, 0.0),
                Vec3::new(h, h, 0.0),
                Vec3::new(-h, h, 0.0),
            ],
            vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(1.0, 0.0),
                Vec2::new(1.0, 1.0),
                Vec2::new(0.0, 1.0),
            ],
            vec![Vec3::BACK; 4],
            &[Polygon::uniform(&[0, 1, 2, 3])],
        )
    }

    /// A ground square of side `size` in the XZ plane, facing +Y.
    pub fn plane(size: f32) -> Self {
        let h = size / 2.0;
        Self::from_polygons(
            "plane",
            vec![
                Vec3::new(-h, 0.0, h),
                Vec3::new(h, 0.0, h),
                Vec3::new(h, 0.0, -h),
                Vec3::new(-h, 0.0, -h),
            ],
            vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(1.0, 0.0),
                Vec2::new(1.0, 1.0),
                Vec2::new(0.0, 1.0),
            ],
            vec![Vec3::UP],
            &[Polygon {
                position: vec![0, 1, 2, 3],
                texcoord: vec![0, 1, 2, 3],
                normal: vec![0, 0, 0, 0],
            }],
        )
    }

    /// A unit cube centred on the origin with per-face normals, wound
    /// counter-clockwise when seen from outside.
    pub fn cube() -> Self {
        let positions = vec![
            Vec3::new(-1.0, -1.0, 1.0),
            Vec3::new(1.0, -1.0, 1.0),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(-1.0, 1.0, 1.0),
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(1.0, -1.0, -1.0),
            Vec3::new(1.0, 1.0, -1.0),
            Vec3::new(-1.0, 1.0, -1.0),
        ];
        let texcoords = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ];
        let normals = vec![
            Vec3::BACK,
            Vec3::RIGHT,
            Vec3::FORWARD,
            -Vec3::RIGHT,
            Vec3::UP,
            -Vec3::UP,
        ];
        let sides: [([usize; 4], usize); 6] = [
            ([0, 1, 2, 3], 0), // front (+Z)
            ([1, 5, 6, 2], 1), // right (+X)
            ([5, 4, 7, 6], 2), // back (-Z)
            ([4, 0, 3, 7], 3), // left (-X)
            ([3, 2, 6, 7], 4), // top (+Y)
            ([4, 5, 1, 0], 5), // bottom (-Y)
        ];
        let polygons: Vec<Polygon> = sides
            .iter()
            .map(|(corners, normal)| Polygon {
                position: corners.to_vec(),
                texcoord: vec![0, 1, 2, 3],
                normal: vec![*normal; 4],
            })
            .collect();
        Self::from_polygons("cube", positions, texcoords, normals, &polygons)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Position at `index`, or zero when out of range.
    pub fn position(&self, index: usize) -> Vec3 {
        self.positions.get(index).copied().unwrap_or_default()
    }

    /// Texture coordinate at `index`, or zero when out of range.
    pub fn texcoord(&self, index: usize) -> Vec2 {
        self.texcoords.get(index).copied().unwrap_or_default()
    }

    /// Normal at `index`, or zero when out of range.
    pub fn normal(&self, index: usize) -> Vec3 {
        self.normals.get(index).copied().unwrap_or_default()
    }
}
