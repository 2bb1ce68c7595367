//! Scene description files.
//!
//! A scene is written in [RON](https://github.com/ron-rs/ron). Every section is
//! optional and falls back to [`SceneConfig::default`]:
//!
//! ```ron
//! (
//!     window: (title: "softshade", width: 800, height: 600),
//!     camera: (position: (0.0, 2.0, 20.0), speed: 5.0, yaw: -90.0, pitch: 0.0),
//!     lights: [
//!         Directional(direction: (1.0, -1.0, -1.0), color: (1.0, 1.0, 0.8), intensity: 0.8),
//!         Point(position: (0.0, 2.0, 0.0), color: (0.2, 0.2, 0.5), intensity: 10.0),
//!     ],
//!     objects: [
//!         (name: "ground", mesh: Plane(40.0)),
//!         (
//!             name: "plant",
//!             mesh: Obj("assets/plant.obj"),
//!             texture: Some("assets/plant_col.jpg"),
//!             normal_map: Some("assets/plant_nor.jpg"),
//!             material: (ambient: 0.1, diffuse: 0.8, specular: 0.1, shininess: 5.0),
//!         ),
//!     ],
//! )
//! ```
//!
//! Relative asset paths are resolved against the directory of the scene file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::camera::Camera;
use crate::engine::Scene;
use crate::light::{Light, DEFAULT_LINEAR_ATTENUATION, DEFAULT_QUADRATIC_ATTENUATION};
use crate::material::Material;
use crate::mesh::{LoadError, Mesh};
use crate::model::Model;
use crate::texture::{Texture, TextureError};
use crate::transform::Transform;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid scene description: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("object {name}: {source}")]
    Mesh {
        name: String,
        #[source]
        source: LoadError,
    },
    #[error("object {name}: cannot load {path}: {source}")]
    Texture {
        name: String,
        path: PathBuf,
        #[source]
        source: TextureError,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "softshade".to_string(),
            width: 800,
            height: 600,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    pub speed: f32,
    /// Degrees
    pub yaw: f32,
    /// Degrees
    pub pitch: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 2.0, 20.0],
            speed: 5.0,
            yaw: -90.0,
            pitch: 0.0,
        }
    }
}

impl CameraConfig {
    pub fn build(&self) -> Camera {
        Camera::new(self.position.into(), self.speed, self.yaw, self.pitch)
    }
}

fn default_linear() -> f32 {
    DEFAULT_LINEAR_ATTENUATION
}

fn default_quadratic() -> f32 {
    DEFAULT_QUADRATIC_ATTENUATION
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LightConfig {
    Directional {
        direction: [f32; 3],
        color: [f32; 3],
        intensity: f32,
    },
    Point {
        position: [f32; 3],
        color: [f32; 3],
        intensity: f32,
        #[serde(default = "default_linear")]
        linear: f32,
        #[serde(default = "default_quadratic")]
        quadratic: f32,
    },
}

impl LightConfig {
    pub fn build(&self) -> Light {
        match *self {
            LightConfig::Directional {
                direction,
                color,
                intensity,
            } => Light::directional(direction.into(), color.into(), intensity),
            LightConfig::Point {
                position,
                color,
                intensity,
                linear,
                quadratic,
            } => Light::point_with_attenuation(
                position.into(),
                color.into(),
                intensity,
                linear,
                quadratic,
            ),
        }
    }
}

/// Where an object's geometry comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MeshSource {
    Obj(PathBuf),
    /// Ground plane of the given side length, facing +Y.
    Plane(f32),
    /// Quad with the given half extent, facing +Z.
    Quad(f32),
    Cube,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectConfig {
    pub name: String,
    pub mesh: MeshSource,
    #[serde(default)]
    pub texture: Option<PathBuf>,
    #[serde(default)]
    pub normal_map: Option<PathBuf>,
    #[serde(default)]
    pub material: Material,
    #[serde(default)]
    pub transform: Transform,
}

impl ObjectConfig {
    /// Loads the mesh and images and assembles a [`Model`]. Relative paths are
    /// resolved against `base`.
    pub fn load(&self, base: &Path) -> Result<Model, ConfigError> {
        let mesh = match &self.mesh {
            MeshSource::Obj(path) => {
                Mesh::from_obj(base.join(path)).map_err(|source| ConfigError::Mesh {
                    name: self.name.clone(),
                    source,
                })?
            }
            MeshSource::Plane(size) => Mesh::plane(*size),
            MeshSource::Quad(half_extent) => Mesh::quad(*half_extent),
            MeshSource::Cube => Mesh::cube(),
        };

        let mut model =
            Model::new(self.name.clone(), mesh, self.material).with_transform(self.transform);
        if let Some(path) = &self.texture {
            model = model.with_texture(self.load_image(base, path)?);
        }
        if let Some(path) = &self.normal_map {
            model = model.with_normal_map(self.load_image(base, path)?);
        }
        Ok(model)
    }

    fn load_image(&self, base: &Path, path: &Path) -> Result<Texture, ConfigError> {
        let path = base.join(path);
        Texture::from_file(&path).map_err(|source| ConfigError::Texture {
            name: self.name.clone(),
            path,
            source,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub lights: Vec<LightConfig>,
    pub objects: Vec<ObjectConfig>,
}

impl Default for SceneConfig {
    /// Sun plus one coloured point light over a ground plane with a cube on it.
    fn default() -> Self {
        let mut cube = Transform::new();
        cube.set_position([0.0, 1.0, 0.0].into());

        Self {
            window: WindowConfig::default(),
            camera: CameraConfig::default(),
            lights: vec![
                LightConfig::Directional {
                    direction: [1.0, -1.0, -1.0],
                    color: [1.0, 1.0, 0.8],
                    intensity: 0.8,
                },
                LightConfig::Point {
                    position: [0.0, 2.0, 0.0],
                    color: [0.2, 0.2, 0.5],
                    intensity: 10.0,
                    linear: DEFAULT_LINEAR_ATTENUATION,
                    quadratic: DEFAULT_QUADRATIC_ATTENUATION,
                },
            ],
            objects: vec![
                ObjectConfig {
                    name: "ground".to_string(),
                    mesh: MeshSource::Plane(40.0),
                    texture: None,
                    normal_map: None,
                    material: Material::new(0.1, 0.7, 0.5, 32.0),
                    transform: Transform::default(),
                },
                ObjectConfig {
                    name: "cube".to_string(),
                    mesh: MeshSource::Cube,
                    texture: None,
                    normal_map: None,
                    material: Material::new(0.1, 0.8, 0.1, 5.0),
                    transform: cube,
                },
            ],
        }
    }
}

impl SceneConfig {
    pub fn from_str(source: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(source)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_str(&source)?;
        log::info!(
            "loaded scene {}: {} lights, {} objects",
            path.display(),
            config.lights.len(),
            config.objects.len()
        );
        Ok(config)
    }

    pub fn build_scene(&self) -> Scene {
        Scene::new(
            self.camera.build(),
            self.lights.iter().map(LightConfig::build).collect(),
        )
    }

    /// Loads every object, resolving relative asset paths against `base`.
    pub fn load_models(&self, base: &Path) -> Result<Vec<Model>, ConfigError> {
        self.objects.iter().map(|object| object.load(base)).collect()
    }
}
