//! Pixel shaders for triangle rasterization.
//!
//! This module provides a trait-based abstraction for per-pixel shading computations,
//! similar to how GPUs separate the fixed-function rasterizer from programmable
//! fragment/pixel shaders.
//!
//! # Architecture
//!
//! The rasterizer handles:
//! - Bounding box computation
//! - Edge function evaluation and barycentric weights
//! - The depth test
//! - Perspective-correct attribute interpolation
//!
//! The shader handles:
//! - Texture sampling
//! - Normal mapping
//! - Lighting and the final color

use super::Fragment;
use crate::light::Light;
use crate::material::Material;
use crate::math::{Vec2, Vec3};
use crate::texture::Surface;

/// Reflectance at normal incidence for common dielectrics.
pub const FRESNEL_F0: f32 = 0.04;

/// Number of checker cells per unit of UV along each axis.
const CHECKER_CELLS: f32 = 10.0;
const CHECKER_DARK: Vec3 = Vec3::new(0.2, 0.2, 0.2);
const CHECKER_LIGHT: Vec3 = Vec3::new(0.3, 0.3, 0.3);

/// Trait for per-pixel shading computations.
///
/// The rasterizer calls `shade()` once for every pixel that is covered by the
/// triangle and passes the depth test, with attributes already interpolated.
pub trait PixelShader {
    /// Compute the linear RGB color of a fragment. Values outside `[0, 1]`
    /// are clamped when packed.
    fn shade(&self, fragment: &Fragment) -> Vec3;
}

/// Flat shader - returns a constant color for all pixels.
pub struct FlatShader {
    color: Vec3,
}

impl FlatShader {
    pub fn new(color: Vec3) -> Self {
        Self { color }
    }
}

impl PixelShader for FlatShader {
    #[inline]
    fn shade(&self, _fragment: &Fragment) -> Vec3 {
        self.color
    }
}

/// Blinn-Phong style lighting with a Schlick Fresnel term on the specular.
///
/// Base color comes from `texture` when present and from a procedural
/// checkerboard otherwise. An optional tangent-space `normal_map` perturbs the
/// shading normal.
pub struct BlinnPhongShader<'a> {
    material: Material,
    lights: &'a [Light],
    camera_position: Vec3,
    texture: Option<&'a dyn Surface>,
    normal_map: Option<&'a dyn Surface>,
}

impl<'a> BlinnPhongShader<'a> {
    pub fn new(material: Material, lights: &'a [Light], camera_position: Vec3) -> Self {
        Self {
            material,
            lights,
            camera_position,
            texture: None,
            normal_map: None,
        }
    }

    pub fn with_texture(mut self, texture: Option<&'a dyn Surface>) -> Self {
        self.texture = texture;
        self
    }

    pub fn with_normal_map(mut self, normal_map: Option<&'a dyn Surface>) -> Self {
        self.normal_map = normal_map;
        self
    }

    fn base_color(&self, uv: Vec2) -> Vec3 {
        match self.texture {
            Some(texture) => sample_surface(texture, uv),
            None => checkerboard(uv),
        }
    }
}

impl PixelShader for BlinnPhongShader<'_> {
    fn shade(&self, fragment: &Fragment) -> Vec3 {
        let m = &self.material;
        let base = self.base_color(fragment.texcoord);
        let ambient = Vec3::ONE * m.ambient;

        let geometric = fragment.normal;
        let normal = match self.normal_map {
            Some(map) => perturb_normal(geometric, sample_surface(map, fragment.texcoord)),
            None => geometric,
        };

        let view = (self.camera_position - fragment.world_position).normalize();
        let fresnel = fresnel_schlick(view.dot(geometric));

        let mut diffuse = Vec3::ZERO;
        let mut specular = Vec3::ZERO;
        for light in self.lights {
            match light {
                Light::Directional(sun) => {
                    let diff = normal.dot(sun.inverse_direction.normalize()).max(0.0);
                    diffuse += sun.color * (diff * sun.intensity * m.diffuse);

                    let reflected = sun.direction.reflect(normal).normalize();
                    let spec = reflected.dot(view).max(0.0).powf(m.shininess);
                    specular += sun.color * (spec * sun.intensity * m.specular * fresnel);
                }
                Light::Point(point) => {
                    let to_light = point.position - fragment.world_position;
                    let attenuation = point.attenuation(to_light.length());
                    let l = to_light.normalize();

                    let diff = normal.dot(l).max(0.0);
                    diffuse += point.color * (diff * point.intensity * m.diffuse * attenuation);

                    let reflected = (-l).reflect(normal).normalize();
                    let spec = reflected.dot(view).max(0.0).powf(m.shininess);
                    specular += point.color
                        * (spec * point.intensity * m.specular * attenuation * fresnel);
                }
            }
        }

        base * (ambient + diffuse) + specular
    }
}

/// Schlick's approximation with `F0 = 0.04`. `cos_theta` is clamped to `[0, 1]`.
#[inline]
pub fn fresnel_schlick(cos_theta: f32) -> f32 {
    let c = cos_theta.clamp(0.0, 1.0);
    FRESNEL_F0 + (1.0 - FRESNEL_F0) * (1.0 - c).powi(5)
}

/// Procedural base color for untextured surfaces: a 10x10-per-UV-unit checker.
#[inline]
pub fn checkerboard(uv: Vec2) -> Vec3 {
    let cell = (uv.x * CHECKER_CELLS).floor() as i32 + (uv.y * CHECKER_CELLS).floor() as i32;
    if cell.rem_euclid(2) == 0 {
        CHECKER_DARK
    } else {
        CHECKER_LIGHT
    }
}

/// Nearest-pixel lookup with v pointing up and coordinates clamped to the edge.
pub fn sample_surface(surface: &dyn Surface, uv: Vec2) -> Vec3 {
    let (w, h) = (surface.width() as i32, surface.height() as i32);
    let x = ((uv.x * w as f32) as i32).clamp(0, (w - 1).max(0));
    let y = (((1.0 - uv.y) * h as f32) as i32).clamp(0, (h - 1).max(0));
    surface.pixel(x as u32, y as u32)
}

/// Applies a tangent-space normal map sample to the geometric normal `n`.
///
/// The tangent frame is built per pixel from a world up vector, switching to
/// +Z when `n` is nearly vertical so the cross product stays well defined.
pub fn perturb_normal(n: Vec3, sample: Vec3) -> Vec3 {
    let up = if n.y.abs() > 0.99 { Vec3::BACK } else { Vec3::UP };
    let tangent = up.cross(n).normalize();
    let bitangent = n.cross(tangent);
    let t = sample * 2.0 - Vec3::ONE;
    (tangent * t.x + bitangent * t.y + n * t.z).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::Texture;
    use approx::assert_relative_eq;

    fn fragment(normal: Vec3, world_position: Vec3, texcoord: Vec2) -> Fragment {
        Fragment {
            x: 0,
            y: 0,
            depth: 0.0,
            texcoord,
            world_position,
            normal,
        }
    }

    #[test]
    fn fresnel_endpoints() {
        assert_relative_eq!(fresnel_schlick(1.0), 0.04);
        assert_relative_eq!(fresnel_schlick(0.0), 1.0);
        assert_relative_eq!(fresnel_schlick(-0.5), 1.0);
        assert_relative_eq!(fresnel_schlick(2.0), 0.04);
    }

    #[test]
    fn checker_alternates_per_cell() {
        assert_eq!(checkerboard(Vec2::new(0.05, 0.05)), CHECKER_DARK);
        assert_eq!(checkerboard(Vec2::new(0.15, 0.05)), CHECKER_LIGHT);
        assert_eq!(checkerboard(Vec2::new(0.15, 0.15)), CHECKER_DARK);
        assert_eq!(checkerboard(Vec2::new(-0.05, 0.05)), CHECKER_LIGHT);
    }

    #[test]
    fn sampling_clamps_to_edges() {
        // 2x1: left red, right blue
        let tex = Texture::from_argb(2, 1, vec![0xFFFF0000, 0xFF0000FF]).unwrap();
        assert_eq!(sample_surface(&tex, Vec2::new(0.0, 0.5)), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(sample_surface(&tex, Vec2::new(0.99, 0.5)), Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(sample_surface(&tex, Vec2::new(1.0, 1.0)), Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(sample_surface(&tex, Vec2::new(-3.0, 7.0)), Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn flat_normal_map_sample_keeps_normal() {
        let flat = Vec3::new(0.5, 0.5, 1.0);
        for n in [Vec3::UP, Vec3::BACK, Vec3::new(1.0, 1.0, 0.0).normalize()] {
            let p = perturb_normal(n, flat);
            assert_relative_eq!(p.x, n.x, epsilon = 1e-5);
            assert_relative_eq!(p.y, n.y, epsilon = 1e-5);
            assert_relative_eq!(p.z, n.z, epsilon = 1e-5);
        }
    }

    #[test]
    fn perturbed_normal_is_unit() {
        let p = perturb_normal(Vec3::BACK, Vec3::new(1.0, 0.2, 0.6));
        assert_relative_eq!(p.length(), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn no_lights_is_ambient_times_base() {
        let material = Material::new(0.5, 0.7, 0.5, 32.0);
        let shader = BlinnPhongShader::new(material, &[], Vec3::new(0.0, 0.0, 3.0));
        let c = shader.shade(&fragment(Vec3::BACK, Vec3::ZERO, Vec2::new(0.05, 0.05)));
        assert_relative_eq!(c.x, 0.1);
        assert_relative_eq!(c.y, 0.1);
        assert_relative_eq!(c.z, 0.1);
    }

    #[test]
    fn directional_light_behind_surface_adds_nothing() {
        let lights = [Light::directional(Vec3::BACK, Vec3::ONE, 1.0)];
        let material = Material::new(0.0, 1.0, 1.0, 8.0);
        let shader = BlinnPhongShader::new(material, &lights, Vec3::new(0.0, 0.0, 3.0));
        // Light travels +Z, surface faces +Z: lit from behind.
        let c = shader.shade(&fragment(Vec3::BACK, Vec3::ZERO, Vec2::ZERO));
        assert_relative_eq!(c.length(), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn head_on_directional_light() {
        let lights = [Light::directional(Vec3::FORWARD, Vec3::ONE, 1.0)];
        let material = Material::new(0.0, 1.0, 1.0, 8.0);
        let shader = BlinnPhongShader::new(material, &lights, Vec3::new(0.0, 0.0, 3.0));
        let c = shader.shade(&fragment(Vec3::BACK, Vec3::ZERO, Vec2::new(0.05, 0.05)));
        // diffuse = 0.2 * 1, specular = 1 * F(1) = 0.04
        assert_relative_eq!(c.x, 0.24, epsilon = 1e-5);
    }

    #[test]
    fn point_light_attenuates_with_distance() {
        let material = Material::new(0.0, 1.0, 0.0, 1.0);
        let shade_at = |d: f32| {
            let lights = [Light::point(Vec3::new(0.0, 0.0, d), Vec3::ONE, 1.0)];
            let shader = BlinnPhongShader::new(material, &lights, Vec3::new(0.0, 0.0, 3.0))
                .with_texture(None);
            shader
                .shade(&fragment(Vec3::BACK, Vec3::ZERO, Vec2::new(0.05, 0.05)))
                .x
        };
        assert!(shade_at(1.0) > shade_at(4.0));
        // 0.2 * 1 / (1 + 0.09 + 0.032)
        assert_relative_eq!(shade_at(1.0), 0.2 / 1.122, epsilon = 1e-5);
    }

    #[test]
    fn texture_replaces_checker() {
        let tex = Texture::solid(0xFFFF0000);
        let material = Material::new(1.0, 0.0, 0.0, 1.0);
        let shader = BlinnPhongShader::new(material, &[], Vec3::BACK)
            .with_texture(Some(&tex as &dyn Surface));
        let c = shader.shade(&fragment(Vec3::BACK, Vec3::ZERO, Vec2::new(0.3, 0.7)));
        assert_eq!(c, Vec3::new(1.0, 0.0, 0.0));
    }
}
