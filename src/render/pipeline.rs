//! Per-mesh geometry pipeline.
//!
//! For every face of a mesh: backface cull in world space, transform to clip
//! space, clip against the near plane, map to screen and rasterize. The caller
//! owns the frame buffers and clears them once per frame; draw calls only ever
//! write through the borrowed [`FrameBuffer`].

use std::ops::AddAssign;

use super::clipper::clip_near;
use super::framebuffer::FrameBuffer;
use super::rasterizer::rasterize_triangle;
use super::rasterizer::shader::{BlinnPhongShader, PixelShader};
use super::screen::to_screen;
use super::vertex::{Triangle, Vertex};
use crate::camera::Camera;
use crate::light::Light;
use crate::material::Material;
use crate::math::{Mat4, Vec3};
use crate::mesh::{Face, Mesh};
use crate::projection::Projection;
use crate::texture::Surface;

/// Read-only state shared by every draw call in one frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameContext<'a> {
    /// `projection * view`
    pub view_projection: Mat4,
    pub camera_position: Vec3,
    pub lights: &'a [Light],
}

impl<'a> FrameContext<'a> {
    pub fn new(camera: &Camera, projection: &Projection, lights: &'a [Light]) -> Self {
        Self {
            view_projection: projection.matrix() * camera.view_matrix(),
            camera_position: camera.position(),
            lights,
        }
    }
}

/// One mesh to draw with its placement and surface properties.
#[derive(Clone, Copy)]
pub struct DrawCall<'a> {
    pub mesh: &'a Mesh,
    pub model_matrix: Mat4,
    pub material: Material,
    pub texture: Option<&'a dyn Surface>,
    pub normal_map: Option<&'a dyn Surface>,
}

impl<'a> DrawCall<'a> {
    /// An untextured draw of `mesh` with an identity transform.
    pub fn new(mesh: &'a Mesh, material: Material) -> Self {
        Self {
            mesh,
            model_matrix: Mat4::identity(),
            material,
            texture: None,
            normal_map: None,
        }
    }
}

/// Counts gathered while drawing one or more meshes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DrawStats {
    /// Faces visited.
    pub faces: usize,
    /// Faces rejected by the backface test.
    pub culled: usize,
    /// Faces entirely behind the near plane.
    pub clipped_away: usize,
    /// Screen-space triangles handed to the rasterizer.
    pub triangles: usize,
    /// Pixels that passed the depth test and were shaded.
    pub pixels: usize,
}

impl AddAssign for DrawStats {
    fn add_assign(&mut self, rhs: Self) {
        self.faces += rhs.faces;
        self.culled += rhs.culled;
        self.clipped_away += rhs.clipped_away;
        self.triangles += rhs.triangles;
        self.pixels += rhs.pixels;
    }
}

/// Geometric backface test on world-space positions.
///
/// The face normal comes from the edge cross product, not vertex normals, and is
/// compared against the direction from the camera to the first vertex. A face
/// is culled when the two do not point towards each other; zero-area faces
/// are always culled.
pub fn is_back_facing(world: [Vec3; 3], camera_position: Vec3) -> bool {
    let normal = (world[1] - world[0]).cross(world[2] - world[0]).normalize();
    let view_dir = (world[0] - camera_position).normalize();
    normal.dot(view_dir) >= 0.0
}

/// Gathers clip-space vertices for one face.
///
/// Normals go through the full model matrix with w = 1, translation included,
/// then get renormalized. There is no inverse-transpose.
fn assemble(call: &DrawCall, mvp: &Mat4, face: &Face, world: [Vec3; 3]) -> Triangle {
    let mesh = call.mesh;
    Triangle::new(std::array::from_fn(|k| {
        Vertex::from_clip(
            *mvp * mesh.position(face.position[k]),
            mesh.texcoord(face.texcoord[k]),
            (call.model_matrix * mesh.normal(face.normal[k]))
                .xyz()
                .normalize(),
            world[k],
        )
    }))
}

/// Draws a mesh with Blinn-Phong shading under the frame's lights.
pub fn draw_mesh(buffer: &mut FrameBuffer, frame: &FrameContext, call: &DrawCall) -> DrawStats {
    let shader = BlinnPhongShader::new(call.material, frame.lights, frame.camera_position)
        .with_texture(call.texture)
        .with_normal_map(call.normal_map);
    draw_mesh_with_shader(buffer, frame, call, &shader)
}

/// Draws a mesh through an arbitrary pixel shader.
pub fn draw_mesh_with_shader<S: PixelShader>(
    buffer: &mut FrameBuffer,
    frame: &FrameContext,
    call: &DrawCall,
    shader: &S,
) -> DrawStats {
    let mvp = frame.view_projection * call.model_matrix;
    let (width, height) = (buffer.width(), buffer.height());
    let mut stats = DrawStats::default();

    for face in call.mesh.faces() {
        stats.faces += 1;

        let world = face
            .position
            .map(|i| (call.model_matrix * call.mesh.position(i)).xyz());
        if is_back_facing(world, frame.camera_position) {
            stats.culled += 1;
            continue;
        }

        let clipped = clip_near(&assemble(call, &mvp, face, world));
        if clipped.is_empty() {
            stats.clipped_away += 1;
            continue;
        }

        for mut triangle in clipped {
            to_screen(&mut triangle, width, height);
            stats.pixels += rasterize_triangle(&triangle, buffer, shader);
            stats.triangles += 1;
        }
    }

    log::trace!(
        "draw {}: {} faces, {} culled, {} clipped away, {} triangles, {} pixels",
        call.mesh.name(),
        stats.faces,
        stats.culled,
        stats.clipped_away,
        stats.triangles,
        stats.pixels
    );
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::framebuffer::DEPTH_CLEAR;
    use crate::render::rasterizer::shader::FlatShader;
    use crate::transform::Transform;

    const W: u32 = 64;
    const H: u32 = 48;

    fn camera_at(position: Vec3) -> Camera {
        // yaw -90 looks down -Z
        Camera::new(position, 5.0, -90.0, 0.0)
    }

    fn buffers() -> (Vec<u32>, Vec<f32>) {
        (vec![0; (W * H) as usize], vec![DEPTH_CLEAR; (W * H) as usize])
    }

    #[test]
    fn culls_faces_pointing_away() {
        let cam = Vec3::new(0.0, 0.0, 3.0);
        let front = [
            Vec3::new(-1.0, -1.0, 0.0),
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ];
        let back = [front[0], front[2], front[1]];
        assert!(!is_back_facing(front, cam));
        assert!(is_back_facing(back, cam));
        // Seen from behind, the same face is culled.
        assert!(is_back_facing(front, Vec3::new(0.0, 0.0, -3.0)));
    }

    #[test]
    fn normals_pick_up_model_translation() {
        let mesh = Mesh::quad(1.0);
        let call = DrawCall {
            model_matrix: Mat4::translation(Vec3::new(0.0, 0.0, -2.0)),
            ..DrawCall::new(&mesh, Material::default())
        };
        let face = &mesh.faces()[0];
        let world = face
            .position
            .map(|i| (call.model_matrix * mesh.position(i)).xyz());

        let triangle = assemble(&call, &Mat4::identity(), face, world);
        // (0, 0, 1) with w = 1 lands on (0, 0, -1) after the translation.
        for vertex in triangle.vertices {
            assert_eq!(vertex.normal, Vec3::new(0.0, 0.0, -1.0));
            assert_eq!(vertex.world_position.z, -2.0);
        }
    }

    #[test]
    fn degenerate_faces_are_culled() {
        let p = Vec3::new(1.0, 2.0, 3.0);
        assert!(is_back_facing([p, p, p], Vec3::ZERO));
    }

    #[test]
    fn quad_facing_camera_is_drawn() {
        let mesh = Mesh::quad(1.0);
        let camera = camera_at(Vec3::new(0.0, 0.0, 3.0));
        let projection = Projection::for_viewport(W, H);
        let frame = FrameContext::new(&camera, &projection, &[]);
        let call = DrawCall::new(&mesh, Material::default());

        let (mut color, mut depth) = buffers();
        let mut fb = FrameBuffer::new(&mut color, &mut depth, W, H);
        let stats = draw_mesh_with_shader(&mut fb, &frame, &call, &FlatShader::new(Vec3::ONE));

        assert_eq!(stats.faces, 2);
        assert_eq!(stats.culled, 0);
        assert_eq!(stats.triangles, 2);
        assert!(stats.pixels > 0);
        assert_eq!(fb.get_pixel(W as i32 / 2, H as i32 / 2), Some(0xFFFFFFFF));
        assert_eq!(fb.get_pixel(0, 0), Some(0));
    }

    #[test]
    fn quad_seen_from_behind_is_culled() {
        let mesh = Mesh::quad(1.0);
        let camera = Camera::new(Vec3::new(0.0, 0.0, -3.0), 5.0, 90.0, 0.0);
        let projection = Projection::for_viewport(W, H);
        let frame = FrameContext::new(&camera, &projection, &[]);

        let (mut color, mut depth) = buffers();
        let mut fb = FrameBuffer::new(&mut color, &mut depth, W, H);
        let stats = draw_mesh(&mut fb, &frame, &DrawCall::new(&mesh, Material::default()));

        assert_eq!(stats.culled, 2);
        assert_eq!(stats.pixels, 0);
    }

    #[test]
    fn geometry_behind_camera_is_clipped_away() {
        let mesh = Mesh::quad(1.0);
        // Facing the quad's front side but looking away from it.
        let camera = Camera::new(Vec3::new(0.0, 0.0, 3.0), 5.0, 90.0, 0.0);
        let projection = Projection::for_viewport(W, H);
        let frame = FrameContext::new(&camera, &projection, &[]);

        let (mut color, mut depth) = buffers();
        let mut fb = FrameBuffer::new(&mut color, &mut depth, W, H);
        let stats = draw_mesh(&mut fb, &frame, &DrawCall::new(&mesh, Material::default()));

        assert_eq!(stats.clipped_away, 2);
        assert_eq!(stats.triangles, 0);
    }

    #[test]
    fn ground_crossing_near_plane_is_clipped_not_dropped() {
        let mesh = Mesh::plane(40.0);
        let camera = camera_at(Vec3::new(0.0, 1.0, 0.0));
        let projection = Projection::for_viewport(W, H);
        let frame = FrameContext::new(&camera, &projection, &[]);
        let mut transform = Transform::new();
        transform.set_position(Vec3::new(0.0, -1.0, 0.0));
        let call = DrawCall {
            model_matrix: transform.to_matrix(),
            ..DrawCall::new(&mesh, Material::default())
        };

        let (mut color, mut depth) = buffers();
        let mut fb = FrameBuffer::new(&mut color, &mut depth, W, H);
        let stats = draw_mesh_with_shader(&mut fb, &frame, &call, &FlatShader::new(Vec3::ONE));

        assert_eq!(stats.culled, 0);
        assert!(stats.triangles >= 2);
        // Bottom rows show ground, top rows stay empty.
        assert_eq!(fb.get_pixel(W as i32 / 2, H as i32 - 1), Some(0xFFFFFFFF));
        assert_eq!(fb.get_pixel(W as i32 / 2, 0), Some(0));
        drop(fb);
        assert!(depth.iter().all(|d| d.is_finite()));
    }

    #[test]
    fn stats_accumulate() {
        let mut total = DrawStats::default();
        total += DrawStats {
            faces: 2,
            culled: 1,
            clipped_away: 0,
            triangles: 1,
            pixels: 10,
        };
        total += DrawStats {
            faces: 3,
            culled: 0,
            clipped_away: 1,
            triangles: 3,
            pixels: 5,
        };
        assert_eq!(total.faces, 5);
        assert_eq!(total.triangles, 4);
        assert_eq!(total.pixels, 15);
    }
}
