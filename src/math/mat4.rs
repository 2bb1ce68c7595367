//! 4x4 transformation matrix.
//!
//! # Convention
//! - Storage is **row-major**: `data[row][col]`
//! - Vectors are **column vectors** on the right: `Mat4 * Vec`
//! - Translation is stored in the **last column**
//! - Transforms chain **right-to-left**: `A * B * v` applies B first, then A
//! - World space is **right-handed**, the camera looks down -Z
//!
//! # Example
//! ```ignore
//! let mvp = projection * view * model; // model applied first
//! let clip = mvp * vertex;             // Vec4, not yet divided by w
//! ```

use std::ops::Mul;

use super::vec3::Vec3;
use super::vec4::Vec4;

/// 4x4 matrix stored as `data[row][col]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    data: [[f32; 4]; 4],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mat4 {
    pub const fn new(data: [[f32; 4]; 4]) -> Self {
        Mat4 { data }
    }

    pub const fn identity() -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a translation matrix.
    pub fn translation(t: Vec3) -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, t.x],
            [0.0, 1.0, 0.0, t.y],
            [0.0, 0.0, 1.0, t.z],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a scale matrix.
    pub fn scaling(s: Vec3) -> Self {
        Mat4::new([
            [s.x, 0.0, 0.0, 0.0],
            [0.0, s.y, 0.0, 0.0],
            [0.0, 0.0, s.z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a counter-clockwise rotation of `radians` around `axis`
    /// (Rodrigues' formula). The axis does not need to be unit length.
    pub fn rotation(axis: Vec3, radians: f32) -> Self {
        let a = axis.normalize();
        let (s, c) = radians.sin_cos();
        let ic = 1.0 - c;

        Mat4::new([
            [
                a.x * a.x * ic + c,
                a.x * a.y * ic - a.z * s,
                a.x * a.z * ic + a.y * s,
                0.0,
            ],
            [
                a.y * a.x * ic + a.z * s,
                a.y * a.y * ic + c,
                a.y * a.z * ic - a.x * s,
                0.0,
            ],
            [
                a.z * a.x * ic - a.y * s,
                a.z * a.y * ic + a.x * s,
                a.z * a.z * ic + c,
                0.0,
            ],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn rotation_x(radians: f32) -> Self {
        Self::rotation(Vec3::RIGHT, radians)
    }

    pub fn rotation_y(radians: f32) -> Self {
        Self::rotation(Vec3::UP, radians)
    }

    pub fn rotation_z(radians: f32) -> Self {
        Self::rotation(Vec3::BACK, radians)
    }

    /// Creates a right-handed view matrix looking from `eye` toward `target`.
    ///
    /// The camera basis is `right = front × world_up`, `up = right × front`,
    /// and view space looks down -Z. If `target == eye` or the view direction
    /// is parallel to `world_up` the basis collapses and the result is garbage;
    /// callers are expected not to do that.
    pub fn look_at_rh(eye: Vec3, target: Vec3, world_up: Vec3) -> Self {
        let front = (target - eye).normalize();
        let right = front.cross(world_up).normalize();
        let up = right.cross(front).normalize();

        // Rotation (basis vectors as rows) times translation by -eye.
        Self::new([
            [right.x, right.y, right.z, -right.dot(eye)],
            [up.x, up.y, up.z, -up.dot(eye)],
            [-front.x, -front.y, -front.z, front.dot(eye)],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Creates a symmetric-frustum perspective projection (OpenGL depth range).
    ///
    /// Points in front of the camera (negative view-space z) get a positive
    /// clip-space `w` equal to their distance along the view axis; NDC depth
    /// maps `near` to -1 and `far` to +1.
    pub fn perspective_rh(fov_y: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        let f = 1.0 / (fov_y / 2.0).tan();
        Mat4::new([
            [f / aspect_ratio, 0.0, 0.0, 0.0],
            [0.0, f, 0.0, 0.0],
            [
                0.0,
                0.0,
                (near + far) / (near - far),
                (2.0 * near * far) / (near - far),
            ],
            [0.0, 0.0, -1.0, 0.0],
        ])
    }

    /// Access element at [row][col].
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row][col]
    }
}

/// Matrix multiplication: Mat4 * Mat4.
impl Mul<Mat4> for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Self::Output {
        let mut result = [[0.0f32; 4]; 4];

        for (row, out) in result.iter_mut().enumerate() {
            for (col, cell) in out.iter_mut().enumerate() {
                *cell = (0..4).map(|k| self.data[row][k] * rhs.data[k][col]).sum();
            }
        }

        Mat4::new(result)
    }
}

/// Transform a Vec4 by a matrix: Mat4 * Vec4 (column vector).
impl Mul<Vec4> for Mat4 {
    type Output = Vec4;

    fn mul(self, v: Vec4) -> Self::Output {
        let row = |r: usize| {
            self.data[r][0] * v.x
                + self.data[r][1] * v.y
                + self.data[r][2] * v.z
                + self.data[r][3] * v.w
        };
        Vec4::new(row(0), row(1), row(2), row(3))
    }
}

/// Transform a point: Mat4 * Vec3 (treats Vec3 as column vector with w=1).
///
/// Returns the homogeneous result. No perspective divide is performed;
/// clipping needs the undivided `w`.
impl Mul<Vec3> for Mat4 {
    type Output = Vec4;

    fn mul(self, v: Vec3) -> Self::Output {
        self * Vec4::point(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn identity_is_neutral() {
        let t = Mat4::translation(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(t * Mat4::identity(), t);
        assert_eq!(Mat4::identity() * t, t);
    }

    #[test]
    fn point_transform_keeps_w() {
        let p = Mat4::translation(Vec3::new(1.0, 2.0, 3.0)) * Vec3::ZERO;
        assert_eq!(p, Vec4::new(1.0, 2.0, 3.0, 1.0));
    }

    #[test]
    fn rotation_y_is_counter_clockwise() {
        let r = Mat4::rotation_y(FRAC_PI_2) * Vec3::RIGHT;
        assert_relative_eq!(r.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(r.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(r.z, -1.0, epsilon = 1e-6);
    }

    #[test]
    fn rotation_z_matches_axis_rotation() {
        assert_eq!(
            Mat4::rotation_z(0.7),
            Mat4::rotation(Vec3::new(0.0, 0.0, 4.0), 0.7)
        );
    }

    #[test]
    fn look_at_moves_eye_to_origin_and_target_down_negative_z() {
        let eye = Vec3::new(0.0, 2.0, 20.0);
        let view = Mat4::look_at_rh(eye, Vec3::new(0.0, 2.0, 0.0), Vec3::UP);

        let eye_view = (view * eye).xyz();
        assert_relative_eq!(eye_view.length(), 0.0, epsilon = 1e-5);

        let target_view = view * Vec3::new(0.0, 2.0, 0.0);
        assert_relative_eq!(target_view.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(target_view.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(target_view.z, -20.0, epsilon = 1e-5);
    }

    #[test]
    fn perspective_w_is_distance_in_front() {
        let proj = Mat4::perspective_rh(45f32.to_radians(), 1.0, 0.1, 100.0);
        let clip = proj * Vec3::new(0.0, 0.0, -5.0);
        assert_relative_eq!(clip.w, 5.0);

        // Behind the eye: negative w.
        let behind = proj * Vec3::new(0.0, 0.0, 2.0);
        assert!(behind.w < 0.0);
    }

    #[test]
    fn perspective_maps_near_and_far_to_ndc_bounds() {
        let proj = Mat4::perspective_rh(45f32.to_radians(), 1.0, 0.1, 100.0);
        let near = proj * Vec3::new(0.0, 0.0, -0.1);
        let far = proj * Vec3::new(0.0, 0.0, -100.0);
        assert_relative_eq!(near.z / near.w, -1.0, epsilon = 1e-4);
        assert_relative_eq!(far.z / far.w, 1.0, epsilon = 1e-4);
    }
}
