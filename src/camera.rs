//! First-person camera.
//!
//! # Coordinate System
//!
//! Uses a **right-handed** coordinate system:
//! - X: positive right
//! - Y: positive up
//! - Z: positive toward the viewer (the default camera looks down -Z)
//!
//! # Orientation
//!
//! Orientation is stored as yaw/pitch angles in degrees. The look target is
//! derived from them and the view matrix is rebuilt from
//! position + target + world up every frame.
//!
//! - **Yaw**: Rotation around Y. `-90°` looks down -Z, `0°` looks down +X.
//! - **Pitch**: Elevation. Positive looks up; clamped to ±89°.

use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;

const PITCH_LIMIT: f32 = 89.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Vec3,
    /// Movement speed in world units per second.
    speed: f32,
    yaw: f32,
    pitch: f32,
    target: Vec3,
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 2.0, 20.0), 5.0, -90.0, 0.0)
    }
}

impl Camera {
    /// Creates a camera at `position` with the given orientation in degrees.
    pub fn new(position: Vec3, speed: f32, yaw: f32, pitch: f32) -> Self {
        let mut camera = Self {
            position,
            speed,
            yaw,
            pitch: pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
            target: Vec3::ZERO,
        };
        camera.update_target();
        camera
    }

    fn update_target(&mut self) {
        self.target = self.position + self.front();
    }

    /// Unit view direction derived from yaw and pitch.
    pub fn front(&self) -> Vec3 {
        let (yaw, pitch) = (self.yaw.to_radians(), self.pitch.to_radians());
        Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalize()
    }

    /// Unit right direction, horizontal for any pitch.
    pub fn right(&self) -> Vec3 {
        self.front().cross(Vec3::UP).normalize()
    }

    // =========================================================================
    // Movement
    // =========================================================================

    /// Moves along the view direction by `speed * dt` (negative `dt` backs up).
    pub fn move_forward(&mut self, dt: f32) {
        self.position += self.front() * (self.speed * dt);
        self.update_target();
    }

    /// Strafes right by `speed * dt` (negative `dt` strafes left).
    pub fn strafe(&mut self, dt: f32) {
        self.position += self.right() * (self.speed * dt);
        self.update_target();
    }

    /// Moves along world Y by `speed * dt`.
    pub fn ascend(&mut self, dt: f32) {
        self.position.y += self.speed * dt;
        self.update_target();
    }

    /// Rotates by yaw/pitch deltas in degrees. Pitch is clamped to ±89°.
    pub fn rotate(&mut self, yaw_delta: f32, pitch_delta: f32) {
        self.yaw += yaw_delta;
        self.pitch = (self.pitch + pitch_delta).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.update_target();
    }

    /// Teleports the camera to a new position without changing orientation.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
        self.update_target();
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// The point one unit in front of the camera.
    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Computes the view matrix for the rendering pipeline.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::UP)
    }
}

/// Movement keys and mouse motion sampled for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Relative mouse motion in pixels, y pointing down.
    pub mouse_delta: (i32, i32),
}

/// Maps an [`InputState`] onto camera movement.
///
/// - W/S: forward/back along the view direction
/// - A/D: strafe
/// - Q/E: up/down along world Y
/// - Mouse: yaw/pitch, moving the mouse up looks up
#[derive(Debug, Clone)]
pub struct CameraController {
    /// Degrees per pixel of mouse motion.
    pub look_sensitivity: f32,
}

impl Default for CameraController {
    fn default() -> Self {
        Self {
            look_sensitivity: 0.1,
        }
    }
}

impl CameraController {
    pub fn new(look_sensitivity: f32) -> Self {
        Self { look_sensitivity }
    }

    pub fn update(&self, camera: &mut Camera, input: &InputState, delta_time: f32) {
        let (dx, dy) = input.mouse_delta;
        if dx != 0 || dy != 0 {
            camera.rotate(
                dx as f32 * self.look_sensitivity,
                -dy as f32 * self.look_sensitivity,
            );
        }

        if input.forward {
            camera.move_forward(delta_time);
        }
        if input.back {
            camera.move_forward(-delta_time);
        }
        if input.right {
            camera.strafe(delta_time);
        }
        if input.left {
            camera.strafe(-delta_time);
        }
        if input.up {
            camera.ascend(delta_time);
        }
        if input.down {
            camera.ascend(-delta_time);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_yaw_looks_down_negative_z() {
        let camera = Camera::new(Vec3::ZERO, 1.0, -90.0, 0.0);
        let front = camera.front();
        assert_relative_eq!(front.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(front.z, -1.0, epsilon = 1e-6);
        assert_relative_eq!(camera.target().z, -1.0, epsilon = 1e-6);
    }

    #[test]
    fn pitch_is_clamped() {
        let mut camera = Camera::new(Vec3::ZERO, 1.0, -90.0, 0.0);
        camera.rotate(0.0, 180.0);
        assert_eq!(camera.pitch(), 89.0);
        camera.rotate(0.0, -500.0);
        assert_eq!(camera.pitch(), -89.0);
    }

    #[test]
    fn movement_scales_with_speed_and_updates_target() {
        let mut camera = Camera::new(Vec3::ZERO, 5.0, -90.0, 0.0);
        camera.move_forward(0.5);
        assert_relative_eq!(camera.position().z, -2.5, epsilon = 1e-5);
        assert_relative_eq!(camera.target().z, -3.5, epsilon = 1e-5);

        camera.strafe(1.0);
        assert_relative_eq!(camera.position().x, 5.0, epsilon = 1e-5);

        camera.ascend(-1.0);
        assert_relative_eq!(camera.position().y, -5.0, epsilon = 1e-5);
    }

    #[test]
    fn view_matrix_puts_target_in_front() {
        let camera = Camera::new(Vec3::new(0.0, 0.0, 5.0), 1.0, -90.0, 0.0);
        let origin = camera.view_matrix() * Vec3::ZERO;
        assert_relative_eq!(origin.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(origin.z, -5.0, epsilon = 1e-5);
    }

    #[test]
    fn controller_maps_keys_and_mouse() {
        let mut camera = Camera::new(Vec3::ZERO, 2.0, -90.0, 0.0);
        let controller = CameraController::default();
        let input = InputState {
            forward: true,
            up: true,
            mouse_delta: (0, -50),
            ..InputState::default()
        };
        controller.update(&mut camera, &input, 0.5);

        assert_relative_eq!(camera.pitch(), 5.0, epsilon = 1e-5);
        assert_relative_eq!(camera.position().y, 1.0 + 5.0f32.to_radians().sin(), epsilon = 1e-5);
        assert!(camera.position().z < 0.0);
    }

    #[test]
    fn idle_input_leaves_camera_alone() {
        let mut camera = Camera::default();
        let before = camera.clone();
        CameraController::default().update(&mut camera, &InputState::default(), 1.0);
        assert_eq!(camera, before);
    }
}
