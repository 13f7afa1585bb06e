//! First-person camera.
//!
//! # Coordinate System
//!
//! Right-handed: X right, Y up, and the camera looks down **-Z** in view
//! space.
//!
//! # Orientation
//!
//! Orientation is stored as yaw/pitch angles and converted to a rotation
//! matrix when needed.
//!
//! - **Yaw**: rotation around Y. Positive turns counter-clockwise seen from
//!   above (toward -X at the default pose).
//! - **Pitch**: rotation around X, clamped short of straight up/down.
//!   Positive looks up.

use crate::math::mat3::Mat3;
use crate::math::mat4::Mat4;
use crate::math::vec3::Vec3;

/// Pitch stops just short of straight up/down to keep the orientation
/// matrix well-behaved.
const PITCH_LIMIT: f32 = 89.0 * std::f32::consts::PI / 180.0;

/// Camera with a world position and yaw/pitch orientation.
#[derive(Debug, Clone)]
pub struct Camera {
    position: Vec3,
    yaw: f32,   // Rotation around Y-axis (radians)
    pitch: f32, // Rotation around X-axis (radians)
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

impl Camera {
    /// Creates a camera at the given position, looking along -Z.
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    /// Builds the orientation matrix from yaw and pitch.
    ///
    /// `R = rotation_y(yaw) * rotation_x(pitch)` — pitch in the local frame
    /// first, then yaw around the world Y axis.
    pub fn orientation(&self) -> Mat3 {
        Mat3::from_yaw_pitch(self.yaw, self.pitch)
    }

    // =========================================================================
    // Orientation - Rotation
    // =========================================================================

    /// Rotates the camera horizontally (around Y-axis).
    pub fn rotate_yaw(&mut self, delta: f32) {
        self.yaw += delta;
        self.yaw = self.yaw.rem_euclid(std::f32::consts::TAU);
    }

    /// Rotates the camera vertically (around X-axis), clamped to
    /// [`PITCH_LIMIT`].
    pub fn rotate_pitch(&mut self, delta: f32) {
        self.pitch = (self.pitch + delta).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    // =========================================================================
    // Movement
    // =========================================================================

    /// Moves the camera along its look direction.
    pub fn move_forward(&mut self, distance: f32) {
        self.position = self.position + self.forward() * distance;
    }

    /// Moves the camera along its right direction (strafe).
    pub fn move_right(&mut self, distance: f32) {
        self.position = self.position + self.right() * distance;
    }

    /// Moves the camera along the world up direction.
    pub fn move_up(&mut self, distance: f32) {
        self.position.y += distance;
    }

    /// Teleports the camera without changing orientation.
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// The camera's look direction in world space (normalized).
    pub fn forward(&self) -> Vec3 {
        self.orientation() * Vec3::FORWARD
    }

    /// The camera's right direction in world space (normalized).
    pub fn right(&self) -> Vec3 {
        self.orientation() * Vec3::RIGHT
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    // =========================================================================
    // Matrix Generation
    // =========================================================================

    /// Computes the world-to-camera (view) matrix.
    ///
    /// The camera's world transform is `T(position) * R`. Its inverse is
    /// assembled from the transpose of the orientation (valid because R is
    /// orthonormal) with `-Rᵀ·position` in the last column:
    ///
    /// ```text
    /// View = [ Rᵀ | -Rᵀ·p ]
    ///        [ 0  |   1   ]
    /// ```
    pub fn view_matrix(&self) -> Mat4 {
        let rot_inv = self.orientation().transpose();
        let trans_inv = -(rot_inv * self.position);
        Mat4::from_rotation_translation(rot_inv, trans_inv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vec4::Vec4;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn camera_starts_looking_down_negative_z() {
        let camera = Camera::new(Vec3::ZERO);
        assert_relative_eq!(camera.forward().z, -1.0, epsilon = 1e-5);
        assert_relative_eq!(camera.forward().x, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn yaw_rotates_horizontally() {
        let mut camera = Camera::new(Vec3::ZERO);
        camera.rotate_yaw(FRAC_PI_2);
        // Positive yaw is counter-clockwise from above: -Z turns to -X.
        assert_relative_eq!(camera.forward().x, -1.0, epsilon = 1e-5);
        assert_relative_eq!(camera.forward().z, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn pitch_is_clamped() {
        let mut camera = Camera::new(Vec3::ZERO);
        camera.rotate_pitch(std::f32::consts::PI);
        assert!(camera.pitch() < FRAC_PI_2);
        assert!(camera.pitch() > 0.0);
    }

    #[test]
    fn move_forward_changes_position() {
        let mut camera = Camera::new(Vec3::ZERO);
        camera.move_forward(5.0);
        assert_relative_eq!(camera.position().z, -5.0, epsilon = 1e-5);
    }

    #[test]
    fn identity_pose_gives_identity_view() {
        let camera = Camera::new(Vec3::ZERO);
        assert_eq!(camera.view_matrix(), Mat4::identity());
    }

    #[test]
    fn view_matrix_places_origin_in_front() {
        let camera = Camera::new(Vec3::new(0.0, 0.0, 5.0));
        let origin = camera.view_matrix() * Vec4::point(0.0, 0.0, 0.0);
        // 5 units in front of the camera means view z = -5.
        assert_relative_eq!(origin.z, -5.0, epsilon = 1e-4);
    }

    #[test]
    fn view_round_trips_through_camera_world_transform() {
        let mut camera = Camera::new(Vec3::new(1.0, 2.0, 3.0));
        camera.rotate_yaw(0.8);
        camera.rotate_pitch(-0.4);

        let view = camera.view_matrix();
        let camera_to_world =
            Mat4::from_rotation_translation(camera.orientation(), camera.position());

        let p = Vec4::point(-2.5, 4.0, 7.5);
        let round_trip = camera_to_world * (view * p);
        assert_relative_eq!(round_trip.x, p.x, epsilon = 1e-4);
        assert_relative_eq!(round_trip.y, p.y, epsilon = 1e-4);
        assert_relative_eq!(round_trip.z, p.z, epsilon = 1e-4);
    }
}
