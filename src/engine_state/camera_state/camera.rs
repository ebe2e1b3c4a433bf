//! # Camera Implementation
//!
//! This module contains the first-person camera: a position plus yaw and
//! pitch angles, with helpers for the view matrix and the view ray used for
//! block picking.

use cgmath::*;
use std::f32::consts::FRAC_PI_2;

use crate::engine_state::physics::Ray;

/// Pitch limit keeping the view away from straight up and straight down.
pub const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.05;

/// Represents a first-person camera in 3D space.
///
/// # Fields
/// - `position`: The camera's position in world space
/// - `yaw`: Horizontal rotation (around Y axis) in radians, zero facing +X
/// - `pitch`: Vertical rotation in radians, positive looking up
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// The camera's position in world space
    pub position: Point3<f32>,
    /// Horizontal rotation (around Y axis) in radians
    pub yaw: Rad<f32>,
    /// Vertical rotation in radians
    pub pitch: Rad<f32>,
}

impl Camera {
    /// Creates a new camera with the specified position and orientation.
    ///
    /// # Arguments
    /// * `position` - Initial position of the camera in world space. Can be any type that converts to `Point3<f32>`.
    /// * `yaw` - Initial yaw (horizontal rotation around Y axis). Can be any type that converts to `Rad<f32>`.
    /// * `pitch` - Initial pitch. Clamped to [`PITCH_LIMIT`].
    ///
    /// # Example
    /// ```rust
    /// use blockworld::engine_state::camera_state::Camera;
    /// use cgmath::{Deg, Point3};
    /// let camera = Camera::new(
    ///     Point3::new(0.0, 0.0, 0.0),  // Position at origin
    ///     Deg(0.0),                     // Facing along positive X
    ///     Deg(0.0),                     // Level horizon
    /// );
    /// ```
    pub fn new<V: Into<Point3<f32>>, Y: Into<Rad<f32>>, P: Into<Rad<f32>>>(
        position: V,
        yaw: Y,
        pitch: P,
    ) -> Self {
        let mut camera = Self {
            position: position.into(),
            yaw: yaw.into(),
            pitch: Rad(0.0),
        };
        camera.rotate(Rad(0.0), pitch.into());
        camera
    }

    /// Turns the camera, clamping pitch to [`PITCH_LIMIT`].
    pub fn rotate(&mut self, yaw_delta: Rad<f32>, pitch_delta: Rad<f32>) {
        self.yaw += yaw_delta;
        self.pitch = Rad((self.pitch + pitch_delta).0.clamp(-PITCH_LIMIT, PITCH_LIMIT));
    }

    /// Unit vector the camera looks along.
    pub fn forward(&self) -> Vector3<f32> {
        let (yaw_sin, yaw_cos) = self.yaw.0.sin_cos();
        let (pitch_sin, pitch_cos) = self.pitch.0.sin_cos();
        Vector3::new(pitch_cos * yaw_cos, pitch_sin, pitch_cos * yaw_sin).normalize()
    }

    /// Horizontal unit vector the camera faces, ignoring pitch.
    pub fn flat_forward(&self) -> Vector3<f32> {
        let (yaw_sin, yaw_cos) = self.yaw.0.sin_cos();
        Vector3::new(yaw_cos, 0.0, yaw_sin)
    }

    /// Horizontal unit vector to the camera's right.
    pub fn flat_right(&self) -> Vector3<f32> {
        let (yaw_sin, yaw_cos) = self.yaw.0.sin_cos();
        Vector3::new(-yaw_sin, 0.0, yaw_cos)
    }

    /// Calculates the view matrix for this camera.
    ///
    /// The view matrix transforms world coordinates to view (camera) space.
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_to_rh(self.position, self.forward(), Vector3::unit_y())
    }

    /// Ray from the camera position along its view direction.
    pub fn view_ray(&self) -> Ray {
        Ray::new(self.position, self.forward())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pitch_is_clamped() {
        let mut camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Rad(0.0), Rad(0.0));
        camera.rotate(Rad(0.0), Rad(10.0));
        assert_eq!(camera.pitch, Rad(PITCH_LIMIT));
        camera.rotate(Rad(0.0), Rad(-20.0));
        assert_eq!(camera.pitch, Rad(-PITCH_LIMIT));
    }

    #[test]
    fn test_basis_vectors() {
        let camera = Camera::new(Point3::new(0.0, 0.0, 0.0), Rad(0.0), Rad(0.0));
        assert!((camera.forward() - Vector3::unit_x()).magnitude() < 1e-6);
        assert!((camera.flat_right() - Vector3::unit_z()).magnitude() < 1e-6);
        assert!(camera.forward().cross(Vector3::unit_y()).dot(camera.flat_right()) > 0.99);
    }

    #[test]
    fn test_view_ray_follows_pitch() {
        let camera = Camera::new(Point3::new(1.0, 2.0, 3.0), Rad(0.0), Rad(-1.0));
        let ray = camera.view_ray();
        assert_eq!(ray.origin, Point3::new(1.0, 2.0, 3.0));
        assert!(ray.direction.y < 0.0);
    }
}
