// src/render/camera.rs
//
// Perspective camera looking at a fixed point

use glam::{Mat4, Vec3, Vec4};

use crate::config::CameraConfig;

#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    pub fov_y_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    looking_at: Vec3,
}

impl PerspectiveCamera {
    pub fn new(config: &CameraConfig, aspect: f32) -> Self {
        Self {
            fov_y_degrees: config.fov_degrees,
            aspect,
            near: config.near,
            far: config.far,
            position: Vec3::from(config.position),
            looking_at: Vec3::from(config.target),
        }
    }

    pub fn look_at(&mut self, target: Vec3) {
        self.looking_at = target;
    }

    pub fn looking_at(&self) -> Vec3 {
        self.looking_at
    }

    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.looking_at, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov_y_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    /// View space to normalized device coordinates. Points behind the near
    /// plane must be clipped first.
    pub fn project(&self, view_position: Vec3) -> Vec3 {
        let clip: Vec4 = self.projection_matrix() * view_position.extend(1.0);
        clip.truncate() / clip.w
    }
}
