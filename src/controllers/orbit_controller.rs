// src/controllers/orbit_controller.rs
//
// Orbit controls: the camera circles a target point on a sphere.
// Rotation is driven by a secondary-button drag, distance by the scroll wheel.

use glam::{Vec2, Vec3};
use std::f32::consts::{PI, TAU};

use crate::config::OrbitConfig;
use crate::render::camera::PerspectiveCamera;

const POLAR_EPSILON: f32 = 1e-6;

#[derive(Debug, Clone)]
pub struct OrbitControls {
    target: Vec3,
    radius: f32,
    theta: f32, // azimuth about +y, 0 looks down -z
    phi: f32,   // polar angle from +y
    rotate_speed: f32,
    zoom_speed: f32,
    min_distance: f32,
    max_distance: f32,
    rotating_from: Option<Vec2>,
}

impl OrbitControls {
    pub fn new(config: &OrbitConfig, camera_position: Vec3) -> Self {
        let target = Vec3::from(config.target);
        let offset = camera_position - target;
        let radius = offset.length();
        let (theta, phi) = if radius > 0.0 {
            (offset.x.atan2(offset.z), (offset.y / radius).clamp(-1.0, 1.0).acos())
        } else {
            (0.0, PI / 2.0)
        };

        Self {
            target,
            radius,
            theta,
            phi: phi.clamp(POLAR_EPSILON, PI - POLAR_EPSILON),
            rotate_speed: config.rotate_speed,
            zoom_speed: config.zoom_speed,
            min_distance: config.min_distance,
            max_distance: config.max_distance,
            rotating_from: None,
        }
    }

    pub fn distance(&self) -> f32 {
        self.radius
    }

    pub fn is_rotating(&self) -> bool {
        self.rotating_from.is_some()
    }

    /// `pointer` is in window points, y down.
    pub fn begin_rotate(&mut self, pointer: Vec2) {
        self.rotating_from = Some(pointer);
    }

    /// A drag across the full viewport height turns the camera once around.
    pub fn rotate_to(&mut self, pointer: Vec2, viewport_height: f32, camera: &mut PerspectiveCamera) {
        let Some(from) = self.rotating_from else {
            return;
        };
        if viewport_height <= 0.0 {
            return;
        }

        let delta = (pointer - from) * (TAU / viewport_height) * self.rotate_speed;
        self.theta -= delta.x;
        self.phi = (self.phi - delta.y).clamp(POLAR_EPSILON, PI - POLAR_EPSILON);
        self.rotating_from = Some(pointer);
        self.apply(camera);
    }

    pub fn end_rotate(&mut self) {
        self.rotating_from = None;
    }

    /// Positive `lines` (wheel up) moves the camera closer.
    pub fn zoom(&mut self, lines: f32, camera: &mut PerspectiveCamera) {
        let scale = 0.95_f32.powf(self.zoom_speed);
        self.radius = (self.radius * scale.powf(lines)).clamp(self.min_distance, self.max_distance);
        self.apply(camera);
    }

    fn apply(&self, camera: &mut PerspectiveCamera) {
        let sin_phi = self.phi.sin();
        let offset = Vec3::new(
            self.radius * sin_phi * self.theta.sin(),
            self.radius * self.phi.cos(),
            self.radius * sin_phi * self.theta.cos(),
        );
        camera.position = self.target + offset;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CameraConfig;

    fn setup() -> (OrbitControls, PerspectiveCamera) {
        let camera = PerspectiveCamera::new(&CameraConfig::default(), 1.6);
        let controls = OrbitControls::new(&OrbitConfig::default(), camera.position);
        (controls, camera)
    }

    #[test]
    fn test_rotation_keeps_distance() {
        let (mut controls, mut camera) = setup();
        let target = Vec3::new(0.0, 0.5, 0.0);
        let distance = (camera.position - target).length();

        controls.begin_rotate(Vec2::new(100.0, 100.0));
        controls.rotate_to(Vec2::new(180.0, 130.0), 800.0, &mut camera);
        assert!(((camera.position - target).length() - distance).abs() < 1e-2);
        assert!(camera.position.x.abs() > 1.0);
    }

    #[test]
    fn test_full_height_drag_is_a_full_turn() {
        let (mut controls, mut camera) = setup();
        let start = camera.position;
        controls.begin_rotate(Vec2::new(0.0, 0.0));
        controls.rotate_to(Vec2::new(800.0, 0.0), 800.0, &mut camera);
        assert!((camera.position - start).length() < 1e-2);
    }

    #[test]
    fn test_rotate_without_begin_does_nothing() {
        let (mut controls, mut camera) = setup();
        let start = camera.position;
        controls.rotate_to(Vec2::new(300.0, 0.0), 800.0, &mut camera);
        assert_eq!(camera.position, start);

        controls.begin_rotate(Vec2::ZERO);
        controls.end_rotate();
        assert!(!controls.is_rotating());
        controls.rotate_to(Vec2::new(300.0, 0.0), 800.0, &mut camera);
        assert_eq!(camera.position, start);
    }

    #[test]
    fn test_polar_angle_is_clamped() {
        let (mut controls, mut camera) = setup();
        controls.begin_rotate(Vec2::ZERO);
        controls.rotate_to(Vec2::new(0.0, 5000.0), 800.0, &mut camera);
        assert!(camera.position.y > 0.5);
        assert!(camera.position.x.abs() < 1e-2 && camera.position.z.abs() < 1e-1);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let (mut controls, mut camera) = setup();
        let before = controls.distance();
        controls.zoom(1.0, &mut camera);
        assert!((controls.distance() - before * 0.95).abs() < 1e-2);

        controls.zoom(-1000.0, &mut camera);
        assert_eq!(controls.distance(), 1500.0);
        controls.zoom(1000.0, &mut camera);
        assert_eq!(controls.distance(), 50.0);
        assert!(((camera.position - Vec3::new(0.0, 0.5, 0.0)).length() - 50.0).abs() < 1e-2);
    }
}
