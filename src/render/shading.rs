// src/render/shading.rs
//
// Flat Blinn-Phong lighting and linear fog, evaluated on the CPU per triangle / vertex

use glam::Vec3;
use nannou::color::{hsl, Rgb};
use rand::Rng;

use crate::config::{FogConfig, LightsConfig};
use crate::utilities::easing::smoothstep;

#[derive(Debug, Clone)]
pub struct DirectionalLight {
    pub color: Vec3,
    pub intensity: f32,
    pub direction: Vec3, // from the scene towards the light
}

#[derive(Debug, Clone)]
pub struct PointLight {
    pub color: Vec3,
    pub intensity: f32,
    pub position: Vec3,
}

#[derive(Debug, Clone)]
pub struct Lights {
    pub directional: DirectionalLight,
    pub point: PointLight,
}

impl Lights {
    /// The point light gets a random hue for the session.
    pub fn new<R: Rng>(config: &LightsConfig, rng: &mut R) -> Self {
        let hue: f32 = rng.gen_range(0.0..1.0);
        Self {
            directional: DirectionalLight {
                color: Vec3::ONE,
                intensity: config.directional_intensity,
                direction: Vec3::from(config.directional_direction).normalize(),
            },
            point: PointLight {
                color: hsl_to_rgb(hue, config.point_saturation, config.point_lightness),
                intensity: config.point_intensity,
                position: Vec3::from(config.point_position),
            },
        }
    }
}

/// `hue` in turns (0..1), as nannou's `hsl` takes it.
pub fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> Vec3 {
    let rgb = Rgb::from(hsl(hue, saturation, lightness));
    Vec3::new(rgb.red, rgb.green, rgb.blue)
}

#[derive(Debug, Clone)]
pub struct PhongMaterial {
    pub color: Vec3,
    pub specular: Vec3,
    pub shininess: f32,
}

impl Default for PhongMaterial {
    fn default() -> Self {
        Self {
            color: Vec3::ONE,
            specular: Vec3::splat(0x11 as f32 / 255.0),
            shininess: 30.0,
        }
    }
}

impl PhongMaterial {
    /// Color of a flat-shaded face. The normal is flipped towards the eye so
    /// both sides of a face are lit.
    pub fn shade(&self, lights: &Lights, normal: Vec3, point: Vec3, eye: Vec3) -> Vec3 {
        let to_eye = (eye - point).normalize();
        let normal = if normal.dot(to_eye) < 0.0 { -normal } else { normal };

        let mut color = self.light_contribution(
            lights.directional.color * lights.directional.intensity,
            lights.directional.direction,
            normal,
            to_eye,
        );

        let to_point_light = lights.point.position - point;
        if to_point_light.length_squared() > f32::EPSILON {
            color += self.light_contribution(
                lights.point.color * lights.point.intensity,
                to_point_light.normalize(),
                normal,
                to_eye,
            );
        }

        color.clamp(Vec3::ZERO, Vec3::ONE)
    }

    fn light_contribution(&self, radiance: Vec3, to_light: Vec3, normal: Vec3, to_eye: Vec3) -> Vec3 {
        let diffuse = normal.dot(to_light).max(0.0);
        if diffuse == 0.0 {
            return Vec3::ZERO;
        }
        let halfway = (to_light + to_eye).normalize();
        let specular = normal.dot(halfway).max(0.0).powf(self.shininess);
        radiance * (self.color * diffuse + self.specular * specular)
    }
}

#[derive(Debug, Clone)]
pub struct Fog {
    pub color: Vec3,
    pub near: f32,
    pub far: f32,
}

impl Fog {
    pub fn new(config: &FogConfig) -> Self {
        Self {
            color: Vec3::from(config.background),
            near: config.near,
            far: config.far,
        }
    }

    /// 0 = untouched, 1 = fully fog colored. `depth` is the view-space distance along the view axis.
    pub fn factor(&self, depth: f32) -> f32 {
        smoothstep(self.near, self.far, depth)
    }

    pub fn apply(&self, color: Vec3, depth: f32) -> Vec3 {
        color.lerp(self.color, self.factor(depth))
    }
}
