// src/views/scene.rs
//
// Owns everything in the 3D scene: camera, lights, fog, ground plane and the
// text group. Rebuilds the text meshes whenever the text changes.

use glam::Vec3;
use rand::Rng;
use std::f32::consts::{PI, TAU};
use std::rc::Rc;

use crate::config::{Config, ExtrusionParams, GroundConfig};
use crate::errors::GeometryError;
use crate::models::{MeshInstance, TextGroup};
use crate::render::camera::PerspectiveCamera;
use crate::render::renderer::Viewport;
use crate::render::shading::{Fog, Lights, PhongMaterial};
use crate::services::{GeometryBuilder, GlyphSource};

/// Large translucent floor. Split into tiles so fog can vary across it.
#[derive(Debug, Clone)]
pub struct GroundPlane {
    pub height: f32,
    pub size: f32,
    pub opacity: f32,
    pub color: Vec3,
    subdivisions: u32,
}

impl GroundPlane {
    pub fn new(config: &GroundConfig) -> Self {
        Self {
            height: config.height,
            size: config.size,
            opacity: config.opacity,
            color: Vec3::ONE,
            subdivisions: config.subdivisions.max(1),
        }
    }

    pub fn triangles(&self) -> Vec<[Vec3; 3]> {
        let n = self.subdivisions;
        let tile = self.size / n as f32;
        let start = -self.size / 2.0;
        let corner = |i: u32, j: u32| {
            Vec3::new(start + i as f32 * tile, self.height, start + j as f32 * tile)
        };

        let mut triangles = Vec::with_capacity((n * n * 2) as usize);
        for i in 0..n {
            for j in 0..n {
                let (a, b, c, d) = (corner(i, j), corner(i + 1, j), corner(i + 1, j + 1), corner(i, j + 1));
                triangles.push([a, d, c]);
                triangles.push([a, c, b]);
            }
        }
        triangles
    }
}

pub struct SceneManager {
    pub camera: PerspectiveCamera,
    pub camera_target: Vec3,
    pub lights: Lights,
    pub fog: Fog,
    pub ground: GroundPlane,
    pub material: PhongMaterial,
    pub group: TextGroup,
    builder: GeometryBuilder,
    main_params: ExtrusionParams,
    caption_params: ExtrusionParams,
    hover: f32,
    mirror: bool,
    caption_position: Vec3,
}

impl SceneManager {
    pub fn new<R: Rng>(config: &Config, viewport: Viewport, rng: &mut R) -> Self {
        let aspect = viewport.width / viewport.height.max(1.0);
        let camera = PerspectiveCamera::new(&config.camera, aspect);
        let camera_target = Vec3::from(config.camera.target);

        Self {
            camera,
            camera_target,
            lights: Lights::new(&config.lights, rng),
            fog: Fog::new(&config.fog),
            ground: GroundPlane::new(&config.ground),
            material: PhongMaterial::default(),
            group: TextGroup::new(Vec3::new(0.0, config.text.group_height, 0.0)),
            builder: GeometryBuilder::new(),
            main_params: config.extrusion.main,
            caption_params: config.extrusion.caption,
            hover: config.text.hover,
            mirror: config.text.mirror,
            caption_position: Vec3::from(config.text.caption_position),
        }
    }

    /// Replaces the main text meshes. Empty text leaves the group without them.
    pub fn rebuild_main_text(&mut self, text: &str, font: &dyn GlyphSource) {
        self.group.clear_main_text();
        if text.is_empty() {
            return;
        }

        let geometry = match self.builder.build(text, font, &self.main_params) {
            Ok(geometry) => Rc::new(geometry),
            Err(e @ GeometryError::NoOutlines(_)) => {
                tracing::debug!("{}", e);
                return;
            }
            Err(e) => {
                tracing::warn!("Could not build text {:?}: {}", text, e);
                return;
            }
        };

        let center_offset = geometry.bounding_box().center_offset_x();
        let main = MeshInstance::new(
            geometry.clone(),
            Vec3::new(center_offset, self.hover, 0.0),
            Vec3::new(0.0, TAU, 0.0),
        );

        // Upside-down copy below the floor, standing in for a reflection
        let mirror = self.mirror.then(|| {
            MeshInstance::new(
                geometry,
                Vec3::new(center_offset, -self.hover, self.main_params.depth),
                Vec3::new(PI, TAU, 0.0),
            )
        });

        tracing::debug!(
            "Rebuilt {:?}: {} triangles",
            text,
            main.geometry.triangle_count()
        );
        self.group.set_main_text(main, mirror);
    }

    /// Adds the caption once; it is not centered and never rebuilt.
    pub fn build_caption_text(&mut self, text: &str, font: &dyn GlyphSource) {
        if text.is_empty() {
            return;
        }

        match self.builder.build(text, font, &self.caption_params) {
            Ok(geometry) => self.group.set_caption(MeshInstance::new(
                Rc::new(geometry),
                self.caption_position,
                Vec3::new(0.0, TAU, 0.0),
            )),
            Err(e) => tracing::warn!("Could not build caption {:?}: {}", text, e),
        }
    }

    pub fn aim_camera(&mut self) {
        self.camera.look_at(self.camera_target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::font_service::tests::bundled_font;
    use crate::services::geometry_service::tests::BlockFont;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn scene_with(config: &Config) -> SceneManager {
        SceneManager::new(config, Viewport::new(1280.0, 800.0), &mut StdRng::seed_from_u64(3))
    }

    fn scene() -> SceneManager {
        scene_with(&Config::default())
    }

    #[test]
    fn test_rebuild_main_text_with_mirror() {
        let mut scene = scene();
        let font = bundled_font();
        scene.rebuild_main_text("Hi", &font);

        let main = scene.group.main().unwrap();
        let mirror = scene.group.mirror().unwrap();
        assert_eq!(scene.group.len(), 2);
        assert!(main.shares_geometry_with(mirror));

        let center_offset = main.geometry.bounding_box().center_offset_x();
        assert_eq!(main.position, Vec3::new(center_offset, 35.0, 0.0));
        assert_eq!(mirror.position, Vec3::new(center_offset, -35.0, 20.0));
        assert_eq!(mirror.position.y - main.position.y, -70.0);
        assert_eq!(mirror.rotation.x - main.rotation.x, PI);
        assert_eq!(main.rotation.y, mirror.rotation.y);
    }

    #[test]
    fn test_text_is_centered() {
        let mut scene = scene();
        scene.rebuild_main_text("AAAA", &BlockFont { clockwise: true });
        let main = scene.group.main().unwrap();
        let bbox = main.geometry.bounding_box();
        // 4 glyphs of 70 minus the trailing gap of 14, plus the bevel on both sides
        assert!((bbox.size().x - 269.0).abs() < 1e-3);
        assert!((main.position.x + 134.5).abs() < 1e-3);
    }

    #[test]
    fn test_repeated_rebuilds_are_identical() {
        let mut scene = scene();
        let font = bundled_font();
        scene.rebuild_main_text("Typeface", &font);
        let first = scene.group.main().unwrap().clone();
        scene.rebuild_main_text("Typeface", &font);
        let second = scene.group.main().unwrap();

        assert!(!first.shares_geometry_with(second));
        assert_eq!(first.geometry.bounding_box(), second.geometry.bounding_box());
        assert_eq!(first.position, second.position);
    }

    #[test]
    fn test_empty_text_removes_meshes() {
        let mut scene = scene();
        let font = BlockFont { clockwise: true };
        scene.rebuild_main_text("A", &font);
        assert_eq!(scene.group.len(), 2);

        scene.rebuild_main_text("", &font);
        assert!(scene.group.main().is_none());
        assert!(scene.group.mirror().is_none());

        scene.rebuild_main_text("   ", &font);
        assert!(scene.group.is_empty());
    }

    #[test]
    fn test_mirror_can_be_disabled() {
        let mut config = Config::default();
        config.text.mirror = false;
        let mut scene = scene_with(&config);
        scene.rebuild_main_text("A", &BlockFont { clockwise: true });
        assert!(scene.group.main().is_some());
        assert!(scene.group.mirror().is_none());
    }

    #[test]
    fn test_caption_survives_rebuilds() {
        let mut scene = scene();
        let font = bundled_font();
        scene.build_caption_text("well, they say it..", &font);
        let caption = scene.group.caption().unwrap();
        assert_eq!(caption.position, Vec3::new(0.0, 4.0, 10.0));
        let bbox = caption.geometry.bounding_box();
        assert!((bbox.max.z - 3.0).abs() < 1e-4);

        scene.rebuild_main_text("x", &font);
        scene.rebuild_main_text("", &font);
        assert!(scene.group.caption().is_some());
        assert_eq!(scene.group.len(), 1);
    }

    #[test]
    fn test_empty_caption_builds_nothing() {
        let mut scene = scene();
        scene.build_caption_text("", &bundled_font());
        assert!(scene.group.is_empty());
    }

    #[test]
    fn test_ground_plane_tiles() {
        let plane = GroundPlane::new(&GroundConfig::default());
        let triangles = plane.triangles();
        assert_eq!(triangles.len(), 40 * 40 * 2);
        assert!(triangles.iter().flatten().all(|p| p.y == 100.0));
        let max_x = triangles.iter().flatten().map(|p| p.x).fold(f32::MIN, f32::max);
        assert!((max_x - 5000.0).abs() < 1e-2);
    }

    #[test]
    fn test_aim_camera() {
        let mut scene = scene();
        scene.camera.look_at(Vec3::ZERO);
        scene.aim_camera();
        assert_eq!(scene.camera.looking_at(), Vec3::new(0.0, 150.0, 0.0));
    }
}
