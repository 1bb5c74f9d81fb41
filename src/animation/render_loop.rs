// src/animation/render_loop.rs
// per-frame animation: the text group eases towards the dragged rotation
// and the camera is re-aimed at the scene

use crate::models::RotationState;
use crate::views::SceneManager;

pub struct RenderLoop {
    easing_factor: f32,
    frames: u64,
}

impl RenderLoop {
    pub fn new(easing_factor: f32) -> Self {
        Self {
            easing_factor,
            frames: 0,
        }
    }

    /// Runs once per display refresh. Never settles: the rotation keeps
    /// approaching its target on every frame.
    pub fn tick(&mut self, rotation: &mut RotationState, scene: &mut SceneManager) {
        rotation.ease(self.easing_factor);
        scene.group.rotation_y = rotation.current();
        scene.aim_camera();
        self.frames += 1;
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::render::renderer::Viewport;
    use glam::Vec3;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_tick_eases_group_rotation() {
        let config = Config::default();
        let mut scene = SceneManager::new(
            &config,
            Viewport::new(800.0, 600.0),
            &mut StdRng::seed_from_u64(0),
        );
        let mut rotation = RotationState::new();
        rotation.anchor_drag(0.0);
        rotation.drag_to(50.0, config.interaction.drag_gain);

        let mut render_loop = RenderLoop::new(config.interaction.easing_factor);
        render_loop.tick(&mut rotation, &mut scene);
        assert!((scene.group.rotation_y - 0.05).abs() < 1e-6);
        render_loop.tick(&mut rotation, &mut scene);
        assert!((scene.group.rotation_y - 0.0975).abs() < 1e-6);
        assert_eq!(render_loop.frames(), 2);
        assert_eq!(scene.camera.looking_at(), Vec3::new(0.0, 150.0, 0.0));
    }
}
