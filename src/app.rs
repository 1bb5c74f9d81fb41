// src/app.rs
//
// The application context. Owns all state and routes window events to the
// input controller, the scene and the render loop. Everything runs on the
// event-loop thread; only the font load happens elsewhere.

use glam::Vec2;
use rand::Rng;

use crate::animation::RenderLoop;
use crate::config::Config;
use crate::controllers::{InputController, OrbitControls, PointerEvent, PointerPhase, PrimaryTouch};
use crate::render::renderer::Viewport;
use crate::services::{FontAsset, FontProvider};
use crate::views::SceneManager;

pub struct AppContext {
    pub scene: SceneManager,
    pub input: InputController,
    pub orbit: OrbitControls,
    fonts: FontProvider,
    primary_touch: PrimaryTouch,
    render_loop: RenderLoop,
}

impl AppContext {
    pub fn new<R: Rng>(config: &Config, fonts: FontProvider, viewport: Viewport, rng: &mut R) -> Self {
        let scene = SceneManager::new(config, viewport, rng);
        let orbit = OrbitControls::new(&config.orbit, scene.camera.position);

        let mut context = Self {
            scene,
            input: InputController::new(config, viewport),
            orbit,
            fonts,
            primary_touch: PrimaryTouch::default(),
            render_loop: RenderLoop::new(config.interaction.easing_factor),
        };

        if let Some(font) = context.fonts.font().cloned() {
            context.on_font_ready(&font);
        }
        context
    }

    pub fn fonts(&self) -> &FontProvider {
        &self.fonts
    }

    pub fn viewport(&self) -> Viewport {
        self.input.viewport()
    }

    pub fn frames(&self) -> u64 {
        self.render_loop.frames()
    }

    /// Once per frame, before drawing.
    pub fn update(&mut self) {
        self.poll_font();
        self.render_loop
            .tick(self.input.rotation_mut(), &mut self.scene);
    }

    fn poll_font(&mut self) {
        match self.fonts.poll() {
            Some(Ok(font)) => {
                tracing::info!(
                    "Font ready: {}",
                    font.family_name().unwrap_or("unnamed font")
                );
                self.on_font_ready(&font);
            }
            Some(Err(e)) => {
                tracing::error!("Font failed to load, no text will be shown: {}", e);
            }
            None => {}
        }
    }

    fn on_font_ready(&mut self, font: &FontAsset) {
        let text = self.input.text();
        self.scene.rebuild_main_text(text.main_text(), font);
        self.scene.build_caption_text(text.caption_text(), font);
    }

    fn refresh_text(&mut self) {
        // edits before the font arrives are picked up in on_font_ready
        if let Some(font) = self.fonts.font() {
            self.scene
                .rebuild_main_text(self.input.text().main_text(), font);
        }
    }

    pub fn type_character(&mut self, ch: char) {
        if self.input.on_character(ch) {
            self.refresh_text();
        }
    }

    pub fn backspace(&mut self) {
        self.input.on_backspace();
        self.refresh_text();
    }

    pub fn pointer_down(&mut self, event: PointerEvent) {
        self.input.on_pointer_down(event);
    }

    pub fn pointer_move(&mut self, event: PointerEvent) {
        self.input.on_pointer_move(event);
    }

    pub fn pointer_up(&mut self, event: PointerEvent) {
        self.input.on_pointer_up(event);
    }

    /// Touch input: only the primary finger steers the rotation.
    pub fn touch(&mut self, id: u64, phase: PointerPhase, x: f32) {
        let event = PointerEvent {
            x,
            is_primary: self.primary_touch.classify(id, phase),
        };
        match phase {
            PointerPhase::Down => self.pointer_down(event),
            PointerPhase::Move => self.pointer_move(event),
            PointerPhase::Up => self.pointer_up(event),
        }
    }

    /// `pointer` in window points, origin top left, y down.
    pub fn orbit_begin(&mut self, pointer: Vec2) {
        self.orbit.begin_rotate(pointer);
    }

    pub fn orbit_move(&mut self, pointer: Vec2) {
        let height = self.viewport().height;
        self.orbit
            .rotate_to(pointer, height, &mut self.scene.camera);
    }

    pub fn orbit_end(&mut self) {
        self.orbit.end_rotate();
    }

    pub fn zoom(&mut self, lines: f32) {
        self.orbit.zoom(lines, &mut self.scene.camera);
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.input
            .on_resize(Viewport::new(width, height), &mut self.scene.camera);
    }
}
