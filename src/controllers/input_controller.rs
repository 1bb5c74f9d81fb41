// src/controllers/input_controller.rs
//
// Keyboard edits the text, a primary-pointer drag steers the target rotation,
// window resizes keep the drag midpoint and the camera projection in step.

use crate::config::Config;
use crate::models::{RotationState, TextState};
use crate::render::camera::PerspectiveCamera;
use crate::render::renderer::Viewport;

/// A pointer sample. `x` is measured in window points from the left edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub x: f32,
    pub is_primary: bool,
}

impl PointerEvent {
    pub fn primary(x: f32) -> Self {
        Self { x, is_primary: true }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
}

/// Decides which touch is the primary pointer: the first finger down while no
/// other finger is tracked, until it lifts.
#[derive(Debug, Default)]
pub struct PrimaryTouch {
    id: Option<u64>,
}

impl PrimaryTouch {
    pub fn classify(&mut self, id: u64, phase: PointerPhase) -> bool {
        match phase {
            PointerPhase::Down => match self.id {
                None => {
                    self.id = Some(id);
                    true
                }
                Some(current) => current == id,
            },
            PointerPhase::Move => self.id == Some(id),
            PointerPhase::Up => {
                if self.id == Some(id) {
                    self.id = None;
                    true
                } else {
                    false
                }
            }
        }
    }
}

pub struct InputController {
    text: TextState,
    rotation: RotationState,
    viewport: Viewport,
    half_width: f32,
    drag_gain: f32,
    dragging: bool,
}

impl InputController {
    pub fn new(config: &Config, viewport: Viewport) -> Self {
        Self {
            text: TextState::new(&config.text.main, &config.text.caption),
            rotation: RotationState::new(),
            viewport,
            half_width: viewport.half_width(),
            drag_gain: config.interaction.drag_gain,
            dragging: false,
        }
    }

    pub fn text(&self) -> &TextState {
        &self.text
    }

    pub fn rotation(&self) -> &RotationState {
        &self.rotation
    }

    pub fn rotation_mut(&mut self) -> &mut RotationState {
        &mut self.rotation
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Returns true when the main text changed and needs rebuilding.
    pub fn on_character(&mut self, ch: char) -> bool {
        self.text.push_char(ch)
    }

    /// Deletes the last character. Callers rebuild unconditionally afterwards.
    pub fn on_backspace(&mut self) {
        if !self.text.backspace() {
            tracing::trace!("Backspace on empty text");
        }
    }

    pub fn on_pointer_down(&mut self, event: PointerEvent) {
        if !event.is_primary {
            return;
        }
        self.rotation.anchor_drag(event.x - self.half_width);
        self.dragging = true;
    }

    pub fn on_pointer_move(&mut self, event: PointerEvent) {
        if !self.dragging || !event.is_primary {
            return;
        }
        self.rotation.drag_to(event.x - self.half_width, self.drag_gain);
    }

    pub fn on_pointer_up(&mut self, event: PointerEvent) {
        if !event.is_primary {
            return;
        }
        self.dragging = false;
    }

    pub fn on_resize(&mut self, viewport: Viewport, camera: &mut PerspectiveCamera) {
        self.viewport = viewport;
        self.half_width = viewport.half_width();
        camera.set_viewport(viewport.width, viewport.height);
        tracing::debug!("Resized to {}x{}", viewport.width, viewport.height);
    }
}
