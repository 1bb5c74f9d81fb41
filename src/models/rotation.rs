// src/models/rotation.rs
//
// Rotation of the text group about the vertical axis.
// `target` follows the pointer drag, `current` chases it a little every frame.

use crate::utilities::easing::exp_approach;

#[derive(Debug, Clone, Default)]
pub struct RotationState {
    current: f32,
    target: f32,
    drag_anchor_pointer_x: f32,
    drag_anchor_target_rotation: f32,
}

impl RotationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    /// Remembers where a drag started, as an offset from the viewport's horizontal midpoint.
    pub fn anchor_drag(&mut self, pointer_offset_x: f32) {
        self.drag_anchor_pointer_x = pointer_offset_x;
        self.drag_anchor_target_rotation = self.target;
    }

    pub fn drag_to(&mut self, pointer_offset_x: f32, gain: f32) {
        self.target = self.drag_anchor_target_rotation
            + (pointer_offset_x - self.drag_anchor_pointer_x) * gain;
    }

    /// One frame of easing. There is no snapping: `current` only ever approaches `target`.
    pub fn ease(&mut self, factor: f32) {
        self.current = exp_approach(self.current, self.target, factor);
    }
}
