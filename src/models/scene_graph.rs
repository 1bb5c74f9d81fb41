// src/models/scene_graph.rs
//
// The group node holding the text meshes.
// Main and mirror meshes are rebuilt on every edit, the caption stays for the session.

use glam::{Mat4, Vec3};
use std::rc::Rc;

use super::geometry::TextGeometry;

/// A placed handle onto shared geometry. Cloning a mesh never copies triangles.
#[derive(Debug, Clone)]
pub struct MeshInstance {
    pub geometry: Rc<TextGeometry>,
    pub position: Vec3,
    pub rotation: Vec3, // euler angles, applied x then y then z
}

impl MeshInstance {
    pub fn new(geometry: Rc<TextGeometry>, position: Vec3, rotation: Vec3) -> Self {
        Self {
            geometry,
            position,
            rotation,
        }
    }

    pub fn local_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position)
            * Mat4::from_rotation_x(self.rotation.x)
            * Mat4::from_rotation_y(self.rotation.y)
            * Mat4::from_rotation_z(self.rotation.z)
    }

    pub fn shares_geometry_with(&self, other: &MeshInstance) -> bool {
        Rc::ptr_eq(&self.geometry, &other.geometry)
    }
}

#[derive(Debug, Clone, Default)]
pub struct TextGroup {
    pub position: Vec3,
    pub rotation_y: f32,
    main: Option<MeshInstance>,
    mirror: Option<MeshInstance>,
    caption: Option<MeshInstance>,
}

impl TextGroup {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position) * Mat4::from_rotation_y(self.rotation_y)
    }

    pub fn main(&self) -> Option<&MeshInstance> {
        self.main.as_ref()
    }

    pub fn mirror(&self) -> Option<&MeshInstance> {
        self.mirror.as_ref()
    }

    pub fn caption(&self) -> Option<&MeshInstance> {
        self.caption.as_ref()
    }

    /// Drops the main and mirror meshes. Their geometry goes with the last handle.
    pub fn clear_main_text(&mut self) {
        self.main = None;
        self.mirror = None;
    }

    pub fn set_main_text(&mut self, main: MeshInstance, mirror: Option<MeshInstance>) {
        self.main = Some(main);
        self.mirror = mirror;
    }

    pub fn set_caption(&mut self, caption: MeshInstance) {
        self.caption = Some(caption);
    }

    pub fn children(&self) -> impl Iterator<Item = &MeshInstance> {
        self.main
            .iter()
            .chain(self.mirror.iter())
            .chain(self.caption.iter())
    }

    pub fn len(&self) -> usize {
        self.children().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
