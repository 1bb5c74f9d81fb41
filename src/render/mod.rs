// src/render/mod.rs
// Software 3D rendering on top of nannou's 2D draw API:
// camera projection, shading and fog, then painter-ordered triangles

pub mod camera;
pub mod renderer;
pub mod shading;

pub use camera::PerspectiveCamera;
pub use renderer::{draw_scene, project_scene, ScreenTriangle, ScreenVertex, Viewport};
pub use shading::{DirectionalLight, Fog, Lights, PhongMaterial, PointLight};
