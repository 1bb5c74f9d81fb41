// src/render/renderer.rs
// the renderer projects the 3D scene into window space and draws it as colored nannou meshes

use glam::{Mat4, Vec2, Vec3, Vec4};
use nannou::color::{rgb, srgba};
use nannou::geom::pt3;
use nannou::Draw;

use crate::render::camera::PerspectiveCamera;
use crate::render::shading::Fog;
use crate::views::SceneManager;

/// Size of the drawing surface in window points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn half_width(&self) -> f32 {
        self.width / 2.0
    }
}

/// Window space: origin at the center, y up, like nannou's `Draw`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenVertex {
    pub position: Vec2,
    pub color: Vec4,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScreenTriangle {
    pub vertices: [ScreenVertex; 3],
    pub depth: f32, // mean distance along the view axis, used for ordering
}

#[derive(Debug, Clone, Copy)]
struct ViewVertex {
    position: Vec3, // view space
    color: Vec4,
}

impl ViewVertex {
    fn lerp(self, other: ViewVertex, t: f32) -> ViewVertex {
        ViewVertex {
            position: self.position.lerp(other.position, t),
            color: self.color.lerp(other.color, t),
        }
    }
}

struct Projector<'a> {
    camera: &'a PerspectiveCamera,
    view: Mat4,
    fog: &'a Fog,
    viewport: Viewport,
}

impl Projector<'_> {
    fn project_triangle(&self, world: [Vec3; 3], color: Vec3, alpha: f32, out: &mut Vec<ScreenTriangle>) {
        let view = world.map(|p| self.view.transform_point3(p));
        let depths = view.map(|p| -p.z);
        if depths.iter().all(|&d| d > self.camera.far) {
            return;
        }

        let polygon = view.map(|position| ViewVertex {
            position,
            color: self.fog.apply(color, -position.z).extend(alpha),
        });
        let clipped = clip_near(&polygon, self.camera.near);
        if clipped.len() < 3 {
            return;
        }

        let depth = depths.iter().sum::<f32>() / 3.0;
        let screen: Vec<ScreenVertex> = clipped
            .iter()
            .map(|v| {
                let ndc = self.camera.project(v.position);
                ScreenVertex {
                    position: Vec2::new(
                        ndc.x * self.viewport.width / 2.0,
                        ndc.y * self.viewport.height / 2.0,
                    ),
                    color: v.color,
                }
            })
            .collect();

        for i in 1..screen.len() - 1 {
            out.push(ScreenTriangle {
                vertices: [screen[0], screen[i], screen[i + 1]],
                depth,
            });
        }
    }
}

/// Sutherland-Hodgman against the near plane; visible points have z <= -near.
fn clip_near(polygon: &[ViewVertex], near: f32) -> Vec<ViewVertex> {
    let inside = |v: &ViewVertex| v.position.z <= -near;
    let crossing = |a: ViewVertex, b: ViewVertex| {
        let t = (-near - a.position.z) / (b.position.z - a.position.z);
        a.lerp(b, t)
    };

    let mut out = Vec::with_capacity(polygon.len() + 1);
    for (i, &current) in polygon.iter().enumerate() {
        let next = polygon[(i + 1) % polygon.len()];
        match (inside(&current), inside(&next)) {
            (true, true) => out.push(next),
            (true, false) => out.push(crossing(current, next)),
            (false, true) => {
                out.push(crossing(current, next));
                out.push(next);
            }
            (false, false) => {}
        }
    }
    out
}

fn back_to_front(triangles: &mut [ScreenTriangle]) {
    triangles.sort_by(|a, b| b.depth.total_cmp(&a.depth));
}

/// Everything visible this frame, in drawing order.
///
/// Triangles are sorted back to front within three layers: geometry on the far
/// side of the ground plane, the translucent plane itself, then geometry on the
/// camera's side.
pub fn project_scene(scene: &SceneManager, viewport: Viewport) -> Vec<ScreenTriangle> {
    let camera = &scene.camera;
    let projector = Projector {
        camera,
        view: camera.view_matrix(),
        fog: &scene.fog,
        viewport,
    };
    let eye = camera.position;
    let plane_height = scene.ground.height;
    let camera_above_plane = eye.y >= plane_height;

    let mut far_side = Vec::new();
    let mut near_side = Vec::new();
    let group_matrix = scene.group.matrix();

    for mesh in scene.group.children() {
        let model = group_matrix * mesh.local_matrix();
        for local in mesh.geometry.triangles() {
            let world = local.map(|p| model.transform_point3(p));
            let normal = (world[1] - world[0]).cross(world[2] - world[0]);
            if normal.length_squared() <= f32::EPSILON {
                continue;
            }
            let centroid = (world[0] + world[1] + world[2]) / 3.0;
            let color = scene
                .material
                .shade(&scene.lights, normal.normalize(), centroid, eye);

            let out = if (centroid.y >= plane_height) == camera_above_plane {
                &mut near_side
            } else {
                &mut far_side
            };
            projector.project_triangle(world, color, 1.0, out);
        }
    }

    let mut plane = Vec::new();
    for tile in scene.ground.triangles() {
        projector.project_triangle(tile, scene.ground.color, scene.ground.opacity, &mut plane);
    }

    back_to_front(&mut far_side);
    back_to_front(&mut plane);
    back_to_front(&mut near_side);

    far_side.extend(plane);
    far_side.extend(near_side);
    far_side
}

/// Submits one frame of the scene to `draw`.
pub fn draw_scene(draw: &Draw, scene: &SceneManager, viewport: Viewport) {
    let background = scene.fog.color;
    draw.background()
        .color(rgb(background.x, background.y, background.z));

    let triangles = project_scene(scene, viewport);
    let points = triangles
        .iter()
        .flat_map(|tri| tri.vertices.iter())
        .map(|v| {
            (
                pt3(v.position.x, v.position.y, 0.0),
                srgba(v.color.x, v.color.y, v.color.z, v.color.w),
            )
        });
    draw.mesh().points_colored(points);
}
