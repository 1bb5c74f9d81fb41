// src/main.rs
//
// Window, event wiring and the nannou loop. All state lives in `AppContext`.

use nannou::prelude::*;
use tracing_subscriber::prelude::*;

use typeface3d::{
    config::Config,
    controllers::{PointerEvent, PointerPhase},
    render::{draw_scene, Viewport},
    services::FontProvider,
    AppContext,
};

// wheels reporting pixels are scaled to roughly one notch per line
const PIXELS_PER_LINE: f32 = 40.0;

struct Model {
    context: AppContext,
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "typeface3d=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    nannou::app(model).update(update).run();
}

fn model(app: &App) -> Model {
    let config = Config::load_or_default();

    app.new_window()
        .title(&config.window.title)
        .size(config.window.width, config.window.height)
        .view(view)
        .received_character(received_character)
        .key_pressed(key_pressed)
        .mouse_pressed(mouse_pressed)
        .mouse_released(mouse_released)
        .mouse_moved(mouse_moved)
        .mouse_wheel(mouse_wheel)
        .touch(touch)
        .resized(resized)
        .build()
        .expect("Failed to build window");

    let rect = app.window_rect();
    let viewport = Viewport::new(rect.w(), rect.h());

    let font_path = config.resolve_font_path();
    tracing::info!("Loading font from {}", font_path.display());
    let fonts = FontProvider::load(font_path);

    Model {
        context: AppContext::new(&config, fonts, viewport, &mut rand::thread_rng()),
    }
}

fn update(_app: &App, model: &mut Model, _update: Update) {
    model.context.update();
}

fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    draw_scene(&draw, &model.context.scene, model.context.viewport());
    if let Err(e) = draw.to_frame(app, &frame) {
        tracing::error!("Failed to draw frame: {:?}", e);
    }
}

/// nannou reports positions centered with y up; the controllers expect
/// window points from the top-left corner.
fn to_window_points(app: &App, position: Point2) -> ::glam::Vec2 {
    let rect = app.window_rect();
    ::glam::Vec2::new(position.x + rect.w() / 2.0, rect.h() / 2.0 - position.y)
}

fn received_character(_app: &App, model: &mut Model, ch: char) {
    model.context.type_character(ch);
}

fn key_pressed(_app: &App, model: &mut Model, key: Key) {
    if key == Key::Back {
        model.context.backspace();
    }
}

fn mouse_pressed(app: &App, model: &mut Model, button: MouseButton) {
    let pointer = to_window_points(app, app.mouse.position());
    match button {
        MouseButton::Left => model.context.pointer_down(PointerEvent::primary(pointer.x)),
        MouseButton::Right => model.context.orbit_begin(pointer),
        _ => {}
    }
}

fn mouse_released(app: &App, model: &mut Model, button: MouseButton) {
    let pointer = to_window_points(app, app.mouse.position());
    match button {
        MouseButton::Left => model.context.pointer_up(PointerEvent::primary(pointer.x)),
        MouseButton::Right => model.context.orbit_end(),
        _ => {}
    }
}

fn mouse_moved(app: &App, model: &mut Model, position: Point2) {
    let pointer = to_window_points(app, position);
    model.context.pointer_move(PointerEvent::primary(pointer.x));
    if model.context.orbit.is_rotating() {
        model.context.orbit_move(pointer);
    }
}

fn mouse_wheel(_app: &App, model: &mut Model, delta: MouseScrollDelta, _phase: TouchPhase) {
    let lines = match delta {
        MouseScrollDelta::LineDelta(_, y) => y,
        MouseScrollDelta::PixelDelta(position) => position.y as f32 / PIXELS_PER_LINE,
    };
    model.context.zoom(lines);
}

fn touch(app: &App, model: &mut Model, event: TouchEvent) {
    let phase = match event.phase {
        TouchPhase::Started => PointerPhase::Down,
        TouchPhase::Moved => PointerPhase::Move,
        TouchPhase::Ended | TouchPhase::Cancelled => PointerPhase::Up,
    };
    let pointer = to_window_points(app, event.position);
    model.context.touch(event.id, phase, pointer.x);
}

fn resized(_app: &App, model: &mut Model, size: Vec2) {
    model.context.resize(size.x, size.y);
}
