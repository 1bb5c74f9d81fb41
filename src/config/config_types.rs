// src/config/config_types.rs
//
// Config types for the app

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "typeface3d".to_string(),
            width: 1280,
            height: 800,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    pub font_file: String,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            font_file: "assets/fonts/DejaVuSerif.ttf".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    pub main: String,    // placeholder shown until the first keystroke
    pub caption: String, // small caption, built once when the font arrives
    pub mirror: bool,
    pub hover: f32, // height of the main text above the group origin
    pub group_height: f32,
    pub caption_position: [f32; 3],
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            main: "N".to_string(),
            caption: "well, they say it..".to_string(),
            mirror: true,
            hover: 35.0,
            group_height: 100.0,
            caption_position: [0.0, 4.0, 10.0],
        }
    }
}

/// Parameters for turning a line of text into extruded, beveled geometry.
///
/// `bevel_thickness` and `bevel_size` are absolute units layered on top of
/// `depth`: the solid spans `-bevel_thickness..depth + bevel_thickness` in z and
/// grows by `bevel_size` around every outline.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExtrusionParams {
    pub size: f32,
    pub depth: f32,
    pub curve_segments: u32, // straight segments per curved outline piece
    pub bevel_enabled: bool,
    pub bevel_thickness: f32,
    pub bevel_size: f32,
    pub bevel_segments: u32,
}

impl ExtrusionParams {
    pub fn main_text() -> Self {
        Self {
            size: 70.0,
            depth: 20.0,
            curve_segments: 4,
            bevel_enabled: true,
            bevel_thickness: 2.0,
            bevel_size: 1.5,
            bevel_segments: 3,
        }
    }

    pub fn caption_text() -> Self {
        Self {
            size: 10.0,
            depth: 1.0,
            ..Self::main_text()
        }
    }
}

impl Default for ExtrusionParams {
    fn default() -> Self {
        Self::main_text()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExtrusionConfig {
    pub main: ExtrusionParams,
    pub caption: ExtrusionParams,
}

impl Default for ExtrusionConfig {
    fn default() -> Self {
        Self {
            main: ExtrusionParams::main_text(),
            caption: ExtrusionParams::caption_text(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub fov_degrees: f32, // vertical field of view
    pub near: f32,
    pub far: f32,
    pub position: [f32; 3],
    pub target: [f32; 3],
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 30.0,
            near: 1.0,
            far: 1500.0,
            position: [0.0, 400.0, 700.0],
            target: [0.0, 150.0, 0.0],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    pub target: [f32; 3],
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            target: [0.0, 0.5, 0.0],
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            min_distance: 50.0,
            max_distance: 1500.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LightsConfig {
    pub directional_intensity: f32,
    pub directional_direction: [f32; 3], // points from the scene towards the light
    pub point_intensity: f32,
    pub point_position: [f32; 3],
    pub point_saturation: f32,
    pub point_lightness: f32,
}

impl Default for LightsConfig {
    fn default() -> Self {
        Self {
            directional_intensity: 0.125,
            directional_direction: [0.0, 0.0, 1.0],
            point_intensity: 1.5,
            point_position: [0.0, 100.0, 90.0],
            point_saturation: 1.0,
            point_lightness: 0.5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FogConfig {
    pub background: [f32; 3],
    pub near: f32,
    pub far: f32,
}

impl Default for FogConfig {
    fn default() -> Self {
        Self {
            background: [0.0, 0.0, 0.0],
            near: 250.0,
            far: 1400.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GroundConfig {
    pub height: f32,
    pub size: f32,
    pub opacity: f32,
    pub subdivisions: u32, // tiles per side, fog is interpolated per tile corner
}

impl Default for GroundConfig {
    fn default() -> Self {
        Self {
            height: 100.0,
            size: 10000.0,
            opacity: 0.5,
            subdivisions: 40,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    pub drag_gain: f32,     // radians per pixel of horizontal drag
    pub easing_factor: f32, // share of the remaining rotation covered per frame
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            drag_gain: 0.02,
            easing_factor: 0.05,
        }
    }
}
