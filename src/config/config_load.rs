// src/config/config_load.rs
//
// loading of config.toml

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use super::config_types::*;
use crate::errors::ConfigError;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub paths: PathConfig,
    pub text: TextConfig,
    pub extrusion: ExtrusionConfig,
    pub camera: CameraConfig,
    pub orbit: OrbitConfig,
    pub lights: LightsConfig,
    pub fog: FogConfig,
    pub ground: GroundConfig,
    pub interaction: InteractionConfig,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        // First try to load from the executable's directory
        if let Some(exe_config) = Self::exe_dir_config_path() {
            return Self::load_from_path(&exe_config);
        }

        // Fallback to loading from the current working directory
        Self::load_from_path(Path::new("config.toml"))
    }

    /// Like `load`, but a missing or broken file only costs a warning.
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Using built-in configuration: {}", e);
                Self::default()
            }
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    fn exe_dir_config_path() -> Option<PathBuf> {
        let exe_path = std::env::current_exe().ok()?;
        let config_path = exe_path.parent()?.join("config.toml");
        config_path.exists().then_some(config_path)
    }

    fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("Loaded config from {}", path.display());
        Self::from_toml_str(&content)
    }

    pub fn resolve_font_path(&self) -> PathBuf {
        let font_file = Path::new(&self.paths.font_file);
        if font_file.is_absolute() {
            return font_file.to_path_buf();
        }

        // A relative path is looked up next to the executable, then in the working directory
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|dir| dir.join(font_file)))
            .filter(|candidate| candidate.exists())
            .unwrap_or_else(|| font_file.to_path_buf())
    }
}
