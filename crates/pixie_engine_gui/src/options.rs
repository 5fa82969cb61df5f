use pixie_engine::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OnionSkinOptions {
    pub enabled: bool,
    /// Frames shown before the current one
    pub past_frames: usize,
    /// Frames shown after the current one
    pub future_frames: usize,
    /// Opacity of the nearest onion frame
    pub max_opacity: f32,
    pub past_color: [u8; 3],
    pub future_color: [u8; 3],
    /// Tint onion frames with the past/future colors
    pub tint: bool,
}

impl Default for OnionSkinOptions {
    fn default() -> Self {
        Self {
            enabled: false,
            past_frames: 1,
            future_frames: 1,
            max_opacity: 0.6,
            past_color: [0, 0, 255],
            future_color: [255, 0, 0],
            tint: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarchingAntsOptions {
    /// Dash length in widget pixels
    pub dash_length: f32,
    /// Dash movement in widget pixels per second, 0 disables the animation
    pub speed: f32,
}

impl Default for MarchingAntsOptions {
    fn default() -> Self {
        Self { dash_length: 4.0, speed: 8.0 }
    }
}

/// View options of the editing surface.
///
/// Persisted values are stored in `options.toml`; keys missing from the file
/// take their default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasOptions {
    pub onion_skin: OnionSkinOptions,
    pub marching_ants: MarchingAntsOptions,
    pub min_zoom: f32,
    pub max_zoom: f32,
    pub show_cursor_outline: bool,
}

impl Default for CanvasOptions {
    fn default() -> Self {
        Self {
            onion_skin: OnionSkinOptions::default(),
            marching_ants: MarchingAntsOptions::default(),
            min_zoom: 0.1,
            max_zoom: 64.0,
            show_cursor_outline: true,
        }
    }
}

impl CanvasOptions {
    pub const FILE_NAME: &'static str = "options.toml";

    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|err| EngineError::ParseOptions { message: err.to_string() })
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|err| EngineError::SerializeOptions { message: err.to_string() })
    }

    /// Clamps `zoom` to the configured limits.
    pub fn clamp_zoom(&self, zoom: f32) -> f32 {
        let min = self.min_zoom.max(f32::EPSILON);
        zoom.clamp(min, self.max_zoom.max(min))
    }

    /// Reads the options file, falling back to defaults on any error.
    pub fn load() -> Self {
        let Some(options_file) = Self::config_file() else {
            return Self::default();
        };
        if !options_file.exists() {
            return Self::default();
        }
        match fs::read_to_string(&options_file) {
            Ok(text) => match Self::from_toml_str(&text) {
                Ok(options) => options,
                Err(err) => {
                    log::error!("Error parsing options file {}: {err}", options_file.display());
                    Self::default()
                }
            },
            Err(err) => {
                log::error!("Error reading options file: {err}");
                Self::default()
            }
        }
    }

    pub fn store(&self) {
        let Some(config_dir) = Self::config_dir() else {
            return;
        };
        if !config_dir.exists() && fs::create_dir_all(&config_dir).is_err() {
            log::error!("Can't create configuration directory {}", config_dir.display());
            return;
        }
        match self.to_toml_string() {
            Ok(text) => {
                if let Err(err) = fs::write(config_dir.join(Self::FILE_NAME), text) {
                    log::error!("Error writing options file: {err}");
                }
            }
            Err(err) => log::error!("Error serializing options file: {err}"),
        }
    }

    pub fn config_dir() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "GitHub", "pixie").map(|p| p.config_dir().to_path_buf())
    }

    pub fn config_file() -> Option<PathBuf> {
        Self::config_dir().map(|d| d.join(Self::FILE_NAME))
    }
}
