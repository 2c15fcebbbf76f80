//! Settings loaded from `settings.toml` in the working directory.

use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::Deserialize;

use crate::engine::error::{EngineError, EngineResult};
use crate::engine::{INTERNAL_RES_X, INTERNAL_RES_Y};

pub const SETTINGS_FILE: &str = "settings.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub width: i32,
    pub height: i32,
    pub windowed: bool,
    pub vsync: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            width: INTERNAL_RES_X as i32,
            height: INTERNAL_RES_Y as i32,
            windowed: true,
            vsync: false,
        }
    }
}

impl DisplaySettings {
    /// Window size to open with. Non-positive dimensions fall back to the internal resolution.
    pub fn resolution(&self) -> (u32, u32) {
        if self.width > 0 && self.height > 0 {
            (self.width as u32, self.height as u32)
        } else {
            (INTERNAL_RES_X as u32, INTERNAL_RES_Y as u32)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DemoSettings {
    /// Name of the first demonstration, e.g. `"particle"`.
    pub start: String,
    pub asset_dir: PathBuf,
    /// Frame cap in frames per second, 0 runs unlimited.
    pub frame_rate: f32,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            start: "particle".to_string(),
            asset_dir: PathBuf::from("data"),
            frame_rate: 60.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    pub enabled: bool,
    pub volume: u8,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            volume: 255,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub display: DisplaySettings,
    pub demo: DemoSettings,
    pub audio: AudioSettings,
}

impl Settings {
    pub fn from_toml(contents: &str) -> EngineResult<Self> {
        toml::from_str(contents).map_err(|e| EngineError::Config(e.to_string()))
    }

    /// Reads the settings file, falling back to defaults when it does not exist.
    pub fn load(path: impl AsRef<Path>) -> EngineResult<Self> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(contents) => {
                let settings = Self::from_toml(&contents)?;
                info!("Loaded settings from {}", path.display());
                Ok(settings)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("{} not found, using default settings", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let settings = Settings::from_toml("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.display.resolution(), (640, 480));
        assert_eq!(settings.demo.start, "particle");
        assert_eq!(settings.audio.volume, 255);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let settings = Settings::from_toml(
            "[display]\nwidth = 800\nheight = 600\n\n[demo]\nstart = \"menu\"\n",
        )
        .unwrap();
        assert_eq!(settings.display.resolution(), (800, 600));
        assert!(settings.display.windowed);
        assert_eq!(settings.demo.start, "menu");
        assert_eq!(settings.demo.asset_dir, PathBuf::from("data"));
    }

    #[test]
    fn non_positive_resolution_falls_back() {
        let settings = Settings::from_toml("[display]\nwidth = -1\nheight = 600\n").unwrap();
        assert_eq!(settings.display.resolution(), (640, 480));
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let err = Settings::from_toml("[display\nwidth = 3").unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }

    #[test]
    fn missing_file_loads_defaults() {
        let settings = Settings::load("definitely/not/here/settings.toml").unwrap();
        assert_eq!(settings, Settings::default());
    }
}
