//! Folding cell configuration
//!
//! Settings can be built in code or read from TOML. Every key is optional:
//!
//! ```toml
//! duration_ms = 1000
//! back_side_color = "#888888"
//! additional_flips = 0
//! camera_height = 30
//! ```

use std::fs;
use std::path::Path;

use foldkit_core::Color;
use serde::{Deserialize, Serialize};

use crate::error::{FoldError, Result};

/// Settings for one folding cell
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct FoldConfig {
    /// Total duration of one fold or unfold
    pub duration_ms: u32,
    /// Fill for the folded-under back faces
    #[serde(with = "hex_color")]
    pub back_side_color: Color,
    /// Extra strips after the guaranteed first flip; 0 fills the content with title-height strips
    pub additional_flips: u32,
    /// Perspective camera distance
    pub camera_height: u32,
}

impl FoldConfig {
    pub const DEFAULT_DURATION_MS: u32 = 1000;
    pub const DEFAULT_BACK_SIDE_COLOR: u32 = 0x888888;
    pub const DEFAULT_ADDITIONAL_FLIPS: u32 = 0;
    pub const DEFAULT_CAMERA_HEIGHT: u32 = 30;

    /// Parse a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| FoldError::Config(e.to_string()))
    }

    /// Read a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| FoldError::Config(format!("failed to read {}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| FoldError::Config(e.to_string()))
    }

    pub fn with_duration(mut self, duration_ms: u32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn with_back_side_color(mut self, color: Color) -> Self {
        self.back_side_color = color;
        self
    }

    pub fn with_additional_flips(mut self, flips: u32) -> Self {
        self.additional_flips = flips;
        self
    }

    pub fn with_camera_height(mut self, camera_height: u32) -> Self {
        self.camera_height = camera_height;
        self
    }
}

impl Default for FoldConfig {
    fn default() -> Self {
        Self {
            duration_ms: Self::DEFAULT_DURATION_MS,
            back_side_color: Color::from_hex(Self::DEFAULT_BACK_SIDE_COLOR),
            additional_flips: Self::DEFAULT_ADDITIONAL_FLIPS,
            camera_height: Self::DEFAULT_CAMERA_HEIGHT,
        }
    }
}

/// Colors as `#RRGGBB` / `#AARRGGBB` strings
mod hex_color {
    use foldkit_core::Color;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(color: &Color, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&color.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Color, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FoldConfig::default();
        assert_eq!(config.duration_ms, 1000);
        assert_eq!(config.back_side_color.to_rgba8(), [0x88, 0x88, 0x88, 0xFF]);
        assert_eq!(config.additional_flips, 0);
        assert_eq!(config.camera_height, 30);
    }

    #[test]
    fn test_partial_toml() {
        let config = FoldConfig::from_toml_str(
            r##"
            duration_ms = 600
            back_side_color = "#FF3366"
            "##,
        )
        .unwrap();
        assert_eq!(config.duration_ms, 600);
        assert_eq!(config.back_side_color, Color::from_hex(0xFF3366));
        assert_eq!(config.camera_height, FoldConfig::DEFAULT_CAMERA_HEIGHT);
    }

    #[test]
    fn test_bad_toml() {
        let err = FoldConfig::from_toml_str("back_side_color = \"blue\"").unwrap_err();
        assert!(err.is_invalid_configuration());
        assert!(FoldConfig::from_toml_str("flips = 3").is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = FoldConfig::default()
            .with_duration(750)
            .with_additional_flips(3)
            .with_camera_height(12)
            .with_back_side_color(Color::from_hex(0x102030));
        let text = config.to_toml().unwrap();
        assert_eq!(FoldConfig::from_toml_str(&text).unwrap(), config);
    }
}
