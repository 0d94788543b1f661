//! # Render configuration
//!
//! [`RenderConfig`] is the process-start configuration of a render pass: image size,
//! zoom, visible extent in AU, the pixel range used to spread satellites around their
//! parent, and the width of the `kind` field in the dataset.
//!
//! It deserializes from TOML, every field being optional:
//!
//! ```toml
//! width = 1920
//! height = 1080
//! zoom = 1.5
//! scale_au = [16.0, 9.0]
//! moon_offset_px = [30.0, 50.0]
//! kind_field = "compact"
//! ```
//!
//! The zoom-dependent quantities are not stored here; they are derived once by
//! [`ViewParameters::from_config`](crate::view::ViewParameters::from_config).

use camino::Utf8Path;
use serde::Deserialize;

use crate::constants::{
    AstronomicalUnit, Pixel, DEFAULT_HEIGHT, DEFAULT_MOON_OFFSET_PX, DEFAULT_SCALE_AU,
    DEFAULT_WIDTH, DEFAULT_ZOOM,
};
use crate::solarpaper_errors::SolarpaperError;
use crate::sso::orbit_record::KindField;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub zoom: f64,
    /// Visible extent at zoom 1, in AU (x, y)
    pub scale_au: [AstronomicalUnit; 2],
    /// Satellite offset range at zoom 1, in pixels (min, max)
    pub moon_offset_px: [Pixel; 2],
    pub kind_field: KindField,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            zoom: DEFAULT_ZOOM,
            scale_au: DEFAULT_SCALE_AU,
            moon_offset_px: DEFAULT_MOON_OFFSET_PX,
            kind_field: KindField::default(),
        }
    }
}

impl RenderConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, SolarpaperError> {
        let config: RenderConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Utf8Path) -> Result<Self, SolarpaperError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Check the values a projection can be built from.
    pub fn validate(&self) -> Result<(), SolarpaperError> {
        if self.width == 0 || self.height == 0 {
            return Err(SolarpaperError::InvalidConfig(format!(
                "image size must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if !(self.zoom.is_finite() && self.zoom > 0.0) {
            return Err(SolarpaperError::InvalidConfig(format!(
                "zoom must be a positive number, got {}",
                self.zoom
            )));
        }
        if self.scale_au.iter().any(|s| !(s.is_finite() && *s > 0.0)) {
            return Err(SolarpaperError::InvalidConfig(format!(
                "scale_au must be positive, got {:?}",
                self.scale_au
            )));
        }
        let [min, max] = self.moon_offset_px;
        if !(min.is_finite() && max.is_finite() && min <= max) {
            return Err(SolarpaperError::InvalidConfig(format!(
                "moon_offset_px must be an increasing range, got [{min}, {max}]"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod config_test {
    use super::*;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = RenderConfig::from_toml_str("").unwrap();
        assert_eq!(config, RenderConfig::default());
        assert_eq!(config.width, 3840);
        assert_eq!(config.kind_field, KindField::Wide);
    }

    #[test]
    fn test_partial_toml() {
        let config = RenderConfig::from_toml_str(
            r#"
            width = 1920
            height = 1080
            kind_field = "compact"
            "#,
        )
        .unwrap();
        assert_eq!(config.width, 1920);
        assert_eq!(config.height, 1080);
        assert_eq!(config.zoom, 1.1);
        assert_eq!(config.kind_field, KindField::Compact);
    }

    #[test]
    fn test_invalid_values() {
        let err = RenderConfig::from_toml_str("zoom = 0.0").unwrap_err();
        assert!(matches!(err, SolarpaperError::InvalidConfig(_)));

        let err = RenderConfig::from_toml_str("moon_offset_px = [50.0, 30.0]").unwrap_err();
        assert!(matches!(err, SolarpaperError::InvalidConfig(_)));

        let err = RenderConfig::from_toml_str("width = 0").unwrap_err();
        assert!(matches!(err, SolarpaperError::InvalidConfig(_)));

        let err = RenderConfig::from_toml_str("unknown = 1").unwrap_err();
        assert!(matches!(err, SolarpaperError::TomlError(_)));
    }
}
