//! # Coordinate projection
//!
//! World coordinates are heliocentric ecliptic `(x, y)` in AU, centered on the Sun with
//! `y` growing upward. Image coordinates are pixels with the origin at the top-left
//! corner and `y` growing downward. [`ViewParameters::project`] maps the former to the
//! latter:
//!
//! ```text
//! px = x · (width / scale_x) + width / 2
//! py = height − (y · (height / scale_y) + height / 2)
//! ```
//!
//! A projected point is out of bounds when it falls outside `[0, width] × [0, height]`.

use nalgebra::{Point2, Vector2};
use serde::Serialize;

use crate::config::RenderConfig;
use crate::constants::{AstronomicalUnit, Pixel};
use crate::solarpaper_errors::SolarpaperError;

/// A position in image space, in pixels.
pub type PixelPoint = Point2<Pixel>;

/// Read-only view geometry of one render pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewParameters {
    pub width: u32,
    pub height: u32,
    pub zoom: f64,
    /// Visible extent in AU, zoom applied (x, y)
    pub scale: [AstronomicalUnit; 2],
    /// Satellite offset range in pixels, zoom applied (min, max)
    pub moon_offset: [Pixel; 2],
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProjectedPoint {
    pub point: PixelPoint,
    pub out_of_bounds: bool,
}

impl Default for ViewParameters {
    fn default() -> Self {
        let config = RenderConfig::default();
        Self::derive(&config)
    }
}

impl ViewParameters {
    /// Derive the view of a render pass from its configuration.
    ///
    /// The visible extent shrinks with the zoom (`scale = scale_au / zoom`) while the
    /// satellite offsets grow with it (`moon_offset = moon_offset_px · zoom`).
    pub fn from_config(config: &RenderConfig) -> Result<Self, SolarpaperError> {
        config.validate()?;
        Ok(Self::derive(config))
    }

    fn derive(config: &RenderConfig) -> Self {
        let zoom = config.zoom;
        ViewParameters {
            width: config.width,
            height: config.height,
            zoom,
            scale: [config.scale_au[0] / zoom, config.scale_au[1] / zoom],
            moon_offset: [
                config.moon_offset_px[0] * zoom,
                config.moon_offset_px[1] * zoom,
            ],
        }
    }

    pub fn width_px(&self) -> Pixel {
        f64::from(self.width)
    }

    pub fn height_px(&self) -> Pixel {
        f64::from(self.height)
    }

    /// Pixels per AU along each axis.
    pub fn px_per_au(&self) -> Vector2<f64> {
        Vector2::new(
            self.width_px() / self.scale[0],
            self.height_px() / self.scale[1],
        )
    }

    /// Image center, where the Sun is drawn.
    pub fn center(&self) -> PixelPoint {
        Point2::new(self.width_px() / 2.0, self.height_px() / 2.0)
    }

    pub fn is_out_of_bounds(&self, p: &PixelPoint) -> bool {
        p.x < 0.0 || p.x > self.width_px() || p.y < 0.0 || p.y > self.height_px()
    }

    /// Project a world position (AU) to image space.
    pub fn project(&self, x: AstronomicalUnit, y: AstronomicalUnit) -> ProjectedPoint {
        let scale = self.px_per_au();
        let center = self.center();
        let point = Point2::new(
            x * scale.x + center.x,
            self.height_px() - (y * scale.y + center.y),
        );
        ProjectedPoint {
            point,
            out_of_bounds: self.is_out_of_bounds(&point),
        }
    }
}
