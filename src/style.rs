//! # Orbit styling
//!
//! Maps an orbit's identity to the way it is painted. The resolution order is:
//!
//! 1. the default color, translucent white,
//! 2. the per-body table [`BODY_COLORS`], matched on the record's own id, or on its
//!    reference body for planets whose satellites share their color,
//! 3. the per-kind colors, which take precedence over the table.
//!
//! From that base color come the trail stroke (alpha halved above the spacecraft
//! tier, width by tier, optional fade-in gradient) and the terminal marker.

use serde::{Serialize, Serializer};

use crate::constants::{Pixel, SUN_SPKID};
use crate::sso::{orbit_kind::OrbitKind, orbit_record::OrbitRecord};
use crate::trail::Trail;
use crate::view::{PixelPoint, ViewParameters};

/// A color packed as `0xAARRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba32(pub u32);

impl Rgba32 {
    pub const DEFAULT_ORBIT: Rgba32 = Rgba32(0x7FFFFFFF);

    pub fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub fn with_alpha(self, alpha: u8) -> Self {
        Rgba32((self.0 & 0x00FF_FFFF) | (u32::from(alpha) << 24))
    }
}

impl Serialize for Rgba32 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("#{:08X}", self.0))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompositeOp {
    /// Paint over what is already drawn.
    SourceOver,
    /// Paint behind what is already drawn.
    DestinationOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrokeCap {
    Round,
    Butt,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GradientStop {
    pub offset: f64,
    pub color: Rgba32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum Paint {
    Solid {
        color: Rgba32,
    },
    LinearGradient {
        from: PixelPoint,
        to: PixelPoint,
        stops: Vec<GradientStop>,
    },
    RadialGradient {
        center: PixelPoint,
        radius: Pixel,
        stops: Vec<GradientStop>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrokeStyle {
    pub paint: Paint,
    pub width: Pixel,
    pub start_cap: StrokeCap,
    pub end_cap: StrokeCap,
    pub comp_op: CompositeOp,
}

/// Glyph drawn at the current position of a body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum Marker {
    Circle { center: PixelPoint, radius: Pixel },
    Tail { points: Vec<PixelPoint>, width: Pixel },
}

/// Per-body color, `shared_with_satellites` also colors the orbits centered on it.
#[derive(Debug, Clone, Copy)]
pub struct BodyColor {
    pub spkid: &'static str,
    pub color: Rgba32,
    pub shared_with_satellites: bool,
}

pub const BODY_COLORS: [BodyColor; 8] = [
    BodyColor {
        spkid: "199",
        color: Rgba32(0xFF463734),
        shared_with_satellites: false,
    },
    BodyColor {
        spkid: "299",
        color: Rgba32(0xFF762F1F),
        shared_with_satellites: false,
    },
    BodyColor {
        spkid: "399",
        color: Rgba32(0xFF495E2B),
        shared_with_satellites: true,
    },
    BodyColor {
        spkid: "499",
        color: Rgba32(0xFF932C0C),
        shared_with_satellites: true,
    },
    BodyColor {
        spkid: "599",
        color: Rgba32(0xFFBA946D),
        shared_with_satellites: true,
    },
    BodyColor {
        spkid: "699",
        color: Rgba32(0xFF8C5197),
        shared_with_satellites: true,
    },
    BodyColor {
        spkid: "799",
        color: Rgba32(0xFF4D4D4D),
        shared_with_satellites: true,
    },
    BodyColor {
        spkid: "899",
        color: Rgba32(0xFF9D9D9D),
        shared_with_satellites: true,
    },
];

fn kind_color(kind: OrbitKind) -> Option<Rgba32> {
    match kind {
        OrbitKind::Spacecraft => Some(Rgba32(0xFFFFBF00)),
        OrbitKind::Comets => Some(Rgba32(0x55AAC8AA)),
        OrbitKind::NeoAsteroids => Some(Rgba32(0x7F88412D)),
        OrbitKind::ImbAsteroids => Some(Rgba32(0xFF659ABE)),
        OrbitKind::MbaAsteroids => Some(Rgba32(0xFF1A4969)),
        _ => None,
    }
}

fn body_color(record: &OrbitRecord) -> Option<Rgba32> {
    BODY_COLORS
        .iter()
        .find(|body| {
            record.spkid == body.spkid || (body.shared_with_satellites && record.center() == body.spkid)
        })
        .map(|body| body.color)
}

/// Everything needed to paint one orbit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitStyle {
    pub kind: OrbitKind,
    /// Base color, used as is by markers.
    pub color: Rgba32,
    /// Trail color, alpha adjusted by tier.
    pub orbit_color: Rgba32,
    pub width: Pixel,
    pub comp_op: CompositeOp,
    pub fading: bool,
    zoom: f64,
}

impl OrbitStyle {
    /// Resolve the style of an orbit for a given zoom.
    pub fn resolve(record: &OrbitRecord, zoom: f64) -> Self {
        let kind = record.kind();
        let color = kind_color(kind)
            .or_else(|| body_color(record))
            .unwrap_or(Rgba32::DEFAULT_ORBIT);

        let orbit_color = if kind <= OrbitKind::Spacecraft {
            color.with_alpha(0xFF)
        } else {
            color.with_alpha((f64::from(color.alpha()) * 0.5) as u8)
        };

        let width = match kind {
            OrbitKind::SunAndPlanets => 3.0,
            k if k.is_major_body() => 2.0,
            _ => 1.5,
        } * zoom;

        // minor bodies go behind what is already painted so planets stay on top
        let comp_op = if kind.is_major_body() {
            CompositeOp::SourceOver
        } else {
            CompositeOp::DestinationOver
        };

        OrbitStyle {
            kind,
            color,
            orbit_color,
            width,
            comp_op,
            fading: kind.has_fading_trail(),
            zoom,
        }
    }

    /// Stroke of the trail. Fading trails get a gradient from transparent at the start
    /// point to opaque at three quarters of the way to the end point.
    pub fn stroke(&self, trail: &Trail) -> StrokeStyle {
        let paint = if self.fading {
            Paint::LinearGradient {
                from: trail.start().point,
                to: trail.end().point,
                stops: vec![
                    GradientStop {
                        offset: 0.0,
                        color: self.orbit_color.with_alpha(0x00),
                    },
                    GradientStop {
                        offset: 0.75,
                        color: self.orbit_color,
                    },
                    GradientStop {
                        offset: 1.0,
                        color: self.orbit_color,
                    },
                ],
            }
        } else {
            Paint::Solid {
                color: self.orbit_color,
            }
        };

        StrokeStyle {
            paint,
            width: self.width,
            start_cap: StrokeCap::Round,
            end_cap: StrokeCap::Butt,
            comp_op: self.comp_op,
        }
    }

    /// Marker at the end of the trail, `None` if the end point is outside the image.
    ///
    /// * Major bodies: a circle sized by their reference body and physical radius.
    /// * Inner and main belt asteroids: a small circle.
    /// * Other kinds: a short tail over the last visible samples.
    pub fn marker(
        &self,
        record: &OrbitRecord,
        trail: &Trail,
        view: &ViewParameters,
    ) -> Option<Marker> {
        if trail.end_out_of_bounds {
            return None;
        }
        let center = trail.end().point;

        if self.kind.is_major_body() {
            let base = if record.center() == SUN_SPKID { 6.0 } else { 4.0 };
            let factor = record
                .radius_ratio
                .map_or(0.2, |ratio| 1.0 + f64::from(ratio));
            return Some(Marker::Circle {
                center,
                radius: base * factor * self.zoom,
            });
        }

        let size = 5.0 * self.zoom;
        if self.kind >= OrbitKind::ImbAsteroids {
            return Some(Marker::Circle {
                center,
                radius: size / 2.0,
            });
        }

        Some(Marker::Tail {
            points: trail.marker_tail(record, view),
            width: size,
        })
    }
}

#[cfg(test)]
mod style_test {
    use super::*;
    use crate::config::RenderConfig;
    use crate::trail::window_trail;
    use approx::assert_relative_eq;

    fn record(spkid: &str, kind: OrbitKind, center: &str) -> OrbitRecord {
        let r = OrbitRecord::new(spkid, "body", kind).with_samples(
            vec![0.0, 1.0, 2.0],
            vec![0.5, 0.6, 0.7],
            vec![0.5, 0.5, 0.5],
        );
        if kind.has_center() {
            r.with_center(center)
        } else {
            r
        }
    }

    #[test]
    fn test_rgba32() {
        let c = Rgba32(0x7F88412D);
        assert_eq!(c.alpha(), 0x7F);
        assert_eq!(c.with_alpha(0xFF), Rgba32(0xFF88412D));
        assert_eq!(serde_json::to_string(&c).unwrap(), "\"#7F88412D\"");
    }

    #[test]
    fn test_body_table() {
        let earth = OrbitStyle::resolve(&record("399", OrbitKind::SunAndPlanets, "10"), 1.0);
        assert_eq!(earth.color, Rgba32(0xFF495E2B));

        // the Moon shares the Earth color
        let moon = OrbitStyle::resolve(&record("301", OrbitKind::OtherSatellites, "399"), 1.0);
        assert_eq!(moon.color, Rgba32(0xFF495E2B));

        // Mercury's color is not shared
        let odd = OrbitStyle::resolve(&record("1999", OrbitKind::OtherSatellites, "199"), 1.0);
        assert_eq!(odd.color, Rgba32::DEFAULT_ORBIT);
        assert_eq!(odd.orbit_color, Rgba32(0xFFFFFFFF));

        let mercury = OrbitStyle::resolve(&record("199", OrbitKind::SunAndPlanets, "10"), 1.0);
        assert_eq!(mercury.color, Rgba32(0xFF463734));
    }

    #[test]
    fn test_kind_overrides_table() {
        let craft = OrbitStyle::resolve(&record("-61", OrbitKind::Spacecraft, "599"), 1.0);
        assert_eq!(craft.color, Rgba32(0xFFFFBF00));
        assert_eq!(craft.orbit_color.alpha(), 0xFF);

        let comet = OrbitStyle::resolve(&record("1000036", OrbitKind::Comets, "10"), 1.0);
        assert_eq!(comet.color, Rgba32(0x55AAC8AA));
        assert_eq!(comet.orbit_color, Rgba32(0x2AAAC8AA));
        assert!(comet.fading);

        let mba = OrbitStyle::resolve(&record("1", OrbitKind::MbaAsteroids, "10"), 1.0);
        assert_eq!(mba.orbit_color, Rgba32(0x7F1A4969));
        assert!(!mba.fading);
    }

    #[test]
    fn test_width_and_composition() {
        let zoom = 2.0;
        let sun = OrbitStyle::resolve(&record("599", OrbitKind::SunAndPlanets, "10"), zoom);
        let moon = OrbitStyle::resolve(&record("501", OrbitKind::JovianSatellites, "599"), zoom);
        let neo = OrbitStyle::resolve(&record("433", OrbitKind::NeoAsteroids, "10"), zoom);

        assert_relative_eq!(sun.width, 6.0);
        assert_relative_eq!(moon.width, 4.0);
        assert_relative_eq!(neo.width, 3.0);
        assert_eq!(sun.comp_op, CompositeOp::SourceOver);
        assert_eq!(moon.comp_op, CompositeOp::SourceOver);
        assert_eq!(neo.comp_op, CompositeOp::DestinationOver);
    }

    #[test]
    fn test_fading_stroke() {
        let view = ViewParameters::from_config(&RenderConfig {
            zoom: 1.0,
            ..RenderConfig::default()
        })
        .unwrap();
        let neo = record("433", OrbitKind::NeoAsteroids, "10");
        let trail = window_trail(&neo, &view, 0.0, 2.0).unwrap();
        let stroke = OrbitStyle::resolve(&neo, 1.0).stroke(&trail);

        assert_eq!(stroke.start_cap, StrokeCap::Round);
        assert_eq!(stroke.end_cap, StrokeCap::Butt);
        match stroke.paint {
            Paint::LinearGradient { from, to, stops } => {
                assert_eq!(from, trail.start().point);
                assert_eq!(to, trail.end().point);
                assert_eq!(stops.len(), 3);
                assert_eq!(stops[0].color.alpha(), 0);
                assert_eq!(stops[1].offset, 0.75);
                assert_eq!(stops[2].color, Rgba32(0x3F88412D));
            }
            other => panic!("expected a gradient, got {other:?}"),
        }
    }

    #[test]
    fn test_markers() {
        let view = ViewParameters::from_config(&RenderConfig {
            zoom: 1.0,
            ..RenderConfig::default()
        })
        .unwrap();

        let mut earth = record("399", OrbitKind::SunAndPlanets, "10");
        earth.radius_ratio = Some(0.5);
        let trail = window_trail(&earth, &view, 0.0, 2.0).unwrap();
        let marker = OrbitStyle::resolve(&earth, 1.0).marker(&earth, &trail, &view);
        assert_eq!(
            marker,
            Some(Marker::Circle {
                center: trail.end().point,
                radius: 9.0
            })
        );

        // satellite without physical radius
        let moon = record("502", OrbitKind::JovianSatellites, "599");
        let marker = OrbitStyle::resolve(&moon, 1.0).marker(&moon, &trail, &view);
        match marker {
            Some(Marker::Circle { radius, .. }) => assert_relative_eq!(radius, 0.8),
            other => panic!("unexpected marker {other:?}"),
        }

        let imb = record("20", OrbitKind::ImbAsteroids, "10");
        let marker = OrbitStyle::resolve(&imb, 1.0).marker(&imb, &trail, &view);
        assert!(matches!(marker, Some(Marker::Circle { radius, .. }) if radius == 2.5));

        let craft = record("-61", OrbitKind::Spacecraft, "10");
        let trail = window_trail(&craft, &view, 0.0, 2.0).unwrap();
        let marker = OrbitStyle::resolve(&craft, 1.0).marker(&craft, &trail, &view);
        match marker {
            Some(Marker::Tail { points, width }) => {
                assert_eq!(points.len(), 3);
                assert_relative_eq!(width, 5.0);
            }
            other => panic!("unexpected marker {other:?}"),
        }
    }

    #[test]
    fn test_no_marker_out_of_bounds() {
        let view = ViewParameters::default();
        let far = record("1", OrbitKind::MbaAsteroids, "10")
            .with_samples(vec![0.0, 1.0], vec![0.0, 100.0], vec![0.0, 0.0]);
        let trail = window_trail(&far, &view, 0.0, 1.0).unwrap();
        assert!(trail.end_out_of_bounds);
        assert!(OrbitStyle::resolve(&far, 1.1).marker(&far, &trail, &view).is_none());
    }
}
