//! # Render pass
//!
//! [`RenderContext`] drives one render of the dataset at a single instant. Records
//! are processed one at a time, in stream order:
//!
//! ```text
//! decode ─▶ register (major bodies) ─▶ reposition (satellites) ─▶ window + project
//!        ─▶ style ─▶ stroke command ─▶ marker command (end point visible)
//! ```
//!
//! The frame is opened with the Sun disc and closed with the background fill, which
//! is painted behind everything.
//!
//! ## Errors
//!
//! * A stale dataset is rejected before any record is decoded.
//! * A decoding error ends the pass, the stream cannot be resynchronized.
//! * A satellite whose parent has not been seen is skipped; the error is kept in the
//!   [`RenderSummary`] and the pass continues.

use tracing::{debug, info, warn};

use crate::constants::{JulianDate, BACKGROUND_COLOR, SUN_GRADIENT, SUN_RADIUS_PX};
use crate::satellite::{reposition, Reposition};
use crate::solarpaper_errors::SolarpaperError;
use crate::sso::{
    orbit_record::{KindField, OrbitRecord},
    orbit_store::OrbitStore,
    sso_reader::SsoReader,
};
use crate::style::{CompositeOp, GradientStop, OrbitStyle, Paint, Rgba32};
use crate::surface::{DrawCommand, DrawingSurface};
use crate::time::jd_seconds_before;
use crate::trail::window_trail;
use crate::view::ViewParameters;

/// What happened to one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    Drawn { marker: bool },
    Culled,
    NotVisible,
}

#[derive(Debug, Default, PartialEq)]
pub struct RenderSummary {
    pub decoded: usize,
    pub drawn: usize,
    pub markers: usize,
    pub culled: usize,
    pub not_visible: usize,
    /// Record-local errors, the records they concern were skipped.
    pub skipped: Vec<SolarpaperError>,
}

/// State of one render pass: the view, the rendered instant and the major bodies
/// seen so far.
#[derive(Debug, Clone)]
pub struct RenderContext {
    pub view: ViewParameters,
    pub jd_now: JulianDate,
    pub store: OrbitStore,
}

impl RenderContext {
    pub fn new(view: ViewParameters, jd_now: JulianDate) -> Self {
        RenderContext {
            view,
            jd_now,
            store: OrbitStore::new(),
        }
    }

    /// Render a whole decompressed `.sso` stream.
    ///
    /// Return
    /// ----------
    /// * The [`RenderSummary`] of the pass.
    /// * [`SolarpaperError::StaleDataset`] if `jd_now` is past the dataset validity,
    ///   before any record is decoded.
    /// * The decoding error that ended the pass, if any.
    pub fn render_dataset<S: DrawingSurface>(
        &mut self,
        data: &[u8],
        kind_field: KindField,
        surface: &mut S,
    ) -> Result<RenderSummary, SolarpaperError> {
        let reader = SsoReader::new(data, kind_field)?;
        reader.check_valid_at(self.jd_now)?;
        info!(
            valid_until = reader.valid_until(),
            jd_now = self.jd_now,
            bytes = data.len(),
            "rendering dataset"
        );
        self.render_records(reader, surface)
    }

    /// Render a sequence of decoded records, each with its byte offset in the dataset,
    /// stopping at the first decoding error.
    pub fn render_records<I, S>(
        &mut self,
        records: I,
        surface: &mut S,
    ) -> Result<RenderSummary, SolarpaperError>
    where
        I: IntoIterator<Item = Result<(usize, OrbitRecord), SolarpaperError>>,
        S: DrawingSurface,
    {
        let mut summary = RenderSummary::default();
        self.draw_sun(surface);

        for entry in records {
            let (offset, record) = entry?;
            summary.decoded += 1;

            match self.render_record(offset, record, surface) {
                Ok(RecordOutcome::Drawn { marker }) => {
                    summary.drawn += 1;
                    if marker {
                        summary.markers += 1;
                    }
                }
                Ok(RecordOutcome::Culled) => summary.culled += 1,
                Ok(RecordOutcome::NotVisible) => summary.not_visible += 1,
                Err(err) if err.is_record_local() => {
                    warn!("record skipped: {err}");
                    summary.skipped.push(err);
                }
                Err(err) => return Err(err),
            }
        }

        self.draw_background(surface);
        info!(
            decoded = summary.decoded,
            drawn = summary.drawn,
            culled = summary.culled,
            not_visible = summary.not_visible,
            skipped = summary.skipped.len(),
            "render pass done"
        );
        Ok(summary)
    }

    /// Process one record: register, reposition, window, style and emit. `offset` is
    /// the position of the record in the dataset, reported on error.
    pub fn render_record<S: DrawingSurface>(
        &mut self,
        offset: usize,
        mut record: OrbitRecord,
        surface: &mut S,
    ) -> Result<RecordOutcome, SolarpaperError> {
        // satellites are stored in their own frame, before repositioning
        if record.kind().is_major_body() {
            self.store.register(&record);
        }

        let outcome = reposition(&mut record, offset, &self.store, &self.view, self.jd_now)?;
        if outcome == Reposition::Culled {
            return Ok(RecordOutcome::Culled);
        }

        let trail_start = jd_seconds_before(self.jd_now, record.trail_duration);
        let Some(trail) = window_trail(&record, &self.view, trail_start, self.jd_now) else {
            debug!(spkid = %record.spkid, "no visible trail");
            return Ok(RecordOutcome::NotVisible);
        };

        let style = OrbitStyle::resolve(&record, self.view.zoom);
        surface.draw(DrawCommand::StrokePath {
            spkid: record.spkid.to_string(),
            vertices: trail.points(),
            style: style.stroke(&trail),
        });

        let marker = style.marker(&record, &trail, &self.view);
        let has_marker = marker.is_some();
        if let Some(marker) = marker {
            surface.draw(DrawCommand::Marker {
                spkid: record.spkid.to_string(),
                marker,
                color: style.color,
                comp_op: style.comp_op,
            });
        }

        debug!(
            spkid = %record.spkid,
            vertices = trail.vertices.len(),
            marker = has_marker,
            "trail drawn"
        );
        Ok(RecordOutcome::Drawn { marker: has_marker })
    }

    fn draw_sun<S: DrawingSurface>(&self, surface: &mut S) {
        let center = self.view.center();
        let stops = SUN_GRADIENT
            .iter()
            .map(|&(offset, color)| GradientStop {
                offset,
                color: Rgba32(color),
            })
            .collect();
        surface.draw(DrawCommand::FillCircle {
            center,
            radius: SUN_RADIUS_PX,
            paint: Paint::RadialGradient {
                center,
                radius: SUN_RADIUS_PX,
                stops,
            },
            comp_op: CompositeOp::SourceOver,
        });
    }

    fn draw_background<S: DrawingSurface>(&self, surface: &mut S) {
        surface.draw(DrawCommand::FillAll {
            color: Rgba32(BACKGROUND_COLOR),
            comp_op: CompositeOp::DestinationOver,
        });
    }
}

#[cfg(test)]
mod renderer_test {
    use super::*;
    use crate::config::RenderConfig;
    use crate::sso::orbit_kind::OrbitKind;
    use crate::surface::CommandRecorder;

    const NOW: JulianDate = 2460600.5;

    fn context() -> RenderContext {
        let view = ViewParameters::from_config(&RenderConfig {
            width: 1600,
            height: 900,
            zoom: 1.0,
            ..RenderConfig::default()
        })
        .unwrap();
        RenderContext::new(view, NOW)
    }

    fn planet(spkid: &str) -> OrbitRecord {
        let mut r = OrbitRecord::new(spkid, "planet", OrbitKind::SunAndPlanets)
            .with_samples(
                vec![NOW - 2.0, NOW - 1.0, NOW + 1.0],
                vec![1.0, 1.1, 1.2],
                vec![0.0, 0.1, 0.2],
            )
            .with_distance_ratio(0.0);
        r.trail_duration = 3 * 86_400;
        r
    }

    #[test]
    fn test_render_record_registers_major_bodies() {
        let mut ctx = context();
        let mut surface = CommandRecorder::new();
        let outcome = ctx.render_record(8, planet("399"), &mut surface).unwrap();

        assert_eq!(outcome, RecordOutcome::Drawn { marker: true });
        assert!(ctx.store.contains("399"));
        assert_eq!(surface.commands().len(), 2);
        assert!(matches!(
            surface.commands()[1],
            DrawCommand::Marker { .. }
        ));
    }

    #[test]
    fn test_satellite_stored_unrepositioned() {
        let mut ctx = context();
        let mut surface = CommandRecorder::new();
        ctx.render_record(8, planet("399"), &mut surface).unwrap();

        let mut moon = OrbitRecord::new("301", "Moon", OrbitKind::OtherSatellites)
            .with_samples(vec![NOW - 1.0, NOW], vec![0.002, 0.0], vec![0.0, 0.002])
            .with_center("399")
            .with_distance_ratio(0.3);
        moon.radius_ratio = Some(0.27);
        moon.trail_duration = 86_400;

        let outcome = ctx.render_record(200, moon.clone(), &mut surface).unwrap();
        assert!(matches!(outcome, RecordOutcome::Drawn { .. }));
        assert_eq!(ctx.store.get("301"), Some(&moon));
    }

    #[test]
    fn test_missing_parent_is_record_local() {
        let mut ctx = context();
        let mut surface = CommandRecorder::new();

        let orphan = OrbitRecord::new("501", "Io", OrbitKind::JovianSatellites)
            .with_samples(vec![NOW], vec![0.001], vec![0.0])
            .with_center("599")
            .with_distance_ratio(0.5);

        let records = vec![Ok((8, orphan)), Ok((180, planet("499")))];
        let summary = ctx.render_records(records, &mut surface).unwrap();
        assert_eq!(summary.decoded, 2);
        assert_eq!(summary.drawn, 1);
        assert_eq!(
            summary.skipped,
            vec![SolarpaperError::MissingReferenceBody {
                offset: 8,
                spkid: "501".into(),
                center: "599".into()
            }]
        );
    }

    #[test]
    fn test_frame_order() {
        let mut ctx = context();
        let mut surface = CommandRecorder::new();
        ctx.render_records(vec![Ok((8, planet("399")))], &mut surface)
            .unwrap();

        let commands = surface.commands();
        assert!(matches!(commands[0], DrawCommand::FillCircle { .. }));
        assert!(matches!(commands[1], DrawCommand::StrokePath { .. }));
        assert!(matches!(
            commands.last(),
            Some(DrawCommand::FillAll {
                comp_op: CompositeOp::DestinationOver,
                ..
            })
        ));
    }

    #[test]
    fn test_decode_error_stops_pass() {
        let mut ctx = context();
        let mut surface = CommandRecorder::new();
        let records = vec![
            Ok((8, planet("399"))),
            Err(SolarpaperError::TruncatedRecord {
                offset: 100,
                spkid: Some("499".into()),
                field: "x",
            }),
            Ok((180, planet("499"))),
        ];
        let err = ctx.render_records(records, &mut surface).unwrap_err();
        assert_eq!(
            err,
            SolarpaperError::TruncatedRecord {
                offset: 100,
                spkid: Some("499".into()),
                field: "x"
            }
        );
        assert!(!ctx.store.contains("499"));
    }
}
