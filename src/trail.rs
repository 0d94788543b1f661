//! # Trail windowing
//!
//! A trail is the part of an orbit swept during `[trail_start, trail_end]`, where
//! `trail_end` is the rendered instant. Samples are discrete, so both ends of the
//! window are linearly interpolated in pixel space between the two samples that
//! surround them.
//!
//! The start point additionally depends on the viewport. An interpolated start that
//! falls outside the image is kept only if the path crosses the border there (coming
//! from inside towards outside, or the reverse). Otherwise the search moves on to the
//! next samples until the path enters the image. For an orbit with no visible start
//! there is no trail.
//!
//! Intermediate samples become vertices only for kinds that keep the full path (see
//! [`OrbitKind::draws_full_trail`](crate::sso::orbit_kind::OrbitKind::draws_full_trail)),
//! the other kinds are drawn as a single segment from start to end.

use crate::constants::JulianDate;
use crate::sso::orbit_record::OrbitRecord;
use crate::view::{PixelPoint, ProjectedPoint, ViewParameters};

/// Number of samples before the end point used by tail markers.
pub const MARKER_TAIL_SAMPLES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailVertex {
    pub point: PixelPoint,
    /// Time of the vertex along the orbit
    pub jd: JulianDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Trail {
    /// Ordered path, start first and end last. Never empty.
    pub vertices: Vec<TrailVertex>,
    pub end_out_of_bounds: bool,
    /// Index of the last sample the end search reached.
    pub last_index: usize,
}

impl Trail {
    pub fn start(&self) -> &TrailVertex {
        &self.vertices[0]
    }

    pub fn end(&self) -> &TrailVertex {
        &self.vertices[self.vertices.len() - 1]
    }

    pub fn points(&self) -> Vec<PixelPoint> {
        self.vertices.iter().map(|v| v.point).collect()
    }

    /// Short polyline going back from the end point through the previous samples
    /// that are inside the image.
    pub fn marker_tail(&self, record: &OrbitRecord, view: &ViewParameters) -> Vec<PixelPoint> {
        let mut points = vec![self.end().point];
        let first = self.last_index.saturating_sub(MARKER_TAIL_SAMPLES);
        for i in (first..self.last_index).rev() {
            let p = view.project(record.x[i], record.y[i]);
            if !p.out_of_bounds {
                points.push(p.point);
            }
        }
        points
    }
}

/// Compute the visible trail of an orbit.
///
/// Arguments
/// -----------------
/// * `record`: the orbit, already in the heliocentric frame.
/// * `view`: projection of the render pass.
/// * `trail_start`, `trail_end`: the time window (JD TDB), `trail_end` being "now".
///
/// Return
/// ----------
/// * `None` when no usable start point exists: the orbit ends before the window, it
///   never enters the image, or its start lands exactly on the pixel origin (which
///   the renderer has always treated as "no start").
/// * The trail otherwise.
pub fn window_trail(
    record: &OrbitRecord,
    view: &ViewParameters,
    trail_start: JulianDate,
    trail_end: JulianDate,
) -> Option<Trail> {
    let (first_index, start) = find_start(record, view, trail_start)?;
    if start.point == PixelPoint::origin() {
        return None;
    }

    let full_path = record.kind().draws_full_trail();
    let mut vertices = vec![start];

    for j in first_index..record.len() {
        if record.jd[j] >= trail_end {
            let end = if j == 0 {
                sample_vertex(record, view, 0)
            } else {
                interpolate(record, view, j, trail_end)
            };
            vertices.push(end);
            return Some(finish(vertices, view, j));
        }

        if full_path {
            push_distinct(&mut vertices, sample_vertex(record, view, j));
        }
    }

    // the window ends after the last sample
    let last = record.len() - 1;
    push_distinct(&mut vertices, sample_vertex(record, view, last));
    Some(finish(vertices, view, last))
}

fn finish(vertices: Vec<TrailVertex>, view: &ViewParameters, last_index: usize) -> Trail {
    let end_out_of_bounds = vertices
        .last()
        .is_some_and(|end| view.is_out_of_bounds(&end.point));
    Trail {
        vertices,
        end_out_of_bounds,
        last_index,
    }
}

fn find_start(
    record: &OrbitRecord,
    view: &ViewParameters,
    trail_start: JulianDate,
) -> Option<(usize, TrailVertex)> {
    for i in 0..record.len() {
        if record.jd[i] < trail_start {
            continue;
        }
        if i == 0 {
            return Some((0, sample_vertex(record, view, 0)));
        }

        let prev = view.project(record.x[i - 1], record.y[i - 1]);
        let next = view.project(record.x[i], record.y[i]);
        let candidate = interpolate(record, view, i, trail_start);

        let candidate_out = view.is_out_of_bounds(&candidate.point);
        let leaving = !prev.out_of_bounds && next.out_of_bounds;
        let entering = prev.out_of_bounds && !next.out_of_bounds;
        if !candidate_out || leaving || entering {
            return Some((i, candidate));
        }
    }
    None
}

fn sample_vertex(record: &OrbitRecord, view: &ViewParameters, i: usize) -> TrailVertex {
    TrailVertex {
        point: view.project(record.x[i], record.y[i]).point,
        jd: record.jd[i],
    }
}

/// Point at time `t` on the segment between samples `i - 1` and `i`.
///
/// A negative (or undefined) fraction keeps the previous sample as is.
fn interpolate(record: &OrbitRecord, view: &ViewParameters, i: usize, t: JulianDate) -> TrailVertex {
    let (t0, t1) = (record.jd[i - 1], record.jd[i]);
    let prev: ProjectedPoint = view.project(record.x[i - 1], record.y[i - 1]);
    let dt = t1 - t0;
    let fraction = (t - t0) / dt;

    if dt > 0.0 && fraction >= 0.0 {
        let next = view.project(record.x[i], record.y[i]);
        TrailVertex {
            point: prev.point + (next.point - prev.point) * fraction,
            jd: t0 + fraction * dt,
        }
    } else {
        TrailVertex {
            point: prev.point,
            jd: t0,
        }
    }
}

fn push_distinct(vertices: &mut Vec<TrailVertex>, vertex: TrailVertex) {
    if vertices.last().map(|v| v.point) != Some(vertex.point) {
        vertices.push(vertex);
    }
}
