//! # Satellite repositioning
//!
//! Satellite orbits are sampled around their parent body, at true scale. At the scale
//! of the whole solar system they would collapse onto the parent's pixel, so their path
//! is exaggerated and moved into the heliocentric frame before being drawn:
//!
//! 1. the path is rescaled so that its largest excursion lands at a pixel offset
//!    `min + (max − min) · distance_ratio` from the parent, independently of its true
//!    size,
//! 2. it is then translated to the parent's position at the current instant.
//!
//! Satellites with no physical radius and a small distance ratio are culled.

use tracing::debug;

use crate::constants::{JulianDate, MINOR_SATELLITE_DISTANCE_RATIO};
use crate::solarpaper_errors::SolarpaperError;
use crate::sso::{orbit_record::OrbitRecord, orbit_store::OrbitStore};
use crate::view::ViewParameters;

/// What [`reposition`] did to a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reposition {
    /// The record is not a satellite, its path is already heliocentric.
    Unchanged,
    /// The path was rescaled and anchored on sample `parent_index` of the parent.
    Moved { parent_index: usize },
    /// Minor satellite, not drawn.
    Culled,
}

/// Index of the latest parent sample not after `jd_now`, `0` if there is none.
pub fn parent_sample_index(parent: &OrbitRecord, jd_now: JulianDate) -> usize {
    let mut index = 0;
    for (i, &t) in parent.jd.iter().enumerate() {
        if t > jd_now {
            break;
        }
        index = i;
    }
    index
}

/// Largest excursions of a satellite path.
///
/// The x extent takes every sample in absolute value. The y extent only grows on
/// positive excursions, so a path lying entirely below its parent has a zero y extent.
pub fn path_extent(record: &OrbitRecord) -> (f64, f64) {
    let max_x = record.x.iter().fold(0.0_f64, |acc, x| acc.max(x.abs()));
    let max_y = record.y.iter().fold(0.0_f64, |acc, &y| acc.max(y));
    (max_x, max_y)
}

/// Pixel distance between a satellite's largest excursion and its parent.
pub fn normalized_offset(view: &ViewParameters, distance_ratio: f32) -> f64 {
    let [min, max] = view.moon_offset;
    min + (max - min) * f64::from(distance_ratio)
}

/// Move a satellite's path around its parent's current position.
///
/// Arguments
/// -----------------
/// * `record`: the orbit, modified in place when it is repositioned.
/// * `offset`: byte offset of the record in the dataset, reported on error.
/// * `store`: major bodies seen so far.
/// * `view`: view geometry, for the pixel offsets.
/// * `jd_now`: the rendered instant.
///
/// Return
/// ----------
/// * The [`Reposition`] outcome.
/// * [`SolarpaperError::MissingReferenceBody`] if the parent is not in the store (or
///   has no sample to anchor on). The error concerns this record only.
pub fn reposition(
    record: &mut OrbitRecord,
    offset: usize,
    store: &OrbitStore,
    view: &ViewParameters,
    jd_now: JulianDate,
) -> Result<Reposition, SolarpaperError> {
    if !record.is_satellite() {
        return Ok(Reposition::Unchanged);
    }

    let center = record.center();
    let parent = store
        .get(&center.as_str())
        .filter(|parent| !parent.is_empty())
        .ok_or_else(|| SolarpaperError::MissingReferenceBody {
            offset,
            spkid: record.spkid.to_string(),
            center: center.to_string(),
        })?;

    let distance_ratio = record.distance_ratio().unwrap_or(0.0);
    if !record.has_physical_radius() && distance_ratio < MINOR_SATELLITE_DISTANCE_RATIO {
        debug!(spkid = %record.spkid, distance_ratio, "minor satellite culled");
        return Ok(Reposition::Culled);
    }

    let (max_x, max_y) = path_extent(record);
    let offset_px = normalized_offset(view, distance_ratio);
    let px_per_au = view.px_per_au();
    let ratio_x = axis_ratio(offset_px / px_per_au.x, max_x);
    let ratio_y = axis_ratio(offset_px / px_per_au.y, max_y);

    let parent_index = parent_sample_index(parent, jd_now);
    let (anchor_x, anchor_y) = (parent.x[parent_index], parent.y[parent_index]);

    for x in record.x.iter_mut() {
        *x = *x * ratio_x + anchor_x;
    }
    for y in record.y.iter_mut() {
        *y = *y * ratio_y + anchor_y;
    }

    debug!(
        spkid = %record.spkid,
        center = %center,
        parent_index,
        offset_px,
        "satellite repositioned"
    );
    Ok(Reposition::Moved { parent_index })
}

/// A zero extent collapses the axis onto the parent instead of dividing by zero.
fn axis_ratio(offset_au: f64, extent: f64) -> f64 {
    if extent > 0.0 {
        offset_au / extent
    } else {
        0.0
    }
}
