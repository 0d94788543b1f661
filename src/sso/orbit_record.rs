//! One orbit of the `.sso` dataset and its binary codec.
//!
//! A record is a variable-layout structure: after a fixed prefix (`spkid`, `name`,
//! `kind`) the presence of each optional field depends on values already read.
//!
//! ```text
//! spkid        8 bytes, NUL padded
//! name        32 bytes, NUL padded
//! kind         u32 (wide) or u8 (compact)
//! is_neo       u8        if kind > 6
//! is_pha       u8        if kind > 6
//! dist_ratio   f32       if kind < 6
//! center       8 bytes   if kind < 7
//! phy_bit      u8
//! radius_ratio f32       if phy_bit != 0
//! trail        u32       trail duration in seconds
//! size         u32       number of samples
//! jdtdb        size × f64
//! x            size × f64
//! y            size × f64
//! ```
//!
//! Every number is little-endian. Decoding uses [`nom`] complete parsers; any short
//! read is reported as [`SolarpaperError::TruncatedRecord`] with the name of the field
//! that could not be read.

use itertools::Itertools;
use nom::{
    bytes::complete::take,
    multi::count,
    number::complete::{le_f32, le_f64, le_u32, le_u8},
    IResult,
};
use serde::{Deserialize, Serialize};

use crate::constants::{JulianDate, NAME_WIDTH, SPKID_WIDTH};
use crate::solarpaper_errors::SolarpaperError;

use super::fixed_str::{BodyName, SpkId};
use super::orbit_kind::OrbitKind;

/// Encoding of the `kind` field.
///
/// `Wide` is a 4-byte unsigned integer. `Compact` is the single byte written by the
/// dataset collector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KindField {
    #[default]
    Wide,
    Compact,
}

/// Fields whose presence depends on the kind of the record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KindFields {
    /// Planets and every satellite tier.
    MajorBody { distance_ratio: f32, center: SpkId },
    Spacecraft { center: SpkId },
    /// Comets and asteroids.
    SmallBody { is_neo: bool, is_pha: bool },
}

impl KindFields {
    fn default_for(kind: OrbitKind) -> Self {
        if kind.has_distance_ratio() {
            KindFields::MajorBody {
                distance_ratio: 0.0,
                center: SpkId::SUN,
            }
        } else if kind.has_center() {
            KindFields::Spacecraft {
                center: SpkId::SUN,
            }
        } else {
            KindFields::SmallBody {
                is_neo: false,
                is_pha: false,
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrbitRecord {
    pub spkid: SpkId,
    pub name: BodyName,
    kind: OrbitKind,
    fields: KindFields,
    /// Present iff the physical radius flag is set.
    pub radius_ratio: Option<f32>,
    pub trail_duration: u32,
    pub jd: Vec<JulianDate>,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl OrbitRecord {
    /// Create an empty record orbiting the Sun.
    pub fn new(spkid: &str, name: &str, kind: OrbitKind) -> Self {
        OrbitRecord {
            spkid: SpkId::new(spkid),
            name: BodyName::new(name),
            kind,
            fields: KindFields::default_for(kind),
            radius_ratio: None,
            trail_duration: 0,
            jd: Vec::new(),
            x: Vec::new(),
            y: Vec::new(),
        }
    }

    /// Replace the sampled path.
    ///
    /// # Panics
    /// If the three sequences do not have the same length.
    pub fn with_samples(mut self, jd: Vec<JulianDate>, x: Vec<f64>, y: Vec<f64>) -> Self {
        assert!(
            jd.len() == x.len() && x.len() == y.len(),
            "sample sequences must have the same length"
        );
        self.jd = jd;
        self.x = x;
        self.y = y;
        self
    }

    /// Set the reference body.
    ///
    /// # Panics
    /// If the kind has no reference body field (comets and asteroids).
    pub fn with_center(mut self, spkid: &str) -> Self {
        match &mut self.fields {
            KindFields::MajorBody { center, .. } | KindFields::Spacecraft { center } => {
                *center = SpkId::new(spkid);
            }
            KindFields::SmallBody { .. } => panic!("{} records have no center field", self.kind),
        }
        self
    }

    /// Set the normalized distance from the parent.
    ///
    /// # Panics
    /// If the kind is not a major body.
    pub fn with_distance_ratio(mut self, ratio: f32) -> Self {
        match &mut self.fields {
            KindFields::MajorBody { distance_ratio, .. } => *distance_ratio = ratio,
            _ => panic!("{} records have no distance ratio field", self.kind),
        }
        self
    }

    /// Set the near-earth and potentially-hazardous flags.
    ///
    /// # Panics
    /// If the kind is not a comet or an asteroid.
    pub fn with_neo_flags(mut self, neo: bool, pha: bool) -> Self {
        match &mut self.fields {
            KindFields::SmallBody { is_neo, is_pha } => {
                *is_neo = neo;
                *is_pha = pha;
            }
            _ => panic!("{} records have no NEO flags", self.kind),
        }
        self
    }

    pub fn kind(&self) -> OrbitKind {
        self.kind
    }

    pub fn fields(&self) -> &KindFields {
        &self.fields
    }

    /// Reference body; the Sun when the record does not carry one.
    pub fn center(&self) -> SpkId {
        match self.fields {
            KindFields::MajorBody { center, .. } | KindFields::Spacecraft { center } => center,
            KindFields::SmallBody { .. } => SpkId::SUN,
        }
    }

    /// Normalized distance from the parent body, only for major bodies.
    pub fn distance_ratio(&self) -> Option<f32> {
        match self.fields {
            KindFields::MajorBody { distance_ratio, .. } => Some(distance_ratio),
            _ => None,
        }
    }

    pub fn is_neo(&self) -> bool {
        matches!(self.fields, KindFields::SmallBody { is_neo: true, .. })
    }

    pub fn is_pha(&self) -> bool {
        matches!(self.fields, KindFields::SmallBody { is_pha: true, .. })
    }

    pub fn len(&self) -> usize {
        self.jd.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jd.is_empty()
    }

    pub fn has_physical_radius(&self) -> bool {
        self.radius_ratio.is_some()
    }

    /// Whether the orbit is expressed around another body than the Sun.
    pub fn is_satellite(&self) -> bool {
        self.kind.is_major_body() && self.center() != SpkId::SUN
    }

    pub fn is_time_sorted(&self) -> bool {
        self.jd.iter().tuple_windows().all(|(a, b)| a <= b)
    }

    /// Decode one record.
    ///
    /// Arguments
    /// -----------------
    /// * `input`: bytes starting at the first byte of the record.
    /// * `offset`: position of `input` in the whole stream, reported in errors.
    /// * `kind_field`: width of the `kind` field.
    ///
    /// Return
    /// ----------
    /// * The remaining bytes after the record and the decoded record.
    /// * [`SolarpaperError::TruncatedRecord`] if the input ends inside the record,
    ///   [`SolarpaperError::UnknownKind`] if the kind code is not a known category.
    pub fn parse(
        input: &[u8],
        offset: usize,
        kind_field: KindField,
    ) -> Result<(&[u8], Self), SolarpaperError> {
        let mut ctx = FieldContext {
            offset,
            spkid: None,
        };

        let (input, spkid) = ctx.read(input, "spkid", take(SPKID_WIDTH))?;
        let spkid = SpkId::from_slice(spkid);
        ctx.spkid = Some(spkid.to_string());
        let (input, name) = ctx.read(input, "name", take(NAME_WIDTH))?;
        let name = BodyName::from_slice(name);

        let (input, kind_code) = match kind_field {
            KindField::Wide => ctx.read(input, "kind", le_u32)?,
            KindField::Compact => {
                let (input, code) = ctx.read(input, "kind", le_u8)?;
                (input, u32::from(code))
            }
        };
        let kind =
            OrbitKind::try_from(kind_code).map_err(|value| SolarpaperError::UnknownKind {
                offset,
                spkid: spkid.to_string(),
                value,
            })?;

        let (input, fields) = match KindFields::default_for(kind) {
            KindFields::MajorBody { .. } => {
                let (input, distance_ratio) = ctx.read(input, "distance_ratio", le_f32)?;
                let (input, center) = ctx.read(input, "center", take(SPKID_WIDTH))?;
                let center = SpkId::from_slice(center);
                (input, KindFields::MajorBody { distance_ratio, center })
            }
            KindFields::Spacecraft { .. } => {
                let (input, center) = ctx.read(input, "center", take(SPKID_WIDTH))?;
                let center = SpkId::from_slice(center);
                (input, KindFields::Spacecraft { center })
            }
            KindFields::SmallBody { .. } => {
                let (input, neo) = ctx.read(input, "is_neo", le_u8)?;
                let (input, pha) = ctx.read(input, "is_pha", le_u8)?;
                (
                    input,
                    KindFields::SmallBody {
                        is_neo: neo != 0,
                        is_pha: pha != 0,
                    },
                )
            }
        };

        let (mut input, phy_bit) = ctx.read(input, "phy_bit", le_u8)?;
        let mut radius_ratio = None;
        if phy_bit != 0 {
            let (rest, ratio) = ctx.read(input, "radius_ratio", le_f32)?;
            radius_ratio = Some(ratio);
            input = rest;
        }

        let (input, trail_duration) = ctx.read(input, "trail_duration", le_u32)?;
        let (input, size) = ctx.read(input, "size", le_u32)?;

        let size = size as usize;
        let (input, jd) = ctx.samples(input, "jdtdb", size)?;
        let (input, x) = ctx.samples(input, "x", size)?;
        let (input, y) = ctx.samples(input, "y", size)?;

        let record = OrbitRecord {
            spkid,
            name,
            kind,
            fields,
            radius_ratio,
            trail_duration,
            jd,
            x,
            y,
        };
        Ok((input, record))
    }

    /// Append the binary encoding of the record, the exact inverse of [`OrbitRecord::parse`].
    pub fn encode(&self, kind_field: KindField, out: &mut Vec<u8>) {
        out.extend_from_slice(self.spkid.as_bytes());
        out.extend_from_slice(self.name.as_bytes());

        let code = u32::from(self.kind);
        match kind_field {
            KindField::Wide => out.extend_from_slice(&code.to_le_bytes()),
            KindField::Compact => out.push(code as u8),
        }

        match self.fields {
            KindFields::MajorBody {
                distance_ratio,
                center,
            } => {
                out.extend_from_slice(&distance_ratio.to_le_bytes());
                out.extend_from_slice(center.as_bytes());
            }
            KindFields::Spacecraft { center } => out.extend_from_slice(center.as_bytes()),
            KindFields::SmallBody { is_neo, is_pha } => {
                out.push(u8::from(is_neo));
                out.push(u8::from(is_pha));
            }
        }

        match self.radius_ratio {
            Some(ratio) => {
                out.push(1);
                out.extend_from_slice(&ratio.to_le_bytes());
            }
            None => out.push(0),
        }

        out.extend_from_slice(&self.trail_duration.to_le_bytes());
        out.extend_from_slice(&(self.len() as u32).to_le_bytes());
        for v in self.jd.iter().chain(&self.x).chain(&self.y) {
            out.extend_from_slice(&v.to_le_bytes());
        }
    }

    /// Size in bytes of the encoded record.
    pub fn encoded_len(&self, kind_field: KindField) -> usize {
        let mut len = SPKID_WIDTH + NAME_WIDTH;
        len += match kind_field {
            KindField::Wide => 4,
            KindField::Compact => 1,
        };
        len += match self.fields {
            KindFields::MajorBody { .. } => 4 + SPKID_WIDTH,
            KindFields::Spacecraft { .. } => SPKID_WIDTH,
            KindFields::SmallBody { .. } => 2,
        };
        len += 1 + if self.has_physical_radius() { 4 } else { 0 };
        len + 8 + 3 * 8 * self.len()
    }
}

/// Position of the record being decoded, attached to every decoding error.
struct FieldContext {
    offset: usize,
    spkid: Option<String>,
}

impl FieldContext {
    fn truncated(&self, field: &'static str) -> SolarpaperError {
        SolarpaperError::TruncatedRecord {
            offset: self.offset,
            spkid: self.spkid.clone(),
            field,
        }
    }

    fn read<'a, O>(
        &self,
        input: &'a [u8],
        name: &'static str,
        parser: impl FnOnce(&'a [u8]) -> IResult<&'a [u8], O>,
    ) -> Result<(&'a [u8], O), SolarpaperError> {
        parser(input).map_err(|_| self.truncated(name))
    }

    /// Read `size` f64 values, checking the length up front so that a corrupted size
    /// never drives a huge allocation.
    fn samples<'a>(
        &self,
        input: &'a [u8],
        name: &'static str,
        size: usize,
    ) -> Result<(&'a [u8], Vec<f64>), SolarpaperError> {
        let available = match size.checked_mul(8) {
            Some(needed) => input.len() >= needed,
            None => false,
        };
        if !available {
            return Err(self.truncated(name));
        }
        self.read(input, name, count(le_f64, size))
    }
}
