use std::{convert::TryFrom, fmt};

use serde::Serialize;

/// Category of an orbit in the `.sso` dataset.
///
/// The kind drives both the binary layout of a record (which optional fields are
/// present) and how the orbit is drawn. Codes are ordered by "tier": everything up
/// to [`OrbitKind::OtherSatellites`] is a major body that can host satellites,
/// spacecraft sit in the middle, then comets and the three asteroid families.
///
/// Conversions
/// -----------
/// * Use [`TryFrom<u32>`] to convert a raw code read from the dataset. Codes outside
///   `0..=10` are rejected with the unknown value.
/// * Use [`From<OrbitKind>`] to recover the raw code for encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[repr(u32)]
pub enum OrbitKind {
    SunAndPlanets = 0,
    JovianSatellites = 1,
    SaturnianSatellites = 2,
    UranianSatellites = 3,
    NeptunianSatellites = 4,
    OtherSatellites = 5,
    Spacecraft = 6,
    Comets = 7,
    NeoAsteroids = 8,
    ImbAsteroids = 9,
    MbaAsteroids = 10,
}

impl OrbitKind {
    /// Last kind (inclusive) registered in the orbit store as a potential reference frame.
    pub const MAJOR_BODY_LIMIT: OrbitKind = OrbitKind::OtherSatellites;

    /// Major bodies: planets and every satellite tier.
    pub fn is_major_body(self) -> bool {
        self <= Self::MAJOR_BODY_LIMIT
    }

    /// Records of these kinds carry the `isNeo` / `isPha` flags.
    pub fn has_neo_flags(self) -> bool {
        self > OrbitKind::Spacecraft
    }

    /// Records of these kinds carry the distance ratio from their parent.
    pub fn has_distance_ratio(self) -> bool {
        self < OrbitKind::Spacecraft
    }

    /// Records of these kinds carry a reference body identifier.
    pub fn has_center(self) -> bool {
        self <= OrbitKind::Spacecraft
    }

    /// Whether the trail keeps every intermediate sample.
    ///
    /// The inner and main belt catalogs are dense enough that their trails are reduced
    /// to a start and an end vertex.
    pub fn draws_full_trail(self) -> bool {
        self < OrbitKind::ImbAsteroids
    }

    /// Comets and near-earth asteroids fade in along their trail.
    pub fn has_fading_trail(self) -> bool {
        matches!(self, OrbitKind::Comets | OrbitKind::NeoAsteroids)
    }
}

impl From<OrbitKind> for u32 {
    fn from(kind: OrbitKind) -> Self {
        kind as u32
    }
}

impl TryFrom<u32> for OrbitKind {
    type Error = u32;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        use OrbitKind::*;
        match value {
            0 => Ok(SunAndPlanets),
            1 => Ok(JovianSatellites),
            2 => Ok(SaturnianSatellites),
            3 => Ok(UranianSatellites),
            4 => Ok(NeptunianSatellites),
            5 => Ok(OtherSatellites),
            6 => Ok(Spacecraft),
            7 => Ok(Comets),
            8 => Ok(NeoAsteroids),
            9 => Ok(ImbAsteroids),
            10 => Ok(MbaAsteroids),
            _ => Err(value),
        }
    }
}

impl fmt::Display for OrbitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OrbitKind::SunAndPlanets => "Sun and planets",
            OrbitKind::JovianSatellites => "Jovian satellites",
            OrbitKind::SaturnianSatellites => "Saturnian satellites",
            OrbitKind::UranianSatellites => "Uranian satellites",
            OrbitKind::NeptunianSatellites => "Neptunian satellites",
            OrbitKind::OtherSatellites => "Other satellites",
            OrbitKind::Spacecraft => "Spacecraft",
            OrbitKind::Comets => "Comets",
            OrbitKind::NeoAsteroids => "Near-earth asteroids",
            OrbitKind::ImbAsteroids => "Inner main-belt asteroids",
            OrbitKind::MbaAsteroids => "Main-belt asteroids",
        };
        write!(f, "{s}")
    }
}
