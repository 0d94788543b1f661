#![allow(dead_code)]

use solarpaper::{
    config::RenderConfig,
    constants::{JulianDate, HEADER_SIZE},
    sso::{
        orbit_kind::OrbitKind,
        orbit_record::{KindField, OrbitRecord},
        sso_reader::SsoWriter,
    },
    view::ViewParameters,
};

pub const NOW: JulianDate = 2460600.5;
pub const VALID_UNTIL: JulianDate = 2460700.5;
pub const DAY: u32 = 86_400;

/// 1600 x 900 image at zoom 1, 100 px per AU, Sun at (800, 450).
pub fn test_view() -> ViewParameters {
    ViewParameters::from_config(&RenderConfig {
        width: 1600,
        height: 900,
        zoom: 1.0,
        ..RenderConfig::default()
    })
    .unwrap()
}

/// Daily samples from `NOW - 10` to `NOW + 10` along a circle of radius `r` AU.
pub fn circular(
    spkid: &str,
    name: &str,
    kind: OrbitKind,
    r: f64,
    deg_per_day: f64,
) -> OrbitRecord {
    let (mut jd, mut x, mut y) = (Vec::new(), Vec::new(), Vec::new());
    for i in 0..=20 {
        let theta = (i as f64 * deg_per_day).to_radians();
        jd.push(NOW - 10.0 + i as f64);
        x.push(r * theta.cos());
        y.push(r * theta.sin());
    }
    OrbitRecord::new(spkid, name, kind).with_samples(jd, x, y)
}

pub fn earth() -> OrbitRecord {
    let mut earth = circular("399", "Earth", OrbitKind::SunAndPlanets, 1.0, 0.9856)
        .with_distance_ratio(0.0);
    earth.radius_ratio = Some(0.0);
    earth.trail_duration = 30 * DAY;
    earth
}

pub fn jupiter() -> OrbitRecord {
    let mut jupiter = circular("599", "Jupiter", OrbitKind::SunAndPlanets, 5.2, 0.083)
        .with_distance_ratio(0.0);
    jupiter.trail_duration = 30 * DAY;
    jupiter
}

pub fn moon() -> OrbitRecord {
    let mut moon = circular("301", "Moon", OrbitKind::OtherSatellites, 0.00257, 13.18)
        .with_center("399")
        .with_distance_ratio(0.5);
    moon.radius_ratio = Some(0.27);
    moon.trail_duration = 5 * DAY;
    moon
}

/// Small Jovian moon, too close to its planet to be drawn.
pub fn minor_jovian() -> OrbitRecord {
    let mut minor = circular("55501", "S/2003 J 2", OrbitKind::JovianSatellites, 0.19, 0.5)
        .with_center("599")
        .with_distance_ratio(0.02);
    minor.trail_duration = 10 * DAY;
    minor
}

/// Martian moon whose parent is not in the dataset.
pub fn phobos() -> OrbitRecord {
    let mut phobos = circular("401", "Phobos", OrbitKind::OtherSatellites, 0.00006, 1128.0)
        .with_center("499")
        .with_distance_ratio(0.3);
    phobos.radius_ratio = Some(0.01);
    phobos.trail_duration = DAY;
    phobos
}

/// Spacecraft far outside the image.
pub fn voyager() -> OrbitRecord {
    let mut voyager = circular("-31", "Voyager 1", OrbitKind::Spacecraft, 165.0, 0.001);
    voyager.trail_duration = 5 * DAY;
    voyager
}

pub fn osiris_apex() -> OrbitRecord {
    let mut osiris = circular("-64", "OSIRIS-APEX", OrbitKind::Spacecraft, 1.2, 0.8);
    osiris.trail_duration = 10 * DAY;
    osiris
}

pub fn comet() -> OrbitRecord {
    let mut comet = circular("1000036", "1P/Halley", OrbitKind::Comets, 3.0, 0.2);
    comet.trail_duration = 20 * DAY;
    comet
}

pub fn ceres() -> OrbitRecord {
    let mut ceres = circular("2000001", "Ceres", OrbitKind::MbaAsteroids, 2.77, 0.214);
    ceres.trail_duration = 20 * DAY;
    ceres
}

/// A small system in dataset order: parents always precede their satellites.
pub fn system() -> Vec<OrbitRecord> {
    vec![
        earth(),
        moon(),
        jupiter(),
        minor_jovian(),
        phobos(),
        voyager(),
        osiris_apex(),
        comet(),
        ceres(),
    ]
}

/// Byte offset of each record in a dataset written by [`encode`].
pub fn offsets(records: &[OrbitRecord], kind_field: KindField) -> Vec<usize> {
    records
        .iter()
        .scan(HEADER_SIZE, |offset, record| {
            let at = *offset;
            *offset += record.encoded_len(kind_field);
            Some(at)
        })
        .collect()
}

pub fn encode(records: &[OrbitRecord], valid_until: JulianDate, kind_field: KindField) -> Vec<u8> {
    let mut writer = SsoWriter::new(valid_until, kind_field);
    for record in records {
        writer.push(record);
    }
    writer.finish()
}
