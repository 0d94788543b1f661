use std::collections::HashMap;

use tracing::warn;

use super::orbit_record::OrbitRecord;

/// Major-body orbits seen so far in the stream, keyed by the text of their SPK
/// identifier.
///
/// The dataset lists every reference body before its satellites, so the store is
/// filled while streaming and read by later satellite records. Only major-body kinds
/// are accepted. Registration keeps the first record for an identifier, later
/// duplicates are ignored.
#[derive(Debug, Clone, Default)]
pub struct OrbitStore {
    orbits: HashMap<String, OrbitRecord>,
}

impl OrbitStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a major-body orbit.
    ///
    /// Return
    /// ----------
    /// * `true` if the record was stored, `false` if its kind is not a major body or its
    ///   identifier is already registered.
    pub fn register(&mut self, record: &OrbitRecord) -> bool {
        if !record.kind().is_major_body() {
            return false;
        }
        let key = record.spkid.to_string();
        if self.orbits.contains_key(&key) {
            warn!(spkid = %key, "major body registered twice, keeping the first");
            return false;
        }
        self.orbits.insert(key, record.clone());
        true
    }

    pub fn get(&self, spkid: &str) -> Option<&OrbitRecord> {
        self.orbits.get(spkid)
    }

    pub fn contains(&self, spkid: &str) -> bool {
        self.orbits.contains_key(spkid)
    }

    pub fn len(&self) -> usize {
        self.orbits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orbits.is_empty()
    }
}

#[cfg(test)]
mod orbit_store_test {
    use super::*;
    use crate::sso::orbit_kind::OrbitKind;

    #[test]
    fn test_register_major_bodies_only() {
        let mut store = OrbitStore::new();
        assert!(store.register(&OrbitRecord::new("599", "Jupiter", OrbitKind::SunAndPlanets)));
        assert!(store.register(&OrbitRecord::new("501", "Io", OrbitKind::JovianSatellites)));
        assert!(!store.register(&OrbitRecord::new("-31", "Voyager 1", OrbitKind::Spacecraft)));
        assert!(!store.register(&OrbitRecord::new("1", "Ceres", OrbitKind::MbaAsteroids)));

        assert_eq!(store.len(), 2);
        assert!(store.contains("501"));
        assert!(store.get("-31").is_none());
    }

    #[test]
    fn test_first_registration_wins() {
        let mut store = OrbitStore::new();
        let first = OrbitRecord::new("399", "Earth", OrbitKind::SunAndPlanets);
        let second = OrbitRecord::new("399", "Earth again", OrbitKind::SunAndPlanets);

        assert!(store.register(&first));
        assert!(!store.register(&second));
        assert_eq!(store.get("399").unwrap().name, "Earth");
    }
}
