use std::collections::HashSet;

use tracing::debug;

use crate::model::{LocationIdentity, WeatherObservation};

/// Locations looked up during this session, oldest first.
///
/// Keyed by [`LocationIdentity`]; the first observation recorded for a
/// location is kept and later ones for the same place are ignored.
#[derive(Debug, Clone, Default)]
pub struct LocationStore {
    entries: Vec<WeatherObservation>,
    seen: HashSet<LocationIdentity>,
}

impl LocationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `observation` unless its location is already stored.
    ///
    /// Returns `true` if it was appended.
    pub fn record_observation(&mut self, observation: WeatherObservation) -> bool {
        let identity = observation.identity();
        if self.seen.contains(&identity) {
            debug!(location = %observation.location.label(), "location already saved, keeping first entry");
            return false;
        }

        debug!(location = %observation.location.label(), "saving location");
        self.seen.insert(identity);
        self.entries.push(observation);
        true
    }

    pub fn list(&self) -> &[WeatherObservation] {
        &self.entries
    }

    pub fn contains(&self, identity: &LocationIdentity) -> bool {
        self.seen.contains(identity)
    }

    pub fn iter(&self) -> impl Iterator<Item = &WeatherObservation> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Location;

    fn obs(name: &str, region: &str, country: &str, condition: &str, temp_c: f64) -> WeatherObservation {
        WeatherObservation {
            location: Location::new(name, region, country),
            condition_text: condition.into(),
            condition_code: 1000,
            temperature_c: temp_c,
            temperature_f: temp_c * 9.0 / 5.0 + 32.0,
            last_updated: None,
        }
    }

    #[test]
    fn new_store_is_empty() {
        let store = LocationStore::new();
        assert!(store.is_empty());
        assert!(store.list().is_empty());
    }

    #[test]
    fn recording_twice_keeps_one_copy() {
        let mut store = LocationStore::new();
        let paris = obs("Paris", "", "France", "Sunny", 21.0);

        assert!(store.record_observation(paris.clone()));
        assert!(!store.record_observation(paris.clone()));

        assert_eq!(store.list(), &[paris]);
    }

    #[test]
    fn first_seen_wins_over_later_conditions() {
        let mut store = LocationStore::new();
        let sunny = obs("Paris", "", "France", "Sunny", 21.0);
        let rainy = obs("Paris", "", "France", "Light rain", 12.0);

        store.record_observation(sunny.clone());
        store.record_observation(rainy);

        assert_eq!(store.len(), 1);
        assert_eq!(store.list()[0], sunny);
    }

    #[test]
    fn keeps_insertion_order() {
        let mut store = LocationStore::new();
        let a = obs("Oslo", "Oslo", "Norway", "Clear", -3.0);
        let b = obs("Lima", "Lima", "Peru", "Overcast", 18.0);

        store.record_observation(a.clone());
        store.record_observation(b.clone());
        store.record_observation(obs("Oslo", "Oslo", "Norway", "Light snow", -5.0));

        assert_eq!(store.list(), &[a, b]);
    }

    #[test]
    fn identity_uses_region_and_country() {
        let mut store = LocationStore::new();
        store.record_observation(obs("Portland", "Oregon", "United States of America", "Cloudy", 10.0));
        store.record_observation(obs("Portland", "Maine", "United States of America", "Cloudy", 4.0));
        store.record_observation(obs("Portland", "Victoria", "Australia", "Sunny", 25.0));

        assert_eq!(store.len(), 3);
    }

    #[test]
    fn contains_by_identity() {
        let mut store = LocationStore::new();
        store.record_observation(obs("Paris", "", "France", "Sunny", 21.0));

        assert!(store.contains(&LocationIdentity::new("Paris", "", "France")));
        assert!(!store.contains(&LocationIdentity::new("Paris", "Texas", "France")));
        assert!(!store.contains(&LocationIdentity::new("PARIS", "", "France")));
    }
}
