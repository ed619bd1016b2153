//! City metadata resolver.
//!
//! Backs the link and tooltip shown for each recommended city. Lookups are
//! exact string matches; the first matching row wins and a miss is never an
//! error.

use crate::types::{CityInfo, CityRecord};

/// URL returned for cities with no metadata row
pub const PLACEHOLDER_URL: &str = "#";

/// Read-only table of city metadata in file order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CityDirectory {
    records: Vec<CityRecord>,
}

impl CityDirectory {
    pub fn new(records: Vec<CityRecord>) -> Self {
        Self { records }
    }

    fn find(&self, place_name: &str) -> Option<&CityRecord> {
        self.records.iter().find(|record| record.city == place_name)
    }

    /// Country, population and area for a city, if known
    pub fn resolve(&self, place_name: &str) -> Option<CityInfo> {
        self.find(place_name).map(CityInfo::from)
    }

    /// External reference URL for a city, or [`PLACEHOLDER_URL`]
    pub fn resolve_url(&self, place_name: &str) -> &str {
        self.find(place_name)
            .map(|record| record.url.as_str())
            .unwrap_or(PLACEHOLDER_URL)
    }

    pub fn contains(&self, place_name: &str) -> bool {
        self.find(place_name).is_some()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(city: &str, country: &str, url: &str) -> CityRecord {
        CityRecord {
            city: city.to_string(),
            country: country.to_string(),
            population: 1_000,
            area_sq_mi: 12.5,
            url: url.to_string(),
        }
    }

    #[test]
    fn test_resolve_known_city() {
        let directory = CityDirectory::new(vec![record("Rome", "Italy", "https://rome.example")]);

        let info = directory.resolve("Rome").unwrap();
        assert_eq!(info.country, "Italy");
        assert_eq!(info.population, 1_000);
        assert_eq!(directory.resolve_url("Rome"), "https://rome.example");
    }

    #[test]
    fn test_unknown_city_falls_back() {
        let directory = CityDirectory::default();

        assert!(directory.resolve("Unknown City").is_none());
        assert_eq!(directory.resolve_url("Unknown City"), "#");
    }

    #[test]
    fn test_first_match_wins() {
        let directory = CityDirectory::new(vec![
            record("Portland", "United States", "https://first.example"),
            record("Portland", "Australia", "https://second.example"),
        ]);

        assert_eq!(directory.resolve("Portland").unwrap().country, "United States");
        assert_eq!(directory.resolve_url("Portland"), "https://first.example");
    }
}
