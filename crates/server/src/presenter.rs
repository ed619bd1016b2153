//! Attaches links and descriptive metadata to recommended cities.

use data_loader::{ArtifactStore, CityInfo};
use serde::Serialize;
use sources::{Candidate, CandidateSource};

/// Final recommendation returned to the user
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityRecommendation {
    pub name: String,
    pub url: String,
    pub info: Option<CityInfo>,
    pub tooltip: String,
    pub sources: Vec<CandidateSource>,
}

/// Metadata for a single place
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceDetails {
    pub name: String,
    pub url: String,
    pub info: Option<CityInfo>,
}

/// Hover text for a city: one `Label: value` line per attribute
pub fn tooltip(info: Option<&CityInfo>) -> String {
    match info {
        Some(info) => format!(
            "Country: {}\nPopulation: {}\nArea: {} sq mi",
            info.country, info.population, info.area_sq_mi
        ),
        None => "No info available".to_string(),
    }
}

/// Decorate combiner output, keeping its order
pub fn present(store: &ArtifactStore, candidates: Vec<Candidate>) -> Vec<CityRecommendation> {
    let directory = store.directory();

    candidates
        .into_iter()
        .map(|candidate| {
            let info = directory.resolve(&candidate.name);
            CityRecommendation {
                url: directory.resolve_url(&candidate.name).to_string(),
                tooltip: tooltip(info.as_ref()),
                info,
                name: candidate.name,
                sources: candidate.sources,
            }
        })
        .collect()
}

/// Details for `name`, or `None` if no artifact knows the place
pub fn describe_place(store: &ArtifactStore, name: &str) -> Option<PlaceDetails> {
    let directory = store.directory();
    if !store.catalog().contains(name) && !directory.contains(name) {
        return None;
    }

    Some(PlaceDetails {
        name: name.to_string(),
        url: directory.resolve_url(name).to_string(),
        info: directory.resolve(name),
    })
}
