//! Content Source - Precomputed Similarity Lookup
//!
//! "Cities that look like this one on paper."
//!
//! ## Algorithm
//! 1. Find the first item-list row named like the query
//! 2. Read that row of the similarity matrix
//! 3. Stable-sort every (row, score) pair by score, highest first
//! 4. Drop the top entry (the query matching itself)
//! 5. Return the next six names

use crate::types::{Candidate, CandidateSource};
use data_loader::ArtifactStore;
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Default number of similar cities returned
pub const CONTENT_LIMIT: usize = 6;

/// Content-based lookup over the similarity matrix
#[derive(Debug, Clone)]
pub struct ContentSource {
    /// Shared, read-only artifacts
    store: Arc<ArtifactStore>,

    /// Maximum number of names returned
    limit: usize,
}

impl ContentSource {
    pub fn new(store: Arc<ArtifactStore>) -> Self {
        Self {
            store,
            limit: CONTENT_LIMIT,
        }
    }

    /// Configure how many cities are returned (default: 6)
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Most similar cities to `place_name`, best first.
    ///
    /// Unknown names yield an empty list. The result never contains the
    /// query itself, even when duplicate names or tied scores put another
    /// row of the same name near the top.
    #[instrument(skip(self))]
    pub fn recommend_similar(&self, place_name: &str) -> Vec<String> {
        let Some(idx) = self.store.place_position(place_name) else {
            debug!("{} is not in the item list", place_name);
            return Vec::new();
        };
        let Some(row) = self.store.similarity().row(idx) else {
            return Vec::new();
        };

        let mut ranked: Vec<(usize, f32)> = row.iter().copied().enumerate().collect();
        ranked.sort_by(|a, b| compare_scores_desc(a.1, b.1));

        let similar: Vec<String> = ranked
            .into_iter()
            .skip(1)
            .filter_map(|(i, _)| self.store.place_name(i))
            .filter(|name| *name != place_name)
            .take(self.limit)
            .map(str::to_string)
            .collect();

        debug!("Found {} similar cities", similar.len());
        similar
    }

    /// Same lookup, tagged with its source for the combiner
    pub fn get_candidates(&self, place_name: &str) -> Vec<Candidate> {
        self.recommend_similar(place_name)
            .into_iter()
            .map(|name| Candidate::new(name, CandidateSource::Content))
            .collect()
    }
}

/// Descending score order with NaN treated as the lowest score
fn compare_scores_desc(a: f32, b: f32) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (true, true) => Ordering::Equal,
    }
}
