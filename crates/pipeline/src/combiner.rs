//! Recommendation combiner.
//!
//! Runs both lookups, merges their output by city name and pushes the
//! merged set through the filter pipeline. Unknown cities simply contribute
//! nothing; a call to the combiner never fails.

use crate::filter_pipeline::FilterPipeline;
use crate::filters::ExcludeQueryFilter;
use data_loader::ArtifactStore;
use sources::{Candidate, CollaborativeSource, ContentSource};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Merges content and collaborative recommendations for one city
#[derive(Clone)]
pub struct RecommendationCombiner {
    content: ContentSource,
    collaborative: CollaborativeSource,
    filter_pipeline: Arc<FilterPipeline>,
}

impl RecommendationCombiner {
    /// Build a combiner over a loaded store with the default filters
    pub fn new(store: Arc<ArtifactStore>) -> Self {
        Self::from_sources(
            ContentSource::new(store.clone()),
            CollaborativeSource::new(store),
        )
    }

    /// Build a combiner from preconfigured sources
    pub fn from_sources(content: ContentSource, collaborative: CollaborativeSource) -> Self {
        let filter_pipeline = Arc::new(FilterPipeline::new().add_filter(ExcludeQueryFilter));
        Self {
            content,
            collaborative,
            filter_pipeline,
        }
    }

    /// Combined recommendations with provenance, ordered by name.
    ///
    /// A city suggested by both lookups appears once, tagged with both
    /// sources. The query itself is always removed.
    #[instrument(skip(self))]
    pub fn combine_candidates(&self, place_name: &str) -> Vec<Candidate> {
        let (content_candidates, collaborative_candidates) = rayon::join(
            || self.content.get_candidates(place_name),
            || self.collaborative.get_candidates(place_name),
        );
        debug!(
            "Lookups returned {} content and {} collaborative candidates",
            content_candidates.len(),
            collaborative_candidates.len()
        );

        let merged = merge_candidates(content_candidates, collaborative_candidates);
        let filtered = self.filter_pipeline.apply(merged, place_name);

        debug!("{} recommendations after filtering", filtered.len());
        filtered
    }

    /// The set of recommended city names for `place_name`
    pub fn combine(&self, place_name: &str) -> HashSet<String> {
        self.combine_candidates(place_name)
            .into_iter()
            .map(|candidate| candidate.name)
            .collect()
    }
}

/// Union two candidate lists by name, collecting every source per city
fn merge_candidates(first: Vec<Candidate>, second: Vec<Candidate>) -> Vec<Candidate> {
    let mut map: HashMap<String, Candidate> = HashMap::new();

    for candidate in first.into_iter().chain(second) {
        map.entry(candidate.name.clone())
            .and_modify(|existing| {
                for &source in &candidate.sources {
                    existing.add_source(source);
                }
            })
            .or_insert(candidate);
    }

    let mut merged: Vec<Candidate> = map.into_values().collect();
    merged.sort_by(|a, b| a.name.cmp(&b.name));
    merged
}
