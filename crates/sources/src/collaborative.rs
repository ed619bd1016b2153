//! Collaborative Source - Nearest Neighbors in the Rating Pivot
//!
//! "Travellers who rated this city like you did also rated..."
//!
//! ## Algorithm
//! 1. Find the pivot row labelled with the query
//! 2. Ask the neighbor index for the six rows closest to that vector
//! 3. Map row indices back to labels, keeping the index's ordering
//!
//! The index always finds the query row itself at distance zero, so the
//! output usually starts with the query. The combiner strips it.

use crate::types::{Candidate, CandidateSource};
use data_loader::ArtifactStore;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Neighbors requested from the index, query row included
pub const NEIGHBOR_COUNT: usize = 6;

/// Collaborative lookup delegating distances to the store's neighbor index
#[derive(Debug, Clone)]
pub struct CollaborativeSource {
    store: Arc<ArtifactStore>,
    neighbors: usize,
}

impl CollaborativeSource {
    pub fn new(store: Arc<ArtifactStore>) -> Self {
        Self {
            store,
            neighbors: NEIGHBOR_COUNT,
        }
    }

    /// Configure how many neighbors are requested (default: 6)
    pub fn with_neighbors(mut self, neighbors: usize) -> Self {
        self.neighbors = neighbors;
        self
    }

    /// Nearest cities to `place_name` in rating space, nearest first.
    ///
    /// May include `place_name` itself. Unknown names yield an empty list.
    #[instrument(skip(self))]
    pub fn recommend_neighbors(&self, place_name: &str) -> Vec<String> {
        let pivot = self.store.pivot();

        let Some(row_idx) = pivot.position(place_name) else {
            debug!("{} is not in the rating pivot", place_name);
            return Vec::new();
        };
        let Some(vector) = pivot.row(row_idx) else {
            return Vec::new();
        };

        let neighbors: Vec<String> = self
            .store
            .neighbor_index()
            .query(vector, self.neighbors)
            .into_iter()
            .filter_map(|idx| pivot.label(idx))
            .map(str::to_string)
            .collect();

        debug!("Found {} neighbors", neighbors.len());
        neighbors
    }

    /// Same lookup, tagged with its source for the combiner
    pub fn get_candidates(&self, place_name: &str) -> Vec<Candidate> {
        self.recommend_neighbors(place_name)
            .into_iter()
            .map(|name| Candidate::new(name, CandidateSource::Collaborative))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data_loader::{
        BruteForceIndex, CityDirectory, DistanceMetric, NeighborIndex, RatingPivot,
        SimilarityMatrix,
    };

    fn create_test_store(
        rows: Vec<(&str, Vec<f32>)>,
        index: Option<Box<dyn NeighborIndex>>,
    ) -> Arc<ArtifactStore> {
        let pivot = RatingPivot::from_rows(
            rows.into_iter()
                .map(|(label, vector)| (label.to_string(), vector))
                .collect(),
        )
        .unwrap();
        let index: Box<dyn NeighborIndex> = match index {
            Some(index) => index,
            None => Box::new(BruteForceIndex::fit(&pivot, DistanceMetric::Euclidean)),
        };

        Arc::new(
            ArtifactStore::from_parts(
                Vec::new(),
                SimilarityMatrix::default(),
                pivot,
                index,
                CityDirectory::default(),
            )
            .unwrap(),
        )
    }

    fn create_line_store() -> Arc<ArtifactStore> {
        // Cities placed on a line: distance = difference of the single rating
        create_test_store(
            vec![
                ("Paris", vec![0.0]),
                ("Rome", vec![10.0]),
                ("Milan", vec![1.0]),
                ("Venice", vec![2.5]),
                ("Lyon", vec![4.0]),
                ("Nice", vec![7.0]),
                ("Turin", vec![9.0]),
                ("Porto", vec![20.0]),
            ],
            None,
        )
    }

    #[test]
    fn test_recommend_neighbors_includes_query_first() {
        let source = CollaborativeSource::new(create_line_store());
        let neighbors = source.recommend_neighbors("Paris");

        assert_eq!(neighbors, vec!["Paris", "Milan", "Venice", "Lyon", "Nice", "Turin"]);
    }

    #[test]
    fn test_with_neighbors() {
        let source = CollaborativeSource::new(create_line_store()).with_neighbors(2);
        assert_eq!(source.recommend_neighbors("Rome"), vec!["Rome", "Turin"]);
    }

    #[test]
    fn test_fewer_rows_than_neighbors() {
        let source = CollaborativeSource::new(create_test_store(
            vec![("Paris", vec![1.0, 0.0]), ("Milan", vec![0.0, 1.0])],
            None,
        ));
        assert_eq!(source.recommend_neighbors("Milan"), vec!["Milan", "Paris"]);
    }

    #[test]
    fn test_unknown_place_is_empty() {
        let source = CollaborativeSource::new(create_line_store());
        assert!(source.recommend_neighbors("Atlantis").is_empty());
    }

    /// An index that ignores the vector and always answers the same rows
    #[derive(Debug)]
    struct FixedIndex(Vec<usize>, usize);

    impl NeighborIndex for FixedIndex {
        fn query(&self, _vector: &[f32], k: usize) -> Vec<usize> {
            self.0.iter().copied().take(k).collect()
        }

        fn len(&self) -> usize {
            self.1
        }
    }

    #[test]
    fn test_index_is_swappable() {
        let store = create_test_store(
            vec![("Paris", vec![0.0]), ("Rome", vec![1.0]), ("Milan", vec![2.0])],
            Some(Box::new(FixedIndex(vec![2, 0, 7], 3))),
        );
        let source = CollaborativeSource::new(store);

        // Out-of-range rows from a misbehaving index are dropped
        assert_eq!(source.recommend_neighbors("Rome"), vec!["Milan", "Paris"]);
    }

    #[test]
    fn test_get_candidates_are_tagged() {
        let source = CollaborativeSource::new(create_line_store());
        let candidates = source.get_candidates("Paris");

        assert_eq!(candidates.len(), NEIGHBOR_COUNT);
        assert!(candidates.iter().all(|c| c.is_from(CandidateSource::Collaborative)));
    }
}
