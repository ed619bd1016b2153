//! # Data Loader Crate
//!
//! This crate loads the precomputed recommendation artifacts and exposes
//! them as one immutable [`ArtifactStore`].
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Place, SimilarityMatrix, RatingPivot, PlaceCatalog)
//! - **parser**: Parse the artifact files into Rust structs
//! - **neighbors**: The nearest-neighbor index trait and its brute-force implementation
//! - **metadata**: City metadata resolver (links and tooltips)
//! - **store**: Build and validate the ArtifactStore
//! - **error**: Error types for artifact loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::ArtifactStore;
//! use std::path::Path;
//!
//! let store = ArtifactStore::load_from_dir(Path::new("artifacts"))?;
//!
//! println!("{} cities in the catalog", store.catalog().len());
//! println!("Rome: {}", store.directory().resolve_url("Rome"));
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod neighbors;
pub mod metadata;
pub mod store;

// Re-export commonly used types for convenience
pub use error::{ArtifactError, Result};
pub use metadata::{CityDirectory, PLACEHOLDER_URL};
pub use neighbors::{BruteForceIndex, DistanceMetric, ModelDescriptor, NeighborIndex};
pub use store::ArtifactStore;
pub use types::{
    // Type aliases
    PlaceId,
    // Core types
    Place,
    SimilarityMatrix,
    RatingPivot,
    PlaceCatalog,
    CityRecord,
    CityInfo,
    is_valid_place_name,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_store() -> ArtifactStore {
        let places = vec![Place::new(1, "Paris"), Place::new(2, "Rome")];
        let similarity = SimilarityMatrix::from_rows(vec![vec![1.0, 0.4], vec![0.4, 1.0]]).unwrap();
        let pivot = RatingPivot::from_rows(vec![
            ("Rome".to_string(), vec![3.0, 1.0]),
            ("Milan".to_string(), vec![2.0, 2.0]),
        ])
        .unwrap();
        let index = BruteForceIndex::fit(&pivot, DistanceMetric::Euclidean);

        ArtifactStore::from_parts(
            places,
            similarity,
            pivot,
            Box::new(index),
            CityDirectory::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_store_creation() {
        let store = ArtifactStore::new();
        let (places, pivot_rows, catalog) = store.counts();

        assert_eq!(places, 0);
        assert_eq!(pivot_rows, 0);
        assert_eq!(catalog, 0);
    }

    #[test]
    fn test_catalog_spans_both_artifacts() {
        let store = create_test_store();

        assert_eq!(store.catalog().names(), &["Milan", "Paris", "Rome"]);
        assert_eq!(store.place_name(1), Some("Rome"));
        assert_eq!(store.pivot().position("Milan"), Some(1));
    }

    #[test]
    fn test_empty_queries() {
        let store = ArtifactStore::new();

        // Querying missing data returns None, never an error
        assert!(store.place_position("Atlantis").is_none());
        assert!(store.pivot().position("Atlantis").is_none());
        assert!(store.similarity().row(0).is_none());
        assert!(store.directory().resolve("Atlantis").is_none());
        assert_eq!(store.directory().resolve_url("Atlantis"), PLACEHOLDER_URL);
    }
}
