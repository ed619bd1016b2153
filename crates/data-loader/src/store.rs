//! ArtifactStore construction and loading.
//!
//! The store is the explicit, immutable context every lookup reads from.
//! It is built once, either from an artifact directory or from in-memory
//! parts (tests, benches), and validated as a whole before anyone sees it.

use crate::error::{ArtifactError, Result};
use crate::metadata::CityDirectory;
use crate::neighbors::{BruteForceIndex, NeighborIndex};
use crate::parser;
use crate::types::*;
use std::path::Path;
use tracing::info;

pub const PLACES_FILE: &str = "places.dat";
pub const SIMILARITY_FILE: &str = "similarity.dat";
pub const PIVOT_FILE: &str = "city_pivot.dat";
pub const MODEL_FILE: &str = "model.json";
pub const LINKS_FILE: &str = "links.dat";

/// All precomputed recommendation data, loaded once per process.
#[derive(Debug)]
pub struct ArtifactStore {
    places: Vec<Place>,
    similarity: SimilarityMatrix,
    pivot: RatingPivot,
    neighbor_index: Box<dyn NeighborIndex>,
    directory: CityDirectory,
    catalog: PlaceCatalog,
}

impl ArtifactStore {
    /// An empty store: every lookup against it comes back empty
    pub fn new() -> Self {
        Self {
            places: Vec::new(),
            similarity: SimilarityMatrix::default(),
            pivot: RatingPivot::default(),
            neighbor_index: Box::new(BruteForceIndex::default()),
            directory: CityDirectory::default(),
            catalog: PlaceCatalog::default(),
        }
    }

    /// Assemble a store from already-built artifacts and validate it.
    pub fn from_parts(
        places: Vec<Place>,
        similarity: SimilarityMatrix,
        pivot: RatingPivot,
        neighbor_index: Box<dyn NeighborIndex>,
        directory: CityDirectory,
    ) -> Result<Self> {
        let catalog = PlaceCatalog::build(
            places.iter().map(|place| place.name.as_str()),
            pivot.labels().iter().map(String::as_str),
        );

        let store = Self {
            places,
            similarity,
            pivot,
            neighbor_index,
            directory,
            catalog,
        };
        store.validate()?;
        Ok(store)
    }

    /// Load every artifact from a directory
    ///
    /// Steps:
    /// 1. Parse the five files in parallel
    /// 2. Build the similarity matrix and rating pivot
    /// 3. Fit the neighbor index over the pivot using the model's metric
    /// 4. Build the place catalog and validate shapes
    pub fn load_from_dir(artifacts_dir: &Path) -> Result<Self> {
        info!("Loading artifacts from {:?}", artifacts_dir);

        let places_path = artifacts_dir.join(PLACES_FILE);
        let similarity_path = artifacts_dir.join(SIMILARITY_FILE);
        let pivot_path = artifacts_dir.join(PIVOT_FILE);
        let model_path = artifacts_dir.join(MODEL_FILE);
        let links_path = artifacts_dir.join(LINKS_FILE);

        // The matrix is by far the largest file, so it gets its own branch
        let ((places, (pivot_rows, model)), (similarity_rows, links)) = rayon::join(
            || {
                rayon::join(
                    || parser::parse_places(&places_path),
                    || {
                        rayon::join(
                            || parser::parse_pivot(&pivot_path),
                            || parser::parse_model(&model_path),
                        )
                    },
                )
            },
            || {
                rayon::join(
                    || parser::parse_similarity(&similarity_path),
                    || parser::parse_links(&links_path),
                )
            },
        );

        let places = places?;
        let pivot = RatingPivot::from_rows(pivot_rows?)?;
        let model = model?;
        let similarity = SimilarityMatrix::from_rows(similarity_rows?)?;
        let directory = CityDirectory::new(links?);

        info!(
            "Parsed {} places, {}x{} similarity matrix, {} pivot rows (width {}), {} metadata rows",
            places.len(),
            similarity.size(),
            similarity.size(),
            pivot.len(),
            pivot.width(),
            directory.len()
        );

        let neighbor_index = Box::new(BruteForceIndex::fit(&pivot, model.metric));
        let store = Self::from_parts(places, similarity, pivot, neighbor_index, directory)?;

        info!(
            "Artifact store ready: {} catalog places, {:?} neighbor metric",
            store.catalog.len(),
            model.metric
        );
        Ok(store)
    }

    /// Check that the artifacts line up with each other
    pub fn validate(&self) -> Result<()> {
        if self.similarity.size() != self.places.len() {
            return Err(ArtifactError::DimensionMismatch {
                artifact: "similarity matrix".to_string(),
                expected: self.places.len(),
                found: self.similarity.size(),
            });
        }
        if self.neighbor_index.len() != self.pivot.len() {
            return Err(ArtifactError::DimensionMismatch {
                artifact: "neighbor index".to_string(),
                expected: self.pivot.len(),
                found: self.neighbor_index.len(),
            });
        }
        if let Some(place) = self.places.iter().find(|place| place.name.is_empty()) {
            return Err(ArtifactError::ValidationError(format!(
                "place {} has an empty name",
                place.id
            )));
        }
        Ok(())
    }

    pub fn places(&self) -> &[Place] {
        &self.places
    }

    /// Item-list position of the first place named `name`
    pub fn place_position(&self, name: &str) -> Option<usize> {
        self.places.iter().position(|place| place.name == name)
    }

    pub fn place_name(&self, idx: usize) -> Option<&str> {
        self.places.get(idx).map(|place| place.name.as_str())
    }

    pub fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }

    pub fn pivot(&self) -> &RatingPivot {
        &self.pivot
    }

    pub fn neighbor_index(&self) -> &dyn NeighborIndex {
        self.neighbor_index.as_ref()
    }

    pub fn directory(&self) -> &CityDirectory {
        &self.directory
    }

    pub fn catalog(&self) -> &PlaceCatalog {
        &self.catalog
    }

    /// (places, pivot rows, catalog size) for logging and validation
    pub fn counts(&self) -> (usize, usize, usize) {
        (self.places.len(), self.pivot.len(), self.catalog.len())
    }
}

impl Default for ArtifactStore {
    fn default() -> Self {
        Self::new()
    }
}
