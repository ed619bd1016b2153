//! Core domain types for the recommendation artifacts.
//!
//! All of these are built once while loading the artifact directory and are
//! never mutated afterwards. Lookups borrow from them; nothing here is
//! handed out by value except small `Copy` data.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::{ArtifactError, Result};

// =============================================================================
// Type Aliases
// =============================================================================

/// Stable identifier of a place across artifacts
pub type PlaceId = u32;

// =============================================================================
// Place
// =============================================================================

/// A city in the item list.
///
/// Names are the external lookup key but are not guaranteed unique; every
/// lookup resolves a name to its first matching row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
    pub id: PlaceId,
    pub name: String,
}

impl Place {
    pub fn new(id: PlaceId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

// =============================================================================
// SimilarityMatrix
// =============================================================================

/// Square matrix of precomputed pairwise scores, indexed by item-list position.
///
/// Stored row-major in a single `Vec` so a row is a contiguous slice.
/// Symmetry is not enforced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimilarityMatrix {
    size: usize,
    scores: Vec<f32>,
}

impl SimilarityMatrix {
    /// Build a matrix from rows, checking that it is square.
    pub fn from_rows(rows: Vec<Vec<f32>>) -> Result<Self> {
        let size = rows.len();
        let mut scores = Vec::with_capacity(size * size);

        for row in rows {
            if row.len() != size {
                return Err(ArtifactError::DimensionMismatch {
                    artifact: "similarity matrix row".to_string(),
                    expected: size,
                    found: row.len(),
                });
            }
            scores.extend(row);
        }

        Ok(Self { size, scores })
    }

    /// Number of rows (and columns)
    pub fn size(&self) -> usize {
        self.size
    }

    /// Scores of row `idx` against every other row
    pub fn row(&self, idx: usize) -> Option<&[f32]> {
        if idx >= self.size {
            return None;
        }
        let start = idx * self.size;
        Some(&self.scores[start..start + self.size])
    }
}

// =============================================================================
// RatingPivot
// =============================================================================

/// Pivoted rating matrix: one labelled feature vector per city.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RatingPivot {
    labels: Vec<String>,
    width: usize,
    values: Vec<f32>,
}

impl RatingPivot {
    /// Build a pivot from `(label, vector)` rows; all vectors must share a width.
    pub fn from_rows(rows: Vec<(String, Vec<f32>)>) -> Result<Self> {
        let width = rows.first().map(|(_, v)| v.len()).unwrap_or(0);
        let mut labels = Vec::with_capacity(rows.len());
        let mut values = Vec::with_capacity(rows.len() * width);

        for (label, vector) in rows {
            if vector.len() != width {
                return Err(ArtifactError::DimensionMismatch {
                    artifact: format!("rating pivot row '{}'", label),
                    expected: width,
                    found: vector.len(),
                });
            }
            labels.push(label);
            values.extend(vector);
        }

        Ok(Self {
            labels,
            width,
            values,
        })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Width of every feature vector
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn label(&self, idx: usize) -> Option<&str> {
        self.labels.get(idx).map(String::as_str)
    }

    /// Position of the first row labelled `name`
    pub fn position(&self, name: &str) -> Option<usize> {
        self.labels.iter().position(|label| label == name)
    }

    pub fn row(&self, idx: usize) -> Option<&[f32]> {
        if idx >= self.labels.len() {
            return None;
        }
        let start = idx * self.width;
        Some(&self.values[start..start + self.width])
    }

    /// Iterate over all rows in order
    pub fn rows(&self) -> impl Iterator<Item = &[f32]> {
        (0..self.labels.len()).filter_map(move |idx| self.row(idx))
    }
}

// =============================================================================
// City metadata
// =============================================================================

/// One row of the city metadata table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityRecord {
    pub city: String,
    pub country: String,
    pub population: u64,
    pub area_sq_mi: f64,
    pub url: String,
}

/// Descriptive attributes shown next to a recommended city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityInfo {
    pub country: String,
    pub population: u64,
    pub area_sq_mi: f64,
}

impl From<&CityRecord> for CityInfo {
    fn from(record: &CityRecord) -> Self {
        Self {
            country: record.country.clone(),
            population: record.population,
            area_sq_mi: record.area_sq_mi,
        }
    }
}

// =============================================================================
// PlaceCatalog
// =============================================================================

/// The sorted, deduplicated set of every valid lookup key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceCatalog {
    names: Vec<String>,
}

impl PlaceCatalog {
    /// Merge the item-list names and pivot labels, dropping degenerate names.
    pub fn build<'a>(
        item_names: impl IntoIterator<Item = &'a str>,
        pivot_labels: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let names: BTreeSet<&str> = item_names
            .into_iter()
            .chain(pivot_labels)
            .filter(|name| is_valid_place_name(name))
            .collect();

        Self {
            names: names.into_iter().map(str::to_string).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names
            .binary_search_by(|entry| entry.as_str().cmp(name))
            .is_ok()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

/// Names of a single character are artifacts of the source data, not cities.
pub fn is_valid_place_name(name: &str) -> bool {
    name.chars().count() > 1
}
