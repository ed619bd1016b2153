//! Nearest-neighbor index over the rating pivot.
//!
//! The collaborative lookup only ever sees the [`NeighborIndex`] trait, so the
//! distance algorithm can be replaced without touching the sources crate.
//! The shipped implementation is an exhaustive (brute-force) search, which
//! is what a fitted model over a few thousand cities amounts to anyway.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::types::RatingPivot;

/// A fitted nearest-neighbor structure.
///
/// `query` returns up to `k` row indices ordered from nearest to farthest.
/// Querying with a vector that is itself a row returns that row first
/// (distance zero), which the collaborative lookup relies on being harmless.
pub trait NeighborIndex: Send + Sync + fmt::Debug {
    fn query(&self, vector: &[f32], k: usize) -> Vec<usize>;

    /// Number of indexed rows
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Distance metric used by [`BruteForceIndex`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMetric {
    /// `sqrt(sum((x_i - y_i)^2))`
    #[default]
    Euclidean,
    /// `sum(|x_i - y_i|)`
    Manhattan,
    /// `1 - cos(x, y)`; a zero vector is at distance 1 from everything
    Cosine,
}

impl DistanceMetric {
    pub fn distance(&self, a: &[f32], b: &[f32]) -> f32 {
        match self {
            DistanceMetric::Euclidean => a
                .iter()
                .zip(b)
                .map(|(x, y)| (x - y) * (x - y))
                .sum::<f32>()
                .sqrt(),
            DistanceMetric::Manhattan => a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum(),
            DistanceMetric::Cosine => {
                let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
                let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
                let norm_b = b.iter().map(|y| y * y).sum::<f32>().sqrt();
                if norm_a == 0.0 || norm_b == 0.0 {
                    1.0
                } else {
                    1.0 - dot / (norm_a * norm_b)
                }
            }
        }
    }
}

/// Contents of `model.json`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    #[serde(default)]
    pub metric: DistanceMetric,
}

/// Exhaustive nearest-neighbor search over a copy of the pivot rows.
#[derive(Debug, Clone, Default)]
pub struct BruteForceIndex {
    rows: Vec<Vec<f32>>,
    metric: DistanceMetric,
}

impl BruteForceIndex {
    pub fn new(rows: Vec<Vec<f32>>, metric: DistanceMetric) -> Self {
        Self { rows, metric }
    }

    /// Fit the index on every row of a rating pivot
    pub fn fit(pivot: &RatingPivot, metric: DistanceMetric) -> Self {
        Self::new(pivot.rows().map(<[f32]>::to_vec).collect(), metric)
    }

    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }
}

impl NeighborIndex for BruteForceIndex {
    fn query(&self, vector: &[f32], k: usize) -> Vec<usize> {
        let mut distances: Vec<(usize, f32)> = self
            .rows
            .iter()
            .enumerate()
            .map(|(idx, row)| (idx, self.metric.distance(vector, row)))
            .collect();

        // Stable sort keeps ties in row order; NaN distances go last
        distances.sort_by(|a, b| match (a.1.is_nan(), b.1.is_nan()) {
            (false, false) => a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal),
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (true, true) => Ordering::Equal,
        });
        distances.truncate(k);
        distances.into_iter().map(|(idx, _)| idx).collect()
    }

    fn len(&self) -> usize {
        self.rows.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_index(metric: DistanceMetric) -> BruteForceIndex {
        BruteForceIndex::new(
            vec![
                vec![0.0, 0.0],
                vec![0.0, 1.0],
                vec![5.0, 5.0],
                vec![1.0, 0.0],
            ],
            metric,
        )
    }

    #[test]
    fn test_query_orders_by_distance_with_stable_ties() {
        let index = grid_index(DistanceMetric::Euclidean);

        // Rows 1 and 3 are both at distance 1; row order decides
        assert_eq!(index.query(&[0.0, 0.0], 3), vec![0, 1, 3]);
    }

    #[test]
    fn test_query_returns_at_most_len_rows() {
        let index = grid_index(DistanceMetric::Manhattan);
        assert_eq!(index.query(&[5.0, 5.0], 10).len(), 4);
        assert_eq!(index.query(&[5.0, 5.0], 1), vec![2]);
    }

    #[test]
    fn test_cosine_distance() {
        let metric = DistanceMetric::Cosine;
        assert!(metric.distance(&[1.0, 0.0], &[2.0, 0.0]).abs() < 1e-6);
        assert!((metric.distance(&[1.0, 0.0], &[0.0, 3.0]) - 1.0).abs() < 1e-6);
        assert_eq!(metric.distance(&[0.0, 0.0], &[1.0, 1.0]), 1.0);
    }

    #[test]
    fn test_fit_from_pivot() {
        let pivot = RatingPivot::from_rows(vec![
            ("Paris".to_string(), vec![1.0, 0.0]),
            ("Rome".to_string(), vec![0.0, 1.0]),
        ])
        .unwrap();

        let index = BruteForceIndex::fit(&pivot, DistanceMetric::Cosine);
        assert_eq!(index.len(), 2);
        assert_eq!(index.metric(), DistanceMetric::Cosine);
        assert_eq!(index.query(&[0.0, 2.0], 1), vec![1]);
    }

    #[test]
    fn test_model_descriptor_parsing() {
        let descriptor: ModelDescriptor = serde_json::from_str(r#"{"metric":"cosine"}"#).unwrap();
        assert_eq!(descriptor.metric, DistanceMetric::Cosine);

        let descriptor: ModelDescriptor = serde_json::from_str("{}").unwrap();
        assert_eq!(descriptor.metric, DistanceMetric::Euclidean);
    }
}
