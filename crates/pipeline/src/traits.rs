//! Core traits for the filtering pipeline.
//!
//! This module defines the Filter trait that allows composable,
//! extensible filters to be applied to merged candidate sets.

use sources::Candidate;

/// Core trait for filtering candidates.
///
/// All filters must implement this trait to be used in the FilterPipeline.
///
/// ## Design Note
/// - `Send + Sync` allows filters to be shared across request handlers
/// - Filters take ownership of the Vec<Candidate> and return a filtered Vec
/// - Filtering is infallible: a city that cannot be judged is kept or
///   dropped, never turned into an error
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a set of candidates.
    ///
    /// # Arguments
    /// * `candidates` - The candidates to filter (takes ownership)
    /// * `query` - The city the recommendations were requested for
    fn apply(&self, candidates: Vec<Candidate>, query: &str) -> Vec<Candidate>;
}
