//! Filter to remove the queried city from its own recommendations.
//!
//! The collaborative lookup returns the query as its own nearest neighbor,
//! and duplicate names can leak it out of the content lookup as well, so
//! the combiner never trusts either source to be self-free.

use crate::traits::Filter;
use sources::Candidate;

/// Removes candidates whose name equals the query exactly.
pub struct ExcludeQueryFilter;

impl Filter for ExcludeQueryFilter {
    fn name(&self) -> &str {
        "ExcludeQueryFilter"
    }

    fn apply(&self, candidates: Vec<Candidate>, query: &str) -> Vec<Candidate> {
        candidates
            .into_iter()
            .filter(|candidate| candidate.name != query)
            .collect()
    }
}
