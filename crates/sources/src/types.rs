//! Candidate types shared by the lookups and the combiner.

use serde::{Deserialize, Serialize};

/// Which lookup suggested a city
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateSource {
    /// Precomputed pairwise similarity
    Content,
    /// Nearest neighbors in the rating pivot
    Collaborative,
}

impl CandidateSource {
    pub fn label(&self) -> &'static str {
        match self {
            CandidateSource::Content => "content similarity",
            CandidateSource::Collaborative => "collaborative filtering",
        }
    }
}

/// A recommended city together with every lookup that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub name: String,
    pub sources: Vec<CandidateSource>,
}

impl Candidate {
    pub fn new(name: impl Into<String>, source: CandidateSource) -> Self {
        Self {
            name: name.into(),
            sources: vec![source],
        }
    }

    /// Record another lookup that suggested this city (idempotent)
    pub fn add_source(&mut self, source: CandidateSource) {
        if !self.sources.contains(&source) {
            self.sources.push(source);
            self.sources.sort();
        }
    }

    pub fn is_from(&self, source: CandidateSource) -> bool {
        self.sources.contains(&source)
    }
}
