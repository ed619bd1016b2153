//! # Sources Crate
//!
//! This crate implements the two lookups that feed city recommendations.
//!
//! ## Components
//!
//! ### Content Source
//! Precomputed pairwise similarity:
//! - "Cities that look like this one on paper"
//! - Up to 6 cities, never the query itself
//!
//! ### Collaborative Source
//! Nearest neighbors in the rating pivot:
//! - "Travellers who rated this city like you did also rated..."
//! - Up to 6 cities, usually led by the query itself
//!
//! ## Example Usage
//!
//! ```ignore
//! use sources::{CollaborativeSource, ContentSource};
//! use data_loader::ArtifactStore;
//! use std::sync::Arc;
//!
//! let store = Arc::new(ArtifactStore::load_from_dir("artifacts".as_ref())?);
//!
//! let content = ContentSource::new(store.clone());
//! let collaborative = CollaborativeSource::new(store.clone());
//!
//! let similar = content.recommend_similar("Paris");
//! let neighbors = collaborative.recommend_neighbors("Paris");
//! ```
//!
//! Both sources share the store through `Arc` and never mutate it, so they
//! are cheap to clone into worker threads.

// Public modules
pub mod types;
pub mod content;
pub mod collaborative;

// Re-export commonly used types
pub use types::{Candidate, CandidateSource};
pub use content::{ContentSource, CONTENT_LIMIT};
pub use collaborative::{CollaborativeSource, NEIGHBOR_COUNT};
