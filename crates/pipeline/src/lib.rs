//! Pipeline for combining and filtering city recommendations.
//!
//! This crate provides:
//! - Filter trait and implementations for candidate filtering
//! - FilterPipeline for composing filters
//! - RecommendationCombiner, which merges both lookups into one set
//!
//! ## Architecture
//! A recommendation request is processed in stages:
//! 1. The content and collaborative lookups run side by side
//! 2. Their outputs are merged by city name, keeping every source
//! 3. Filters remove unwanted candidates (at minimum the query itself)
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::RecommendationCombiner;
//!
//! let combiner = RecommendationCombiner::new(store.clone());
//!
//! let names = combiner.combine("Paris");
//! let detailed = combiner.combine_candidates("Paris");
//! ```

pub mod traits;
pub mod filters;
pub mod filter_pipeline;
pub mod combiner;

// Re-export main types
pub use traits::Filter;
pub use filter_pipeline::FilterPipeline;
pub use combiner::RecommendationCombiner;
