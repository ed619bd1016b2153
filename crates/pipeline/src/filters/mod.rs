//! Filter implementations for the candidate pipeline.
//!
//! This module contains the concrete filters that can be composed into a
//! FilterPipeline.

pub mod exclude_query;

// Re-export for convenience
pub use exclude_query::ExcludeQueryFilter;
