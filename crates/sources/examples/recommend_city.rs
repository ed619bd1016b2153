//! Example: Run both lookups for one city
//!
//! Run with: cargo run --package sources --example recommend_city -- Paris
//!
//! This example shows how to:
//! 1. Load the artifact directory
//! 2. Run the content similarity lookup
//! 3. Run the collaborative neighbor lookup
//! 4. Compare what each one suggests

use data_loader::ArtifactStore;
use sources::{CollaborativeSource, ContentSource};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .init();

    let city = std::env::args().nth(1).unwrap_or_else(|| "Paris".to_string());

    println!("=== Travel Recommendation Lookup Example ===\n");

    println!("Loading artifacts...");
    let start = Instant::now();
    let store = Arc::new(ArtifactStore::load_from_dir(Path::new("artifacts"))?);
    println!("Loaded artifacts in {:?}\n", start.elapsed());

    let content = ContentSource::new(store.clone());
    let start = Instant::now();
    let similar = content.recommend_similar(&city);
    let content_time = start.elapsed();

    println!("Content similarity for {} ({:?}):", city, content_time);
    for (i, name) in similar.iter().enumerate() {
        println!("  {}. {}", i + 1, name);
    }

    let collaborative = CollaborativeSource::new(store.clone());
    let start = Instant::now();
    let neighbors = collaborative.recommend_neighbors(&city);
    let collaborative_time = start.elapsed();

    println!("\nCollaborative neighbors for {} ({:?}):", city, collaborative_time);
    for (i, name) in neighbors.iter().enumerate() {
        println!("  {}. {}", i + 1, name);
    }

    // Check for overlap
    let similar_set: HashSet<&String> = similar.iter().collect();
    let neighbor_set: HashSet<&String> = neighbors.iter().collect();
    let overlap = similar_set.intersection(&neighbor_set).count();
    println!("\nOverlap between lookups: {} cities", overlap);

    Ok(())
}
