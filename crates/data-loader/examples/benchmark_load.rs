//! Example: Time each stage of an artifact load
//!
//! Run with: cargo run --package data-loader --example benchmark_load -- artifacts
//!
//! Parses every artifact file on its own first, so a slow load can be
//! pinned on one file, then times the full parallel `load_from_dir`.

use anyhow::{Context, Result};
use data_loader::store::{LINKS_FILE, MODEL_FILE, PIVOT_FILE, PLACES_FILE, SIMILARITY_FILE};
use data_loader::{parser, ArtifactStore};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Run `parse`, returning its row count and how long it took
fn time_stage<T>(
    path: &Path,
    parse: impl FnOnce(&Path) -> data_loader::Result<T>,
    rows: impl FnOnce(&T) -> usize,
) -> Result<(usize, Duration)> {
    let start = Instant::now();
    let parsed = parse(path).with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok((rows(&parsed), start.elapsed()))
}

fn main() -> Result<()> {
    let artifacts_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("artifacts"));

    println!("Timing artifact stages in {}\n", artifacts_dir.display());

    let stages = [
        (PLACES_FILE, time_stage(&artifacts_dir.join(PLACES_FILE), parser::parse_places, Vec::len)?),
        (
            SIMILARITY_FILE,
            time_stage(&artifacts_dir.join(SIMILARITY_FILE), parser::parse_similarity, Vec::len)?,
        ),
        (PIVOT_FILE, time_stage(&artifacts_dir.join(PIVOT_FILE), parser::parse_pivot, Vec::len)?),
        (MODEL_FILE, time_stage(&artifacts_dir.join(MODEL_FILE), parser::parse_model, |_| 1)?),
        (LINKS_FILE, time_stage(&artifacts_dir.join(LINKS_FILE), parser::parse_links, Vec::len)?),
    ];

    let mut sequential = Duration::ZERO;
    for (file, (rows, elapsed)) in &stages {
        println!("{:<16} {:>8} rows  {:?}", file, rows, elapsed);
        sequential += *elapsed;
    }

    let start = Instant::now();
    let store = ArtifactStore::load_from_dir(&artifacts_dir).context("Failed to load artifacts")?;
    let parallel = start.elapsed();

    let (places, pivot_rows, catalog) = store.counts();
    println!("\n=== Full Load ===");
    println!("Places: {}, pivot rows: {}, catalog: {}", places, pivot_rows, catalog);
    println!("Sum of stages: {:?}", sequential);
    println!("load_from_dir: {:?} (parse, validate and index fit)", parallel);

    Ok(())
}
