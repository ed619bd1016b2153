//! Benchmarks for the two lookups
//!
//! Run with: cargo bench --package sources
//!
//! Uses a synthetic store the size of a realistic city catalog, so no
//! artifact directory is needed.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use data_loader::{
    ArtifactStore, BruteForceIndex, CityDirectory, DistanceMetric, Place, RatingPivot,
    SimilarityMatrix,
};
use sources::{CollaborativeSource, ContentSource};
use std::sync::Arc;

const CITIES: usize = 2_000;
const RATING_WIDTH: usize = 64;

fn build_synthetic_store() -> Arc<ArtifactStore> {
    let places: Vec<Place> = (0..CITIES)
        .map(|i| Place::new(i as u32, format!("City {}", i)))
        .collect();

    let similarity = SimilarityMatrix::from_rows(
        (0..CITIES)
            .map(|i| {
                (0..CITIES)
                    .map(|j| 1.0 / (1.0 + (i as f32 - j as f32).abs()))
                    .collect()
            })
            .collect(),
    )
    .expect("square matrix");

    let pivot = RatingPivot::from_rows(
        (0..CITIES)
            .map(|i| {
                let vector = (0..RATING_WIDTH)
                    .map(|f| ((i * 31 + f * 17) % 11) as f32 / 2.0)
                    .collect();
                (format!("City {}", i), vector)
            })
            .collect(),
    )
    .expect("uniform pivot");

    let index = BruteForceIndex::fit(&pivot, DistanceMetric::Euclidean);
    let store = ArtifactStore::from_parts(
        places,
        similarity,
        pivot,
        Box::new(index),
        CityDirectory::default(),
    )
    .expect("valid synthetic store");
    Arc::new(store)
}

fn bench_content_lookup(c: &mut Criterion) {
    let content = ContentSource::new(build_synthetic_store());

    c.bench_function("content_recommend_similar", |b| {
        b.iter(|| {
            let similar = content.recommend_similar(black_box("City 1000"));
            black_box(similar)
        })
    });
}

fn bench_collaborative_lookup(c: &mut Criterion) {
    let collaborative = CollaborativeSource::new(build_synthetic_store());

    c.bench_function("collaborative_recommend_neighbors", |b| {
        b.iter(|| {
            let neighbors = collaborative.recommend_neighbors(black_box("City 1000"));
            black_box(neighbors)
        })
    });
}

criterion_group!(benches, bench_content_lookup, bench_collaborative_lookup);
criterion_main!(benches);
