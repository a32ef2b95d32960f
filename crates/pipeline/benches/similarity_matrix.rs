//! Benchmarks for the similarity pipeline
//!
//! Run with: cargo bench --package pipeline
//!
//! Uses a synthetic dataset sized like the review scrape.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use data_loader::GameRecord;
use pipeline::{FeatureEncoder, SimilarityEngine, SimilarityPipeline};

const PLATFORMS: [&str; 6] = ["PC", "Wii", "Xbox 360", "PlayStation 3", "iPhone", "Nintendo DS"];
const GENRES: [&str; 8] = [
    "Action",
    "Adventure",
    "Role-playing (RPG)",
    "Platformer",
    "Shooter",
    "Puzzle",
    "Sports",
    "Strategy",
];

fn synthetic_games(n: usize) -> Vec<GameRecord> {
    (0..n)
        .map(|i| {
            let genre_field = format!("{}, {}", GENRES[i % GENRES.len()], GENRES[(i / 3) % GENRES.len()]);
            GameRecord::new(
                format!("Game {i}"),
                PLATFORMS[i % PLATFORMS.len()],
                &genre_field,
                1990 + (i % 30) as i32,
                (i % 100) as f64 / 10.0,
            )
        })
        .collect()
}

fn bench_encode(c: &mut Criterion) {
    let games = synthetic_games(2000);
    let encoder = FeatureEncoder::new();

    c.bench_function("encode_2000", |b| {
        b.iter(|| black_box(encoder.encode(black_box(&games))))
    });
}

fn bench_matrix(c: &mut Criterion) {
    let games = synthetic_games(1000);
    let encoded = FeatureEncoder::new().encode(&games);
    let engine = SimilarityEngine::new();

    c.bench_function("similarity_matrix_1000", |b| {
        b.iter(|| black_box(engine.compute(black_box(&encoded.vectors)).unwrap()))
    });
}

fn bench_full_query(c: &mut Criterion) {
    let games = synthetic_games(1000);
    let pipeline = SimilarityPipeline::new();

    c.bench_function("rank_query_1000", |b| {
        b.iter(|| black_box(pipeline.rank(black_box(&games), 0, 5).unwrap()))
    });
}

criterion_group!(benches, bench_encode, bench_matrix, bench_full_query);
criterion_main!(benches);
