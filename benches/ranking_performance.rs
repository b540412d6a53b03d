//! Performance benchmarks for ranking generation

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use podium::personalization::synthesize_profile;
use podium::profile::build_profile;
use podium::types::{HumanPlayer, MatchRecord};
use podium::{InMemoryHistoryProvider, RankingConfig, RankingEngine};
use std::collections::HashMap;
use std::sync::Arc;

fn bench_history(uid_count: usize) -> HashMap<String, Vec<MatchRecord>> {
    (0..uid_count)
        .map(|i| {
            let records = (0..50)
                .map(|m| {
                    let score = 1200.0 + ((i * 37 + m * 11) % 400) as f64;
                    MatchRecord::new(score, (m % 4) as u32 + 1)
                })
                .collect();
            (format!("player_{}", i), records)
        })
        .collect()
}

fn bench_players(count: usize) -> Vec<HumanPlayer> {
    (0..count)
        .map(|i| HumanPlayer::new(format!("player_{}", i), 1300.0 + i as f64 * 45.0))
        .collect()
}

fn create_bench_engine(enable_cache: bool) -> RankingEngine {
    let config = RankingConfig {
        enable_cache,
        random_seed: Some(2024),
        ..RankingConfig::default()
    };
    let history = Arc::new(InMemoryHistoryProvider::with_history(bench_history(8)));
    RankingEngine::new(config, history).unwrap()
}

fn bench_profile_building(c: &mut Criterion) {
    let history = bench_history(1);
    let records = &history["player_0"];

    c.bench_function("build_profile_50_matches", |b| {
        b.iter(|| black_box(build_profile("player_0", black_box(records), 3)))
    });

    c.bench_function("synthesize_personalization_profile", |b| {
        b.iter(|| black_box(synthesize_profile(black_box("player_0"))))
    });
}

fn bench_match_rankings(c: &mut Criterion) {
    let cached = create_bench_engine(true);
    let uncached = create_bench_engine(false);
    let players = bench_players(4);

    c.bench_function("rank_4_humans_6_ai_cached", |b| {
        b.iter(|| {
            black_box(tokio_test::block_on(
                cached.generate_match_rankings(&players, 6),
            ))
        })
    });

    c.bench_function("rank_4_humans_6_ai_uncached", |b| {
        b.iter(|| {
            black_box(tokio_test::block_on(
                uncached.generate_match_rankings(&players, 6),
            ))
        })
    });
}

fn bench_large_match(c: &mut Criterion) {
    let engine = create_bench_engine(true);
    let players = bench_players(6);

    c.bench_function("rank_6_humans_10_ai", |b| {
        b.iter(|| {
            black_box(tokio_test::block_on(
                engine.generate_match_rankings(&players, 10),
            ))
        })
    });
}

criterion_group!(
    benches,
    bench_profile_building,
    bench_match_rankings,
    bench_large_match
);
criterion_main!(benches);
