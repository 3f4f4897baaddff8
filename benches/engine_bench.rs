//! Benchmarks for the per-turn hot paths: generation, pathfinding, visibility
//! and a full autopilot turn.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rogulator::{
    find_path, update_visibility, Autopilot, FloorGenerator, GameState, GenerationConfig,
    Generator, RunConfig,
};
use std::collections::HashSet;
use std::hint::black_box;

fn benchmark_generation(criterion: &mut Criterion) {
    let generator = FloorGenerator::new();
    let mut group = criterion.benchmark_group("floor_generation");

    for rooms in [5u32, 6] {
        let config = GenerationConfig {
            rooms_per_floor: rooms,
            ..GenerationConfig::default()
        };
        group.bench_with_input(BenchmarkId::new("rooms", rooms), &config, |bencher, config| {
            let mut rng = StdRng::seed_from_u64(7);
            bencher.iter(|| black_box(generator.generate(config, &mut rng)));
        });
    }

    group.finish();
}

fn benchmark_pathfinding(criterion: &mut Criterion) {
    let state = GameState::new_game(RunConfig::default(), &mut StdRng::seed_from_u64(11));
    let start = state.player.position;
    let goal = state.floor.stairs_down_position().unwrap_or(start);
    let blocked = HashSet::new();
    let mut group = criterion.benchmark_group("pathfinding");

    for depth in [20u32, 2000] {
        group.bench_with_input(BenchmarkId::new("entry_to_stairs", depth), &depth, |bencher, &depth| {
            bencher.iter(|| black_box(find_path(&state.floor, start, goal, depth, &blocked)));
        });
    }

    group.finish();
}

fn benchmark_visibility(criterion: &mut Criterion) {
    let mut state = GameState::new_game(RunConfig::default(), &mut StdRng::seed_from_u64(13));
    let viewer = state.player.position;

    criterion.bench_function("update_visibility_radius_8", |bencher| {
        bencher.iter(|| update_visibility(black_box(&mut state.floor), viewer, 8));
    });
}

fn benchmark_autopilot_turn(criterion: &mut Criterion) {
    criterion.bench_function("autopilot_turn", |bencher| {
        let mut rng = StdRng::seed_from_u64(17);
        let mut state = GameState::new_game(RunConfig::default(), &mut rng);
        let mut autopilot = Autopilot::new();
        bencher.iter(|| {
            if state.is_game_ended() {
                state = GameState::new_game(RunConfig::default(), &mut rng);
            }
            match autopilot.next_direction(&state) {
                Some(direction) => black_box(state.move_player(direction, &mut rng)),
                None => black_box(state.rest(&mut rng)),
            }
        });
    });
}

criterion_group!(
    benches,
    benchmark_generation,
    benchmark_pathfinding,
    benchmark_visibility,
    benchmark_autopilot_turn
);

criterion_main!(benches);
