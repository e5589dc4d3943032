// Criterion benchmarks for Swipe Match

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::Arc;
use swipe_match::core::keys::StoreKey;
use swipe_match::core::simulation::{SimulationConfig, SwipeSimulator};
use swipe_match::models::SwipeAction;
use swipe_match::services::{MatchService, MemoryStore};
use tokio::runtime::Runtime;

fn memory_service(rt: &Runtime) -> MatchService {
    let service = MatchService::new(Arc::new(MemoryStore::new()));
    rt.block_on(service.setup(true)).expect("setup failed");
    service
}

fn bench_pair_key(c: &mut Criterion) {
    c.bench_function("pair_key", |b| {
        b.iter(|| StoreKey::swipes(black_box("user42"), black_box("user7")))
    });
}

fn bench_submit_swipe(c: &mut Criterion) {
    let rt = Runtime::new().expect("runtime");
    let service = memory_service(&rt);

    c.bench_function("submit_swipe_memory", |b| {
        b.iter(|| {
            rt.block_on(service.submit_swipe(
                black_box("alice"),
                black_box("bob"),
                SwipeAction::Like,
            ))
        })
    });
}

fn bench_simulation(c: &mut Criterion) {
    let rt = Runtime::new().expect("runtime");
    let mut group = c.benchmark_group("simulation");

    for swipes in [100usize, 1_000] {
        group.bench_with_input(BenchmarkId::from_parameter(swipes), &swipes, |b, &swipes| {
            b.iter(|| {
                let service = memory_service(&rt);
                let config = SimulationConfig {
                    num_users: 50,
                    num_swipes: swipes,
                    like_probability: 0.8,
                    seed: Some(7),
                };
                let simulator = SwipeSimulator::new(service, config).expect("config");
                rt.block_on(simulator.run()).expect("simulation")
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_pair_key, bench_submit_swipe, bench_simulation);
criterion_main!(benches);
