/*
 * Flocking Benchmark
 *
 * Measures the brute-force steering pass and the full driver tick for a range
 * of population sizes.
 */

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::time::Duration;

use flocking::{Flock, FlockConfig, HeadlessHost, TickDriver};

fn seeded_config(num_agents: usize) -> FlockConfig {
    FlockConfig {
        num_agents,
        seed: Some(0x5EED),
        ..FlockConfig::default()
    }
}

// Benchmark the steering computation for every agent without integrating
fn bench_steering(c: &mut Criterion) {
    let mut group = c.benchmark_group("steering");

    for num_agents in [100, 250, 500, 1000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(num_agents), num_agents, |b, &n| {
            let config = seeded_config(n);
            let flock = Flock::new(&config).expect("benchmark config is valid");

            b.iter(|| {
                for (index, agent) in flock.agents().iter().enumerate() {
                    black_box(agent.steering(index, flock.agents(), flock.steering()));
                }
            });
        });
    }

    group.finish();
}

// Benchmark one full driver tick against the headless host
fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick");

    for num_agents in [100, 250, 500, 1000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(num_agents), num_agents, |b, &n| {
            let config = seeded_config(n);
            let flock = Flock::new(&config).expect("benchmark config is valid");
            let mut driver = TickDriver::new(flock);
            let mut host = HeadlessHost::new(config.tick_seconds(), u64::MAX);

            b.iter(|| {
                black_box(driver.tick(&mut host));
            });
        });
    }

    group.finish();
}

// Configure the benchmarks
criterion_group! {
    name = benches;
    config = Criterion::default()
        .sample_size(10)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1));
    targets = bench_steering, bench_tick
}

criterion_main!(benches);
