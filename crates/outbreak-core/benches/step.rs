//! Benchmarks one simulated year on a synthetic 50-city network.
//!
//! The monthly step is quadratic in the affected-city count through the
//! link recalculation, so this is the number to watch when growing the
//! dataset.

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use outbreak_core::prelude::*;
use outbreak_logic::city::CityRecord;
use outbreak_logic::pathogen::Pathogen;

fn synthetic_records(count: usize) -> Vec<CityRecord> {
    (0..count)
        .map(|i| CityRecord {
            name: format!("City {}", i),
            population: 200_000 + 37_000 * i as u64,
            land_area: 80.0 + 5.0 * i as f64,
            latitude: 30.0 + 2.0 * (i % 8) as f64,
            longitude: -120.0 + 6.0 * (i / 8) as f64,
        })
        .collect()
}

fn bench_year(c: &mut Criterion) {
    c.bench_function("year_50_cities", |b| {
        b.iter_batched_ref(
            || {
                let pathogen = Pathogen::from_tag("virus", "bench").unwrap();
                let config = SimulationConfig {
                    seed: 7,
                    ..SimulationConfig::default()
                };
                SimulationEngine::new(synthetic_records(50), pathogen, "City 0", config).unwrap()
            },
            |engine| {
                engine.run_year();
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_year);
criterion_main!(benches);
