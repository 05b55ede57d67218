use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use cvrptw_cg::cg;
use cvrptw_cg::instance::fixtures::toy_instance;
use cvrptw_cg::solver_highs::HighsSolver;

fn solve_toy(_: usize) {
    let instance = toy_instance();
    let _ = cg::solve::<HighsSolver>(&instance).expect("toy instance always solves");
}

pub fn bench(c: &mut Criterion) {
    c.bench_function("cg-toy-instance", |b| b.iter(|| solve_toy(black_box(0))));
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(50).measurement_time(Duration::from_secs(10));
    targets = bench
}
criterion_main!(benches);
