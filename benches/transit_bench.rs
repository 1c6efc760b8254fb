//! Criterion benchmarks for route set evaluation and short optimization runs.
//!
//! Uses synthetic grid cities with hotspot demand, seeded for stable inputs.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use u_transit::evaluation::{CostModel, FitnessEvaluator};
use u_transit::network::{grid_city, CityGraph, DemandTable, NodeId};
use u_transit::random::create_rng;
use u_transit::transit::{random_routes, TransitConfig, TransitProblem};

fn city(side: usize) -> (CityGraph, DemandTable, Vec<NodeId>) {
    let mut rng = create_rng(42);
    let graph = grid_city(side, &mut rng);
    let n = graph.node_count();
    let hotspots = vec![0, n / 2, n - 1];
    let demand = DemandTable::synthetic(n, &hotspots, 10, &mut rng);
    (graph, demand, hotspots)
}

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");

    for &side in &[10, 20, 40] {
        let (graph, demand, hotspots) = city(side);
        let config = TransitConfig::default().with_route_length(5, side * 2);
        let mut rng = create_rng(7);
        let routes = random_routes(&graph, &config, &mut rng);
        let evaluator = FitnessEvaluator::new(CostModel::default());

        group.bench_with_input(BenchmarkId::from_parameter(side), &routes, |b, routes| {
            b.iter(|| {
                let eval = evaluator.evaluate(black_box(routes), &graph, &demand, &hotspots);
                black_box(eval)
            })
        });
    }
    group.finish();
}

fn bench_optimize(c: &mut Criterion) {
    let mut group = c.benchmark_group("optimize");
    group.sample_size(10);

    for &side in &[10, 20] {
        let (graph, demand, hotspots) = city(side);
        let config = TransitConfig::fast()
            .with_route_length(5, side * 2)
            .with_max_generations(10)
            .with_seed(42);
        let problem =
            TransitProblem::new(graph, demand, hotspots, config).expect("valid benchmark city");

        group.bench_with_input(BenchmarkId::from_parameter(side), &problem, |b, p| {
            b.iter(|| {
                let result = black_box(p).optimize();
                black_box(result)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_evaluate, bench_optimize);
criterion_main!(benches);
