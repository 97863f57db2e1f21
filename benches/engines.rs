use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use netroute::algorithm::ShortestPathAlgorithm;
use netroute::graph::generators::{generate_grid, generate_random_network};
use netroute::{ByKey, Dijkstra, HeapDijkstra};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn bench_random_networks(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_network");
    let mut rng = StdRng::seed_from_u64(42);

    for size in [32usize, 128, 512] {
        let graph = generate_random_network(size, 3.0, 50, &mut rng);
        let marking = Dijkstra::with_tie_break(ByKey);
        let heap = HeapDijkstra::with_tie_break(ByKey);

        group.bench_with_input(BenchmarkId::new("marking", size), &graph, |b, graph| {
            b.iter(|| marking.compute_shortest_paths(black_box(graph), &0).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("heap", size), &graph, |b, graph| {
            b.iter(|| heap.compute_shortest_paths(black_box(graph), &0).unwrap())
        });
    }

    group.finish();
}

fn bench_grid_paths(c: &mut Criterion) {
    let graph = generate_grid(16, 16);
    let paths = Dijkstra::with_tie_break(ByKey)
        .compute_shortest_paths(&graph, &0)
        .unwrap();

    c.bench_function("path_to_far_corner", |b| {
        b.iter(|| paths.path_to(black_box(&255)))
    });
}

criterion_group!(benches, bench_random_networks, bench_grid_paths);
criterion_main!(benches);
