use netroute::algorithm::ShortestPathAlgorithm;
use netroute::graph::generators::generate_random_network;
use netroute::graph::{DirectedGraph, Graph};
use netroute::{ByKey, Dijkstra, HeapDijkstra};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::{Duration, Instant};

// Function to benchmark an algorithm on a graph
fn benchmark_algorithm<A>(
    name: &str,
    algorithm: &A,
    graph: &DirectedGraph<usize, u32>,
    source: usize,
) -> Result<(Duration, Vec<Option<u32>>), netroute::Error>
where
    A: ShortestPathAlgorithm<usize, u32, DirectedGraph<usize, u32>>,
{
    println!("Running {} on graph with {} vertices...", name, graph.vertex_count());

    let start = Instant::now();
    let result = algorithm.compute_shortest_paths(graph, &source)?;
    let duration = start.elapsed();

    let distances: Vec<Option<u32>> = (0..graph.vertex_count())
        .map(|v| result.distance(&v))
        .collect();
    let reachable = distances.iter().filter(|d| d.is_some()).count();
    println!("  - Found {} reachable vertices in {:?}", reachable, duration);

    Ok((duration, distances))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // The marking engine is quadratic, so sizes stay at network scale
    let graph_sizes = [50, 200, 500, 1_000, 2_000];
    let edge_factor = 3.0;
    let mut rng = StdRng::seed_from_u64(7);

    println!("=====================================================");
    println!("Benchmark: marking Dijkstra vs heap Dijkstra");
    println!("Edge factor: {} links per device (on average)", edge_factor);
    println!("=====================================================");

    let marking = Dijkstra::with_tie_break(ByKey);
    let heap = HeapDijkstra::with_tie_break(ByKey);
    let mut results = Vec::new();

    for &size in &graph_sizes {
        println!("\nGenerating random network with {} devices...", size);
        let graph = generate_random_network(size, edge_factor, 100, &mut rng);
        println!(
            "Network has {} devices and {} links",
            graph.vertex_count(),
            graph.edge_count()
        );

        let (marking_time, marking_distances) =
            benchmark_algorithm("Dijkstra (marking)", &marking, &graph, 0)?;
        let (heap_time, heap_distances) =
            benchmark_algorithm("Dijkstra (heap)", &heap, &graph, 0)?;

        if marking_distances != heap_distances {
            eprintln!("  ! engines disagree on {} devices", size);
        }

        let speedup = marking_time.as_secs_f64() / heap_time.as_secs_f64().max(f64::EPSILON);
        println!("Speedup - heap vs marking: {:.2}x", speedup);
        results.push((size, marking_time, heap_time, speedup));
    }

    println!("\n=====================================================");
    println!("Summary of Results");
    println!("=====================================================");
    println!(
        "{:<10} | {:<15} | {:<15} | {:<10}",
        "Devices", "Marking (ms)", "Heap (ms)", "Speedup"
    );
    println!("-----------------------------------------------------");
    for (size, marking_time, heap_time, speedup) in &results {
        println!(
            "{:<10} | {:<15.3} | {:<15.3} | {:<10.2}",
            size,
            marking_time.as_secs_f64() * 1000.0,
            heap_time.as_secs_f64() * 1000.0,
            speedup
        );
    }

    Ok(())
}
