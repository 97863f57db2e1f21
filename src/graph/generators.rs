use crate::graph::{DirectedGraph, Graph, MutableGraph};
use rand::prelude::*;
use std::collections::HashSet;

/// Generates a random directed network on vertices `0..n` with roughly
/// `edge_factor * n` links of weight `1..=max_weight`.
///
/// Self-loops are skipped and a repeated pair just overwrites its weight.
pub fn generate_random_network<R: Rng>(
    n: usize,
    edge_factor: f64,
    max_weight: u32,
    rng: &mut R,
) -> DirectedGraph<usize, u32> {
    let mut graph = DirectedGraph::with_capacity(n);
    for v in 0..n {
        graph.add_vertex(v);
    }
    if n < 2 {
        return graph;
    }

    let num_edges = (edge_factor * n as f64) as usize;
    for _ in 0..num_edges {
        let u = rng.gen_range(0..n);
        let v = rng.gen_range(0..n);
        if u != v {
            graph.add_edge(&u, &v, rng.gen_range(1..=max_weight.max(1)));
        }
    }

    graph
}

/// Generates a Barabási-Albert scale-free network with n vertices and m links
/// per new vertex. New vertices link both ways to their chosen targets, the
/// way a router peers with its uplinks.
pub fn generate_barabasi_albert<R: Rng>(
    n: usize,
    m: usize,
    max_weight: u32,
    rng: &mut R,
) -> DirectedGraph<usize, u32> {
    assert!(m > 0, "m must be positive");
    assert!(n > m, "n must be greater than m");

    let mut graph = DirectedGraph::with_capacity(n);
    let max_weight = max_weight.max(1);

    // Initial m vertices form a complete core
    for v in 0..m {
        graph.add_vertex(v);
    }
    for i in 0..m {
        for j in 0..m {
            if i != j && !graph.are_adjacent(&i, &j) {
                graph.add_edge(&i, &j, rng.gen_range(1..=max_weight));
            }
        }
    }

    // Degree of each vertex for preferential attachment
    let mut degrees = vec![m.saturating_sub(1).max(1); m];
    let mut total_degree: usize = degrees.iter().sum();

    for i in m..n {
        graph.add_vertex(i);
        let mut added = HashSet::new();

        while added.len() < m {
            let mut target_value = rng.gen_range(0..total_degree);
            let mut target = 0;
            while target < i && target_value >= degrees[target] {
                target_value -= degrees[target];
                target += 1;
            }

            if target < i && added.insert(target) {
                let weight = rng.gen_range(1..=max_weight);
                graph.add_edge(&i, &target, weight);
                graph.add_edge(&target, &i, weight);
                degrees[target] += 1;
                total_degree += 1;
            }
        }

        degrees.push(m);
        total_degree += m;
    }

    graph
}

/// Generates a `width x height` grid with unit-weight links in both
/// directions between 4-connected neighbours. Vertex `(x, y)` is `y * width + x`.
pub fn generate_grid(width: usize, height: usize) -> DirectedGraph<usize, u32> {
    let mut graph = DirectedGraph::with_capacity(width * height);
    for v in 0..width * height {
        graph.add_vertex(v);
    }

    let index = |x: usize, y: usize| y * width + x;
    for y in 0..height {
        for x in 0..width {
            let current = index(x, y);
            if x + 1 < width {
                graph.add_edge(&current, &index(x + 1, y), 1);
                graph.add_edge(&index(x + 1, y), &current, 1);
            }
            if y + 1 < height {
                graph.add_edge(&current, &index(x, y + 1), 1);
                graph.add_edge(&index(x, y + 1), &current, 1);
            }
        }
    }

    graph
}
