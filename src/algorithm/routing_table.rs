use log::debug;
use rayon::prelude::*;

use crate::algorithm::{ShortestPathAlgorithm, ShortestPaths};
use crate::graph::{Graph, VertexKey, Weight};
use crate::Result;

/// Runs `algorithm` once per vertex of `graph`, in parallel.
///
/// Every computation borrows the same read-only graph and owns its own
/// result set. Results come back in vertex enumeration order; the first
/// failing source aborts the whole table.
pub fn all_sources<K, W, G, A>(algorithm: &A, graph: &G) -> Result<Vec<ShortestPaths<K, W>>>
where
    K: VertexKey + Send + Sync,
    W: Weight + Send + Sync,
    G: Graph<K, W> + Sync,
    A: ShortestPathAlgorithm<K, W, G> + Sync,
{
    let sources = graph.vertices();
    debug!(
        "{} routing table over {} sources",
        algorithm.name(),
        sources.len()
    );

    from_sources(algorithm, graph, &sources)
}

/// Runs `algorithm` from each of `sources` in parallel, keeping their order.
pub fn from_sources<K, W, G, A>(
    algorithm: &A,
    graph: &G,
    sources: &[K],
) -> Result<Vec<ShortestPaths<K, W>>>
where
    K: VertexKey + Send + Sync,
    W: Weight + Send + Sync,
    G: Graph<K, W> + Sync,
    A: ShortestPathAlgorithm<K, W, G> + Sync,
{
    sources
        .par_iter()
        .map(|source| algorithm.compute_shortest_paths(graph, source))
        .collect()
}
