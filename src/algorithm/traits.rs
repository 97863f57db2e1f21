use crate::algorithm::ShortestPaths;
use crate::graph::{Graph, VertexKey, Weight};
use crate::Result;

/// Trait for shortest path algorithms
pub trait ShortestPathAlgorithm<K, W, G>
where
    K: VertexKey,
    W: Weight,
    G: Graph<K, W>,
{
    /// Compute shortest paths from a source vertex to all other vertices
    ///
    /// Every vertex of `graph` gets a node in the returned result set;
    /// vertices not reachable from `source` keep no distance and no predecessor.
    fn compute_shortest_paths(&self, graph: &G, source: &K) -> Result<ShortestPaths<K, W>>;

    /// Get the name of the algorithm
    fn name(&self) -> &'static str;
}
