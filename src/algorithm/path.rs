//! Path reconstruction over a [`ShortestPaths`] result set.
//!
//! Paths are rebuilt by walking predecessor links backwards from the
//! destination. The walk stops at the first node without a predecessor,
//! which is the source for reachable destinations.

use serde::Serialize;

use crate::algorithm::ShortestPaths;
use crate::graph::{VertexKey, Weight};

/// A reachable destination's shortest path
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Path<K, W> {
    /// Vertices from source to destination, both included
    pub vertices: Vec<K>,
    /// Sum of edge weights along `vertices`
    pub total_weight: W,
}

impl<K, W> Path<K, W> {
    /// Number of edges on the path
    pub fn hop_count(&self) -> usize {
        self.vertices.len().saturating_sub(1)
    }
}

impl<K, W> ShortestPaths<K, W>
where
    K: VertexKey,
    W: Weight,
{
    /// Vertices on the predecessor chain ending at `destination`, in walking
    /// order reversed (chain root first, `destination` last).
    ///
    /// Returns an empty vector if `destination` was not a vertex when the
    /// paths were computed. For an unreachable destination the chain root is
    /// not the source, so the result does not start at [`source`](Self::source);
    /// check [`is_reachable`](Self::is_reachable) before trusting it.
    pub fn path_to(&self, destination: &K) -> Vec<K> {
        let Some(mut node) = self.node(destination) else {
            return Vec::new();
        };

        let mut path = vec![node.key.clone()];
        while let Some(previous) = self.predecessor_node(node) {
            path.push(previous.key.clone());
            node = previous;
            // Predecessors are always marked earlier, so the chain is acyclic
            debug_assert!(path.len() <= self.len());
        }

        path.reverse();
        path
    }

    /// Shortest path to `destination`, or `None` if it is unknown or unreachable
    pub fn route_to(&self, destination: &K) -> Option<Path<K, W>> {
        let total_weight = self.distance(destination)?;
        Some(Path {
            vertices: self.path_to(destination),
            total_weight,
        })
    }
}
