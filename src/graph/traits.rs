use std::fmt::Debug;
use std::hash::Hash;
use num_traits::{CheckedAdd, Zero};

/// Identity of a vertex as seen by the caller.
///
/// Two keys name the same vertex iff they compare equal. Keys are meant to be
/// cheap handles (indices, ids, interned names); the graph stores a clone and
/// never looks behind it.
pub trait VertexKey: Clone + Eq + Hash + Debug {}

impl<T> VertexKey for T where T: Clone + Eq + Hash + Debug {}

/// Edge weight. Integer-like, totally ordered, with overflow-checked addition.
pub trait Weight: Copy + Ord + Zero + CheckedAdd + Debug {}

impl<T> Weight for T where T: Copy + Ord + Zero + CheckedAdd + Debug {}

/// Trait representing a weighted directed graph
pub trait Graph<K, W>: Debug
where
    K: VertexKey,
    W: Weight,
{
    /// Returns the number of vertices in the graph
    fn vertex_count(&self) -> usize;

    /// Returns the number of edges in the graph
    fn edge_count(&self) -> usize;

    /// Returns true if the vertex exists in the graph
    fn has_vertex(&self, vertex: &K) -> bool;

    /// Returns true if there's an edge `from -> to`. Not symmetric.
    fn are_adjacent(&self, from: &K, to: &K) -> bool;

    /// Gets the weight of an edge if it exists
    fn edge_weight(&self, from: &K, to: &K) -> Option<W>;

    /// Snapshot of all vertex keys in enumeration (insertion) order
    fn vertices(&self) -> Vec<K>;

    /// Returns an iterator over the outgoing edges from a vertex
    fn outgoing_edges(&self, vertex: &K) -> Box<dyn Iterator<Item = (&K, W)> + '_>;
}

/// Trait for mutable graph operations
pub trait MutableGraph<K, W>: Graph<K, W>
where
    K: VertexKey,
    W: Weight,
{
    /// Adds a vertex for `vertex`. Returns false if it already exists.
    fn add_vertex(&mut self, vertex: K) -> bool;

    /// Removes a vertex together with every edge touching it
    fn remove_vertex(&mut self, vertex: &K) -> bool;

    /// Adds a directed edge, or overwrites the weight of an existing one
    fn add_edge(&mut self, from: &K, to: &K, weight: W) -> bool;

    /// Removes an edge from the graph
    fn remove_edge(&mut self, from: &K, to: &K) -> bool;
}
