use crate::graph::traits::{Graph, MutableGraph, VertexKey, Weight};
use crate::{Error, Result};
use log::debug;
use std::collections::HashMap;

/// Stable arena handle of a vertex inside one [`DirectedGraph`].
///
/// Handles are assigned at insertion and never reused while the graph lives,
/// so a handle of a removed vertex simply stops resolving.
/// [`DirectedGraph::compact`] renumbers them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(usize);

impl VertexId {
    /// Position of the vertex slot in the arena
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
struct Edge<W> {
    target: VertexId,
    weight: W,
}

#[derive(Debug, Clone)]
struct Vertex<K, W> {
    key: K,
    /// Outgoing edges in creation order, at most one per target
    edges: Vec<Edge<W>>,
}

/// A directed graph implementation using adjacency lists
///
/// Vertices live in an arena of slots kept in insertion order; removed
/// vertices leave an empty slot behind so the remaining handles stay valid.
/// Empty slots are only reclaimed by [`compact`](Self::compact): until then
/// whole-graph scans (`vertices`, `edge_count`, `remove_vertex`) cost
/// O(vertices ever added), so graphs with heavy add/remove churn should be
/// compacted from time to time.
#[derive(Debug, Clone)]
pub struct DirectedGraph<K, W>
where
    K: VertexKey,
    W: Weight,
{
    /// Vertex arena, `None` for removed vertices
    slots: Vec<Option<Vertex<K, W>>>,

    /// Caller key -> arena handle
    index: HashMap<K, VertexId>,

    /// Number of live vertices
    vertex_count: usize,
}

impl<K, W> Default for DirectedGraph<K, W>
where
    K: VertexKey,
    W: Weight,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, W> DirectedGraph<K, W>
where
    K: VertexKey,
    W: Weight,
{
    /// Creates a new empty directed graph
    pub fn new() -> Self {
        DirectedGraph {
            slots: Vec::new(),
            index: HashMap::new(),
            vertex_count: 0,
        }
    }

    /// Creates a new empty directed graph with room for `vertices` vertices
    pub fn with_capacity(vertices: usize) -> Self {
        DirectedGraph {
            slots: Vec::with_capacity(vertices),
            index: HashMap::with_capacity(vertices),
            vertex_count: 0,
        }
    }

    /// Arena handle of a vertex, if it exists
    pub fn vertex_id(&self, vertex: &K) -> Option<VertexId> {
        self.index.get(vertex).copied()
    }

    /// Caller key behind an arena handle, if the vertex still exists
    pub fn key(&self, id: VertexId) -> Option<&K> {
        self.slot(id).map(|vertex| &vertex.key)
    }

    /// Iterates every edge as `(from, to, weight)`, grouped by source vertex
    /// in enumeration order.
    pub fn edges(&self) -> impl Iterator<Item = (&K, &K, W)> + '_ {
        self.slots.iter().flatten().flat_map(move |vertex| {
            vertex.edges.iter().filter_map(move |edge| {
                self.key(edge.target)
                    .map(|target| (&vertex.key, target, edge.weight))
            })
        })
    }

    /// Adds a directed edge, reporting why it was rejected on failure.
    ///
    /// An existing `from -> to` edge gets its weight overwritten.
    pub fn try_add_edge(&mut self, from: &K, to: &K, weight: W) -> Result<()> {
        let (from_id, to_id) = self.endpoints(from, to)?;
        if weight < W::zero() {
            return Err(Error::NegativeWeight(format!("{:?}", weight)));
        }

        let vertex = self
            .slot_mut(from_id)
            .ok_or_else(|| Error::VertexNotFound(format!("{:?}", from)))?;

        match vertex.edges.iter_mut().find(|edge| edge.target == to_id) {
            Some(edge) => edge.weight = weight,
            None => vertex.edges.push(Edge {
                target: to_id,
                weight,
            }),
        }
        Ok(())
    }

    /// Number of arena slots, removed vertices included
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Drops the empty slots left by removed vertices, keeping enumeration
    /// order and every edge. Returns the number of slots reclaimed.
    ///
    /// Live vertices are renumbered, so every [`VertexId`] obtained before
    /// the call is invalidated. Keys are unaffected.
    pub fn compact(&mut self) -> usize {
        let reclaimed = self.slots.len() - self.vertex_count;
        if reclaimed == 0 {
            return 0;
        }

        let mut remap = vec![None; self.slots.len()];
        for (new, (old, _)) in self
            .slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .enumerate()
        {
            remap[old] = Some(VertexId(new));
        }

        let slots = std::mem::take(&mut self.slots);
        self.slots = slots
            .into_iter()
            .flatten()
            .map(|mut vertex| {
                for edge in &mut vertex.edges {
                    // Edges into removed vertices are pruned on removal
                    if let Some(target) = remap[edge.target.0] {
                        edge.target = target;
                    }
                }
                Some(vertex)
            })
            .collect();
        for id in self.index.values_mut() {
            if let Some(new) = remap[id.0] {
                *id = new;
            }
        }

        debug!("compacted graph, {} empty slots reclaimed", reclaimed);
        reclaimed
    }

    fn endpoints(&self, from: &K, to: &K) -> Result<(VertexId, VertexId)> {
        let from_id = self
            .vertex_id(from)
            .ok_or_else(|| Error::VertexNotFound(format!("{:?}", from)))?;
        let to_id = self
            .vertex_id(to)
            .ok_or_else(|| Error::VertexNotFound(format!("{:?}", to)))?;
        if from_id == to_id {
            return Err(Error::SelfLoop(format!("{:?}", from)));
        }
        Ok((from_id, to_id))
    }

    fn slot(&self, id: VertexId) -> Option<&Vertex<K, W>> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    fn slot_mut(&mut self, id: VertexId) -> Option<&mut Vertex<K, W>> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    fn find_edge(&self, from: &K, to: &K) -> Option<&Edge<W>> {
        let to_id = self.vertex_id(to)?;
        self.vertex_id(from)
            .and_then(|id| self.slot(id))?
            .edges
            .iter()
            .find(|edge| edge.target == to_id)
    }
}

impl<K, W> Graph<K, W> for DirectedGraph<K, W>
where
    K: VertexKey,
    W: Weight,
{
    fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    fn edge_count(&self) -> usize {
        self.slots.iter().flatten().map(|vertex| vertex.edges.len()).sum()
    }

    fn has_vertex(&self, vertex: &K) -> bool {
        self.index.contains_key(vertex)
    }

    fn are_adjacent(&self, from: &K, to: &K) -> bool {
        self.find_edge(from, to).is_some()
    }

    fn edge_weight(&self, from: &K, to: &K) -> Option<W> {
        self.find_edge(from, to).map(|edge| edge.weight)
    }

    fn vertices(&self) -> Vec<K> {
        self.slots
            .iter()
            .flatten()
            .map(|vertex| vertex.key.clone())
            .collect()
    }

    fn outgoing_edges(&self, vertex: &K) -> Box<dyn Iterator<Item = (&K, W)> + '_> {
        match self.vertex_id(vertex).and_then(|id| self.slot(id)) {
            Some(vertex) => Box::new(vertex.edges.iter().filter_map(move |edge| {
                self.key(edge.target).map(|target| (target, edge.weight))
            })),
            None => Box::new(std::iter::empty()),
        }
    }
}

impl<K, W> MutableGraph<K, W> for DirectedGraph<K, W>
where
    K: VertexKey,
    W: Weight,
{
    fn add_vertex(&mut self, vertex: K) -> bool {
        if self.index.contains_key(&vertex) {
            return false;
        }
        if self.slots.try_reserve(1).is_err() || self.index.try_reserve(1).is_err() {
            return false;
        }

        let id = VertexId(self.slots.len());
        self.index.insert(vertex.clone(), id);
        self.slots.push(Some(Vertex {
            key: vertex,
            edges: Vec::new(),
        }));
        self.vertex_count += 1;
        true
    }

    fn remove_vertex(&mut self, vertex: &K) -> bool {
        let Some(id) = self.index.remove(vertex) else {
            return false;
        };

        // Outgoing edges go with the slot; incoming ones are pruned everywhere
        self.slots[id.0] = None;
        for other in self.slots.iter_mut().flatten() {
            other.edges.retain(|edge| edge.target != id);
        }

        self.vertex_count -= 1;
        true
    }

    fn add_edge(&mut self, from: &K, to: &K, weight: W) -> bool {
        self.try_add_edge(from, to, weight).is_ok()
    }

    fn remove_edge(&mut self, from: &K, to: &K) -> bool {
        let Ok((from_id, to_id)) = self.endpoints(from, to) else {
            return false;
        };
        let Some(vertex) = self.slot_mut(from_id) else {
            return false;
        };

        let len_before = vertex.edges.len();
        vertex.edges.retain(|edge| edge.target != to_id);
        len_before > vertex.edges.len()
    }
}
