use std::collections::HashMap;

use crate::graph::{VertexKey, Weight};

/// Per-vertex record of one shortest path computation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathNode<K, W> {
    pub(crate) key: K,
    /// Best known path weight from the source, `None` if never reached
    pub(crate) distance: Option<W>,
    /// Position of the previous hop's node in the owning result set
    pub(crate) predecessor: Option<usize>,
}

impl<K, W> PathNode<K, W>
where
    K: VertexKey,
    W: Weight,
{
    pub(crate) fn new(key: K) -> Self {
        PathNode {
            key,
            distance: None,
            predecessor: None,
        }
    }

    /// Vertex this node describes
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Shortest path weight from the source, or `None` if unreachable
    pub fn distance(&self) -> Option<W> {
        self.distance
    }

    pub fn is_reachable(&self) -> bool {
        self.distance.is_some()
    }
}

/// Result set of a shortest path computation.
///
/// Holds one [`PathNode`] per vertex of the graph at computation time, in
/// reverse finalization order: the last node marked comes first and the
/// source comes last. The set owns its nodes; dropping it releases them.
#[derive(Debug, Clone)]
pub struct ShortestPaths<K, W>
where
    K: VertexKey,
    W: Weight,
{
    source: K,
    nodes: Vec<PathNode<K, W>>,
    /// Key -> position in `nodes`
    index: HashMap<K, usize>,
}

impl<K, W> ShortestPaths<K, W>
where
    K: VertexKey,
    W: Weight,
{
    /// Builds a result set from an engine's node arena and the order in which
    /// arena entries were marked. Arena predecessors are arena positions.
    pub(crate) fn from_marked(source: K, arena: Vec<PathNode<K, W>>, marked: &[usize]) -> Self {
        let n = marked.len();
        let mut position = vec![None; arena.len()];
        for (step, &slot) in marked.iter().enumerate() {
            position[slot] = Some(n - 1 - step);
        }

        let mut arena: Vec<Option<PathNode<K, W>>> = arena.into_iter().map(Some).collect();
        let nodes: Vec<PathNode<K, W>> = marked
            .iter()
            .rev()
            .filter_map(|&slot| arena[slot].take())
            .map(|mut node| {
                node.predecessor = node.predecessor.and_then(|pred| position[pred]);
                node
            })
            .collect();

        let index = nodes
            .iter()
            .enumerate()
            .map(|(pos, node)| (node.key.clone(), pos))
            .collect();

        ShortestPaths {
            source,
            nodes,
            index,
        }
    }

    /// Source vertex of the computation
    pub fn source(&self) -> &K {
        &self.source
    }

    /// Number of nodes, one per vertex present at computation time
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes in result order: destination-first, source-last
    pub fn iter(&self) -> impl Iterator<Item = &PathNode<K, W>> + '_ {
        self.nodes.iter()
    }

    /// Keys in the order the engine marked them, source first
    pub fn finalization_order(&self) -> impl Iterator<Item = &K> + '_ {
        self.nodes.iter().rev().map(|node| &node.key)
    }

    /// Returns true if `vertex` was a vertex of the graph at computation time
    pub fn contains(&self, vertex: &K) -> bool {
        self.index.contains_key(vertex)
    }

    /// Node describing `vertex`
    pub fn node(&self, vertex: &K) -> Option<&PathNode<K, W>> {
        self.index.get(vertex).map(|&pos| &self.nodes[pos])
    }

    /// Shortest path weight to `vertex`, `None` if unknown or unreachable
    pub fn distance(&self, vertex: &K) -> Option<W> {
        self.node(vertex).and_then(|node| node.distance)
    }

    /// Previous hop on the shortest path to `vertex`
    pub fn predecessor(&self, vertex: &K) -> Option<&K> {
        self.node(vertex)
            .and_then(|node| node.predecessor)
            .map(|pos| &self.nodes[pos].key)
    }

    pub fn is_reachable(&self, vertex: &K) -> bool {
        self.distance(vertex).is_some()
    }

    pub(crate) fn predecessor_node(&self, node: &PathNode<K, W>) -> Option<&PathNode<K, W>> {
        node.predecessor.map(|pos| &self.nodes[pos])
    }
}
