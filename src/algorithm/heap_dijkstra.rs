use std::cmp::Ordering;
use std::collections::HashMap;

use log::{debug, trace};

use crate::algorithm::{FirstSeen, PathNode, ShortestPathAlgorithm, ShortestPaths, TieBreak};
use crate::data_structures::BinaryHeapWrapper;
use crate::graph::{Graph, VertexKey, Weight};
use crate::{Error, Result};

/// Dijkstra's algorithm driven by a binary heap.
///
/// Same contract as [`Dijkstra`](crate::Dijkstra). Before the search every
/// vertex gets a tie-break rank: vertices are sorted by the tie-break
/// strategy, and vertices it cannot tell apart keep their enumeration order.
/// Heap entries are ordered by `(distance, rank)`, so the node popped first
/// is the one the marking scan would select. Nodes the heap never reaches
/// are marked last in rank order.
///
/// A computation costs O(V log V) tie-break calls for the ranking plus
/// O((V + E) log V) heap work, however many nodes are tied.
///
/// The rank is only meaningful when the strategy's `Less` relation is a
/// strict weak order (as for [`FirstSeen`], [`ByKey`](crate::ByKey) and
/// their [`Reversed`](crate::Reversed) forms). With such a strategy both
/// engines mark nodes in the same order and record the same predecessors.
/// Distances are correct for any strategy, but a strategy that is not
/// consistent may make the ranking sort panic.
#[derive(Debug, Clone, Default)]
pub struct HeapDijkstra<T = FirstSeen> {
    tie_break: T,
}

impl HeapDijkstra<FirstSeen> {
    /// Creates a new instance that keeps the first tied candidate in
    /// enumeration order
    pub fn new() -> Self {
        HeapDijkstra {
            tie_break: FirstSeen,
        }
    }
}

impl<T> HeapDijkstra<T> {
    /// Creates an instance that settles ties with `tie_break`
    pub fn with_tie_break(tie_break: T) -> Self {
        HeapDijkstra { tie_break }
    }

    pub fn tie_break(&self) -> &T {
        &self.tie_break
    }
}

/// Position of every node in tie-break preference order.
///
/// `a` goes before `b` only if the strategy prefers it outright; nodes with
/// no strict preference either way keep their slot order (stable sort).
fn tie_break_ranks<K, W, T>(tie_break: &T, nodes: &[PathNode<K, W>]) -> Vec<usize>
where
    K: VertexKey,
    W: Weight,
    T: TieBreak<K>,
{
    let mut order: Vec<usize> = (0..nodes.len()).collect();
    order.sort_by(|&a, &b| {
        let (left, right) = (&nodes[a].key, &nodes[b].key);
        if tie_break.compare(left, right) == Ordering::Less {
            Ordering::Less
        } else if tie_break.compare(right, left) == Ordering::Less {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    });

    let mut ranks = vec![0; nodes.len()];
    for (rank, slot) in order.into_iter().enumerate() {
        ranks[slot] = rank;
    }
    ranks
}

impl<K, W, G, T> ShortestPathAlgorithm<K, W, G> for HeapDijkstra<T>
where
    K: VertexKey,
    W: Weight,
    G: Graph<K, W>,
    T: TieBreak<K>,
{
    fn name(&self) -> &'static str {
        "HeapDijkstra"
    }

    fn compute_shortest_paths(&self, graph: &G, source: &K) -> Result<ShortestPaths<K, W>> {
        if !graph.has_vertex(source) {
            return Err(Error::SourceNotFound);
        }

        let vertices = graph.vertices();
        let n = vertices.len();
        debug!("HeapDijkstra from {:?} over {} vertices", source, n);

        let mut nodes: Vec<PathNode<K, W>> = Vec::new();
        nodes
            .try_reserve_exact(n)
            .map_err(|_| Error::AllocationFailure)?;
        nodes.extend(vertices.into_iter().map(PathNode::new));

        let slots: HashMap<K, usize> = nodes
            .iter()
            .enumerate()
            .map(|(slot, node)| (node.key.clone(), slot))
            .collect();
        let start = *slots.get(source).ok_or(Error::SourceNotFound)?;
        nodes[start].distance = Some(W::zero());

        let ranks = tie_break_ranks(&self.tie_break, &nodes);
        let mut is_marked = vec![false; n];
        let mut marked: Vec<usize> = Vec::with_capacity(n);
        let mut queue = BinaryHeapWrapper::with_capacity(n);
        queue.push(start, (W::zero(), ranks[start]));

        while let Some((current, (distance, _))) = queue.pop() {
            // Skip stale entries left behind by later improvements
            if is_marked[current] || nodes[current].distance != Some(distance) {
                continue;
            }

            trace!("marked {:?} at {:?}", nodes[current].key, distance);
            is_marked[current] = true;
            marked.push(current);

            let key = nodes[current].key.clone();
            for (target, weight) in graph.outgoing_edges(&key) {
                let Some(&slot) = slots.get(target) else {
                    continue;
                };
                if is_marked[slot] {
                    continue;
                }

                let candidate = distance.checked_add(&weight).ok_or(Error::WeightOverflow)?;
                let node = &mut nodes[slot];
                if node.distance.map_or(true, |known| candidate < known) {
                    node.distance = Some(candidate);
                    node.predecessor = Some(current);
                    queue.push(slot, (candidate, ranks[slot]));
                }
            }
        }

        // Whatever the heap never reached is marked last
        let mut unreached: Vec<usize> = (0..n).filter(|&slot| !is_marked[slot]).collect();
        unreached.sort_by_key(|&slot| ranks[slot]);
        for slot in unreached {
            trace!("marked unreachable {:?}", nodes[slot].key);
            marked.push(slot);
        }

        Ok(ShortestPaths::from_marked(source.clone(), nodes, &marked))
    }
}
