use log::{debug, trace};

use crate::algorithm::tie_break::select_candidate;
use crate::algorithm::{FirstSeen, PathNode, ShortestPathAlgorithm, ShortestPaths, TieBreak};
use crate::graph::{Graph, VertexKey, Weight};
use crate::{Error, Result};

/// Classic Dijkstra's algorithm over a marked/unmarked partition.
///
/// Each round relaxes the edges from the current node to every unmarked
/// node, marks the current node, then scans the unmarked nodes for the
/// smallest tentative distance. Equal distances are settled by the tie-break
/// strategy `T`. Selection is a linear scan, so a computation costs O(V²)
/// adjacency lookups; see [`HeapDijkstra`](crate::HeapDijkstra) for the
/// heap-based variant with the same contract.
#[derive(Debug, Clone, Default)]
pub struct Dijkstra<T = FirstSeen> {
    tie_break: T,
}

impl Dijkstra<FirstSeen> {
    /// Creates a new Dijkstra algorithm instance that keeps the first tied
    /// candidate it sees
    pub fn new() -> Self {
        Dijkstra {
            tie_break: FirstSeen,
        }
    }
}

impl<T> Dijkstra<T> {
    /// Creates a Dijkstra instance that settles ties with `tie_break`
    pub fn with_tie_break(tie_break: T) -> Self {
        Dijkstra { tie_break }
    }

    pub fn tie_break(&self) -> &T {
        &self.tie_break
    }
}

impl<K, W, G, T> ShortestPathAlgorithm<K, W, G> for Dijkstra<T>
where
    K: VertexKey,
    W: Weight,
    G: Graph<K, W>,
    T: TieBreak<K>,
{
    fn name(&self) -> &'static str {
        "Dijkstra"
    }

    fn compute_shortest_paths(&self, graph: &G, source: &K) -> Result<ShortestPaths<K, W>> {
        if !graph.has_vertex(source) {
            return Err(Error::SourceNotFound);
        }

        let vertices = graph.vertices();
        let n = vertices.len();
        debug!("Dijkstra from {:?} over {} vertices", source, n);

        let mut nodes: Vec<PathNode<K, W>> = Vec::new();
        nodes
            .try_reserve_exact(n)
            .map_err(|_| Error::AllocationFailure)?;
        nodes.extend(vertices.into_iter().map(PathNode::new));

        let Some(mut current) = nodes.iter().position(|node| &node.key == source) else {
            return Err(Error::SourceNotFound);
        };
        nodes[current].distance = Some(W::zero());

        let mut unmarked: Vec<usize> = (0..n).filter(|&slot| slot != current).collect();
        let mut marked: Vec<usize> = Vec::with_capacity(n);

        while !unmarked.is_empty() {
            // Relaxation from the current node toward every unmarked node
            if let Some(base) = nodes[current].distance {
                for &slot in &unmarked {
                    let Some(weight) = graph.edge_weight(&nodes[current].key, &nodes[slot].key)
                    else {
                        continue;
                    };
                    let candidate = base.checked_add(&weight).ok_or(Error::WeightOverflow)?;

                    let node = &mut nodes[slot];
                    if node.distance.map_or(true, |known| candidate < known) {
                        node.distance = Some(candidate);
                        node.predecessor = Some(current);
                    }
                }
            }

            trace!("marked {:?} at {:?}", nodes[current].key, nodes[current].distance);
            marked.push(current);

            let pos = select_candidate(&self.tie_break, &nodes, &unmarked);
            current = unmarked.remove(pos);
        }

        trace!("marked {:?} at {:?}", nodes[current].key, nodes[current].distance);
        marked.push(current);

        Ok(ShortestPaths::from_marked(source.clone(), nodes, &marked))
    }
}

/// Computes shortest paths from `source` with the marking engine, settling
/// ties with `tie_break`.
pub fn compute_shortest_paths<K, W, G, T>(
    graph: &G,
    source: &K,
    tie_break: T,
) -> Result<ShortestPaths<K, W>>
where
    K: VertexKey,
    W: Weight,
    G: Graph<K, W>,
    T: TieBreak<K>,
{
    Dijkstra::with_tie_break(tie_break).compute_shortest_paths(graph, source)
}
