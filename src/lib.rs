//! netroute - shortest-path routing over device networks
//!
//! This library models a network of interconnected devices as a weighted
//! directed graph and computes, from any start device, the minimum-cost
//! route to every other device. When two candidate routes have the same
//! cost, a caller-supplied tie-break rule decides which one wins.
//!
//! The core pieces are [`DirectedGraph`], the [`Dijkstra`] marking engine
//! (plus the heap-based [`HeapDijkstra`] variant) and the
//! [`ShortestPaths`] result set with its path reconstruction.

pub mod algorithm;
pub mod data_structures;
pub mod graph;
pub mod network;
pub mod web;

pub use algorithm::{
    dijkstra::Dijkstra, heap_dijkstra::HeapDijkstra, ByKey, FirstSeen, Path, PathNode,
    Reversed, ShortestPathAlgorithm, ShortestPaths, TieBreak,
};
/// Re-export main types for convenient use
pub use graph::directed::DirectedGraph;
pub use network::{Network, TieBreakPolicy};

/// Error types for the library
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Vertex not found: {0}")]
    VertexNotFound(String),

    #[error("Self-loop rejected on vertex {0}")]
    SelfLoop(String),

    #[error("Negative edge weight: {0}")]
    NegativeWeight(String),

    #[error("Source vertex not found in graph")]
    SourceNotFound,

    #[error("Path weight overflowed the weight type")]
    WeightOverflow,

    #[error("Could not allocate shortest path nodes")]
    AllocationFailure,

    #[error("Line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Unknown device: {0}")]
    UnknownDevice(String),

    #[error("Unknown host: {0}")]
    UnknownHost(String),

    #[error("Device declared twice: {0}")]
    DuplicateDevice(String),

    #[error("Invalid tie-break policy: {0}")]
    InvalidTieBreak(String),

    #[error("Unknown engine: {0}")]
    InvalidEngine(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type for the library
pub type Result<T> = std::result::Result<T, Error>;
