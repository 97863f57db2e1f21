pub mod traits;
pub mod directed;
pub mod generators;

pub use traits::{Graph, MutableGraph, VertexKey, Weight};
pub use directed::{DirectedGraph, VertexId};
