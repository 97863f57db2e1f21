pub mod traits;
pub mod tie_break;
pub mod result;
pub mod path;
pub mod dijkstra;
pub mod heap_dijkstra;
pub mod routing_table;

pub use traits::ShortestPathAlgorithm;
pub use tie_break::{ByKey, FirstSeen, Reversed, TieBreak};
pub use result::{PathNode, ShortestPaths};
pub use path::Path;
pub use dijkstra::compute_shortest_paths;
