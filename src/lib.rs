//! Weighted graphs with shortest-path queries for grid and maze puzzles.
//!
//! Build a [`Graph`] with [`Graph::add_node`] / [`Graph::add_edge`], then ask
//! for a single best route ([`Graph::shortest_path`]) or for every node that
//! some best route passes through ([`Graph::all_nodes_on_any_shortest_path`]).
//!
//! ```
//! use puzzle_graph::Graph;
//!
//! let mut graph: Graph<u32> = Graph::new();
//! for id in 1..=4 {
//!     graph.add_node(id);
//! }
//! graph.add_edge(&1, &2, 1).unwrap();
//! graph.add_edge(&2, &3, 3).unwrap();
//! graph.add_edge(&3, &4, 2).unwrap();
//! graph.add_edge(&2, &4, 5).unwrap();
//!
//! let path = graph.shortest_path(&1, |id| *id == 4).unwrap();
//! assert_eq!(path.cost(), Some(6));
//! ```

pub mod collections;
pub mod errors;
pub mod graph;
pub mod graph_algos;

pub use errors::GraphError;
pub use graph::{Graph, Node, Path};
