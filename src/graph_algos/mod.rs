pub mod dijkstra;
pub mod a_star;
pub mod all_shortest_paths;
mod shortest_path;

use shortest_path::shortest_path;

use crate::collections::FxIndexMap;

/// Type alias for the node map used in path planning algorithms
/// N: Node - space on a graph
/// C: Cost of reaching the node from the start
/// The tuple contains (parent_index, cost) where:
/// - parent_index is the index of the parent node in the map
/// - cost is the total cost to reach this node from the start
pub type GraphNodeMap<N, C> = FxIndexMap<N, (usize, C)>;

/// Parent index of the start node - it has no parent
pub(crate) const NO_PARENT: usize = usize::MAX;


/// Settled flags indexed like the search map
#[derive(Debug, Default)]
pub(crate) struct Settled {
    flags: Vec<bool>,
    count: usize,
}

impl Settled {

    /// Mark `index` settled, false if it already was
    pub(crate) fn insert(&mut self, index: usize) -> bool {
        if index >= self.flags.len() {
            self.flags.resize(index + 1, false);
        }
        if self.flags[index] {
            return false;
        }
        self.flags[index] = true;
        self.count += 1;
        true
    }

    pub(crate) fn contains(&self, index: usize) -> bool {
        self.flags.get(index).copied().unwrap_or(false)
    }

    pub(crate) fn len(&self) -> usize {
        self.count
    }
}
