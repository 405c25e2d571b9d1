use crate::graph::Path;
use super::{shortest_path, GraphNodeMap, NO_PARENT};

use std::{
    collections::BinaryHeap, 
    hash::Hash, 
    fmt::Debug,
    cmp::Ordering
};
use num_traits::Zero;
use indexmap::map::Entry::{Occupied, Vacant};
use log::{debug, trace};



/// Open list entry for A*
#[derive(Debug)]
struct Candidate<T> {
    index: usize, // index in the closed_list - maps to the Id of the node
    cost: T, // Cost to reach this node
    f_cost: T, // Total cost = cost + h(n) aka estimated cost
}

// Lowest f_cost first, then the deeper candidate, then discovery order
impl<T: Ord> Ord for Candidate<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        other.f_cost.cmp(&self.f_cost)
            .then_with(|| self.cost.cmp(&other.cost))
            .then_with(|| other.index.cmp(&self.index))
    }
}
impl<T: Ord> PartialOrd for Candidate<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl<T: PartialEq> PartialEq for Candidate<T> {
    fn eq(&self, other: &Self) -> bool {
        self.f_cost == other.f_cost && self.cost == other.cost && self.index == other.index
    }
}
impl<T: PartialEq> Eq for Candidate<T> {}


/// A* Algorithm
/// https://en.wikipedia.org/wiki/A*_search_algorithm
/// From start Node, traverse through graph until a node meets goal criteria
/// Same result as `dijkstra` when the heuristic is consistent (never overestimates the
/// remaining cost, and never drops by more than an edge's cost between neighbors)
/// A zero heuristic reduces this to Dijkstra's algorithm
pub fn a_star<N, C, IT, NN, H, G>(start: N, neighbors: NN, heuristic_fn: H, goal_fn: G) -> Path<N, C>
where 
    N: Eq + Hash + Clone + Debug,
    NN: Fn(&N) -> IT, // returns iterator of neighbors + costs
    H: Fn(&N) -> C, // estimated remaining cost to the nearest goal
    IT: IntoIterator<Item = (N, C)>, // Iterator of neighbors + edge cost to neighbor node
    C: Zero + Ord + Copy + Debug,
    G: Fn(&N) -> bool, // node qualifier for goal
    {

    let (closed_list, goal_index) = build_a_star_graph(start, neighbors, heuristic_fn, goal_fn);

    match goal_index {
        Some(goal_index) => shortest_path(&closed_list, goal_index),
        None => Path::not_found(),
    }
}


/// Traverses the graph using A* 
/// Returns a map of nodes with their smallest costs along with the index of the goal node
fn build_a_star_graph<N, C, IT, NN, H, G>(start: N, neighbors: NN, heuristic_fn: H, goal_fn: G) -> (GraphNodeMap<N, C>, Option<usize>)
where 
    N: Eq + Hash + Clone + Debug,
    NN: Fn(&N) -> IT,
    IT: IntoIterator<Item = (N, C)>,
    C: Zero + Ord + Copy + Debug,
    H: Fn(&N) -> C,
    G: Fn(&N) -> bool
{
    // Open List
    // Nodes that need to be evaluated, sorted by f_cost (cost + heuristic)
    let mut open_list: BinaryHeap<Candidate<C>> = BinaryHeap::new();

    // Evaluated nodes with (parent_index, cost), used to find the final path
    let mut closed_list: GraphNodeMap<N, C> = GraphNodeMap::default();

    let start_f_cost = heuristic_fn(&start);
    let start_index = closed_list.insert_full(start, (NO_PARENT, Zero::zero())).0;
    open_list.push(Candidate {
        index: start_index,
        cost: Zero::zero(),
        f_cost: start_f_cost,
    });

    let mut expanded = 0usize;

    while let Some(Candidate { index, cost, .. }) = open_list.pop() {

        let Some((node, &(_, c))) = closed_list.get_index(index) else {
            continue;
        };

        // a cheaper path to this node was already expanded
        if cost > c {
            continue;
        }

        expanded += 1;
        trace!("expanding {:?} at cost {:?}", node, c);

        if goal_fn(node) {
            debug!("a* reached goal {:?} at cost {:?} after expanding {} nodes", node, c, expanded);
            return (closed_list, Some(index));
        }

        for (neighbor, edge_cost) in neighbors(node) {

            // confirmed cost, not heuristic
            let new_cost = edge_cost + c;
            let h_cost = heuristic_fn(&neighbor);

            let neighbor_index = match closed_list.entry(neighbor) {
                Vacant(e) => {
                    let neighbor_index = e.index();
                    e.insert((index, new_cost));
                    neighbor_index
                }
                Occupied(mut e) if e.get().1 > new_cost => {
                    e.insert((index, new_cost));
                    e.index()
                }
                Occupied(_) => continue,
            };

            open_list.push(Candidate {
                index: neighbor_index,
                cost: new_cost,
                f_cost: new_cost + h_cost,
            });
        }
    }

    debug!("a* exhausted the open list after expanding {} nodes", expanded);
    (closed_list, None)
}
