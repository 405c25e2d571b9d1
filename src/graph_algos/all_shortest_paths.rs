use crate::collections::{FxIndexMap, FxIndexSet};
use super::{dijkstra::NodeId, Settled};

use std::{collections::BinaryHeap, hash::Hash, fmt::Debug};
use num_traits::Zero;
use indexmap::map::Entry::{Occupied, Vacant};
use log::{debug, trace};


/// Best known cost of a discovered node and every node it can be reached from at that cost
#[derive(Debug)]
struct Reach<C> {
    cost: C,
    predecessors: Vec<usize>, // indices into the search map
}


/// Collect every node lying on some minimum-cost path from start to the nearest goal
///
/// Runs the same settle/relax loop as `dijkstra`, but a neighbor reached at a cost equal to
/// its best known cost records the extra predecessor instead of discarding it.
/// Only predecessors settled before the neighbor are recorded, so every walk back over them
/// is a simple path. With zero-weight edges, a route whose nodes tie in cost but settle in the
/// other order can be left out. Positive weights give the exact union.
///
/// The first goal settled fixes the target cost. Unlike a single-goal search, every further
/// goal settled at that same cost also seeds the walk back. The result is the union of optimal
/// routes to all of the nearest goals, including start and the goal node(s).
///
/// Returns `{start}` when start meets the goal and an empty set when no goal is reachable.
/// Edge costs must be non-negative.
pub fn all_nodes_on_any_shortest_path<N, C, IT, NN, G>(start: N, neighbors: NN, goal_fn: G) -> FxIndexSet<N>
where 
    N: Eq + Hash + Clone + Debug,
    NN: Fn(&N) -> IT,
    IT: IntoIterator<Item = (N, C)>,
    C: Zero + Ord + Copy + Debug,
    G: Fn(&N) -> bool,
    {

    let (reach_map, goal_indices) = build_reach_graph(start, neighbors, goal_fn);

    // Reverse traversal from every goal over the recorded predecessors
    let mut on_path: FxIndexSet<usize> = FxIndexSet::default();
    let mut to_visit = goal_indices;

    while let Some(index) = to_visit.pop() {
        if !on_path.insert(index) {
            continue;
        }
        if let Some((_, reach)) = reach_map.get_index(index) {
            to_visit.extend(reach.predecessors.iter().copied());
        }
    }

    // Emit in discovery order so the set iterates start first
    on_path.sort_unstable();
    on_path
        .into_iter()
        .filter_map(|index| reach_map.get_index(index).map(|(node, _)| node.clone()))
        .collect()
}


/// Settles nodes until the frontier's cheapest entry costs more than the first goal found
/// Returns the reach map along with the indices of every goal settled at the target cost
fn build_reach_graph<N, C, IT, NN, G>(start: N, neighbors: NN, goal_fn: G) -> (FxIndexMap<N, Reach<C>>, Vec<usize>)
where 
    N: Eq + Hash + Clone + Debug,
    NN: Fn(&N) -> IT,
    IT: IntoIterator<Item = (N, C)>,
    C: Zero + Ord + Copy + Debug,
    G: Fn(&N) -> bool,
    {

    let mut nodes_to_visit: BinaryHeap<NodeId<C>> = BinaryHeap::new();
    let mut reach_map: FxIndexMap<N, Reach<C>> = FxIndexMap::default();

    let start_index = reach_map.insert_full(start, Reach {
        cost: Zero::zero(),
        predecessors: Vec::new(),
    }).0;
    nodes_to_visit.push(NodeId {
        index: start_index,
        cost: Zero::zero(),
    });

    let mut target: Option<C> = None;
    let mut goal_indices = Vec::new();
    let mut settled = Settled::default();

    while let Some(NodeId { cost, index }) = nodes_to_visit.pop() {

        let Some((node, reach)) = reach_map.get_index(index) else {
            continue;
        };
        let c = reach.cost;

        // everything left in the frontier is beyond the optimal cost
        if target.is_some_and(|target| c > target) {
            break;
        }

        // stale entry - a cheaper path to this node was already settled
        if cost > c || !settled.insert(index) {
            continue;
        }

        trace!("settled {:?} at cost {:?}", node, c);

        // Goals are not expanded - a route through one goal to another is never cheaper
        if goal_fn(node) {
            target = Some(c);
            goal_indices.push(index);
            continue;
        }

        for (neighbor, edge_cost) in neighbors(node) {
            let new_cost = edge_cost + c;

            match reach_map.entry(neighbor) {
                Vacant(e) => {
                    let neighbor_index = e.index();
                    e.insert(Reach {
                        cost: new_cost,
                        predecessors: vec![index],
                    });
                    nodes_to_visit.push(NodeId { index: neighbor_index, cost: new_cost });
                }
                Occupied(mut e) => {
                    let neighbor_index = e.index();
                    let known = e.get_mut();
                    if new_cost < known.cost {
                        known.cost = new_cost;
                        known.predecessors.clear();
                        known.predecessors.push(index);
                        nodes_to_visit.push(NodeId { index: neighbor_index, cost: new_cost });
                    } else if new_cost == known.cost
                        && !settled.contains(neighbor_index)
                        && !known.predecessors.contains(&index)
                    {
                        // another route of equal cost - already queued at this cost
                        known.predecessors.push(index);
                    }
                }
            }
        }
    }

    debug!(
        "all-shortest-paths settled {} nodes, {} goal(s) at cost {:?}",
        settled.len(), goal_indices.len(), target
    );
    (reach_map, goal_indices)
}
