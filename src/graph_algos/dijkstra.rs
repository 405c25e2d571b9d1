use crate::collections::FxIndexMap;
use crate::graph::Path;
use super::{shortest_path, GraphNodeMap, Settled, NO_PARENT};

use std::{collections::BinaryHeap, hash::Hash, cmp::Ordering, fmt::Debug};
use num_traits::Zero;
use indexmap::map::Entry::{Occupied, Vacant};
use log::{debug, trace};



/// Identify the shortest path using Dijkstra's Algorithm
/// https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm
/// From start Node, traverse through graph until a node meets goal criteria
/// Returns `Path::not_found()` when every reachable node is settled without meeting the goal
/// Edge costs must be non-negative
///
/// Ties are resolved deterministically:
/// - frontier nodes of equal cost are settled in discovery order
/// - a node reachable at equal cost from several predecessors keeps the last one settled
pub fn dijkstra<N, C, IT, NN, G>(start: N, neighbors: NN, goal: G) -> Path<N, C>
where 
    N: Eq + Hash + Clone + Debug,
    NN: Fn(&N) -> IT, // returns iterator of neighbors + costs
    IT: IntoIterator<Item = (N, C)>, // Iterator of neighbors + edge cost to neighbor node
    C: Zero + Ord + Copy + Debug,
    G: Fn(&N) -> bool, // node qualifier for goal
    {

    // Build the graph - terminates when the goal is met
    let (node_map, goal_index) = build_dijkstra_graph(start, neighbors, goal);

    match goal_index {
        Some(goal_index) => shortest_path(&node_map, goal_index),
        None => Path::not_found(),
    }
}


/// Returns the settled cost of every node reachable from start
/// Map order is discovery order, start first
pub fn dijkstra_distances<N, C, IT, NN>(start: N, neighbors: NN) -> FxIndexMap<N, C>
where 
    N: Eq + Hash + Clone + Debug,
    NN: Fn(&N) -> IT,
    IT: IntoIterator<Item = (N, C)>,
    C: Zero + Ord + Copy + Debug,
    {

    // No goal - runs until the frontier is exhausted, so every entry is settled
    let (node_map, _) = build_dijkstra_graph(start, neighbors, |_| false);

    node_map
        .into_iter()
        .map(|(node, (_, cost))| (node, cost))
        .collect()
}


/// Traverses the graph using Dijkstra's algorithm 
/// Returns a map of nodes with their smallest costs along with the index of the goal node
fn build_dijkstra_graph<N, C, IT, NN, G>(start: N, neighbors: NN, goal_fn: G) -> (GraphNodeMap<N, C>, Option<usize>)
where 
    N: Eq + Hash + Clone + Debug,
    NN: Fn(&N) -> IT, // returns iterator of neighbors + costs
    IT: IntoIterator<Item = (N, C)>, // Iterator of neighbors + edge cost to neighbor node
    C: Zero + Ord + Copy + Debug,
    G: Fn(&N) -> bool // Returns true if goal is met
    {

    // Nodes to visit - binary heap sorts Biggest to Smallest, NodeId reverses that
    // We store the cost from the starting node
    let mut nodes_to_visit: BinaryHeap<NodeId<C>> = BinaryHeap::new();

    // Discovered nodes with their best known (parent_index, cost)
    // for the start node, parent_index is NO_PARENT
    let mut nodes_map: GraphNodeMap<N, C> = GraphNodeMap::default();
    
    let start_index = nodes_map.insert_full(start, (NO_PARENT, Zero::zero())).0;
    nodes_to_visit.push(NodeId{
        index: start_index,
        cost: Zero::zero(),
    });

    // indices whose cost is final
    let mut settled = Settled::default();

    // Loop over each node to visit, removing the smallest node
    while let Some(NodeId {cost, index}) = nodes_to_visit.pop() {

        // fetch current best cost for node
        let Some((node, &(_, c))) = nodes_map.get_index(index) else {
            continue;
        };

        // stale entry - a cheaper path to this node was already settled
        if cost > c || !settled.insert(index) {
            continue;
        }

        trace!("settled {:?} at cost {:?}", node, c);

        if goal_fn(node) {
            debug!("dijkstra reached goal {:?} at cost {:?} after settling {} nodes", node, c, settled.len());
            return (nodes_map, Some(index));
        }
        
        for (neighbor, edge_cost) in neighbors(node) {

            // new cost to reach this node = edge cost + node cost
            let new_cost = edge_cost + c;

            let neighbor_index;
            
            match nodes_map.entry(neighbor) {
                Vacant(e) => {
                    neighbor_index = e.index();
                    e.insert((index, new_cost));
                }
                Occupied(mut e) => {
                    let known_cost = e.get().1;
                    if known_cost > new_cost {
                        neighbor_index = e.index();
                        e.insert((index, new_cost));
                    } else {
                        // equal cost: the latest settled predecessor wins, already queued at this cost
                        if known_cost == new_cost && !settled.contains(e.index()) {
                            e.insert((index, new_cost));
                        }
                        continue;
                    }
                }
            }
            
            // Only add to the queue if we've found a better path
            nodes_to_visit.push(NodeId {
                index: neighbor_index,
                cost: new_cost,
            });
        }
    }

    debug!("dijkstra exhausted the frontier after settling {} nodes", settled.len());
    (nodes_map, None)
}


/// Frontier entry
/// - for ordering we only need cost and a way to identify the node
/// - equal costs are settled in discovery order (lowest index first)
#[derive(Debug)]
pub(crate) struct NodeId<T> {
    pub(crate) index: usize,
    pub(crate) cost: T
}

impl<T: Ord> Ord for NodeId<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        other.cost.cmp(&self.cost)
            .then_with(|| other.index.cmp(&self.index))
    }
}
impl<T: Ord> PartialOrd for NodeId<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl<T: PartialEq> PartialEq for NodeId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost && self.index == other.index
    }
}
impl<T: PartialEq> Eq for NodeId<T> {}


#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    // Diamond-shaped graph: A -> B -> D and A -> C -> D
    fn create_test_graph() -> HashMap<String, Vec<(String, u32)>> {
        let mut graph = HashMap::new();
        
        graph.insert("A".to_string(), vec![
            ("B".to_string(), 1),
            ("C".to_string(), 3),
        ]);
        graph.insert("B".to_string(), vec![
            ("D".to_string(), 5),
        ]);
        graph.insert("C".to_string(), vec![
            ("D".to_string(), 1),
        ]);
        graph.insert("D".to_string(), vec![]);
        
        graph
    }
    
    fn create_neighbor_fn(graph: &HashMap<String, Vec<(String, u32)>>) -> impl Fn(&String) -> Vec<(String, u32)> + '_ {
        move |node: &String| {
            graph.get(node).cloned().unwrap_or_default()
        }
    }

    fn strings(nodes: &[&str]) -> Vec<String> {
        nodes.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_build_dijkstra_graph_simple() {
        let graph = create_test_graph();
        let neighbors = create_neighbor_fn(&graph);
        
        let (result, goal_index) = build_dijkstra_graph(
            "A".to_string(),
            neighbors,
            |node| node == "D"
        );
        
        let costs: HashMap<_, _> = result.iter().map(|(node, (_, cost))| (node.clone(), *cost)).collect();
        
        assert_eq!(costs["A"], 0);
        assert_eq!(costs["B"], 1);
        assert_eq!(costs["C"], 3);
        assert_eq!(costs["D"], 4); // via A->C->D
        assert_eq!(result.get_index_of("D"), goal_index);
    }
    
    #[test]
    fn test_build_dijkstra_graph_with_cycle() {
        // A -> B -> C -> A
        let mut graph = HashMap::new();
        graph.insert("A".to_string(), vec![("B".to_string(), 1)]);
        graph.insert("B".to_string(), vec![("C".to_string(), 1)]);
        graph.insert("C".to_string(), vec![("A".to_string(), 1), ("D".to_string(), 2)]);
        graph.insert("D".to_string(), vec![]);
        
        let neighbors = create_neighbor_fn(&graph);
        
        let (result, _) = build_dijkstra_graph(
            "A".to_string(),
            neighbors,
            |node| node == "D"
        );
        
        let costs: HashMap<_, _> = result.iter().map(|(node, (_, cost))| (node.clone(), *cost)).collect();
        
        assert_eq!(costs["A"], 0);
        assert_eq!(costs["B"], 1);
        assert_eq!(costs["C"], 2);
        assert_eq!(costs["D"], 4);
    }

    #[test]
    fn test_dijkstra_finds_optimal_path() {
        let graph = create_test_graph();
        let neighbors = create_neighbor_fn(&graph);
        
        let path = dijkstra("A".to_string(), neighbors, |node| node == "D");
        
        assert_eq!(path.nodes(), strings(&["A", "C", "D"]).as_slice());
        assert_eq!(path.cost(), Some(4));
    }

    #[test]
    fn test_dijkstra_goal_at_start() {
        let graph = create_test_graph();
        let neighbors = create_neighbor_fn(&graph);

        let path = dijkstra("A".to_string(), neighbors, |node| node == "A");

        assert_eq!(path.nodes(), strings(&["A"]).as_slice());
        assert_eq!(path.cost(), Some(0));
    }

    #[test]
    fn test_dijkstra_handles_unreachable_goal() {
        let mut graph = HashMap::new();
        graph.insert("A".to_string(), vec![("B".to_string(), 1)]);
        graph.insert("B".to_string(), vec![("C".to_string(), 1)]);
        graph.insert("C".to_string(), vec![]);
        graph.insert("D".to_string(), vec![]); // D is not connected
        
        let neighbors = create_neighbor_fn(&graph);
        
        let path = dijkstra("A".to_string(), neighbors, |node| node == "D");
        
        assert!(!path.is_found());
        assert_eq!(path.cost(), None);
        assert!(path.nodes().is_empty());
    }

    #[test]
    fn test_dijkstra_ties_settle_in_discovery_order() {
        // A -> B and A -> C both cost 1, either one satisfies the goal
        let neighbors = |node: &&str| -> Vec<(&str, u32)> {
            match *node {
                "A" => vec![("C", 1), ("B", 1)],
                _ => vec![],
            }
        };

        let path = dijkstra("A", neighbors, |node| *node != "A");
        assert_eq!(path.nodes(), &["A", "C"]);

        // same query, same answer
        let again = dijkstra("A", neighbors, |node| *node != "A");
        assert_eq!(path, again);
    }

    #[test]
    fn test_dijkstra_zero_weight_edges() {
        let neighbors = |node: &u8| -> Vec<(u8, u32)> {
            match node {
                0 => vec![(1, 0), (2, 5)],
                1 => vec![(2, 0)],
                _ => vec![],
            }
        };

        let path = dijkstra(0, neighbors, |node| *node == 2);
        assert_eq!(path.nodes(), &[0, 1, 2]);
        assert_eq!(path.cost(), Some(0));
    }

    #[test]
    fn test_dijkstra_distances_covers_reachable_nodes() {
        let mut graph = HashMap::new();
        graph.insert("A".to_string(), vec![("B".to_string(), 4), ("C".to_string(), 2)]);
        graph.insert("B".to_string(), vec![("C".to_string(), 1), ("D".to_string(), 5)]);
        graph.insert("C".to_string(), vec![("D".to_string(), 8), ("E".to_string(), 10)]);
        graph.insert("D".to_string(), vec![("E".to_string(), 2), ("F".to_string(), 6)]);
        graph.insert("E".to_string(), vec![("F".to_string(), 3)]);
        graph.insert("F".to_string(), vec![]);
        graph.insert("G".to_string(), vec![("A".to_string(), 1)]); // cannot be reached from A

        let distances = dijkstra_distances("A".to_string(), create_neighbor_fn(&graph));

        assert_eq!(distances.len(), 6);
        assert_eq!(distances.get_index(0), Some((&"A".to_string(), &0)));
        assert_eq!(distances["B"], 4);
        assert_eq!(distances["C"], 2);
        assert_eq!(distances["D"], 9);
        assert_eq!(distances["E"], 11);
        assert_eq!(distances["F"], 14);
        assert!(!distances.contains_key("G"));
    }

    #[test]
    fn test_dijkstra_complex_graph() {
        let mut graph = HashMap::new();
        graph.insert("A".to_string(), vec![("B".to_string(), 4), ("C".to_string(), 2)]);
        graph.insert("B".to_string(), vec![("C".to_string(), 1), ("D".to_string(), 5)]);
        graph.insert("C".to_string(), vec![("D".to_string(), 8), ("E".to_string(), 10)]);
        graph.insert("D".to_string(), vec![("E".to_string(), 2), ("F".to_string(), 6)]);
        graph.insert("E".to_string(), vec![("F".to_string(), 3)]);
        graph.insert("F".to_string(), vec![]);
        
        let path = dijkstra("A".to_string(), create_neighbor_fn(&graph), |node| node == "F");
        
        // A->B->D->E->F
        assert_eq!(path.cost(), Some(14));
        assert_eq!(path.nodes(), strings(&["A", "B", "D", "E", "F"]).as_slice());
    }
}
