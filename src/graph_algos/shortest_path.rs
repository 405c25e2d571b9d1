use crate::graph::Path;
use super::{GraphNodeMap, NO_PARENT};

/// Construct the shortest path from the goal node to the start node
/// Returns the ordered path from start to goal, carrying the goal's cost
/// node_map: GraphNodeMap<N, C> - map of nodes with their parent index and cost
/// goal_index: usize - index of the goal node in the node_map
pub(crate) fn shortest_path<N, C>(node_map: &GraphNodeMap<N, C>, goal_index: usize) -> Path<N, C>
where
    N: Clone,
    C: Copy,
{
    let Some((_, &(_, cost))) = node_map.get_index(goal_index) else {
        return Path::not_found();
    };

    let mut nodes = Vec::new();
    let mut current_index = goal_index;

    // Trace back from goal to start
    while current_index != NO_PARENT {
        match node_map.get_index(current_index) {
            Some((node, &(parent_index, _))) => {
                nodes.push(node.clone());
                current_index = parent_index;
            }
            None => return Path::not_found(),
        }
    }

    // The path is in reverse order, so reverse it
    nodes.reverse();

    Path::new(nodes, cost)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reconstructs_from_parent_indices() {
        let mut node_map: GraphNodeMap<&str, u32> = GraphNodeMap::default();
        let a = node_map.insert_full("A", (NO_PARENT, 0)).0;
        let b = node_map.insert_full("B", (a, 1)).0;
        let c = node_map.insert_full("C", (a, 3)).0;
        let d = node_map.insert_full("D", (c, 4)).0;

        let to_d = shortest_path(&node_map, d);
        assert_eq!(to_d.nodes(), &["A", "C", "D"]);
        assert_eq!(to_d.cost(), Some(4));

        let to_b = shortest_path(&node_map, b);
        assert_eq!(to_b.nodes(), &["A", "B"]);
        assert_eq!(to_b.cost(), Some(1));
    }

    #[test]
    fn test_start_only_path() {
        let mut node_map: GraphNodeMap<&str, u32> = GraphNodeMap::default();
        let a = node_map.insert_full("A", (NO_PARENT, 0)).0;

        let path = shortest_path(&node_map, a);
        assert_eq!(path.nodes(), &["A"]);
        assert_eq!(path.cost(), Some(0));
    }

    #[test]
    fn test_out_of_range_goal_is_not_found() {
        let node_map: GraphNodeMap<&str, u32> = GraphNodeMap::default();
        assert!(!shortest_path(&node_map, 3).is_found());
    }
}
