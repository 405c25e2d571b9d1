mod path;

pub use path::Path;

use crate::collections::{FxIndexMap, FxIndexSet};
use crate::errors::GraphError;
use crate::graph_algos::{a_star::a_star, all_shortest_paths::all_nodes_on_any_shortest_path, dijkstra::{dijkstra, dijkstra_distances}};

use std::{fmt::Debug, hash::Hash};
use num_traits::Zero;
use log::debug;


/// Vertex of a `Graph` with its outgoing weighted edges
#[derive(Debug, Clone)]
pub struct Node<N, C> {
    id: N,
    neighbors: FxIndexMap<N, C>, // neighbor id -> edge weight, in insertion order
}

impl<N: Eq + Hash, C: Copy> Node<N, C> {

    fn new(id: N) -> Self {
        Self { id, neighbors: FxIndexMap::default() }
    }

    pub fn id(&self) -> &N {
        &self.id
    }

    /// Outgoing edges as (neighbor, weight), in the order they were added
    pub fn neighbors(&self) -> impl Iterator<Item = (&N, &C)> {
        self.neighbors.iter()
    }

    pub fn weight_to(&self, neighbor: &N) -> Option<C> {
        self.neighbors.get(neighbor).copied()
    }

    pub fn degree(&self) -> usize {
        self.neighbors.len()
    }
}


/// Weighted graph keyed by an arbitrary id
/// N: node id - integers, strings, or small structs such as (cell, facing)
/// C: edge cost, must never be negative
#[derive(Debug, Clone)]
pub struct Graph<N, C = u64> {
    nodes: FxIndexMap<N, Node<N, C>>,
}

impl<N, C> Default for Graph<N, C> {
    fn default() -> Self {
        Self { nodes: FxIndexMap::default() }
    }
}

impl<N, C> Graph<N, C>
where
    N: Eq + Hash + Clone + Debug,
    C: Zero + Ord + Copy + Debug,
{

    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node without edges
    /// Returns false and leaves the existing node untouched if the id is already present
    pub fn add_node(&mut self, id: N) -> bool {
        if self.nodes.contains_key(&id) {
            return false;
        }
        self.nodes.insert(id.clone(), Node::new(id));
        true
    }

    /// Add an undirected edge, i.e. `a -> b` and `b -> a` with the same weight
    /// Adding an existing edge again overwrites its weight
    pub fn add_edge(&mut self, a: &N, b: &N, weight: C) -> Result<(), GraphError> {
        self.check_edge(a, b, weight)?;
        self.link(a, b, weight);
        self.link(b, a, weight);
        Ok(())
    }

    /// Add an edge from `from` to `to` only
    pub fn add_directed_edge(&mut self, from: &N, to: &N, weight: C) -> Result<(), GraphError> {
        self.check_edge(from, to, weight)?;
        self.link(from, to, weight);
        Ok(())
    }

    fn check_edge(&self, from: &N, to: &N, weight: C) -> Result<(), GraphError> {
        if weight < C::zero() {
            return Err(GraphError::NegativeWeight(format!("{weight:?}")));
        }
        for id in [from, to] {
            if !self.nodes.contains_key(id) {
                return Err(GraphError::UnknownNode(format!("{id:?}")));
            }
        }
        Ok(())
    }

    // endpoints are checked by the caller
    fn link(&mut self, from: &N, to: &N, weight: C) {
        if let Some(node) = self.nodes.get_mut(from) {
            node.neighbors.insert(to.clone(), weight);
        }
    }

    pub fn get_node(&self, id: &N) -> Result<&Node<N, C>, GraphError> {
        self.nodes
            .get(id)
            .ok_or_else(|| GraphError::UnknownNode(format!("{id:?}")))
    }

    pub fn has_node(&self, id: &N) -> bool {
        self.nodes.contains_key(id)
    }

    /// Remove a node together with every edge pointing at it
    /// The order of the remaining nodes and edges is preserved
    pub fn remove_node(&mut self, id: &N) -> Option<Node<N, C>> {
        let removed = self.nodes.shift_remove(id)?;

        let mut dropped_edges = 0usize;
        for node in self.nodes.values_mut() {
            if node.neighbors.shift_remove(id).is_some() {
                dropped_edges += 1;
            }
        }

        debug!("removed node {:?} and {} incoming edges", id, dropped_edges);
        Some(removed)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node ids in insertion order
    pub fn node_ids(&self) -> impl Iterator<Item = &N> {
        self.nodes.keys()
    }

    /// Number of directed edge entries - an undirected edge counts twice
    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(Node::degree).sum()
    }

    /// Outgoing edges of `id` as owned (neighbor, weight) pairs
    /// Unknown ids have no neighbors
    pub fn neighbors<'a>(&'a self, id: &N) -> impl Iterator<Item = (N, C)> + use<'a, N, C> {
        self.nodes
            .get(id)
            .into_iter()
            .flat_map(|node| node.neighbors.iter().map(|(neighbor, &weight)| (neighbor.clone(), weight)))
    }

    fn check_start(&self, start: &N) -> Result<(), GraphError> {
        if self.nodes.contains_key(start) {
            Ok(())
        } else {
            Err(GraphError::UnknownStart(format!("{start:?}")))
        }
    }

    /// Lowest-cost path from `start` to the first node meeting `goal`
    /// `Ok(Path::not_found())` when no goal node is reachable
    pub fn shortest_path<G>(&self, start: &N, goal: G) -> Result<Path<N, C>, GraphError>
    where
        G: Fn(&N) -> bool,
    {
        self.check_start(start)?;
        Ok(dijkstra(start.clone(), |id: &N| self.neighbors(id), goal))
    }

    /// Every node used by some lowest-cost path from `start` to the nearest goal node(s)
    /// Empty when no goal node is reachable
    pub fn all_nodes_on_any_shortest_path<G>(&self, start: &N, goal: G) -> Result<FxIndexSet<N>, GraphError>
    where
        G: Fn(&N) -> bool,
    {
        self.check_start(start)?;
        Ok(all_nodes_on_any_shortest_path(start.clone(), |id: &N| self.neighbors(id), goal))
    }

    /// Settled cost of every node reachable from `start`
    pub fn distances_from(&self, start: &N) -> Result<FxIndexMap<N, C>, GraphError> {
        self.check_start(start)?;
        Ok(dijkstra_distances(start.clone(), |id: &N| self.neighbors(id)))
    }

    /// `shortest_path` guided by a heuristic estimate of the remaining cost
    /// The heuristic must never overestimate, see `graph_algos::a_star`
    pub fn shortest_path_with_heuristic<H, G>(&self, start: &N, heuristic: H, goal: G) -> Result<Path<N, C>, GraphError>
    where
        H: Fn(&N) -> C,
        G: Fn(&N) -> bool,
    {
        self.check_start(start)?;
        Ok(a_star(start.clone(), |id: &N| self.neighbors(id), heuristic, goal))
    }
}
