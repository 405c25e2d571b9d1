/// Route returned by a shortest-path query
///
/// `nodes` runs from the start to the goal. A path that was not found has no nodes and no
/// cost, which keeps it distinct from the zero-cost path `[start]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path<N, C> {
    nodes: Vec<N>,
    cost: Option<C>,
}

impl<N, C: Copy> Path<N, C> {

    pub(crate) fn new(nodes: Vec<N>, cost: C) -> Self {
        Self { nodes, cost: Some(cost) }
    }

    /// The "no path" value
    pub fn not_found() -> Self {
        Self { nodes: Vec::new(), cost: None }
    }

    pub fn is_found(&self) -> bool {
        self.cost.is_some()
    }

    /// Total edge cost, `None` when no path was found
    pub fn cost(&self) -> Option<C> {
        self.cost
    }

    pub fn nodes(&self) -> &[N] {
        &self.nodes
    }

    pub fn into_nodes(self) -> Vec<N> {
        self.nodes
    }

    pub fn start(&self) -> Option<&N> {
        self.nodes.first()
    }

    pub fn goal(&self) -> Option<&N> {
        self.nodes.last()
    }

    /// Number of nodes on the path, including start and goal
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
