use thiserror::Error;


/// Caller contract violations when building or querying a graph
/// "No path" is never reported here - see `Path::not_found`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("node {0} is not in the graph")]
    UnknownNode(String), // edge endpoint or lookup id missing
    #[error("start node {0} is not in the graph")]
    UnknownStart(String), // query issued from a missing node
    #[error("edge weight {0} is negative")]
    NegativeWeight(String),
}
