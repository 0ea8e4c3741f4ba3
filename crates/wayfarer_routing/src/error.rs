use thiserror::Error;

use crate::{
    routing::search_state::SearchState,
    types::{EdgeId, NodeId, Weight},
};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RoutingError {
    #[error("Node {node} is out of bounds, graph has {node_count} nodes")]
    NodeOutOfBounds { node: NodeId, node_count: usize },
    #[error("Invalid start weight {0}, it must be finite and non-negative")]
    InvalidStartWeight(Weight),
    #[error("Search cannot run in state {0:?}, call init first")]
    NotReady(SearchState),
    #[error("Edge {0} does not exist")]
    UnknownEdge(EdgeId),
    #[error("Edges {first} and {second} do not form a shortcut through a common node")]
    InvalidShortcut { first: EdgeId, second: EdgeId },
    #[error("Edge {edge} cannot be traversed from node {node}")]
    DisconnectedPath { edge: EdgeId, node: NodeId },
}
