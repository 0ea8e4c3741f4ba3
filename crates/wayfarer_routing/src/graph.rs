use crate::{
    error::RoutingError,
    geopoint::GeoPoint,
    routing::search_direction::SearchDirection,
    types::{EdgeId, EdgeKey, NodeId, Weight},
};

/// One traversal of a CH edge or shortcut, seen from the node a search is expanding.
///
/// `base_node` is the node being expanded and `adj_node` the neighbor. For a backward search the
/// real travel direction is `adj_node -> base_node`. The original edge keys always follow the real
/// travel direction: `first_edge_key` leaves the tail, `last_edge_key` enters the head.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeState {
    pub edge: EdgeId,
    pub base_node: NodeId,
    pub adj_node: NodeId,
    pub weight: Weight,
    pub first_edge_key: EdgeKey,
    pub last_edge_key: EdgeKey,
    pub shortcut: bool,
}

pub trait Graph {
    type EdgeIterator<'a>: Iterator<Item = EdgeState>
    where
        Self: 'a;

    fn node_count(&self) -> usize;

    fn edge_count(&self) -> usize;

    /// Outgoing edges of `node` for [`SearchDirection::Forward`], incoming edges for
    /// [`SearchDirection::Backward`]. Weights are those of the real travel direction.
    fn edges(&self, node: NodeId, direction: SearchDirection) -> Self::EdgeIterator<'_>;

    /// Cost of turning from the original edge `in_key` into `out_key` at `via`.
    ///
    /// An infinite weight is a turn restriction.
    fn turn_weight(&self, _in_key: EdgeKey, _via: NodeId, _out_key: EdgeKey) -> Weight {
        0.0
    }
}

pub trait NodeRank {
    fn node_rank(&self, node: NodeId) -> usize;
}

pub trait GeometryAccess {
    fn node_geometry(&self, node: NodeId) -> Option<&GeoPoint>;

    /// Whether every node has coordinates.
    fn has_geometry(&self) -> bool;
}

pub trait UnfoldEdge {
    /// Expands `edge`, traversed from `from_node`, into original edge keys in travel order.
    ///
    /// Returns the node the traversal ends at.
    fn unfold_edge(
        &self,
        edge: EdgeId,
        from_node: NodeId,
        edge_keys: &mut Vec<EdgeKey>,
    ) -> Result<NodeId, RoutingError>;

    /// The original edge behind `key`, in its travel direction.
    fn original_edge_state(&self, key: EdgeKey) -> Option<EdgeState>;
}
