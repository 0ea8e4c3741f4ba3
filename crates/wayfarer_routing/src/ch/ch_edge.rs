use serde::{Deserialize, Serialize};

use crate::{
    edge_direction::{EdgeDirection, edge_key},
    types::{EdgeId, EdgeKey, NodeId, Weight},
};

/// An edge of the road network, traversable in zero, one or both directions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CHBaseEdge {
    pub id: EdgeId,
    pub start: NodeId,
    pub end: NodeId,

    pub forward_weight: Weight,
    pub backward_weight: Weight,
}

/// A directed edge replacing the two edges around a contracted node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shortcut {
    pub id: EdgeId,
    pub start: NodeId,
    pub end: NodeId,

    /// The contracted node.
    pub middle: NodeId,

    /// Skipped edge incoming to the contracted node
    pub incoming_edge: EdgeId,

    /// Skipped edge outgoing from the contracted node
    pub outgoing_edge: EdgeId,

    /// Weight of both skipped edges and of the turn between them.
    pub weight: Weight,

    pub first_edge_key: EdgeKey,
    pub last_edge_key: EdgeKey,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CHGraphEdge {
    Shortcut(Shortcut),
    Edge(CHBaseEdge),
}

/// A CH edge traversed in one orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct EdgeTraversal {
    pub tail: NodeId,
    pub head: NodeId,
    pub weight: Weight,
    pub first_edge_key: EdgeKey,
    pub last_edge_key: EdgeKey,
}

impl CHGraphEdge {
    pub fn id(&self) -> EdgeId {
        match self {
            CHGraphEdge::Shortcut(shortcut) => shortcut.id,
            CHGraphEdge::Edge(edge) => edge.id,
        }
    }

    pub fn start_node(&self) -> NodeId {
        match self {
            CHGraphEdge::Shortcut(shortcut) => shortcut.start,
            CHGraphEdge::Edge(edge) => edge.start,
        }
    }

    pub fn end_node(&self) -> NodeId {
        match self {
            CHGraphEdge::Shortcut(shortcut) => shortcut.end,
            CHGraphEdge::Edge(edge) => edge.end,
        }
    }

    pub fn is_shortcut(&self) -> bool {
        matches!(self, CHGraphEdge::Shortcut(_))
    }

    /// The edge in `direction`, shortcuts only exist forward.
    pub(crate) fn traversal(&self, direction: EdgeDirection) -> Option<EdgeTraversal> {
        match (self, direction) {
            (CHGraphEdge::Shortcut(shortcut), EdgeDirection::Forward) => Some(EdgeTraversal {
                tail: shortcut.start,
                head: shortcut.end,
                weight: shortcut.weight,
                first_edge_key: shortcut.first_edge_key,
                last_edge_key: shortcut.last_edge_key,
            }),
            (CHGraphEdge::Shortcut(_), EdgeDirection::Backward) => None,
            (CHGraphEdge::Edge(edge), EdgeDirection::Forward) => Some(EdgeTraversal {
                tail: edge.start,
                head: edge.end,
                weight: edge.forward_weight,
                first_edge_key: edge_key(edge.id, direction),
                last_edge_key: edge_key(edge.id, direction),
            }),
            (CHGraphEdge::Edge(edge), EdgeDirection::Backward) => Some(EdgeTraversal {
                tail: edge.end,
                head: edge.start,
                weight: edge.backward_weight,
                first_edge_key: edge_key(edge.id, direction),
                last_edge_key: edge_key(edge.id, direction),
            }),
        }
    }

    /// The edge traversed from `node`, forward first.
    pub(crate) fn traversal_from(&self, node: NodeId) -> Option<EdgeTraversal> {
        [EdgeDirection::Forward, EdgeDirection::Backward]
            .into_iter()
            .filter_map(|direction| self.traversal(direction))
            .find(|traversal| traversal.tail == node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_traversals() {
        let edge = CHGraphEdge::Edge(CHBaseEdge {
            id: 3,
            start: 1,
            end: 2,
            forward_weight: 5.0,
            backward_weight: 7.0,
        });

        let forward = edge.traversal_from(1).unwrap();
        assert_eq!((forward.tail, forward.head, forward.weight), (1, 2, 5.0));
        assert_eq!(forward.first_edge_key, edge_key(3, EdgeDirection::Forward));

        let backward = edge.traversal_from(2).unwrap();
        assert_eq!((backward.tail, backward.head, backward.weight), (2, 1, 7.0));
        assert_eq!(backward.last_edge_key, edge_key(3, EdgeDirection::Backward));

        assert!(edge.traversal_from(4).is_none());
    }

    #[test]
    fn test_shortcut_is_directed() {
        let shortcut = CHGraphEdge::Shortcut(Shortcut {
            id: 8,
            start: 1,
            end: 3,
            middle: 2,
            incoming_edge: 0,
            outgoing_edge: 1,
            weight: 4.0,
            first_edge_key: 0,
            last_edge_key: 2,
        });

        assert!(shortcut.is_shortcut());
        assert!(shortcut.traversal_from(1).is_some());
        assert!(shortcut.traversal_from(3).is_none());
    }
}
