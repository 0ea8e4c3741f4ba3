use std::slice;

use fxhash::FxHashMap;

use crate::{
    constants::NO_EDGE_KEY,
    edge_direction::{EdgeDirection, direction_from_key, edge_id_from_key},
    error::RoutingError,
    geopoint::GeoPoint,
    graph::{EdgeState, GeometryAccess, Graph, NodeRank, UnfoldEdge},
    routing::search_direction::SearchDirection,
    types::{EdgeId, EdgeKey, NodeId, Weight},
};

use super::ch_edge::CHGraphEdge;

/// In-memory contraction hierarchy: original edges, shortcuts, node ranks and turn costs.
///
/// Built with [`CHGraphBuilder`](super::ch_graph_builder::CHGraphBuilder).
#[derive(Debug)]
pub struct CHGraph {
    pub(super) edges: Vec<CHGraphEdge>,
    pub(super) ranks: Vec<usize>,
    pub(super) geometry: Vec<Option<GeoPoint>>,
    pub(super) has_geometry: bool,

    /// For each node, the edges that can be traveled into this node
    pub(super) incoming_edges: Vec<Vec<(EdgeId, EdgeDirection)>>,

    /// For each node, the edges that can be traveled from this node
    pub(super) outgoing_edges: Vec<Vec<(EdgeId, EdgeDirection)>>,

    /// Turn weights by `(in_edge, via_node, out_edge)`
    pub(super) turn_costs: FxHashMap<(EdgeId, NodeId, EdgeId), Weight>,
    pub(super) u_turn_weight: Weight,
}

impl CHGraph {
    pub fn edge(&self, edge_id: EdgeId) -> Option<&CHGraphEdge> {
        self.edges.get(edge_id)
    }

    pub fn shortcut_count(&self) -> usize {
        self.edges.iter().filter(|edge| edge.is_shortcut()).count()
    }

    pub fn u_turn_weight(&self) -> Weight {
        self.u_turn_weight
    }
}

pub struct CHEdgeIterator<'a> {
    graph: &'a CHGraph,
    direction: SearchDirection,
    edges: slice::Iter<'a, (EdgeId, EdgeDirection)>,
}

impl Iterator for CHEdgeIterator<'_> {
    type Item = EdgeState;

    fn next(&mut self) -> Option<Self::Item> {
        for &(edge_id, edge_direction) in self.edges.by_ref() {
            let edge = &self.graph.edges[edge_id];
            let Some(traversal) = edge.traversal(edge_direction) else {
                continue;
            };

            let (base_node, adj_node) = match self.direction {
                SearchDirection::Forward => (traversal.tail, traversal.head),
                SearchDirection::Backward => (traversal.head, traversal.tail),
            };

            return Some(EdgeState {
                edge: edge_id,
                base_node,
                adj_node,
                weight: traversal.weight,
                first_edge_key: traversal.first_edge_key,
                last_edge_key: traversal.last_edge_key,
                shortcut: edge.is_shortcut(),
            });
        }

        None
    }
}

impl Graph for CHGraph {
    type EdgeIterator<'a> = CHEdgeIterator<'a>;

    fn node_count(&self) -> usize {
        self.ranks.len()
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn edges(&self, node: NodeId, direction: SearchDirection) -> Self::EdgeIterator<'_> {
        let edges = match direction {
            SearchDirection::Forward => &self.outgoing_edges[node],
            SearchDirection::Backward => &self.incoming_edges[node],
        };

        CHEdgeIterator {
            graph: self,
            direction,
            edges: edges.iter(),
        }
    }

    fn turn_weight(&self, in_key: EdgeKey, via: NodeId, out_key: EdgeKey) -> Weight {
        if in_key == NO_EDGE_KEY || out_key == NO_EDGE_KEY {
            return 0.0;
        }

        let in_edge = edge_id_from_key(in_key);
        let out_edge = edge_id_from_key(out_key);

        match self.turn_costs.get(&(in_edge, via, out_edge)) {
            Some(&weight) => weight,
            None if in_edge == out_edge => self.u_turn_weight,
            None => 0.0,
        }
    }
}

impl NodeRank for CHGraph {
    fn node_rank(&self, node: NodeId) -> usize {
        self.ranks[node]
    }
}

impl GeometryAccess for CHGraph {
    fn node_geometry(&self, node: NodeId) -> Option<&GeoPoint> {
        self.geometry.get(node).and_then(|point| point.as_ref())
    }

    fn has_geometry(&self) -> bool {
        self.has_geometry
    }
}

impl UnfoldEdge for CHGraph {
    fn unfold_edge(
        &self,
        edge: EdgeId,
        from_node: NodeId,
        edge_keys: &mut Vec<EdgeKey>,
    ) -> Result<NodeId, RoutingError> {
        let ch_edge = self.edge(edge).ok_or(RoutingError::UnknownEdge(edge))?;
        let traversal = ch_edge
            .traversal_from(from_node)
            .ok_or(RoutingError::DisconnectedPath {
                edge,
                node: from_node,
            })?;

        match ch_edge {
            CHGraphEdge::Shortcut(shortcut) => {
                let middle = self.unfold_edge(shortcut.incoming_edge, from_node, edge_keys)?;
                self.unfold_edge(shortcut.outgoing_edge, middle, edge_keys)
            }
            CHGraphEdge::Edge(_) => {
                edge_keys.push(traversal.first_edge_key);
                Ok(traversal.head)
            }
        }
    }

    fn original_edge_state(&self, key: EdgeKey) -> Option<EdgeState> {
        if key == NO_EDGE_KEY {
            return None;
        }

        let edge_id = edge_id_from_key(key);
        let edge = self.edge(edge_id).filter(|edge| !edge.is_shortcut())?;
        let traversal = edge.traversal(direction_from_key(key))?;

        Some(EdgeState {
            edge: edge_id,
            base_node: traversal.tail,
            adj_node: traversal.head,
            weight: traversal.weight,
            first_edge_key: key,
            last_edge_key: key,
            shortcut: false,
        })
    }
}
