use fxhash::FxHashMap;
use tracing::debug;

use crate::{
    constants::MAX_WEIGHT,
    edge_direction::EdgeDirection,
    error::RoutingError,
    geopoint::GeoPoint,
    graph::Graph,
    types::{EdgeId, NodeId, Weight},
};

use super::{
    ch_edge::{CHBaseEdge, CHGraphEdge, Shortcut},
    ch_graph::CHGraph,
};

/// Collects nodes, edges, turn costs and shortcuts of a [`CHGraph`].
///
/// Shortcut weights are derived from the edges they skip, so turn costs must be added before the
/// shortcuts that depend on them.
pub struct CHGraphBuilder {
    graph: CHGraph,
}

impl Default for CHGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CHGraphBuilder {
    pub fn new() -> Self {
        CHGraphBuilder {
            graph: CHGraph {
                edges: Vec::new(),
                ranks: Vec::new(),
                geometry: Vec::new(),
                has_geometry: true,
                incoming_edges: Vec::new(),
                outgoing_edges: Vec::new(),
                turn_costs: FxHashMap::default(),
                u_turn_weight: MAX_WEIGHT,
            },
        }
    }

    /// Weight of turning back onto the edge a node was reached through, infinite by default.
    pub fn with_u_turn_weight(mut self, u_turn_weight: Weight) -> Self {
        self.graph.u_turn_weight = u_turn_weight;
        self
    }

    pub fn add_node(&mut self, rank: usize, geometry: Option<GeoPoint>) -> NodeId {
        let node = self.graph.ranks.len();

        self.graph.has_geometry &= geometry.is_some();
        self.graph.ranks.push(rank);
        self.graph.geometry.push(geometry);
        self.graph.incoming_edges.push(Vec::new());
        self.graph.outgoing_edges.push(Vec::new());

        node
    }

    /// Adds an original edge, an infinite weight closes that direction.
    pub fn add_edge(
        &mut self,
        start: NodeId,
        end: NodeId,
        forward_weight: Weight,
        backward_weight: Weight,
    ) -> Result<EdgeId, RoutingError> {
        self.check_node(start)?;
        self.check_node(end)?;

        let id = self.graph.edges.len();

        if forward_weight != MAX_WEIGHT {
            self.graph.outgoing_edges[start].push((id, EdgeDirection::Forward));
            self.graph.incoming_edges[end].push((id, EdgeDirection::Forward));
        }

        if backward_weight != MAX_WEIGHT {
            self.graph.incoming_edges[start].push((id, EdgeDirection::Backward));
            self.graph.outgoing_edges[end].push((id, EdgeDirection::Backward));
        }

        self.graph.edges.push(CHGraphEdge::Edge(CHBaseEdge {
            id,
            start,
            end,
            forward_weight,
            backward_weight,
        }));

        Ok(id)
    }

    /// Sets the weight of turning from `in_edge` into `out_edge` at `via`, infinite forbids it.
    pub fn add_turn_cost(
        &mut self,
        in_edge: EdgeId,
        via: NodeId,
        out_edge: EdgeId,
        weight: Weight,
    ) -> Result<(), RoutingError> {
        self.check_node(via)?;
        for edge in [in_edge, out_edge] {
            match self.graph.edges.get(edge) {
                Some(CHGraphEdge::Edge(_)) => {}
                _ => return Err(RoutingError::UnknownEdge(edge)),
            }
        }

        self.graph.turn_costs.insert((in_edge, via, out_edge), weight);
        Ok(())
    }

    /// Adds a shortcut from `start` to `end` replacing `incoming_edge` followed by
    /// `outgoing_edge`, both of which can be shortcuts themselves.
    pub fn add_shortcut(
        &mut self,
        start: NodeId,
        end: NodeId,
        incoming_edge: EdgeId,
        outgoing_edge: EdgeId,
    ) -> Result<EdgeId, RoutingError> {
        self.check_node(start)?;
        self.check_node(end)?;

        let invalid_shortcut = RoutingError::InvalidShortcut {
            first: incoming_edge,
            second: outgoing_edge,
        };

        let first = self
            .graph
            .edge(incoming_edge)
            .ok_or(RoutingError::UnknownEdge(incoming_edge))?
            .traversal_from(start)
            .ok_or(invalid_shortcut.clone())?;
        let second = self
            .graph
            .edge(outgoing_edge)
            .ok_or(RoutingError::UnknownEdge(outgoing_edge))?
            .traversal_from(first.head)
            .filter(|traversal| traversal.head == end)
            .ok_or(invalid_shortcut)?;

        let middle = first.head;
        let turn_weight =
            self.graph
                .turn_weight(first.last_edge_key, middle, second.first_edge_key);
        let weight = first.weight + turn_weight + second.weight;

        let id = self.graph.edges.len();
        self.graph.outgoing_edges[start].push((id, EdgeDirection::Forward));
        self.graph.incoming_edges[end].push((id, EdgeDirection::Forward));
        self.graph.edges.push(CHGraphEdge::Shortcut(Shortcut {
            id,
            start,
            end,
            middle,
            incoming_edge,
            outgoing_edge,
            weight,
            first_edge_key: first.first_edge_key,
            last_edge_key: second.last_edge_key,
        }));

        Ok(id)
    }

    pub fn node_count(&self) -> usize {
        self.graph.ranks.len()
    }

    /// Read access to the graph built so far.
    pub fn graph(&self) -> &CHGraph {
        &self.graph
    }

    pub fn build(self) -> CHGraph {
        debug!(
            nodes = self.graph.node_count(),
            edges = self.graph.edge_count(),
            shortcuts = self.graph.shortcut_count(),
            turn_costs = self.graph.turn_costs.len(),
            "Built CH graph"
        );

        self.graph
    }

    fn check_node(&self, node: NodeId) -> Result<(), RoutingError> {
        let node_count = self.node_count();
        if node >= node_count {
            return Err(RoutingError::NodeOutOfBounds { node, node_count });
        }

        Ok(())
    }
}
