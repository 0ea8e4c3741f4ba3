use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context;
use serde::Deserialize;
use wayfarer_routing::{
    ch::{ch_graph::CHGraph, ch_graph_builder::CHGraphBuilder},
    constants::MAX_WEIGHT,
    geopoint::GeoPoint,
    types::{EdgeId, NodeId, Weight},
};

#[derive(Deserialize, Debug)]
pub struct JsonNode {
    #[serde(default)]
    pub rank: usize,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

/// A missing or null weight closes that direction.
#[derive(Deserialize, Debug)]
pub struct JsonEdge {
    pub start: NodeId,
    pub end: NodeId,
    pub forward_weight: Option<Weight>,
    pub backward_weight: Option<Weight>,
}

/// Shortcut ids follow the edge ids, in the order they are listed.
#[derive(Deserialize, Debug)]
pub struct JsonShortcut {
    pub start: NodeId,
    pub end: NodeId,
    pub incoming_edge: EdgeId,
    pub outgoing_edge: EdgeId,
}

/// A missing or null weight forbids the turn.
#[derive(Deserialize, Debug)]
pub struct JsonTurnCost {
    pub in_edge: EdgeId,
    pub via: NodeId,
    pub out_edge: EdgeId,
    pub weight: Option<Weight>,
}

#[derive(Deserialize, Debug)]
pub struct JsonNetwork {
    pub nodes: Vec<JsonNode>,
    pub edges: Vec<JsonEdge>,
    #[serde(default)]
    pub shortcuts: Vec<JsonShortcut>,
    #[serde(default)]
    pub turn_costs: Vec<JsonTurnCost>,
    pub u_turn_weight: Option<Weight>,
}

impl JsonNetwork {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let file = File::open(path).with_context(|| format!("Cannot open {}", path.display()))?;
        let network = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Invalid network in {}", path.display()))?;

        Ok(network)
    }

    pub fn build(&self) -> anyhow::Result<CHGraph> {
        let mut builder =
            CHGraphBuilder::new().with_u_turn_weight(self.u_turn_weight.unwrap_or(MAX_WEIGHT));

        for node in self.nodes.iter() {
            let geometry = match (node.lat, node.lng) {
                (Some(lat), Some(lng)) => Some(GeoPoint::new(lat, lng)),
                _ => None,
            };
            builder.add_node(node.rank, geometry);
        }

        for (index, edge) in self.edges.iter().enumerate() {
            builder
                .add_edge(
                    edge.start,
                    edge.end,
                    edge.forward_weight.unwrap_or(MAX_WEIGHT),
                    edge.backward_weight.unwrap_or(MAX_WEIGHT),
                )
                .with_context(|| format!("Invalid edge {index}"))?;
        }

        for turn_cost in self.turn_costs.iter() {
            builder
                .add_turn_cost(
                    turn_cost.in_edge,
                    turn_cost.via,
                    turn_cost.out_edge,
                    turn_cost.weight.unwrap_or(MAX_WEIGHT),
                )
                .with_context(|| {
                    format!(
                        "Invalid turn cost {} -> {} -> {}",
                        turn_cost.in_edge, turn_cost.via, turn_cost.out_edge
                    )
                })?;
        }

        for (index, shortcut) in self.shortcuts.iter().enumerate() {
            builder
                .add_shortcut(
                    shortcut.start,
                    shortcut.end,
                    shortcut.incoming_edge,
                    shortcut.outgoing_edge,
                )
                .with_context(|| format!("Invalid shortcut {index}"))?;
        }

        Ok(builder.build())
    }
}
