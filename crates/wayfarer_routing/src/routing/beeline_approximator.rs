use serde::{Deserialize, Serialize};

use crate::{
    constants::{DEFAULT_MAX_SPEED_KMH, INVALID_NODE},
    graph::GeometryAccess,
    types::{NodeId, Weight},
};

use super::weight_approximator::WeightApproximator;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeelineOptions {
    /// Highest speed any edge can be traveled at, weights are in seconds.
    pub max_speed_kmh: f64,
    /// Scales the estimate, values above 1 trade optimality for speed.
    pub epsilon: f64,
}

impl Default for BeelineOptions {
    fn default() -> Self {
        BeelineOptions {
            max_speed_kmh: DEFAULT_MAX_SPEED_KMH,
            epsilon: 1.0,
        }
    }
}

impl BeelineOptions {
    pub fn min_weight_per_meter(&self) -> f64 {
        3.6 / self.max_speed_kmh
    }
}

/// Straight line distance to the target times the smallest weight per meter.
///
/// Falls back to a zero estimate when the graph does not have coordinates for every node.
pub struct BeelineApproximator<'a, G>
where
    G: GeometryAccess,
{
    graph: &'a G,
    to: NodeId,
    min_weight_per_meter: f64,
    epsilon: f64,
    enabled: bool,
}

impl<'a, G> BeelineApproximator<'a, G>
where
    G: GeometryAccess,
{
    pub fn new(graph: &'a G, options: &BeelineOptions) -> Self {
        Self::with_min_weight_per_meter(graph, options.min_weight_per_meter(), options.epsilon)
    }

    pub fn with_min_weight_per_meter(graph: &'a G, min_weight_per_meter: f64, epsilon: f64) -> Self {
        BeelineApproximator {
            graph,
            to: INVALID_NODE,
            min_weight_per_meter,
            epsilon,
            enabled: graph.has_geometry(),
        }
    }
}

impl<G> WeightApproximator for BeelineApproximator<'_, G>
where
    G: GeometryAccess,
{
    fn approximate(&self, node: NodeId) -> Weight {
        if !self.enabled || self.to == INVALID_NODE {
            return 0.0;
        }

        match (
            self.graph.node_geometry(node),
            self.graph.node_geometry(self.to),
        ) {
            (Some(point), Some(to_point)) => {
                point.plane_distance(to_point) * self.min_weight_per_meter * self.epsilon
            }
            _ => 0.0,
        }
    }

    fn set_to(&mut self, to: NodeId) {
        self.to = to;
    }

    fn reverse(&self) -> Self {
        BeelineApproximator {
            graph: self.graph,
            to: INVALID_NODE,
            min_weight_per_meter: self.min_weight_per_meter,
            epsilon: self.epsilon,
            enabled: self.enabled,
        }
    }

    fn is_zero(&self) -> bool {
        !self.enabled
    }
}
