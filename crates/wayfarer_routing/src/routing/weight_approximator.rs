use crate::types::{NodeId, Weight};

/// A one-directional lower bound of the weight from a node to a target node.
pub trait WeightApproximator {
    /// Estimated weight from `node` to the configured target.
    fn approximate(&self, node: NodeId) -> Weight;

    fn set_to(&mut self, to: NodeId);

    /// An approximator for the reversed graph, estimating the weight from the target to a node.
    fn reverse(&self) -> Self
    where
        Self: Sized;

    /// Whether the estimate is zero for every node.
    fn is_zero(&self) -> bool {
        false
    }
}

/// Turns an A* search into a Dijkstra search.
#[derive(Clone, Copy, Debug, Default)]
pub struct ZeroApproximator;

impl WeightApproximator for ZeroApproximator {
    #[inline(always)]
    fn approximate(&self, _node: NodeId) -> Weight {
        0.0
    }

    fn set_to(&mut self, _to: NodeId) {}

    fn reverse(&self) -> Self {
        ZeroApproximator
    }

    fn is_zero(&self) -> bool {
        true
    }
}
