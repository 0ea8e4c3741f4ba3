use crate::{
    constants::INVALID_NODE,
    types::{NodeId, Weight},
};

use super::{search_direction::SearchDirection, weight_approximator::WeightApproximator};

/// Makes a one-directional approximator usable by both searches of a bidirectional A*.
///
/// With `h_t` the estimate towards `to` and `h_s` the estimate from `from`, the forward search uses
/// `π_f(v) = (h_t(v) - h_s(v)) / 2 + h_s(to) / 2` and the backward search
/// `π_b(v) = (h_s(v) - h_t(v)) / 2 + h_t(from) / 2`.
///
/// `π_f(v) + π_b(v)` is the same for every node, which the stopping test of the bidirectional
/// search relies on. Both stay consistent when `h_t` and `h_s` are, and vanish at their target.
pub struct ConsistentWeightApproximator<A>
where
    A: WeightApproximator,
{
    forward: A,
    reverse: A,
    from: NodeId,
    to: NodeId,
    forward_offset: Weight,
    backward_offset: Weight,
}

impl<A> ConsistentWeightApproximator<A>
where
    A: WeightApproximator,
{
    pub fn new(approximator: A) -> Self {
        let reverse = approximator.reverse();
        ConsistentWeightApproximator {
            forward: approximator,
            reverse,
            from: INVALID_NODE,
            to: INVALID_NODE,
            forward_offset: 0.0,
            backward_offset: 0.0,
        }
    }

    pub fn set_from(&mut self, from: NodeId) {
        self.from = from;
        self.reverse.set_to(from);
        self.update_offsets();
    }

    pub fn set_to(&mut self, to: NodeId) {
        self.to = to;
        self.forward.set_to(to);
        self.update_offsets();
    }

    pub fn approximate(&self, node: NodeId, direction: SearchDirection) -> Weight {
        let half_difference =
            0.5 * (self.forward.approximate(node) - self.reverse.approximate(node));

        match direction {
            SearchDirection::Forward => half_difference + self.forward_offset,
            SearchDirection::Backward => -half_difference + self.backward_offset,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.forward.is_zero()
    }

    /// The wrapped approximator estimating towards `to`.
    pub fn approximator(&self) -> &A {
        &self.forward
    }

    fn update_offsets(&mut self) {
        if self.from == INVALID_NODE || self.to == INVALID_NODE {
            self.forward_offset = 0.0;
            self.backward_offset = 0.0;
            return;
        }

        self.forward_offset = 0.5 * self.reverse.approximate(self.to);
        self.backward_offset = 0.5 * self.forward.approximate(self.from);
    }
}
