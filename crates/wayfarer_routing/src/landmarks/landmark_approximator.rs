use crate::{
    constants::INVALID_NODE,
    routing::weight_approximator::WeightApproximator,
    types::{NodeId, Weight},
};

use super::lm_data::LMData;

/// ALT lower bounds from the triangle inequality over landmark weights.
///
/// For a landmark `L`, `d(v, t) >= d(L, t) - d(L, v)` and `d(v, t) >= d(v, L) - d(t, L)`. The
/// reverse approximator bounds `d(t, v)` the same way. Terms with an unreachable landmark are
/// skipped.
#[derive(Clone, Copy, Debug)]
pub struct LandmarkApproximator<'a> {
    lm: &'a LMData,
    to: NodeId,
    reverse: bool,
}

impl<'a> LandmarkApproximator<'a> {
    pub fn new(lm: &'a LMData) -> Self {
        LandmarkApproximator {
            lm,
            to: INVALID_NODE,
            reverse: false,
        }
    }

    fn landmark_bound(&self, landmark_index: usize, node: NodeId) -> Weight {
        let (from_node, to_node) = if self.reverse {
            (self.to, node)
        } else {
            (node, self.to)
        };

        // d(from, to) >= d(L, to) - d(L, from)
        let from_landmark = self.lm.weight_from_landmark(landmark_index, to_node)
            - self.lm.weight_from_landmark(landmark_index, from_node);

        // d(from, to) >= d(from, L) - d(to, L)
        let to_landmark = self.lm.weight_to_landmark(landmark_index, from_node)
            - self.lm.weight_to_landmark(landmark_index, to_node);

        [from_landmark, to_landmark]
            .into_iter()
            .filter(|bound| bound.is_finite())
            .fold(0.0, Weight::max)
    }
}

impl WeightApproximator for LandmarkApproximator<'_> {
    fn approximate(&self, node: NodeId) -> Weight {
        if self.to == INVALID_NODE {
            return 0.0;
        }

        (0..self.lm.num_landmarks())
            .map(|landmark_index| self.landmark_bound(landmark_index, node))
            .fold(0.0, Weight::max)
    }

    fn set_to(&mut self, to: NodeId) {
        self.to = to;
    }

    fn reverse(&self) -> Self {
        LandmarkApproximator {
            lm: self.lm,
            to: INVALID_NODE,
            reverse: !self.reverse,
        }
    }

    fn is_zero(&self) -> bool {
        self.lm.num_landmarks() == 0
    }
}
