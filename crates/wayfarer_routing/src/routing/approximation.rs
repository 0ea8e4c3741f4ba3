use crate::{
    graph::GeometryAccess,
    landmarks::landmark_approximator::LandmarkApproximator,
    types::{NodeId, Weight},
};

use super::{
    beeline_approximator::BeelineApproximator,
    weight_approximator::{WeightApproximator, ZeroApproximator},
};

/// Approximator picked at runtime, e.g. from a command line flag.
pub enum Approximation<'a, G>
where
    G: GeometryAccess,
{
    Zero(ZeroApproximator),
    Beeline(BeelineApproximator<'a, G>),
    Landmarks(LandmarkApproximator<'a>),
}

impl<G> Approximation<'_, G>
where
    G: GeometryAccess,
{
    pub fn name(&self) -> &'static str {
        match self {
            Approximation::Zero(_) => "zero",
            Approximation::Beeline(_) => "beeline",
            Approximation::Landmarks(_) => "landmarks",
        }
    }
}

impl<G> WeightApproximator for Approximation<'_, G>
where
    G: GeometryAccess,
{
    fn approximate(&self, node: NodeId) -> Weight {
        match self {
            Approximation::Zero(approximator) => approximator.approximate(node),
            Approximation::Beeline(approximator) => approximator.approximate(node),
            Approximation::Landmarks(approximator) => approximator.approximate(node),
        }
    }

    fn set_to(&mut self, to: NodeId) {
        match self {
            Approximation::Zero(approximator) => approximator.set_to(to),
            Approximation::Beeline(approximator) => approximator.set_to(to),
            Approximation::Landmarks(approximator) => approximator.set_to(to),
        }
    }

    fn reverse(&self) -> Self {
        match self {
            Approximation::Zero(approximator) => Approximation::Zero(approximator.reverse()),
            Approximation::Beeline(approximator) => Approximation::Beeline(approximator.reverse()),
            Approximation::Landmarks(approximator) => {
                Approximation::Landmarks(approximator.reverse())
            }
        }
    }

    fn is_zero(&self) -> bool {
        match self {
            Approximation::Zero(approximator) => approximator.is_zero(),
            Approximation::Beeline(approximator) => approximator.is_zero(),
            Approximation::Landmarks(approximator) => approximator.is_zero(),
        }
    }
}
