use crate::graph::{Graph, NodeRank};

use super::{
    bidirectional_astar::BidirectionalAStar, search_options::SearchOptions,
    weight_approximator::ZeroApproximator,
};

pub struct BidirectionalDijkstra;

/// Dijkstra is simply a variant of A* with a zero approximator
impl BidirectionalDijkstra {
    #[allow(clippy::new_ret_no_self)]
    pub fn new<G>(graph: &G, options: SearchOptions) -> BidirectionalAStar<'_, G, ZeroApproximator>
    where
        G: Graph + NodeRank,
    {
        BidirectionalAStar::with_approximator(graph, ZeroApproximator, options)
    }
}
