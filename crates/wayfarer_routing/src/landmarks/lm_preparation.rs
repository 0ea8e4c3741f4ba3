use std::{cmp::Ordering, collections::BinaryHeap};

use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use tracing::{debug, info};

use crate::{
    constants::MAX_WEIGHT,
    graph::Graph,
    routing::search_direction::SearchDirection,
    stopwatch::Stopwatch,
    types::{NodeId, Weight},
};

use super::lm_data::{LMData, Landmark};

#[derive(Copy, Clone, Debug)]
struct HeapItem {
    node_id: NodeId,
    weight: Weight,
}

impl PartialEq for HeapItem {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapItem {}

impl PartialOrd for HeapItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapItem {
    fn cmp(&self, other: &Self) -> Ordering {
        // Flip weight to make this a min-heap
        other
            .weight
            .total_cmp(&self.weight)
            .then_with(|| self.node_id.cmp(&other.node_id))
    }
}

/// Picks landmarks far away from each other and computes their weight tables.
///
/// Weights ignore turn costs, which keeps them lower bounds for edge-based searches.
pub struct LMPreparation<'a, G>
where
    G: Graph,
{
    graph: &'a G,
}

impl<'a, G> LMPreparation<'a, G>
where
    G: Graph + Sync,
{
    pub fn new(graph: &'a G) -> Self {
        Self { graph }
    }

    pub fn create_landmarks(&self, num_landmarks: usize) -> LMData {
        let stopwatch = Stopwatch::new("lm_preparation/create_landmarks");
        info!("Start LM preparation");

        let landmarks_ids = self.find_landmarks(num_landmarks);

        info!("Found all {} landmarks", landmarks_ids.len());

        let landmarks: Vec<Landmark> = landmarks_ids
            .par_iter()
            .map(|&node_id| self.create_landmark(node_id))
            .collect();

        stopwatch.report();
        info!("Finished LM preparation");

        LMData::new(landmarks)
    }

    fn create_landmark(&self, node_id: NodeId) -> Landmark {
        let weight_from_landmark = self.one_to_all(&[node_id], SearchDirection::Forward);
        let weight_to_landmark = self.one_to_all(&[node_id], SearchDirection::Backward);

        Landmark::new(node_id, weight_from_landmark, weight_to_landmark)
    }

    /// Each landmark is the node farthest away from the ones already picked, the first one is
    /// the node farthest away from node 0.
    pub fn find_landmarks(&self, landmarks_count: usize) -> Vec<NodeId> {
        let mut landmarks: Vec<NodeId> = Vec::with_capacity(landmarks_count);

        if self.graph.node_count() == 0 {
            return landmarks;
        }

        for _ in 0..landmarks_count {
            let start_nodes = if landmarks.is_empty() {
                vec![0] // Node 0, "random" node
            } else {
                landmarks.clone()
            };

            let weights = self.one_to_all(&start_nodes, SearchDirection::Forward);

            let farthest = weights
                .iter()
                .enumerate()
                .filter(|(node, weight)| weight.is_finite() && !landmarks.contains(node))
                .max_by(|(a_node, a), (b_node, b)| a.total_cmp(b).then_with(|| b_node.cmp(a_node)))
                .map(|(node, _)| node);

            match farthest {
                Some(landmark) => {
                    debug!(landmark, "Picked landmark");
                    landmarks.push(landmark);
                }
                None => break,
            }
        }

        landmarks
    }

    /// Dijkstra from `sources` to every node, [`MAX_WEIGHT`] for unreachable nodes.
    fn one_to_all(&self, sources: &[NodeId], direction: SearchDirection) -> Vec<Weight> {
        let mut weights = vec![MAX_WEIGHT; self.graph.node_count()];
        let mut heap = BinaryHeap::with_capacity(self.graph.node_count());

        for &source in sources {
            weights[source] = 0.0;
            heap.push(HeapItem {
                node_id: source,
                weight: 0.0,
            });
        }

        while let Some(HeapItem { node_id, weight }) = heap.pop() {
            if weight > weights[node_id] {
                continue;
            }

            for edge in self.graph.edges(node_id, direction) {
                let next_weight = weight + edge.weight;
                if next_weight < weights[edge.adj_node] {
                    weights[edge.adj_node] = next_weight;
                    heap.push(HeapItem {
                        node_id: edge.adj_node,
                        weight: next_weight,
                    });
                }
            }
        }

        weights
    }
}
