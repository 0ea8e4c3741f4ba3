use serde::{Deserialize, Serialize};

use crate::types::{NodeId, Weight};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    node_id: NodeId,
    weight_from_landmark: Vec<Weight>,
    weight_to_landmark: Vec<Weight>,
}

impl Landmark {
    pub fn new(
        node_id: NodeId,
        weight_from_landmark: Vec<Weight>,
        weight_to_landmark: Vec<Weight>,
    ) -> Self {
        Landmark {
            node_id,
            weight_from_landmark,
            weight_to_landmark,
        }
    }

    pub fn node_id(&self) -> NodeId {
        self.node_id
    }
}

/// Shortest path weights from and to a few landmark nodes, for every node of a graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LMData {
    landmarks: Vec<Landmark>,
}

impl LMData {
    pub fn new(landmarks: Vec<Landmark>) -> Self {
        LMData { landmarks }
    }

    pub fn get_node_ids(&self) -> Vec<NodeId> {
        self.landmarks.iter().map(|lm| lm.node_id).collect()
    }

    pub fn num_landmarks(&self) -> usize {
        self.landmarks.len()
    }

    pub fn weight_from_landmark(&self, landmark_index: usize, node_id: NodeId) -> Weight {
        self.landmarks[landmark_index].weight_from_landmark[node_id]
    }

    pub fn weight_to_landmark(&self, landmark_index: usize, node_id: NodeId) -> Weight {
        self.landmarks[landmark_index].weight_to_landmark[node_id]
    }
}
