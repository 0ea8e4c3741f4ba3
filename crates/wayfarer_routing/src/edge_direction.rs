use serde::{Deserialize, Serialize};

use crate::{
    constants::NO_EDGE_KEY,
    types::{EdgeId, EdgeKey},
};

/// Orientation of a traversal relative to the stored `start -> end` of an original edge.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub enum EdgeDirection {
    Forward,
    Backward,
}

impl EdgeDirection {
    pub fn opposite(&self) -> Self {
        match self {
            EdgeDirection::Forward => EdgeDirection::Backward,
            EdgeDirection::Backward => EdgeDirection::Forward,
        }
    }
}

pub fn edge_key(edge_id: EdgeId, direction: EdgeDirection) -> EdgeKey {
    match direction {
        EdgeDirection::Forward => edge_id << 1,
        EdgeDirection::Backward => (edge_id << 1) | 1,
    }
}

pub fn edge_id_from_key(key: EdgeKey) -> EdgeId {
    debug_assert!(key != NO_EDGE_KEY);
    key >> 1
}

pub fn direction_from_key(key: EdgeKey) -> EdgeDirection {
    if key & 1 == 0 {
        EdgeDirection::Forward
    } else {
        EdgeDirection::Backward
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_key() {
        let forward = edge_key(21, EdgeDirection::Forward);
        let backward = edge_key(21, EdgeDirection::Backward);

        assert_ne!(forward, backward);
        assert_eq!(edge_id_from_key(forward), 21);
        assert_eq!(edge_id_from_key(backward), 21);
        assert_eq!(direction_from_key(forward), EdgeDirection::Forward);
        assert_eq!(direction_from_key(backward), EdgeDirection::Backward);
    }
}
