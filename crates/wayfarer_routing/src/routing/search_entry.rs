use serde::Serialize;

use crate::{
    constants::{INVALID_EDGE, NO_EDGE_KEY},
    types::{EdgeId, EdgeKey, NodeId, Weight},
};

/// Index of an entry in the arena of a [`Frontier`](super::frontier::Frontier).
pub type EntryId = usize;

/// A node reached by one search direction, together with how it was reached.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SearchEntry {
    pub node: NodeId,

    /// CH edge or shortcut leading to `node` from its parent, [`INVALID_EDGE`] for start entries.
    pub incoming_edge: EdgeId,

    /// Original edge key on the `node` side of `incoming_edge`: the key entering `node` for the
    /// forward search, the key leaving `node` for the backward search.
    pub incoming_edge_key: EdgeKey,

    /// Queue ordering key.
    pub priority: Weight,

    /// Real weight accumulated from the start of this direction.
    pub weight: Weight,

    pub parent: Option<EntryId>,
    pub settled: bool,

    /// Sequence number of the live queue item of this entry.
    pub(crate) seq: u64,
}

impl SearchEntry {
    pub fn start(node: NodeId, weight: Weight, priority: Weight) -> Self {
        SearchEntry {
            node,
            incoming_edge: INVALID_EDGE,
            incoming_edge_key: NO_EDGE_KEY,
            priority,
            weight,
            parent: None,
            settled: false,
            seq: 0,
        }
    }

    pub fn new(
        node: NodeId,
        incoming_edge: EdgeId,
        incoming_edge_key: EdgeKey,
        weight: Weight,
        priority: Weight,
        parent: EntryId,
    ) -> Self {
        SearchEntry {
            node,
            incoming_edge,
            incoming_edge_key,
            priority,
            weight,
            parent: Some(parent),
            settled: false,
            seq: 0,
        }
    }
}
