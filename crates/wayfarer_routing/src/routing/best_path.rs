use crate::{
    constants::{INVALID_NODE, MAX_WEIGHT},
    types::{NodeId, Weight},
};

use super::search_entry::EntryId;

/// Cheapest connection between the two searches found so far.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct BestPath {
    pub weight: Weight,
    pub meeting_node: NodeId,
    pub forward_entry: Option<EntryId>,
    pub backward_entry: Option<EntryId>,
}

impl Default for BestPath {
    fn default() -> Self {
        BestPath {
            weight: MAX_WEIGHT,
            meeting_node: INVALID_NODE,
            forward_entry: None,
            backward_entry: None,
        }
    }
}

impl BestPath {
    pub fn is_found(&self) -> bool {
        self.forward_entry.is_some() && self.backward_entry.is_some()
    }

    /// Replaces the path if `weight` is strictly smaller, returns whether it did.
    pub fn improve(
        &mut self,
        weight: Weight,
        meeting_node: NodeId,
        forward_entry: EntryId,
        backward_entry: EntryId,
    ) -> bool {
        if weight >= self.weight {
            return false;
        }

        self.weight = weight;
        self.meeting_node = meeting_node;
        self.forward_entry = Some(forward_entry);
        self.backward_entry = Some(backward_entry);

        true
    }
}
