use std::{cmp::Ordering, collections::BinaryHeap};

use fxhash::{FxBuildHasher, FxHashMap};
use smallvec::SmallVec;

use crate::types::{EdgeId, EdgeKey, NodeId, Weight};

use super::search_entry::{EntryId, SearchEntry};

#[derive(Debug, Clone, Copy)]
struct QueueItem {
    key: Weight,
    seq: u64,
    entry: EntryId,
}

impl PartialEq for QueueItem {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueItem {}

impl PartialOrd for QueueItem {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueItem {
    fn cmp(&self, other: &Self) -> Ordering {
        // Flip the comparison to make this a min-heap, older items first on ties
        other
            .key
            .total_cmp(&self.key)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Open and settled entries of one search direction.
///
/// Entries live in an arena and are never removed until [`Frontier::clear`]. Updating an entry
/// pushes a new queue item, the superseded one is dropped once it reaches the top.
pub(crate) struct Frontier {
    entries: Vec<SearchEntry>,

    /// Best entry per traversal key, a node or an original edge key.
    best_entries: FxHashMap<usize, EntryId>,
    node_entries: FxHashMap<NodeId, SmallVec<[EntryId; 2]>>,

    queue: BinaryHeap<QueueItem>,

    /// Open entries keyed by `weight + estimate`, only kept when the queue is ordered by weight
    /// but a heuristic bounds the search.
    bound_queue: Option<BinaryHeap<QueueItem>>,

    next_seq: u64,
    settled_count: usize,
}

impl Frontier {
    pub fn with_capacity(capacity: usize) -> Self {
        Frontier {
            entries: Vec::with_capacity(capacity),
            best_entries: FxHashMap::with_capacity_and_hasher(capacity, FxBuildHasher::default()),
            node_entries: FxHashMap::with_capacity_and_hasher(capacity, FxBuildHasher::default()),
            queue: BinaryHeap::with_capacity(capacity),
            bound_queue: None,
            next_seq: 0,
            settled_count: 0,
        }
    }

    /// Empties the frontier, keeping its allocations.
    pub fn clear(&mut self, track_bound: bool) {
        self.entries.clear();
        self.best_entries.clear();
        self.node_entries.clear();
        self.queue.clear();
        self.next_seq = 0;
        self.settled_count = 0;

        if !track_bound {
            self.bound_queue = None;
        } else if let Some(bound_queue) = self.bound_queue.as_mut() {
            bound_queue.clear();
        } else {
            self.bound_queue = Some(BinaryHeap::with_capacity(self.queue.capacity()));
        }
    }

    pub fn insert(
        &mut self,
        mut entry: SearchEntry,
        traversal_key: usize,
        bound_key: Weight,
    ) -> EntryId {
        let id = self.entries.len();
        entry.seq = self.next_seq();
        entry.settled = false;

        self.push(id, entry.priority, entry.seq, bound_key);
        self.best_entries.insert(traversal_key, id);
        self.node_entries.entry(entry.node).or_default().push(id);
        self.entries.push(entry);

        id
    }

    /// Lowers the weight of an open entry.
    ///
    /// # Panics
    ///
    /// Panics if the entry is already settled.
    #[allow(clippy::too_many_arguments)]
    pub fn update(
        &mut self,
        id: EntryId,
        edge: EdgeId,
        edge_key: EdgeKey,
        weight: Weight,
        priority: Weight,
        parent: EntryId,
        bound_key: Weight,
    ) {
        let seq = self.next_seq();
        let entry = &mut self.entries[id];

        assert!(
            !entry.settled,
            "cannot update settled entry {id} at node {}",
            entry.node
        );

        entry.incoming_edge = edge;
        entry.incoming_edge_key = edge_key;
        entry.weight = weight;
        entry.priority = priority;
        entry.parent = Some(parent);
        entry.seq = seq;

        self.push(id, priority, seq, bound_key);
    }

    /// Removes the open entry with the smallest priority and marks it settled.
    pub fn settle_next(&mut self) -> Option<EntryId> {
        self.prune_queue();
        let item = self.queue.pop()?;

        self.entries[item.entry].settled = true;
        self.settled_count += 1;

        Some(item.entry)
    }

    /// Priority of the next entry to settle.
    pub fn top_priority(&mut self) -> Option<Weight> {
        self.prune_queue();
        self.queue.peek().map(|item| item.key)
    }

    /// Smallest `weight + estimate` over the open entries.
    pub fn bound(&mut self) -> Option<Weight> {
        match self.bound_queue.as_mut() {
            Some(bound_queue) => {
                Self::prune(bound_queue, &self.entries);
                bound_queue.peek().map(|item| item.key)
            }
            None => self.top_priority(),
        }
    }

    pub fn best_entry(&self, traversal_key: usize) -> Option<EntryId> {
        self.best_entries.get(&traversal_key).copied()
    }

    /// Every entry known at `node`, open or settled.
    pub fn entries_at(&self, node: NodeId) -> &[EntryId] {
        self.node_entries
            .get(&node)
            .map(|entries| entries.as_slice())
            .unwrap_or(&[])
    }

    #[inline(always)]
    pub fn entry(&self, id: EntryId) -> &SearchEntry {
        &self.entries[id]
    }

    pub fn settled_count(&self) -> usize {
        self.settled_count
    }

    fn next_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    fn push(&mut self, entry: EntryId, priority: Weight, seq: u64, bound_key: Weight) {
        self.queue.push(QueueItem {
            key: priority,
            seq,
            entry,
        });

        if let Some(bound_queue) = self.bound_queue.as_mut() {
            bound_queue.push(QueueItem {
                key: bound_key,
                seq,
                entry,
            });
        }
    }

    fn prune_queue(&mut self) {
        Self::prune(&mut self.queue, &self.entries);
    }

    fn prune(queue: &mut BinaryHeap<QueueItem>, entries: &[SearchEntry]) {
        while let Some(item) = queue.peek() {
            let entry = &entries[item.entry];
            if entry.settled || entry.seq != item.seq {
                queue.pop();
            } else {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(node: NodeId, weight: Weight, priority: Weight) -> SearchEntry {
        SearchEntry::new(node, node, node << 1, weight, priority, 0)
    }

    fn settle_all(frontier: &mut Frontier) -> Vec<NodeId> {
        let mut nodes = vec![];
        while let Some(id) = frontier.settle_next() {
            nodes.push(frontier.entry(id).node);
        }
        nodes
    }

    #[test]
    fn test_settles_by_priority() {
        let mut frontier = Frontier::with_capacity(4);
        frontier.clear(false);

        frontier.insert(SearchEntry::start(0, 0.0, 0.0), 0, 0.0);
        frontier.insert(entry(1, 5.0, 5.0), 1, 5.0);
        frontier.insert(entry(2, 2.0, 2.0), 2, 2.0);

        let order = settle_all(&mut frontier);

        assert_eq!(order, vec![0, 2, 1]);
        assert_eq!(frontier.settled_count(), 3);
        assert_eq!(frontier.top_priority(), None);
    }

    #[test]
    fn test_ties_follow_insertion_order() {
        let mut frontier = Frontier::with_capacity(4);
        frontier.clear(false);

        for node in [4, 2, 7, 1] {
            frontier.insert(entry(node, 3.0, 3.0), node, 3.0);
        }

        let order = settle_all(&mut frontier);

        assert_eq!(order, vec![4, 2, 7, 1]);
    }

    #[test]
    fn test_update_supersedes_queue_item() {
        let mut frontier = Frontier::with_capacity(4);
        frontier.clear(false);

        let start = frontier.insert(SearchEntry::start(0, 0.0, 0.0), 0, 0.0);
        let a = frontier.insert(entry(1, 10.0, 10.0), 1, 10.0);
        let b = frontier.insert(entry(2, 4.0, 4.0), 2, 4.0);

        assert_eq!(frontier.settle_next(), Some(start));
        frontier.update(a, 7, 14, 3.0, 3.0, start, 3.0);

        assert_eq!(frontier.top_priority(), Some(3.0));
        assert_eq!(frontier.settle_next(), Some(a));
        assert_eq!(frontier.entry(a).incoming_edge, 7);
        assert_eq!(frontier.settle_next(), Some(b));

        // The superseded item of `a` is discarded
        assert_eq!(frontier.settle_next(), None);
    }

    #[test]
    #[should_panic(expected = "cannot update settled entry")]
    fn test_update_settled_entry_panics() {
        let mut frontier = Frontier::with_capacity(4);
        frontier.clear(false);

        let start = frontier.insert(SearchEntry::start(0, 0.0, 0.0), 0, 0.0);
        frontier.settle_next();
        frontier.update(start, 1, 2, 0.0, 0.0, start, 0.0);
    }

    #[test]
    fn test_bound_queue_tracks_estimates() {
        let mut frontier = Frontier::with_capacity(4);
        frontier.clear(true);

        // Ordered by weight, bounded by weight + estimate
        frontier.insert(entry(1, 1.0, 1.0), 1, 9.0);
        frontier.insert(entry(2, 2.0, 2.0), 2, 4.0);

        assert_eq!(frontier.top_priority(), Some(1.0));
        assert_eq!(frontier.bound(), Some(4.0));

        frontier.settle_next();
        frontier.settle_next();
        assert_eq!(frontier.bound(), None);

        frontier.clear(false);
        frontier.insert(entry(3, 6.0, 6.0), 3, 8.0);
        assert_eq!(frontier.bound(), Some(6.0));
    }

    #[test]
    fn test_entries_at_node() {
        let mut frontier = Frontier::with_capacity(4);
        frontier.clear(false);

        let a = frontier.insert(entry(5, 1.0, 1.0), 10, 1.0);
        let b = frontier.insert(entry(5, 2.0, 2.0), 11, 2.0);

        assert_eq!(frontier.entries_at(5), &[a, b]);
        assert!(frontier.entries_at(6).is_empty());
        assert_eq!(frontier.best_entry(11), Some(b));
        assert_eq!(frontier.best_entry(12), None);
    }
}
