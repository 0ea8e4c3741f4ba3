use std::time::Instant;

use tracing::{debug, info, warn};

use crate::{
    constants::{INVALID_EDGE, INVALID_NODE, NO_EDGE_KEY},
    error::RoutingError,
    graph::{EdgeState, GeometryAccess, Graph, NodeRank},
    landmarks::{landmark_approximator::LandmarkApproximator, lm_data::LMData},
    stopwatch::Stopwatch,
    types::{EdgeId, EdgeKey, NodeId, Weight},
};

use super::{
    abort::AbortHandle,
    beeline_approximator::{BeelineApproximator, BeelineOptions},
    best_path::BestPath,
    consistent_approximator::ConsistentWeightApproximator,
    frontier::Frontier,
    search_direction::SearchDirection,
    search_entry::{EntryId, SearchEntry},
    search_options::SearchOptions,
    search_result::{
        InterruptReason, PathSkeleton, RelaxedEdge, SearchDebugInfo, SearchOutcome, SearchResult,
        SearchStats, SkeletonEdge,
    },
    search_state::SearchState,
    weight_approximator::WeightApproximator,
};

/// Bidirectional A* on a contraction hierarchy.
///
/// Both searches only relax edges leading to nodes of equal or higher rank and use shortcut
/// weights as they are, shortcuts are only unpacked once the path is found. With
/// [`Hierarchy::Flat`](super::search_options::Hierarchy::Flat) every edge is relaxed.
///
/// In edge-based mode the state of a search is the original edge a node was reached through, so
/// turn costs and turn restrictions between two consecutive edges are respected.
///
/// The search stops once neither side can improve the best path anymore: a side is done when the
/// smallest `weight + estimate` of its open entries exceeds the best path weight. The estimate
/// comes from a [`ConsistentWeightApproximator`], a zero approximator makes this a bidirectional
/// Dijkstra.
pub struct BidirectionalAStar<'a, G, A>
where
    G: Graph + NodeRank,
    A: WeightApproximator,
{
    graph: &'a G,
    options: SearchOptions,
    approximator: ConsistentWeightApproximator<A>,

    forward: Frontier,
    backward: Frontier,
    best_path: BestPath,

    from: NodeId,
    to: NodeId,
    state: SearchState,

    abort_handle: AbortHandle,
    relaxed_edges: usize,
    debug: Option<SearchDebugInfo>,
}

impl<'a, G, A> BidirectionalAStar<'a, G, A>
where
    G: Graph + NodeRank,
    A: WeightApproximator,
{
    pub fn with_approximator(graph: &'a G, approximator: A, options: SearchOptions) -> Self {
        let capacity = options.initial_capacity;

        BidirectionalAStar {
            graph,
            options,
            approximator: ConsistentWeightApproximator::new(approximator),
            forward: Frontier::with_capacity(capacity),
            backward: Frontier::with_capacity(capacity),
            best_path: BestPath::default(),
            from: INVALID_NODE,
            to: INVALID_NODE,
            state: SearchState::Done,
            abort_handle: AbortHandle::new(),
            relaxed_edges: 0,
            debug: None,
        }
    }

    /// Replaces the approximator, the next query must be configured with [`Self::init`] again.
    pub fn set_approximator(&mut self, approximator: A) {
        self.approximator = ConsistentWeightApproximator::new(approximator);
        self.state = SearchState::Done;
    }

    pub fn set_abort_handle(&mut self, abort_handle: AbortHandle) {
        self.abort_handle = abort_handle;
    }

    pub fn abort_handle(&self) -> AbortHandle {
        self.abort_handle.clone()
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    pub fn heuristic_active(&self) -> bool {
        !self.approximator.is_zero()
    }

    pub fn algorithm_name(&self) -> String {
        self.options.algorithm_name(self.heuristic_active())
    }

    /// Configures a query from `from` to `to`.
    ///
    /// `from_weight` and `to_weight` are the weights already spent to reach the start node and
    /// to leave the end node, for start points snapped onto an edge.
    pub fn init(
        &mut self,
        from: NodeId,
        from_weight: Weight,
        to: NodeId,
        to_weight: Weight,
    ) -> Result<(), RoutingError> {
        if let Err(error) = self.validate(from, from_weight, to, to_weight) {
            self.state = SearchState::Done;
            return Err(error);
        }

        self.from = from;
        self.to = to;
        self.approximator.set_from(from);
        self.approximator.set_to(to);

        let track_bound = self.heuristic_active() && !self.options.use_heuristic_for_ordering;
        self.forward.clear(track_bound);
        self.backward.clear(track_bound);
        self.best_path = BestPath::default();
        self.relaxed_edges = 0;
        self.debug = self
            .options
            .include_debug_info
            .then(SearchDebugInfo::default);

        self.create_start_entry(from, from_weight, SearchDirection::Forward);
        let backward_start = self.create_start_entry(to, to_weight, SearchDirection::Backward);
        self.update_best_path(backward_start, SearchDirection::Backward);

        self.state = SearchState::Ready;

        debug!(
            from,
            to,
            from_weight,
            to_weight,
            algorithm = %self.algorithm_name(),
            "Initialized search"
        );

        Ok(())
    }

    /// Runs the query configured by [`Self::init`].
    pub fn run(&mut self) -> Result<SearchResult, RoutingError> {
        if self.state != SearchState::Ready {
            return Err(RoutingError::NotReady(self.state));
        }

        let stopwatch = Stopwatch::new("bidirectional_astar/run");
        let started_at = Instant::now();
        self.state = SearchState::Running;

        let mut interrupted: Option<InterruptReason> = None;

        loop {
            let forward_done = self.is_done(SearchDirection::Forward);
            let backward_done = self.is_done(SearchDirection::Backward);

            if forward_done && backward_done {
                break;
            }

            if let Some(reason) = self.interrupt_reason(started_at) {
                interrupted = Some(reason);
                break;
            }

            let direction = if forward_done {
                SearchDirection::Backward
            } else if backward_done {
                SearchDirection::Forward
            } else {
                self.next_direction()
            };

            self.expand(direction);
        }

        let stats = SearchStats {
            forward_visited_nodes: self.forward.settled_count(),
            backward_visited_nodes: self.backward.settled_count(),
            relaxed_edges: self.relaxed_edges,
        };

        let outcome = match interrupted {
            Some(reason) => {
                warn!(
                    ?reason,
                    visited_nodes = stats.visited_nodes(),
                    "Search interrupted"
                );
                self.state = SearchState::Interrupted;
                SearchOutcome::Interrupted { reason }
            }
            None if self.best_path.is_found() => {
                self.state = SearchState::Found;
                SearchOutcome::Found(self.extract_skeleton())
            }
            None => {
                self.state = SearchState::NotFound;
                SearchOutcome::NotFound
            }
        };

        let duration = stopwatch.elapsed();
        stopwatch.report();

        info!(
            algorithm = %self.algorithm_name(),
            forward_visited_nodes = stats.forward_visited_nodes,
            backward_visited_nodes = stats.backward_visited_nodes,
            relaxed_edges = stats.relaxed_edges,
            weight = self.best_path.weight,
            ?duration,
            "Search finished with state {:?}",
            self.state
        );

        Ok(SearchResult {
            outcome,
            stats,
            duration,
            debug: self.debug.take(),
        })
    }

    pub fn calc_path(&mut self, from: NodeId, to: NodeId) -> Result<SearchResult, RoutingError> {
        self.init(from, 0.0, to, 0.0)?;
        self.run()
    }

    /// Drops the current query, keeping the allocated capacity.
    pub fn reset(&mut self) {
        self.forward.clear(false);
        self.backward.clear(false);
        self.best_path = BestPath::default();
        self.from = INVALID_NODE;
        self.to = INVALID_NODE;
        self.debug = None;
        self.state = SearchState::Done;
    }

    pub fn create_start_entry(
        &mut self,
        node: NodeId,
        weight: Weight,
        direction: SearchDirection,
    ) -> EntryId {
        let (priority, bound_key) = self.keys(node, weight, direction);
        let traversal_key = self.traversal_key(node, NO_EDGE_KEY);

        self.frontier_mut(direction).insert(
            SearchEntry::start(node, weight, priority),
            traversal_key,
            bound_key,
        )
    }

    pub fn create_entry(
        &mut self,
        edge: &EdgeState,
        edge_key: EdgeKey,
        weight: Weight,
        parent: EntryId,
        direction: SearchDirection,
    ) -> EntryId {
        let (priority, bound_key) = self.keys(edge.adj_node, weight, direction);
        let traversal_key = self.traversal_key(edge.adj_node, edge_key);

        self.frontier_mut(direction).insert(
            SearchEntry::new(
                edge.adj_node,
                edge.edge,
                edge_key,
                weight,
                priority,
                parent,
            ),
            traversal_key,
            bound_key,
        )
    }

    /// Lowers the weight of an open entry.
    ///
    /// # Panics
    ///
    /// Panics if `existing` is settled.
    pub fn update_entry(
        &mut self,
        existing: EntryId,
        edge: EdgeId,
        edge_key: EdgeKey,
        weight: Weight,
        parent: EntryId,
        direction: SearchDirection,
    ) {
        let node = self.frontier(direction).entry(existing).node;
        let (priority, bound_key) = self.keys(node, weight, direction);

        self.frontier_mut(direction).update(
            existing, edge, edge_key, weight, priority, parent, bound_key,
        );
    }

    fn validate(
        &self,
        from: NodeId,
        from_weight: Weight,
        to: NodeId,
        to_weight: Weight,
    ) -> Result<(), RoutingError> {
        let node_count = self.graph.node_count();

        for node in [from, to] {
            if node >= node_count {
                return Err(RoutingError::NodeOutOfBounds { node, node_count });
            }
        }

        for weight in [from_weight, to_weight] {
            if !weight.is_finite() || weight < 0.0 {
                return Err(RoutingError::InvalidStartWeight(weight));
            }
        }

        Ok(())
    }

    fn frontier(&self, direction: SearchDirection) -> &Frontier {
        match direction {
            SearchDirection::Forward => &self.forward,
            SearchDirection::Backward => &self.backward,
        }
    }

    fn frontier_mut(&mut self, direction: SearchDirection) -> &mut Frontier {
        match direction {
            SearchDirection::Forward => &mut self.forward,
            SearchDirection::Backward => &mut self.backward,
        }
    }

    fn traversal_key(&self, node: NodeId, edge_key: EdgeKey) -> usize {
        if self.options.is_edge_based() {
            edge_key
        } else {
            node
        }
    }

    /// Queue priority and stopping bound of an entry.
    fn keys(&self, node: NodeId, weight: Weight, direction: SearchDirection) -> (Weight, Weight) {
        if !self.heuristic_active() {
            return (weight, weight);
        }

        let bound_key = weight + self.approximator.approximate(node, direction);
        if self.options.use_heuristic_for_ordering {
            (bound_key, bound_key)
        } else {
            (weight, bound_key)
        }
    }

    fn is_done(&mut self, direction: SearchDirection) -> bool {
        let best_weight = self.best_path.weight;
        match self.frontier_mut(direction).bound() {
            Some(bound) => bound > best_weight,
            None => true,
        }
    }

    /// The side with the smaller queue top, backward on ties.
    fn next_direction(&mut self) -> SearchDirection {
        match (self.forward.top_priority(), self.backward.top_priority()) {
            (Some(forward), Some(backward)) if forward < backward => SearchDirection::Forward,
            (Some(_), None) => SearchDirection::Forward,
            _ => SearchDirection::Backward,
        }
    }

    fn interrupt_reason(&self, started_at: Instant) -> Option<InterruptReason> {
        if self.abort_handle.is_aborted() {
            return Some(InterruptReason::Aborted);
        }

        if let Some(max_visited_nodes) = self.options.max_visited_nodes {
            if self.forward.settled_count() + self.backward.settled_count() >= max_visited_nodes {
                return Some(InterruptReason::MaxVisitedNodes);
            }
        }

        if let Some(timeout) = self.options.timeout() {
            if started_at.elapsed() > timeout {
                return Some(InterruptReason::Timeout);
            }
        }

        None
    }

    fn expand(&mut self, direction: SearchDirection) {
        let Some(entry_id) = self.frontier_mut(direction).settle_next() else {
            return;
        };

        let entry = *self.frontier(direction).entry(entry_id);
        let graph = self.graph;
        let base_rank = graph.node_rank(entry.node);
        let edge_based = self.options.is_edge_based();
        let contracted = self.options.is_contracted();

        if let Some(debug) = self.debug.as_mut() {
            match direction {
                SearchDirection::Forward => debug.forward_visited_nodes.push(entry.node),
                SearchDirection::Backward => debug.backward_visited_nodes.push(entry.node),
            }
        }

        for edge in graph.edges(entry.node, direction) {
            // Node-based searches never go back through the edge they came from, edge-based
            // searches leave u-turns to the turn weights.
            if !edge_based && edge.edge == entry.incoming_edge {
                continue;
            }

            let adj_rank = graph.node_rank(edge.adj_node);
            if contracted && adj_rank < base_rank {
                continue;
            }

            assert!(
                edge.weight >= 0.0,
                "edge {} from {} to {} has invalid weight {}",
                edge.edge,
                edge.base_node,
                edge.adj_node,
                edge.weight
            );

            if edge.weight.is_infinite() {
                continue;
            }

            let (turn_weight, edge_key) = match direction {
                SearchDirection::Forward => (
                    self.turn_weight(entry.incoming_edge_key, entry.node, edge.first_edge_key),
                    edge.last_edge_key,
                ),
                SearchDirection::Backward => (
                    self.turn_weight(edge.last_edge_key, entry.node, entry.incoming_edge_key),
                    edge.first_edge_key,
                ),
            };

            if turn_weight.is_infinite() {
                continue;
            }

            self.relaxed_edges += 1;
            if let Some(debug) = self.debug.as_mut() {
                debug.relaxed_edges.push(RelaxedEdge {
                    direction,
                    edge: edge.edge,
                    base_node: edge.base_node,
                    adj_node: edge.adj_node,
                    base_rank,
                    adj_rank,
                });
            }

            let weight = entry.weight + edge.weight + turn_weight;
            let traversal_key = self.traversal_key(edge.adj_node, edge_key);

            let relaxed = match self.frontier(direction).best_entry(traversal_key) {
                Some(existing) => {
                    let existing_entry = self.frontier(direction).entry(existing);
                    if existing_entry.settled || weight >= existing_entry.weight {
                        continue;
                    }

                    self.update_entry(existing, edge.edge, edge_key, weight, entry_id, direction);
                    existing
                }
                None => self.create_entry(&edge, edge_key, weight, entry_id, direction),
            };

            self.update_best_path(relaxed, direction);
        }
    }

    #[inline(always)]
    fn turn_weight(&self, in_key: EdgeKey, via: NodeId, out_key: EdgeKey) -> Weight {
        if !self.options.is_edge_based() || in_key == NO_EDGE_KEY || out_key == NO_EDGE_KEY {
            return 0.0;
        }

        self.graph.turn_weight(in_key, via, out_key)
    }

    /// Joins `entry_id` with every entry of the opposite side at the same node.
    fn update_best_path(&mut self, entry_id: EntryId, direction: SearchDirection) {
        let (frontier, opposite) = match direction {
            SearchDirection::Forward => (&self.forward, &self.backward),
            SearchDirection::Backward => (&self.backward, &self.forward),
        };

        let entry = frontier.entry(entry_id);
        let mut best_candidate: Option<(Weight, EntryId, EntryId)> = None;

        for &other_id in opposite.entries_at(entry.node) {
            let other = opposite.entry(other_id);
            let (forward_id, forward_entry, backward_id, backward_entry) = match direction {
                SearchDirection::Forward => (entry_id, entry, other_id, other),
                SearchDirection::Backward => (other_id, other, entry_id, entry),
            };

            if !self.options.is_edge_based()
                && forward_entry.incoming_edge != INVALID_EDGE
                && forward_entry.incoming_edge == backward_entry.incoming_edge
            {
                continue;
            }

            let turn_weight = self.turn_weight(
                forward_entry.incoming_edge_key,
                entry.node,
                backward_entry.incoming_edge_key,
            );
            if turn_weight.is_infinite() {
                continue;
            }

            let weight = forward_entry.weight + backward_entry.weight + turn_weight;
            if best_candidate.is_none_or(|(best_weight, _, _)| weight < best_weight) {
                best_candidate = Some((weight, forward_id, backward_id));
            }
        }

        let node = entry.node;
        if let Some((weight, forward_id, backward_id)) = best_candidate {
            if self.best_path.improve(weight, node, forward_id, backward_id) {
                debug!(weight, meeting_node = node, "Improved best path");

                if let Some(debug) = self.debug.as_mut() {
                    debug.best_weight_updates.push(weight);
                }
            }
        }
    }

    fn extract_skeleton(&self) -> PathSkeleton {
        let mut forward_edges: Vec<SkeletonEdge> = Vec::with_capacity(16);
        let mut backward_edges: Vec<SkeletonEdge> = Vec::with_capacity(16);

        let mut from = self.best_path.meeting_node;
        let mut current = self.best_path.forward_entry;
        while let Some(entry_id) = current {
            let entry = self.forward.entry(entry_id);
            if let Some(parent_id) = entry.parent {
                forward_edges.push(SkeletonEdge {
                    edge: entry.incoming_edge,
                    base_node: self.forward.entry(parent_id).node,
                    adj_node: entry.node,
                });
            } else {
                from = entry.node;
            }
            current = entry.parent;
        }
        forward_edges.reverse();

        let mut to = self.best_path.meeting_node;
        let mut current = self.best_path.backward_entry;
        while let Some(entry_id) = current {
            let entry = self.backward.entry(entry_id);
            if let Some(parent_id) = entry.parent {
                backward_edges.push(SkeletonEdge {
                    edge: entry.incoming_edge,
                    base_node: entry.node,
                    adj_node: self.backward.entry(parent_id).node,
                });
            } else {
                to = entry.node;
            }
            current = entry.parent;
        }

        PathSkeleton {
            weight: self.best_path.weight,
            from,
            to,
            meeting_node: self.best_path.meeting_node,
            forward_edges,
            backward_edges,
        }
    }
}

impl<'a, G> BidirectionalAStar<'a, G, BeelineApproximator<'a, G>>
where
    G: Graph + NodeRank + GeometryAccess,
{
    /// A* guided by the straight line distance with the default [`BeelineOptions`].
    pub fn new(graph: &'a G, options: SearchOptions) -> Self {
        Self::with_beeline(graph, &BeelineOptions::default(), options)
    }

    pub fn with_beeline(
        graph: &'a G,
        beeline_options: &BeelineOptions,
        options: SearchOptions,
    ) -> Self {
        Self::with_approximator(
            graph,
            BeelineApproximator::new(graph, beeline_options),
            options,
        )
    }
}

impl<'a, G> BidirectionalAStar<'a, G, LandmarkApproximator<'a>>
where
    G: Graph + NodeRank,
{
    pub fn from_landmarks(graph: &'a G, lm_data: &'a LMData, options: SearchOptions) -> Self {
        Self::with_approximator(graph, LandmarkApproximator::new(lm_data), options)
    }
}
