use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraversalMode {
    /// The search state is a node, turn costs are ignored.
    NodeBased,
    /// The search state is the original edge a node was reached through.
    EdgeBased,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Hierarchy {
    /// Only edges leading up the hierarchy are relaxed.
    Contracted,
    /// Every edge is relaxed, the search is a plain bidirectional search.
    Flat,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    pub traversal_mode: TraversalMode,
    pub hierarchy: Hierarchy,

    /// Order the queues by `weight + estimate` instead of `weight`.
    ///
    /// The stopping test uses the estimate either way.
    pub use_heuristic_for_ordering: bool,

    pub include_debug_info: bool,

    pub max_visited_nodes: Option<usize>,
    pub timeout_ms: Option<u64>,

    /// Preallocated entries per search direction.
    pub initial_capacity: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            traversal_mode: TraversalMode::EdgeBased,
            hierarchy: Hierarchy::Contracted,
            use_heuristic_for_ordering: false,
            include_debug_info: false,
            max_visited_nodes: None,
            timeout_ms: None,
            initial_capacity: 1024,
        }
    }
}

impl SearchOptions {
    pub fn node_based() -> Self {
        SearchOptions {
            traversal_mode: TraversalMode::NodeBased,
            ..Default::default()
        }
    }

    pub fn edge_based() -> Self {
        SearchOptions::default()
    }

    pub fn with_hierarchy(mut self, hierarchy: Hierarchy) -> Self {
        self.hierarchy = hierarchy;
        self
    }

    pub fn with_heuristic_ordering(mut self, enabled: bool) -> Self {
        self.use_heuristic_for_ordering = enabled;
        self
    }

    pub fn with_debug_info(mut self) -> Self {
        self.include_debug_info = true;
        self
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    pub fn is_edge_based(&self) -> bool {
        self.traversal_mode == TraversalMode::EdgeBased
    }

    pub fn is_contracted(&self) -> bool {
        self.hierarchy == Hierarchy::Contracted
    }

    /// Stable identifier of the search strategy, e.g. `astarbi|ch|edge_based|no_sod`.
    pub fn algorithm_name(&self, heuristic_active: bool) -> String {
        let mut parts = vec![if heuristic_active {
            "astarbi"
        } else {
            "dijkstrabi"
        }];

        if self.is_contracted() {
            parts.push("ch");
        }

        parts.push(match self.traversal_mode {
            TraversalMode::NodeBased => "node_based",
            TraversalMode::EdgeBased => "edge_based",
        });

        if self.is_contracted() {
            parts.push("no_sod");
        }

        parts.join("|")
    }
}
