use std::time::Duration;

use serde::Serialize;

use crate::types::{EdgeId, NodeId, Weight};

use super::search_direction::SearchDirection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InterruptReason {
    Aborted,
    MaxVisitedNodes,
    Timeout,
}

/// A CH edge or shortcut of a found path, in real travel direction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SkeletonEdge {
    pub edge: EdgeId,
    pub base_node: NodeId,
    pub adj_node: NodeId,
}

/// A path whose shortcuts are still packed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathSkeleton {
    pub weight: Weight,
    pub from: NodeId,
    pub to: NodeId,
    pub meeting_node: NodeId,

    /// `from` to the meeting node.
    pub forward_edges: Vec<SkeletonEdge>,

    /// Meeting node to `to`.
    pub backward_edges: Vec<SkeletonEdge>,
}

impl PathSkeleton {
    pub fn edge_count(&self) -> usize {
        self.forward_edges.len() + self.backward_edges.len()
    }

    /// Every edge from `from` to `to`.
    pub fn edges(&self) -> impl Iterator<Item = &SkeletonEdge> {
        self.forward_edges.iter().chain(self.backward_edges.iter())
    }

    pub fn nodes(&self) -> Vec<NodeId> {
        let mut nodes = Vec::with_capacity(self.edge_count() + 1);
        nodes.push(self.from);
        nodes.extend(self.edges().map(|edge| edge.adj_node));
        nodes
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SearchOutcome {
    Found(PathSkeleton),
    NotFound,
    Interrupted { reason: InterruptReason },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchStats {
    pub forward_visited_nodes: usize,
    pub backward_visited_nodes: usize,
    pub relaxed_edges: usize,
}

impl SearchStats {
    pub fn visited_nodes(&self) -> usize {
        self.forward_visited_nodes + self.backward_visited_nodes
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RelaxedEdge {
    pub direction: SearchDirection,
    pub edge: EdgeId,
    pub base_node: NodeId,
    pub adj_node: NodeId,
    pub base_rank: usize,
    pub adj_rank: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchDebugInfo {
    pub forward_visited_nodes: Vec<NodeId>,
    pub backward_visited_nodes: Vec<NodeId>,
    pub relaxed_edges: Vec<RelaxedEdge>,

    /// Every weight the best path took, in order.
    pub best_weight_updates: Vec<Weight>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResult {
    pub outcome: SearchOutcome,
    pub stats: SearchStats,
    pub duration: Duration,
    pub debug: Option<SearchDebugInfo>,
}

impl SearchResult {
    pub fn is_found(&self) -> bool {
        matches!(self.outcome, SearchOutcome::Found(_))
    }

    pub fn skeleton(&self) -> Option<&PathSkeleton> {
        match &self.outcome {
            SearchOutcome::Found(skeleton) => Some(skeleton),
            _ => None,
        }
    }

    pub fn weight(&self) -> Option<Weight> {
        self.skeleton().map(|skeleton| skeleton.weight)
    }
}
