use serde::Serialize;

use crate::{
    edge_direction::edge_id_from_key,
    error::RoutingError,
    graph::{Graph, UnfoldEdge},
    routing::{search_options::TraversalMode, search_result::PathSkeleton},
    types::{EdgeKey, NodeId, Weight},
};

/// A path over original edges.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnpackedPath {
    pub edge_keys: Vec<EdgeKey>,
    pub nodes: Vec<NodeId>,

    /// Edge and turn weights, start weights are not included.
    pub weight: Weight,
}

pub trait PathUnpacker {
    fn unpack(&self, skeleton: &PathSkeleton) -> Result<UnpackedPath, RoutingError>;
}

/// Expands the shortcuts of a skeleton and recomputes its weight from the original edges.
pub struct CHPathUnpacker<'a, G>
where
    G: Graph + UnfoldEdge,
{
    graph: &'a G,
    traversal_mode: TraversalMode,
}

impl<'a, G> CHPathUnpacker<'a, G>
where
    G: Graph + UnfoldEdge,
{
    pub fn new(graph: &'a G, traversal_mode: TraversalMode) -> Self {
        CHPathUnpacker {
            graph,
            traversal_mode,
        }
    }
}

impl<G> PathUnpacker for CHPathUnpacker<'_, G>
where
    G: Graph + UnfoldEdge,
{
    fn unpack(&self, skeleton: &PathSkeleton) -> Result<UnpackedPath, RoutingError> {
        let mut edge_keys = Vec::with_capacity(skeleton.edge_count() * 2);

        for edge in skeleton.edges() {
            let end = self
                .graph
                .unfold_edge(edge.edge, edge.base_node, &mut edge_keys)?;

            if end != edge.adj_node {
                return Err(RoutingError::DisconnectedPath {
                    edge: edge.edge,
                    node: edge.base_node,
                });
            }
        }

        let mut nodes = Vec::with_capacity(edge_keys.len() + 1);
        nodes.push(skeleton.from);

        let mut weight = 0.0;
        let mut previous_key: Option<EdgeKey> = None;

        for &key in edge_keys.iter() {
            let node = nodes[nodes.len() - 1];
            let state = self
                .graph
                .original_edge_state(key)
                .ok_or(RoutingError::UnknownEdge(edge_id_from_key(key)))?;

            if state.base_node != node {
                return Err(RoutingError::DisconnectedPath {
                    edge: state.edge,
                    node,
                });
            }

            if let (Some(previous_key), TraversalMode::EdgeBased) =
                (previous_key, self.traversal_mode)
            {
                weight += self.graph.turn_weight(previous_key, node, key);
            }

            weight += state.weight;
            nodes.push(state.adj_node);
            previous_key = Some(key);
        }

        Ok(UnpackedPath {
            edge_keys,
            nodes,
            weight,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        ch::ch_graph_builder::CHGraphBuilder,
        edge_direction::{EdgeDirection, edge_key},
        routing::search_result::SkeletonEdge,
    };

    use super::*;

    #[test]
    fn test_unpack_nested_shortcuts() {
        // 0 - 1 - 2 - 3, shortcuts 0 -> 2 and 0 -> 3
        let mut builder = CHGraphBuilder::new();
        for rank in [3, 0, 1, 2] {
            builder.add_node(rank, None);
        }

        let a = builder.add_edge(0, 1, 1.0, 1.0).unwrap();
        let b = builder.add_edge(2, 1, 2.0, 2.0).unwrap();
        let c = builder.add_edge(2, 3, 3.0, 3.0).unwrap();
        builder.add_turn_cost(a, 1, b, 0.5).unwrap();
        let ab = builder.add_shortcut(0, 2, a, b).unwrap();
        let abc = builder.add_shortcut(0, 3, ab, c).unwrap();
        let graph = builder.build();

        let skeleton = PathSkeleton {
            weight: 6.5,
            from: 0,
            to: 3,
            meeting_node: 0,
            forward_edges: vec![],
            backward_edges: vec![SkeletonEdge {
                edge: abc,
                base_node: 0,
                adj_node: 3,
            }],
        };

        let path = CHPathUnpacker::new(&graph, TraversalMode::EdgeBased)
            .unpack(&skeleton)
            .unwrap();

        assert_eq!(path.nodes, vec![0, 1, 2, 3]);
        assert_eq!(
            path.edge_keys,
            vec![
                edge_key(a, EdgeDirection::Forward),
                edge_key(b, EdgeDirection::Backward),
                edge_key(c, EdgeDirection::Forward)
            ]
        );
        assert_eq!(path.weight, 6.5);

        let node_based = CHPathUnpacker::new(&graph, TraversalMode::NodeBased)
            .unpack(&skeleton)
            .unwrap();
        assert_eq!(node_based.weight, 6.0);
    }

    #[test]
    fn test_unpack_disconnected_skeleton() {
        let mut builder = CHGraphBuilder::new();
        for rank in 0..3 {
            builder.add_node(rank, None);
        }
        let a = builder.add_edge(0, 1, 1.0, 1.0).unwrap();
        let graph = builder.build();

        let skeleton = PathSkeleton {
            weight: 1.0,
            from: 0,
            to: 2,
            meeting_node: 2,
            forward_edges: vec![SkeletonEdge {
                edge: a,
                base_node: 0,
                adj_node: 2,
            }],
            backward_edges: vec![],
        };

        assert_eq!(
            CHPathUnpacker::new(&graph, TraversalMode::NodeBased).unpack(&skeleton),
            Err(RoutingError::DisconnectedPath { edge: a, node: 0 })
        );
    }
}
