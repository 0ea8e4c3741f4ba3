#[cfg(test)]
pub mod test_graph {
    use fxhash::FxHashMap;
    use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};

    use crate::{
        ch::{ch_graph::CHGraph, ch_graph_builder::CHGraphBuilder},
        constants::{MAX_WEIGHT, NO_EDGE_KEY},
        geopoint::GeoPoint,
        graph::{EdgeState, Graph},
        routing::search_direction::SearchDirection,
        types::{EdgeId, EdgeKey, NodeId, Weight},
    };

    pub enum ScenarioNode {
        A = 0,
        B = 1,
        C = 2,
        D = 3,
        E = 4,
    }

    impl From<ScenarioNode> for usize {
        fn from(value: ScenarioNode) -> Self {
            value as usize
        }
    }

    /// A - B - C - D - E with unit weights, C is the highest node.
    pub fn path_graph() -> CHGraph {
        path_graph_with_ranks([0, 1, 4, 3, 2])
    }

    /// A - B - C - D - E with unit weights and the given node ranks.
    pub fn path_graph_with_ranks(ranks: [usize; 5]) -> CHGraph {
        let mut builder = CHGraphBuilder::new();
        for rank in ranks {
            builder.add_node(rank, None);
        }

        for (start, end) in [(0, 1), (1, 2), (2, 3), (3, 4)] {
            builder.add_edge(start, end, 1.0, 1.0).unwrap();
        }

        builder.build()
    }

    /// Two components `{0, 1}` and `{2, 3}`, nodes 0 and 3 are the highest of their component.
    pub fn disconnected_graph() -> CHGraph {
        let mut builder = CHGraphBuilder::new();
        for rank in [3, 0, 1, 2] {
            builder.add_node(rank, None);
        }

        builder.add_edge(0, 1, 2.0, 2.0).unwrap();
        builder.add_edge(2, 3, 2.0, 2.0).unwrap();

        builder.build()
    }

    /// `width * height` grid around Brussels, node `row * width + col`, every node on the same
    /// level. Weights are whole numbers slightly above the straight line distance in meters.
    pub fn grid_graph(width: usize, height: usize) -> CHGraph {
        let mut builder = CHGraphBuilder::new();
        let mut points = Vec::with_capacity(width * height);

        for row in 0..height {
            for col in 0..width {
                let point = GeoPoint::new(50.85 + row as f64 * 0.001, 4.35 + col as f64 * 0.001);
                builder.add_node(0, Some(point));
                points.push(point);
            }
        }

        let mut connect = |start: NodeId, end: NodeId| {
            let weight = (points[start].plane_distance(&points[end]) * 1.1).ceil();
            builder.add_edge(start, end, weight, weight).unwrap();
        };

        for row in 0..height {
            for col in 0..width {
                let node = row * width + col;
                if col + 1 < width {
                    connect(node, node + 1);
                }
                if row + 1 < height {
                    connect(node, node + width);
                }
            }
        }

        builder.build()
    }

    pub struct RandomNetwork {
        pub node_count: usize,

        /// `(start, end, forward_weight, backward_weight)`
        pub edges: Vec<(NodeId, NodeId, Weight, Weight)>,

        /// `(in_edge, via, out_edge, weight)`
        pub turn_costs: Vec<(EdgeId, NodeId, EdgeId, Weight)>,
    }

    /// Random network with whole weights between 1 and 20, a quarter of the edges are one-way.
    pub fn random_network(node_count: usize, edge_count: usize, seed: u64) -> RandomNetwork {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut edges = Vec::with_capacity(edge_count);

        while edges.len() < edge_count {
            let start = rng.random_range(0..node_count);
            let end = rng.random_range(0..node_count);
            if start == end {
                continue;
            }

            let forward_weight = rng.random_range(1..=20) as Weight;
            let backward_weight = if rng.random_bool(0.25) {
                MAX_WEIGHT
            } else {
                rng.random_range(1..=20) as Weight
            };

            edges.push((start, end, forward_weight, backward_weight));
        }

        RandomNetwork {
            node_count,
            edges,
            turn_costs: Vec::new(),
        }
    }

    impl RandomNetwork {
        /// Adds random turn costs, a tenth of them forbidding the turn.
        pub fn with_random_turn_costs(mut self, turn_count: usize, seed: u64) -> Self {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut attempts = 0;

            while self.turn_costs.len() < turn_count && attempts < turn_count * 100 {
                attempts += 1;

                let in_edge = rng.random_range(0..self.edges.len());
                let out_edge = rng.random_range(0..self.edges.len());
                if in_edge == out_edge {
                    continue;
                }

                let (in_start, in_end, _, _) = self.edges[in_edge];
                let (out_start, out_end, _, _) = self.edges[out_edge];
                let Some(&via) = [in_start, in_end]
                    .iter()
                    .find(|node| **node == out_start || **node == out_end)
                else {
                    continue;
                };

                let weight = if rng.random_bool(0.1) {
                    MAX_WEIGHT
                } else {
                    rng.random_range(0..=5) as Weight
                };

                self.turn_costs.push((in_edge, via, out_edge, weight));
            }

            self
        }

        fn builder(&self, ranks: &[usize]) -> CHGraphBuilder {
            let mut builder = CHGraphBuilder::new();
            for &rank in ranks {
                builder.add_node(rank, None);
            }

            for &(start, end, forward_weight, backward_weight) in self.edges.iter() {
                builder
                    .add_edge(start, end, forward_weight, backward_weight)
                    .unwrap();
            }

            for &(in_edge, via, out_edge, weight) in self.turn_costs.iter() {
                builder.add_turn_cost(in_edge, via, out_edge, weight).unwrap();
            }

            builder
        }

        /// Every node on the same level, no shortcuts.
        pub fn flat_graph(&self) -> CHGraph {
            self.builder(&vec![0; self.node_count]).build()
        }

        /// Contracts the nodes in a random order without witness searches: every pair of an
        /// incoming and an outgoing edge of a contracted node gets a shortcut, unless the turn
        /// between them is forbidden. Pairs leading back to the same neighbor become loop
        /// shortcuts, which edge-based paths need to get around forbidden turns. Loops at the
        /// contracted node itself are first folded into its incoming edges.
        pub fn contracted_graph(&self, seed: u64) -> CHGraph {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut order: Vec<NodeId> = (0..self.node_count).collect();
            order.shuffle(&mut rng);

            let mut ranks = vec![0; self.node_count];
            for (rank, &node) in order.iter().enumerate() {
                ranks[node] = rank;
            }

            let mut builder = self.builder(&ranks);
            let mut contracted = vec![false; self.node_count];

            for &node in order.iter() {
                loop {
                    let extensions = loop_extensions(builder.graph(), node, &contracted);
                    if extensions.is_empty() {
                        break;
                    }

                    for (start, incoming_edge, loop_edge) in extensions {
                        builder
                            .add_shortcut(start, node, incoming_edge, loop_edge)
                            .unwrap();
                    }
                }

                let shortcuts = naive_shortcuts(builder.graph(), node, &contracted);
                for (start, end, incoming_edge, outgoing_edge) in shortcuts {
                    builder
                        .add_shortcut(start, end, incoming_edge, outgoing_edge)
                        .unwrap();
                }

                contracted[node] = true;
            }

            builder.build()
        }
    }

    /// Finite edges between `node` and its remaining neighbors, loops at `node` excluded.
    fn remaining_edges(
        graph: &CHGraph,
        node: NodeId,
        contracted: &[bool],
        direction: SearchDirection,
    ) -> Vec<EdgeState> {
        graph
            .edges(node, direction)
            .filter(|edge| {
                edge.adj_node != node && !contracted[edge.adj_node] && edge.weight.is_finite()
            })
            .collect()
    }

    /// Incoming edges of `node` followed by one of its loops, where that beats every incoming
    /// edge with the same start and original edges at both ends.
    fn loop_extensions(
        graph: &CHGraph,
        node: NodeId,
        contracted: &[bool],
    ) -> Vec<(NodeId, EdgeId, EdgeId)> {
        let loops: Vec<EdgeState> = graph
            .edges(node, SearchDirection::Forward)
            .filter(|edge| edge.adj_node == node && edge.weight.is_finite())
            .collect();
        if loops.is_empty() {
            return Vec::new();
        }

        let incoming = remaining_edges(graph, node, contracted, SearchDirection::Backward);

        let mut known: FxHashMap<(NodeId, EdgeKey, EdgeKey), Weight> = FxHashMap::default();
        for edge in incoming.iter() {
            let weight = known
                .entry((edge.adj_node, edge.first_edge_key, edge.last_edge_key))
                .or_insert(MAX_WEIGHT);
            *weight = weight.min(edge.weight);
        }

        let mut best: FxHashMap<(NodeId, EdgeKey, EdgeKey), (Weight, EdgeId, EdgeId)> =
            FxHashMap::default();

        for incoming_edge in incoming.iter() {
            for loop_edge in loops.iter() {
                let turn_weight =
                    graph.turn_weight(incoming_edge.last_edge_key, node, loop_edge.first_edge_key);
                let weight = incoming_edge.weight + turn_weight + loop_edge.weight;

                let key = (
                    incoming_edge.adj_node,
                    incoming_edge.first_edge_key,
                    loop_edge.last_edge_key,
                );
                if !weight.is_finite()
                    || weight >= known.get(&key).copied().unwrap_or(MAX_WEIGHT)
                {
                    continue;
                }

                let entry = best
                    .entry(key)
                    .or_insert((MAX_WEIGHT, incoming_edge.edge, loop_edge.edge));
                if weight < entry.0 {
                    *entry = (weight, incoming_edge.edge, loop_edge.edge);
                }
            }
        }

        let mut extensions: Vec<(NodeId, EdgeId, EdgeId)> = best
            .into_iter()
            .map(|((start, _, _), (_, incoming_edge, loop_edge))| (start, incoming_edge, loop_edge))
            .collect();
        extensions.sort_unstable();
        extensions
    }

    fn naive_shortcuts(
        graph: &CHGraph,
        node: NodeId,
        contracted: &[bool],
    ) -> Vec<(NodeId, NodeId, EdgeId, EdgeId)> {
        let incoming = remaining_edges(graph, node, contracted, SearchDirection::Backward);
        let outgoing = remaining_edges(graph, node, contracted, SearchDirection::Forward);

        // Cheapest shortcut per start, end and original edges at both ends
        let mut best: FxHashMap<(NodeId, NodeId, EdgeKey, EdgeKey), (Weight, EdgeId, EdgeId)> =
            FxHashMap::default();

        for incoming_edge in incoming.iter() {
            for outgoing_edge in outgoing.iter() {
                // Turning back onto the same road is rejected by its infinite turn weight
                let turn_weight = graph.turn_weight(
                    incoming_edge.last_edge_key,
                    node,
                    outgoing_edge.first_edge_key,
                );
                let weight = incoming_edge.weight + turn_weight + outgoing_edge.weight;
                if !weight.is_finite() {
                    continue;
                }

                let key = (
                    incoming_edge.adj_node,
                    outgoing_edge.adj_node,
                    incoming_edge.first_edge_key,
                    outgoing_edge.last_edge_key,
                );

                let entry = best
                    .entry(key)
                    .or_insert((MAX_WEIGHT, incoming_edge.edge, outgoing_edge.edge));
                if weight < entry.0 {
                    *entry = (weight, incoming_edge.edge, outgoing_edge.edge);
                }
            }
        }

        let mut shortcuts: Vec<(NodeId, NodeId, EdgeId, EdgeId)> = best
            .into_iter()
            .map(|((start, end, _, _), (_, incoming_edge, outgoing_edge))| {
                (start, end, incoming_edge, outgoing_edge)
            })
            .collect();
        shortcuts.sort_unstable();
        shortcuts
    }

    /// Node-based Dijkstra over every edge, ignoring levels and turn costs.
    pub fn shortest_weight<G: Graph>(graph: &G, from: NodeId, to: NodeId) -> Weight {
        let mut weights = vec![MAX_WEIGHT; graph.node_count()];
        let mut settled = vec![false; graph.node_count()];
        weights[from] = 0.0;

        while let Some(node) = (0..graph.node_count())
            .filter(|&node| !settled[node] && weights[node].is_finite())
            .min_by(|&a, &b| weights[a].total_cmp(&weights[b]))
        {
            if node == to {
                break;
            }

            settled[node] = true;
            for edge in graph.edges(node, SearchDirection::Forward) {
                let weight = weights[node] + edge.weight;
                if weight < weights[edge.adj_node] {
                    weights[edge.adj_node] = weight;
                }
            }
        }

        weights[to]
    }

    /// Edge-based Dijkstra over original edges, with turn costs.
    pub fn edge_based_shortest_weight<G: Graph>(graph: &G, from: NodeId, to: NodeId) -> Weight {
        if from == to {
            return 0.0;
        }

        // Open states are (weight, node, key of the edge entering it)
        let mut weights: FxHashMap<EdgeKey, Weight> = FxHashMap::default();
        let mut settled: FxHashMap<EdgeKey, bool> = FxHashMap::default();
        let mut open: Vec<(Weight, NodeId, EdgeKey)> = vec![(0.0, from, NO_EDGE_KEY)];

        while let Some(index) = (0..open.len()).min_by(|&a, &b| open[a].0.total_cmp(&open[b].0)) {
            let (weight, node, key) = open.swap_remove(index);
            if settled.insert(key, true).is_some() {
                continue;
            }

            if node == to {
                return weight;
            }

            for edge in graph.edges(node, SearchDirection::Forward) {
                if edge.shortcut {
                    continue;
                }

                let turn_weight = if key == NO_EDGE_KEY {
                    0.0
                } else {
                    graph.turn_weight(key, node, edge.first_edge_key)
                };

                let next_weight = weight + turn_weight + edge.weight;
                if !next_weight.is_finite() || settled.contains_key(&edge.last_edge_key) {
                    continue;
                }

                let known = weights
                    .get(&edge.last_edge_key)
                    .copied()
                    .unwrap_or(MAX_WEIGHT);
                if next_weight < known {
                    weights.insert(edge.last_edge_key, next_weight);
                    open.push((next_weight, edge.adj_node, edge.last_edge_key));
                }
            }
        }

        MAX_WEIGHT
    }
}
