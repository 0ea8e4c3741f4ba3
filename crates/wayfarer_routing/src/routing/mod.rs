pub mod abort;
pub mod approximation;
pub mod beeline_approximator;
pub mod best_path;
pub mod bidirectional_astar;
pub mod bidirectional_dijkstra;
pub mod consistent_approximator;
pub(crate) mod frontier;
pub mod search_direction;
pub mod search_entry;
pub mod search_options;
pub mod search_result;
pub mod search_state;
pub mod weight_approximator;
