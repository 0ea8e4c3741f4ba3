pub mod ch;
pub mod constants;
pub mod edge_direction;
pub mod error;
pub mod geopoint;
pub mod graph;
pub mod landmarks;
pub mod routing;
pub mod stopwatch;
pub mod types;

#[cfg(test)]
pub(crate) mod test_graph_utils;
