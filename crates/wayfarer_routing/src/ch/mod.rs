pub mod ch_edge;
pub mod ch_graph;
pub mod ch_graph_builder;
pub mod path_unpacker;
