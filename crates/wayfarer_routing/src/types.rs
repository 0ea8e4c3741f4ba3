pub type NodeId = usize;
pub type EdgeId = usize;

/// Key of an original edge traversed in one orientation, see [`crate::edge_direction`].
pub type EdgeKey = usize;

pub type Weight = f64;
