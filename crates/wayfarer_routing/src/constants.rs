use crate::types::{EdgeId, EdgeKey, NodeId, Weight};

pub const INVALID_NODE: NodeId = usize::MAX;
pub const INVALID_EDGE: EdgeId = usize::MAX;

/// Edge key of a start entry, which was not reached through any edge.
pub const NO_EDGE_KEY: EdgeKey = usize::MAX;

pub const MAX_WEIGHT: Weight = f64::INFINITY;

pub(crate) const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

pub(crate) const DEFAULT_MAX_SPEED_KMH: f64 = 140.0;
