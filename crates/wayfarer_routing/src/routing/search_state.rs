use serde::Serialize;

/// Lifecycle of a query on a [`super::bidirectional_astar::BidirectionalAStar`].
///
/// `Ready -> Running -> {Found, NotFound, Interrupted} -> Done`. The outcome state is kept until the
/// next `init` or `reset`. A controller that never saw an `init` is `Done`.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize)]
pub enum SearchState {
    Ready,
    Running,
    Found,
    NotFound,
    Interrupted,
    Done,
}
