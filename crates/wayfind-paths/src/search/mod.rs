//! Per-leg search strategies.
//!
//! A [`LegSearch`] owns the visited set, frontier and trace map of one leg
//! and advances one vertex per [`step`](LegSearch::step). The
//! [`PathfindingProcess`](crate::PathfindingProcess) drives it and takes
//! care of legs, lifecycle and events.
//!
//! | Search | Shape |
//! |---|---|
//! | [`FrontierSearch`] | one frontier grown from the source |
//! | [`BidirectSearch`] | two frontiers, from source and target, until they meet |
//! | [`BacktrackSearch`] | greedy walk with an explicit backtracking stack |
//! | [`IdaStarSearch`] | depth-first with an increasing f-cost threshold |

mod backtrack;
mod bidirect;
mod expansion;
mod ida;
mod unidirect;

pub use backtrack::{
    BacktrackSearch, Cheapest, FirstNeighbor, Greed, Nearest, RandomNeighbor, Snake,
};
pub use bidirect::BidirectSearch;
pub use ida::IdaStarSearch;
pub use unidirect::FrontierSearch;

use wayfind_core::VertexId;

use crate::error::PathfindingError;
use crate::path::GraphPath;
use crate::range::SubRange;
use crate::traits::PathGraph;

/// Outcome of advancing a leg search by one vertex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// The current vertex is the leg's target.
    Reached,
    /// `current` was processed; `enqueued` are the vertices it discovered.
    Visited {
        current: VertexId,
        enqueued: Vec<VertexId>,
    },
}

/// One algorithm's per-leg state machine.
pub trait LegSearch<G: PathGraph> {
    /// Reset all per-leg state and start a search over `leg`.
    fn prepare(&mut self, graph: &G, leg: SubRange);

    /// Advance by one vertex.
    ///
    /// Returns [`PathfindingError::DeadEnd`] once the search structure is
    /// exhausted without reaching the target.
    fn step(&mut self, graph: &G) -> Result<Step, PathfindingError>;

    /// Reconstruct the leg's path after [`Step::Reached`].
    fn sub_path(&self, graph: &G) -> GraphPath;

    /// Distinct vertices visited in the current leg.
    fn visited_count(&self) -> usize;

    /// Release per-leg state.
    fn clear(&mut self);
}

impl<G: PathGraph, S: LegSearch<G> + ?Sized> LegSearch<G> for Box<S> {
    fn prepare(&mut self, graph: &G, leg: SubRange) {
        (**self).prepare(graph, leg)
    }

    fn step(&mut self, graph: &G) -> Result<Step, PathfindingError> {
        (**self).step(graph)
    }

    fn sub_path(&self, graph: &G) -> GraphPath {
        (**self).sub_path(graph)
    }

    fn visited_count(&self) -> usize {
        (**self).visited_count()
    }

    fn clear(&mut self) {
        (**self).clear()
    }
}

pub(crate) fn dead_end<G: PathGraph>(graph: &G, leg: SubRange) -> PathfindingError {
    PathfindingError::DeadEnd {
        from: graph.position(leg.source).clone(),
        to: graph.position(leg.target).clone(),
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use wayfind_core::{Coordinate, Graph, Topology, VertexId};

    use super::{LegSearch, Step};
    use crate::path::GraphPath;
    use crate::range::SubRange;

    pub(crate) fn grid(text: &str, topology: Topology) -> Graph {
        let mut g = Graph::parse(text).unwrap();
        g.connect(topology);
        g
    }

    pub(crate) fn at(g: &Graph, x: i32, y: i32) -> VertexId {
        g.find(&Coordinate::from([x, y])).unwrap()
    }

    /// Drive `search` over one leg to completion.
    pub(crate) fn run<S: LegSearch<Graph>>(
        g: &Graph,
        search: &mut S,
        from: VertexId,
        to: VertexId,
    ) -> Option<GraphPath> {
        search.prepare(g, SubRange::new(from, to));
        loop {
            match search.step(g) {
                Ok(Step::Reached) => return Some(search.sub_path(g)),
                Ok(Step::Visited { .. }) => {}
                Err(e) => {
                    assert!(e.is_dead_end(), "unexpected error {e}");
                    return None;
                }
            }
        }
    }

    /// Check that consecutive route coordinates are graph neighbors.
    pub(crate) fn assert_valid(g: &Graph, from: VertexId, path: &GraphPath) {
        let mut prev = from;
        for c in path.route() {
            let v = g.find(c).unwrap();
            assert!(!g[v].is_obstacle(), "{c} is an obstacle");
            assert!(g[prev].neighbors().contains(&v), "{c} not adjacent to previous");
            prev = v;
        }
    }
}
