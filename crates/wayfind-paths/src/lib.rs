//! A multi-strategy pathfinding engine over arbitrary-dimension graphs.
//!
//! The engine searches a read-only graph (any [`PathGraph`], normally a
//! [`wayfind_core::Graph`]) along a [`VertexRange`] of waypoints and returns
//! the joined per-leg paths as a [`CompositeGraphPath`]:
//!
//! - **Wave and relaxation** searches: Lee, Dijkstra, A\* and its greedy
//!   variants, beam and random frontiers ([`FrontierSearch`])
//! - **Bidirectional** meet-in-the-middle searches ([`BidirectSearch`])
//! - **Greedy walks** with backtracking ([`BacktrackSearch`])
//! - **Iterative-deepening A\*** ([`IdaStarSearch`])
//!
//! [`Algorithm`] names every built-in combination and wires it from a
//! [`SearchConfig`]. A [`PathfindingProcess`] runs the legs, reports
//! [`ProcessEvent`]s, and honours pause and interrupt requests made through
//! its [`ProcessControl`].
//!
//! # Strategy seams
//!
//! | Trait | Decides |
//! |---|---|
//! | [`Heuristic`] | estimated distance between two positions |
//! | [`StepRule`] | cost of one move between adjacent vertices |
//! | [`Frontier`] | which discovered vertex comes out next |
//! | [`Policy`] | frontier priority and whether costs are relaxed |
//! | [`Greed`] | next move of a backtracking walk |
//! | [`LegSearch`] | one leg, one vertex at a time |

mod algorithm;
mod control;
mod error;
mod event;
mod frontier;
mod heuristic;
mod path;
mod policy;
mod process;
mod range;
mod search;
mod step_rule;
mod traits;

pub use algorithm::{
    Algorithm, BoxedHeuristic, BoxedSearch, BoxedStepRule, HeuristicKind, SearchConfig,
    StepRuleKind,
};
pub use control::{ProcessControl, ProcessState};
pub use error::PathfindingError;
pub use event::ProcessEvent;
pub use frontier::{Beam, Fifo, Frontier, MinHeap, Priority, RandomPool};
pub use heuristic::{
    Canberra, Chebyshev, Cosine, Diagonal, Euclidean, Hamming, Heuristic, Manhattan, Weighted,
    chebyshev, manhattan,
};
pub use path::{CompositeGraphPath, GraphPath, TraceMap};
pub use policy::{AStarRank, Candidate, GreedyRank, LeeRank, Policy, Relax, Wave};
pub use process::{DeadEndPolicy, PathfindingProcess};
pub use range::{SubRange, VertexRange};
pub use search::{
    BacktrackSearch, BidirectSearch, Cheapest, FirstNeighbor, FrontierSearch, Greed,
    IdaStarSearch, LegSearch, Nearest, RandomNeighbor, Snake, Step,
};
pub use step_rule::{CardinalStepRule, DefaultStepRule, LandscapeStepRule, StepRule, WalkStepRule};
pub use traits::{PathGraph, VertexView};
