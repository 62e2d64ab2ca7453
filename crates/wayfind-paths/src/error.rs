use thiserror::Error;

use wayfind_core::{Coordinate, VertexId};

/// Failures of a pathfinding run.
///
/// [`DeadEnd`](PathfindingError::DeadEnd) is the domain failure "no path";
/// it is raised by leg searches and recovered inside
/// [`PathfindingProcess::find_path`](crate::PathfindingProcess::find_path).
/// Every other variant describes broken input and reaches the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathfindingError {
    /// A range needs at least a source and a target.
    #[error("range needs at least 2 vertices, got {len}")]
    RangeTooShort { len: usize },
    /// A range vertex blocks movement.
    #[error("range vertex at {position} is an obstacle")]
    ObstacleInRange { position: Coordinate },
    /// A range vertex does not belong to the graph.
    #[error("range references unknown vertex {id}")]
    UnknownVertex { id: VertexId },
    /// No vertex exists at a requested coordinate.
    #[error("no vertex at {0}")]
    UnknownCoordinate(Coordinate),
    /// The search structure of a leg ran dry before reaching its target.
    #[error("dead end: no path from {from} to {to}")]
    DeadEnd { from: Coordinate, to: Coordinate },
    /// An algorithm name that is not in the catalogue.
    #[error("unknown algorithm \u{201c}{0}\u{201d}")]
    UnknownAlgorithm(String),
}

impl PathfindingError {
    /// Whether this is the recoverable "no path" condition.
    pub fn is_dead_end(&self) -> bool {
        matches!(self, PathfindingError::DeadEnd { .. })
    }
}
