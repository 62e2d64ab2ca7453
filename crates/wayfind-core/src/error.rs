use thiserror::Error;

use crate::coordinate::Coordinate;

/// Errors raised while building or editing a [`Graph`](crate::Graph).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// Text map rows have inconsistent widths.
    #[error("graph: inconsistent row width at line {line}")]
    InconsistentSize { line: usize },
    /// A character with no meaning in a text map.
    #[error("graph: invalid rune \u{201c}{ch}\u{201d} at line {line}, column {column}")]
    InvalidRune { ch: char, line: usize, column: usize },
    /// A coordinate with the wrong number of axes.
    #[error("graph: expected {expected} dimensions, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
    /// An extent with no axes, or an axis of non-positive length.
    #[error("graph: extent must have at least one axis and positive lengths")]
    EmptyExtent,
    /// An extent whose vertex count does not fit in `usize`.
    #[error("graph: extent {0:?} has too many vertices")]
    ExtentTooLarge(Vec<i32>),
    /// A coordinate outside the graph.
    #[error("graph: no vertex at {0}")]
    UnknownCoordinate(Coordinate),
}
