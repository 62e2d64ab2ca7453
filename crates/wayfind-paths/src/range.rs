//! Validated waypoint ranges and their legs.

use wayfind_core::{Coordinate, VertexId};

use crate::error::PathfindingError;
use crate::traits::PathGraph;

/// One leg of a [`VertexRange`]: a search from `source` to `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubRange {
    pub source: VertexId,
    pub target: VertexId,
}

impl SubRange {
    pub const fn new(source: VertexId, target: VertexId) -> Self {
        Self { source, target }
    }
}

/// An ordered waypoint list `[source, transit…, target]`.
///
/// Construction guarantees at least two entries, all of them vertices of
/// the graph and none of them obstacles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexRange {
    vertices: Vec<VertexId>,
}

impl VertexRange {
    /// Validate `vertices` against `graph`.
    pub fn new<G: PathGraph>(
        graph: &G,
        vertices: impl Into<Vec<VertexId>>,
    ) -> Result<Self, PathfindingError> {
        let vertices = vertices.into();
        if vertices.len() < 2 {
            return Err(PathfindingError::RangeTooShort {
                len: vertices.len(),
            });
        }
        for &id in &vertices {
            if !graph.contains(id) {
                return Err(PathfindingError::UnknownVertex { id });
            }
            if graph.is_obstacle(id) {
                return Err(PathfindingError::ObstacleInRange {
                    position: graph.position(id).clone(),
                });
            }
        }
        Ok(Self { vertices })
    }

    /// Resolve coordinates to vertices, then validate as [`new`](Self::new).
    pub fn from_coordinates<G: PathGraph>(
        graph: &G,
        coordinates: &[Coordinate],
    ) -> Result<Self, PathfindingError> {
        let vertices = coordinates
            .iter()
            .map(|c| {
                graph
                    .find(c)
                    .ok_or_else(|| PathfindingError::UnknownCoordinate(c.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(graph, vertices)
    }

    /// First waypoint.
    pub fn source(&self) -> VertexId {
        self.vertices[0]
    }

    /// Last waypoint.
    pub fn target(&self) -> VertexId {
        self.vertices[self.vertices.len() - 1]
    }

    /// Waypoints strictly between source and target.
    pub fn transit(&self) -> &[VertexId] {
        &self.vertices[1..self.vertices.len() - 1]
    }

    /// All waypoints in order.
    pub fn vertices(&self) -> &[VertexId] {
        &self.vertices
    }

    /// Number of waypoints (always ≥ 2).
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Consecutive `(source, target)` legs.
    pub fn sub_ranges(&self) -> impl Iterator<Item = SubRange> + '_ {
        self.vertices
            .windows(2)
            .map(|pair| SubRange::new(pair[0], pair[1]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfind_core::{Graph, Topology};

    fn graph() -> Graph {
        let mut g = Graph::parse("...\n.#.\n...").unwrap();
        g.connect(Topology::VonNeumann);
        g
    }

    #[test]
    fn legs_are_consecutive_pairs() {
        let g = graph();
        let r = VertexRange::new(&g, vec![VertexId(0), VertexId(2), VertexId(8)]).unwrap();
        assert_eq!(r.source(), VertexId(0));
        assert_eq!(r.target(), VertexId(8));
        assert_eq!(r.transit(), &[VertexId(2)]);
        let legs: Vec<_> = r.sub_ranges().collect();
        assert_eq!(
            legs,
            vec![
                SubRange::new(VertexId(0), VertexId(2)),
                SubRange::new(VertexId(2), VertexId(8)),
            ]
        );
    }

    #[test]
    fn rejects_malformed_ranges() {
        let g = graph();
        assert_eq!(
            VertexRange::new(&g, vec![VertexId(0)]).unwrap_err(),
            PathfindingError::RangeTooShort { len: 1 }
        );
        assert_eq!(
            VertexRange::new(&g, vec![VertexId(0), VertexId(4)]).unwrap_err(),
            PathfindingError::ObstacleInRange {
                position: Coordinate::from([1, 1])
            }
        );
        assert_eq!(
            VertexRange::new(&g, vec![VertexId(0), VertexId(99)]).unwrap_err(),
            PathfindingError::UnknownVertex { id: VertexId(99) }
        );
        assert!(matches!(
            VertexRange::from_coordinates(&g, &[Coordinate::from([0, 0]), Coordinate::from([9, 9])]),
            Err(PathfindingError::UnknownCoordinate(_))
        ));
    }
}
