//! The [`Graph`] arena: vertices stored flat, neighbors as indices.
//!
//! Vertices never own each other: a vertex's neighbor list holds
//! [`VertexId`]s into the arena. Neighbor lists are filled by
//! [`Graph::connect`], which overlays a [`Neighborhood`] on the arena and
//! drops candidates that are missing or blocked.

use std::collections::HashMap;
use std::fmt;
use std::ops::Index;

use crate::coordinate::Coordinate;
use crate::cost::{CostRange, VertexCost};
use crate::error::GraphError;
use crate::neighborhood::{Neighborhood, NeighborhoodCache};

// ---------------------------------------------------------------------------
// VertexId / Vertex
// ---------------------------------------------------------------------------

/// Index of a vertex inside its [`Graph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VertexId(pub usize);

impl VertexId {
    /// The raw arena index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A graph node: position, cost, obstacle flag and neighbor indices.
#[derive(Debug, Clone)]
pub struct Vertex {
    position: Coordinate,
    cost: VertexCost,
    obstacle: bool,
    neighbors: Vec<VertexId>,
}

impl Vertex {
    fn new(position: Coordinate) -> Self {
        Self {
            position,
            cost: VertexCost::default(),
            obstacle: false,
            neighbors: Vec::new(),
        }
    }

    /// Where the vertex sits.
    #[inline]
    pub fn position(&self) -> &Coordinate {
        &self.position
    }

    /// Cost of entering the vertex.
    #[inline]
    pub fn cost(&self) -> VertexCost {
        self.cost
    }

    /// Whether the vertex blocks movement.
    #[inline]
    pub fn is_obstacle(&self) -> bool {
        self.obstacle
    }

    /// Neighbor indices, as computed by the last [`Graph::connect`].
    #[inline]
    pub fn neighbors(&self) -> &[VertexId] {
        &self.neighbors
    }
}

// ---------------------------------------------------------------------------
// Graph
// ---------------------------------------------------------------------------

/// A box-shaped graph of any dimensionality.
///
/// Vertices are laid out with axis 0 varying fastest. A freshly built graph
/// has no edges; call [`connect`](Graph::connect) after editing obstacles.
#[derive(Debug, Clone)]
pub struct Graph {
    extent: Box<[i32]>,
    vertices: Vec<Vertex>,
    index: HashMap<Coordinate, VertexId>,
}

impl Graph {
    /// Create a graph covering `0..extent[i]` on every axis `i`.
    pub fn new(extent: &[i32]) -> Result<Self, GraphError> {
        if extent.is_empty() || extent.iter().any(|&e| e <= 0) {
            return Err(GraphError::EmptyExtent);
        }
        let len = extent
            .iter()
            .try_fold(1usize, |acc, &e| acc.checked_mul(e as usize))
            .ok_or_else(|| GraphError::ExtentTooLarge(extent.to_vec()))?;
        let mut vertices = Vec::with_capacity(len);
        let mut index = HashMap::with_capacity(len);
        let mut cursor = vec![0; extent.len()];
        for i in 0..len {
            let c = Coordinate::new(cursor.clone());
            index.insert(c.clone(), VertexId(i));
            vertices.push(Vertex::new(c));
            // Odometer increment, axis 0 fastest.
            for (axis, value) in cursor.iter_mut().enumerate() {
                *value += 1;
                if *value < extent[axis] {
                    break;
                }
                *value = 0;
            }
        }
        Ok(Self {
            extent: extent.into(),
            vertices,
            index,
        })
    }

    /// Build a 2D graph from a text map.
    ///
    /// Each line is a row (`y`), each character a column (`x`): `#` is an
    /// obstacle, `.` a cost-1 cell, and `1`-`9` a cell of that cost.
    /// Leading/trailing whitespace of the whole text is ignored; every row
    /// must have the same width. The graph is returned unconnected.
    pub fn parse(text: &str) -> Result<Self, GraphError> {
        let rows: Vec<&str> = text.trim().lines().map(str::trim_end).collect();
        let width = rows.first().map_or(0, |r| r.chars().count());
        for (line, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(GraphError::InconsistentSize { line });
            }
        }
        let mut graph = Self::new(&[width as i32, rows.len() as i32])?;
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().enumerate() {
                let id = VertexId(y * width + x);
                let vertex = &mut graph.vertices[id.index()];
                match ch {
                    '#' => vertex.obstacle = true,
                    '.' => {}
                    '1'..='9' => {
                        let cost = ch as i32 - '0' as i32;
                        vertex.cost = vertex.cost.with_current(cost);
                    }
                    _ => {
                        return Err(GraphError::InvalidRune {
                            ch,
                            line: y,
                            column: x,
                        });
                    }
                }
            }
        }
        Ok(graph)
    }

    /// Per-axis lengths.
    #[inline]
    pub fn extent(&self) -> &[i32] {
        &self.extent
    }

    /// Number of axes.
    #[inline]
    pub fn dimensions(&self) -> usize {
        self.extent.len()
    }

    /// Number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Whether the graph has no vertices (never true for a built graph).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Look up the vertex at `c`.
    #[inline]
    pub fn find(&self, c: &Coordinate) -> Option<VertexId> {
        self.index.get(c).copied()
    }

    /// The vertex with index `id`, if it exists.
    #[inline]
    pub fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id.index())
    }

    /// Iterate over every vertex with its index.
    pub fn iter(&self) -> impl Iterator<Item = (VertexId, &Vertex)> {
        self.vertices
            .iter()
            .enumerate()
            .map(|(i, v)| (VertexId(i), v))
    }

    /// Mark or unmark the vertex at `c` as an obstacle.
    ///
    /// Neighbor lists are not updated until the next [`connect`](Graph::connect).
    pub fn set_obstacle(&mut self, c: &Coordinate, obstacle: bool) -> Result<(), GraphError> {
        let id = self.locate(c)?;
        self.vertices[id.index()].obstacle = obstacle;
        Ok(())
    }

    /// Set the current cost of the vertex at `c` (clamped into its range).
    pub fn set_cost(&mut self, c: &Coordinate, cost: i32) -> Result<(), GraphError> {
        let id = self.locate(c)?;
        let vertex = &mut self.vertices[id.index()];
        vertex.cost = vertex.cost.with_current(cost);
        Ok(())
    }

    /// Change the cost range of every vertex, re-clamping current costs.
    pub fn set_cost_range(&mut self, range: CostRange) {
        for v in &mut self.vertices {
            v.cost = VertexCost::new(v.cost.current, range);
        }
    }

    /// Recompute every neighbor list from `topology`.
    ///
    /// A candidate is kept only if it is inside the graph and not an
    /// obstacle; obstacles get no neighbors at all.
    pub fn connect<N: Neighborhood>(&mut self, topology: N) {
        let mut cache = NeighborhoodCache::new(topology);
        for i in 0..self.vertices.len() {
            if self.vertices[i].obstacle {
                self.vertices[i].neighbors.clear();
                continue;
            }
            let position = self.vertices[i].position.clone();
            let neighbors: Vec<VertexId> = cache
                .get(&position)
                .iter()
                .filter_map(|n| self.index.get(n).copied())
                .filter(|n| !self.vertices[n.index()].obstacle)
                .collect();
            self.vertices[i].neighbors = neighbors;
        }
    }

    fn locate(&self, c: &Coordinate) -> Result<VertexId, GraphError> {
        if c.dimensions() != self.dimensions() {
            return Err(GraphError::DimensionMismatch {
                expected: self.dimensions(),
                found: c.dimensions(),
            });
        }
        self.find(c)
            .ok_or_else(|| GraphError::UnknownCoordinate(c.clone()))
    }
}

impl Index<VertexId> for Graph {
    type Output = Vertex;

    #[inline]
    fn index(&self, id: VertexId) -> &Vertex {
        &self.vertices[id.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::neighborhood::Topology;

    #[test]
    fn new_lays_out_axis_zero_fastest() {
        let g = Graph::new(&[3, 2]).unwrap();
        assert_eq!(g.len(), 6);
        assert_eq!(g[VertexId(0)].position(), &Coordinate::from([0, 0]));
        assert_eq!(g[VertexId(1)].position(), &Coordinate::from([1, 0]));
        assert_eq!(g[VertexId(3)].position(), &Coordinate::from([0, 1]));
        assert_eq!(g.find(&Coordinate::from([2, 1])), Some(VertexId(5)));
        assert_eq!(g.find(&Coordinate::from([3, 1])), None);
    }

    #[test]
    fn new_rejects_empty_extent() {
        assert_eq!(Graph::new(&[]).unwrap_err(), GraphError::EmptyExtent);
        assert_eq!(Graph::new(&[3, 0]).unwrap_err(), GraphError::EmptyExtent);
    }

    #[test]
    fn new_rejects_overflowing_extent() {
        let extent = [i32::MAX, i32::MAX, i32::MAX, 8];
        assert_eq!(
            Graph::new(&extent).unwrap_err(),
            GraphError::ExtentTooLarge(extent.to_vec())
        );
    }

    #[test]
    fn vertex_and_iter_agree_with_index() {
        let g = Graph::new(&[2, 2]).unwrap();
        assert!(g.vertex(VertexId(4)).is_none());
        let all: Vec<_> = g.iter().collect();
        assert_eq!(all.len(), 4);
        for (id, v) in all {
            assert_eq!(g.vertex(id).map(Vertex::position), Some(v.position()));
            assert_eq!(g.find(v.position()), Some(id));
        }
    }

    #[test]
    fn set_cost_range_reclamps_costs() {
        let mut g = Graph::parse("19").unwrap();
        g.set_cost_range(CostRange::new(2, 5));
        assert_eq!(g[VertexId(0)].cost().current, 2);
        assert_eq!(g[VertexId(1)].cost().current, 5);
        g.set_cost(&Coordinate::from([0, 0]), 8).unwrap();
        assert_eq!(g[VertexId(0)].cost().current, 5);
    }

    #[test]
    fn parse_reads_obstacles_and_costs() {
        let g = Graph::parse(
            "
.#3
9..",
        )
        .unwrap();
        assert_eq!(g.extent(), &[3, 2]);
        let at = |x, y| &g[g.find(&Coordinate::from([x, y])).unwrap()];
        assert!(at(1, 0).is_obstacle());
        assert_eq!(at(2, 0).cost().current, 3);
        assert_eq!(at(0, 1).cost().current, 9);
        assert_eq!(at(1, 1).cost().current, 1);
    }

    #[test]
    fn parse_errors() {
        assert_eq!(
            Graph::parse("..\n...").unwrap_err(),
            GraphError::InconsistentSize { line: 1 }
        );
        assert_eq!(
            Graph::parse("..\n.x").unwrap_err(),
            GraphError::InvalidRune {
                ch: 'x',
                line: 1,
                column: 1
            }
        );
    }

    #[test]
    fn connect_skips_obstacles_and_edges() {
        let mut g = Graph::parse("...\n.#.\n...").unwrap();
        g.connect(Topology::VonNeumann);
        let corner = g.find(&Coordinate::from([0, 0])).unwrap();
        assert_eq!(g[corner].neighbors().len(), 2);
        let edge = g.find(&Coordinate::from([1, 0])).unwrap();
        // (1,1) is blocked, so only left and right remain.
        assert_eq!(g[edge].neighbors().len(), 2);
        let blocked = g.find(&Coordinate::from([1, 1])).unwrap();
        assert!(g[blocked].neighbors().is_empty());
    }

    #[test]
    fn edits_validate_coordinates() {
        let mut g = Graph::new(&[2, 2]).unwrap();
        assert!(g.set_cost(&Coordinate::from([1, 1]), 4).is_ok());
        assert_eq!(g[VertexId(3)].cost().current, 4);
        assert_eq!(
            g.set_obstacle(&Coordinate::from([1]), true).unwrap_err(),
            GraphError::DimensionMismatch {
                expected: 2,
                found: 1
            }
        );
        assert!(matches!(
            g.set_obstacle(&Coordinate::from([5, 5]), true),
            Err(GraphError::UnknownCoordinate(_))
        ));
    }

    #[test]
    fn three_dimensional_moore() {
        let mut g = Graph::new(&[3, 3, 3]).unwrap();
        g.connect(Topology::Moore);
        let center = g.find(&Coordinate::from([1, 1, 1])).unwrap();
        assert_eq!(g[center].neighbors().len(), 26);
    }
}
