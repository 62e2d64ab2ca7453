//! Path reconstruction from parent-trace maps.
//!
//! Paths are stored target-first: the sequence runs from a leg's target
//! back to (but excluding) its source. [`GraphPath::route`] yields the same
//! coordinates in walking order.

use std::collections::HashMap;

use wayfind_core::{Coordinate, VertexId};

use crate::traits::PathGraph;

/// Parent pointers recorded during a search: `child → parent`.
pub type TraceMap = HashMap<VertexId, VertexId>;

/// A reconstructed path for a single leg.
///
/// `cost` is the sum of the current cost of every collected vertex; the
/// leg's source is not collected.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GraphPath {
    coordinates: Vec<Coordinate>,
    cost: f64,
}

impl GraphPath {
    /// The path that goes nowhere: no coordinates, zero cost.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Walk `trace` from `end` until a vertex without a parent (the source).
    pub fn from_trace<G: PathGraph>(graph: &G, trace: &TraceMap, end: VertexId) -> Self {
        let mut vertices = Vec::new();
        let mut v = end;
        while let Some(&parent) = trace.get(&v) {
            vertices.push(v);
            v = parent;
        }
        Self::from_vertices(graph, &vertices)
    }

    /// Merge two half-searches at `meeting`.
    ///
    /// `backward` was grown from the leg's target and `forward` from its
    /// source. The target half is walked from `meeting` to the target, the
    /// source half from `meeting` to (excluding) the source, and both are
    /// joined target-first.
    pub fn bidirect<G: PathGraph>(
        graph: &G,
        forward: &TraceMap,
        backward: &TraceMap,
        meeting: VertexId,
    ) -> Self {
        let mut vertices = Vec::new();
        let mut v = meeting;
        while let Some(&parent) = backward.get(&v) {
            vertices.push(parent);
            v = parent;
        }
        vertices.reverse();
        let mut v = meeting;
        while let Some(&parent) = forward.get(&v) {
            vertices.push(v);
            v = parent;
        }
        Self::from_vertices(graph, &vertices)
    }

    /// Build from vertices already ordered target-first.
    pub fn from_vertices<G: PathGraph>(graph: &G, vertices: &[VertexId]) -> Self {
        let cost = vertices
            .iter()
            .map(|&v| graph.cost(v).current as f64)
            .sum();
        Self {
            coordinates: vertices
                .iter()
                .map(|&v| graph.position(v).clone())
                .collect(),
            cost,
        }
    }

    /// Coordinates from the target back toward the source.
    #[inline]
    pub fn coordinates(&self) -> &[Coordinate] {
        &self.coordinates
    }

    /// Coordinates in walking order, ending at the target.
    pub fn route(&self) -> impl DoubleEndedIterator<Item = &Coordinate> {
        self.coordinates.iter().rev()
    }

    /// Total cost of the collected vertices.
    #[inline]
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Number of collected vertices.
    #[inline]
    pub fn count(&self) -> usize {
        self.coordinates.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }
}

// ---------------------------------------------------------------------------
// CompositeGraphPath
// ---------------------------------------------------------------------------

/// Several leg paths joined end to end.
///
/// Each leg excludes its own source, so waypoints shared by consecutive
/// legs appear exactly once.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompositeGraphPath {
    legs: Vec<GraphPath>,
    coordinates: Vec<Coordinate>,
    cost: f64,
}

impl CompositeGraphPath {
    /// Join `legs`, given in travel order.
    pub fn new(legs: Vec<GraphPath>) -> Self {
        let coordinates = legs
            .iter()
            .rev()
            .flat_map(|leg| leg.coordinates().iter().cloned())
            .collect();
        let cost = legs.iter().map(GraphPath::cost).sum();
        Self {
            legs,
            coordinates,
            cost,
        }
    }

    /// A composite with no legs.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The leg paths in travel order.
    pub fn legs(&self) -> &[GraphPath] {
        &self.legs
    }

    /// Coordinates from the final target back toward the first source.
    pub fn coordinates(&self) -> &[Coordinate] {
        &self.coordinates
    }

    /// Coordinates in walking order, ending at the final target.
    pub fn route(&self) -> impl DoubleEndedIterator<Item = &Coordinate> {
        self.coordinates.iter().rev()
    }

    /// Sum of the leg costs.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Sum of the leg counts.
    pub fn count(&self) -> usize {
        self.coordinates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    /// Flatten into a single [`GraphPath`].
    pub fn into_path(self) -> GraphPath {
        GraphPath {
            coordinates: self.coordinates,
            cost: self.cost,
        }
    }
}

impl From<GraphPath> for CompositeGraphPath {
    fn from(path: GraphPath) -> Self {
        Self::new(vec![path])
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;
    use wayfind_core::Graph;

    #[test]
    fn graph_path_round_trip() {
        let g = Graph::parse("123").unwrap();
        let p = GraphPath::from_vertices(&g, &[VertexId(2), VertexId(1)]);
        let json = serde_json::to_string(&p).unwrap();
        let back: GraphPath = serde_json::from_str(&json).unwrap();
        assert_eq!(p, back);
    }
}
