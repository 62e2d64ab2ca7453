use wayfind_core::{Coordinate, Graph, VertexCost, VertexId};

/// Read-only view of a graph the engine can search.
///
/// Neighbor lists are indices into the same graph; the engine never
/// allocates, frees or mutates vertices.
pub trait PathGraph {
    /// Whether `v` names a vertex of this graph.
    fn contains(&self, v: VertexId) -> bool;

    /// Where `v` sits.
    fn position(&self, v: VertexId) -> &Coordinate;

    /// Cost of entering `v`.
    fn cost(&self, v: VertexId) -> VertexCost;

    /// Whether `v` blocks movement.
    fn is_obstacle(&self, v: VertexId) -> bool;

    /// Vertices one move away from `v`.
    fn neighbors(&self, v: VertexId) -> &[VertexId];

    /// Look up the vertex at `c`.
    fn find(&self, c: &Coordinate) -> Option<VertexId>;
}

impl PathGraph for Graph {
    #[inline]
    fn contains(&self, v: VertexId) -> bool {
        v.index() < self.len()
    }

    #[inline]
    fn position(&self, v: VertexId) -> &Coordinate {
        self[v].position()
    }

    #[inline]
    fn cost(&self, v: VertexId) -> VertexCost {
        self[v].cost()
    }

    #[inline]
    fn is_obstacle(&self, v: VertexId) -> bool {
        self[v].is_obstacle()
    }

    #[inline]
    fn neighbors(&self, v: VertexId) -> &[VertexId] {
        self[v].neighbors()
    }

    #[inline]
    fn find(&self, c: &Coordinate) -> Option<VertexId> {
        Graph::find(self, c)
    }
}

/// Position and cost of one end of a step, handed to a
/// [`StepRule`](crate::StepRule).
#[derive(Debug, Clone, Copy)]
pub struct VertexView<'a> {
    pub position: &'a Coordinate,
    pub cost: VertexCost,
}

impl<'a> VertexView<'a> {
    /// Snapshot vertex `v` of `graph`.
    #[inline]
    pub fn of<G: PathGraph>(graph: &'a G, v: VertexId) -> Self {
        Self {
            position: graph.position(v),
            cost: graph.cost(v),
        }
    }
}
