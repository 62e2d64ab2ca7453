//! **wayfind-core**: the graph layer consumed by the wayfind pathfinding
//! engine.
//!
//! This crate provides the dimension-agnostic [`Coordinate`], vertex costs,
//! the flat [`Graph`] arena (vertices plus neighbor index lists) and the
//! neighborhood [`Topology`] set used to wire a graph together.

pub mod coordinate;
pub mod cost;
pub mod error;
pub mod graph;
pub mod neighborhood;

pub use coordinate::Coordinate;
pub use cost::{CostRange, VertexCost};
pub use error::GraphError;
pub use graph::{Graph, Vertex, VertexId};
pub use neighborhood::{Neighborhood, NeighborhoodCache, Topology};
