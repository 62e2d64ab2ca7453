//! Step-cost rules between adjacent vertices.

use std::f64::consts::SQRT_2;

use crate::heuristic::round_to;
use crate::traits::VertexView;

/// Cost of moving from `current` onto the adjacent `neighbor`.
pub trait StepRule {
    fn step_cost(&self, neighbor: VertexView<'_>, current: VertexView<'_>) -> f64;
}

impl<R: StepRule + ?Sized> StepRule for Box<R> {
    #[inline]
    fn step_cost(&self, neighbor: VertexView<'_>, current: VertexView<'_>) -> f64 {
        (**self).step_cost(neighbor, current)
    }
}

impl<R: StepRule + ?Sized> StepRule for &R {
    #[inline]
    fn step_cost(&self, neighbor: VertexView<'_>, current: VertexView<'_>) -> f64 {
        (**self).step_cost(neighbor, current)
    }
}

/// The neighbor's own traversal cost.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultStepRule;

impl StepRule for DefaultStepRule {
    fn step_cost(&self, neighbor: VertexView<'_>, _current: VertexView<'_>) -> f64 {
        neighbor.cost.current as f64
    }
}

/// Elevation-style cost: the absolute difference of the two vertex costs.
#[derive(Debug, Clone, Copy, Default)]
pub struct LandscapeStepRule;

impl StepRule for LandscapeStepRule {
    fn step_cost(&self, neighbor: VertexView<'_>, current: VertexView<'_>) -> f64 {
        (neighbor.cost.current - current.cost.current).abs() as f64
    }
}

/// Charges diagonal steps `√2` times the inner rule, rounded to 3 places.
///
/// A step is cardinal when its per-axis differences sum to exactly 1.
#[derive(Debug, Clone, Copy, Default)]
pub struct CardinalStepRule<R> {
    inner: R,
}

impl<R: StepRule> CardinalStepRule<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

impl<R: StepRule> StepRule for CardinalStepRule<R> {
    fn step_cost(&self, neighbor: VertexView<'_>, current: VertexView<'_>) -> f64 {
        let cost = self.inner.step_cost(neighbor, current);
        let distance: i32 = neighbor.position.deltas(current.position).sum();
        if distance == 1 {
            cost
        } else {
            round_to(cost * SQRT_2, 3)
        }
    }
}

/// Adds a constant to every step of the inner rule.
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkStepRule<R> {
    inner: R,
    walk: f64,
}

impl<R: StepRule> WalkStepRule<R> {
    pub fn new(inner: R, walk: f64) -> Self {
        Self { inner, walk }
    }
}

impl<R: StepRule> StepRule for WalkStepRule<R> {
    fn step_cost(&self, neighbor: VertexView<'_>, current: VertexView<'_>) -> f64 {
        self.inner.step_cost(neighbor, current) + self.walk
    }
}
