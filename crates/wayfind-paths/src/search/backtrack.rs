//! Greedy walks with an explicit backtracking stack.

use std::collections::HashSet;

use rand::{Rng, RngExt};
use wayfind_core::VertexId;

use super::{LegSearch, Step, dead_end};
use crate::error::PathfindingError;
use crate::heuristic::Heuristic;
use crate::path::{GraphPath, TraceMap};
use crate::range::SubRange;
use crate::step_rule::StepRule;
use crate::traits::{PathGraph, VertexView};

/// Chooses the next vertex of a greedy walk among unvisited neighbors.
pub trait Greed {
    /// Pick one of `candidates` (never empty), or `None` to backtrack.
    fn select<G: PathGraph>(
        &mut self,
        graph: &G,
        current: VertexId,
        target: VertexId,
        candidates: &[VertexId],
    ) -> Option<VertexId>;
}

/// The candidate with the lowest score; ties keep neighbor order.
fn lowest(candidates: &[VertexId], score: impl Fn(VertexId) -> f64) -> Option<VertexId> {
    candidates
        .iter()
        .map(|&v| (v, score(v)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(v, _)| v)
}

/// Plain depth-first: the first unvisited neighbor.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstNeighbor;

impl Greed for FirstNeighbor {
    fn select<G: PathGraph>(
        &mut self,
        _graph: &G,
        _current: VertexId,
        _target: VertexId,
        candidates: &[VertexId],
    ) -> Option<VertexId> {
        candidates.first().copied()
    }
}

/// The neighbor the heuristic rates closest to the target.
#[derive(Debug, Clone, Copy, Default)]
pub struct Nearest<H> {
    heuristic: H,
}

impl<H: Heuristic> Nearest<H> {
    pub fn new(heuristic: H) -> Self {
        Self { heuristic }
    }
}

impl<H: Heuristic> Greed for Nearest<H> {
    fn select<G: PathGraph>(
        &mut self,
        graph: &G,
        _current: VertexId,
        target: VertexId,
        candidates: &[VertexId],
    ) -> Option<VertexId> {
        let goal = graph.position(target);
        lowest(candidates, |v| self.heuristic.estimate(graph.position(v), goal))
    }
}

/// The neighbor that is cheapest to step onto.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cheapest<R> {
    rule: R,
}

impl<R: StepRule> Cheapest<R> {
    pub fn new(rule: R) -> Self {
        Self { rule }
    }
}

impl<R: StepRule> Greed for Cheapest<R> {
    fn select<G: PathGraph>(
        &mut self,
        graph: &G,
        current: VertexId,
        _target: VertexId,
        candidates: &[VertexId],
    ) -> Option<VertexId> {
        let here = VertexView::of(graph, current);
        lowest(candidates, |v| {
            self.rule.step_cost(VertexView::of(graph, v), here)
        })
    }
}

/// Step cost plus remaining heuristic distance, decided one step at a time.
#[derive(Debug, Clone, Copy, Default)]
pub struct Snake<H, R> {
    heuristic: H,
    rule: R,
}

impl<H: Heuristic, R: StepRule> Snake<H, R> {
    pub fn new(heuristic: H, rule: R) -> Self {
        Self { heuristic, rule }
    }
}

impl<H: Heuristic, R: StepRule> Greed for Snake<H, R> {
    fn select<G: PathGraph>(
        &mut self,
        graph: &G,
        current: VertexId,
        target: VertexId,
        candidates: &[VertexId],
    ) -> Option<VertexId> {
        let here = VertexView::of(graph, current);
        let goal = graph.position(target);
        lowest(candidates, |v| {
            let there = VertexView::of(graph, v);
            self.rule.step_cost(there, here) + self.heuristic.estimate(there.position, goal)
        })
    }
}

/// A uniformly random unvisited neighbor.
#[derive(Debug)]
pub struct RandomNeighbor<Rg> {
    rng: Rg,
}

impl<Rg: Rng> RandomNeighbor<Rg> {
    pub fn new(rng: Rg) -> Self {
        Self { rng }
    }
}

impl<Rg: Rng> Greed for RandomNeighbor<Rg> {
    fn select<G: PathGraph>(
        &mut self,
        _graph: &G,
        _current: VertexId,
        _target: VertexId,
        candidates: &[VertexId],
    ) -> Option<VertexId> {
        if candidates.is_empty() {
            return None;
        }
        Some(candidates[self.rng.random_range(0..candidates.len())])
    }
}

// ---------------------------------------------------------------------------
// BacktrackSearch
// ---------------------------------------------------------------------------

/// Walks from the source one greedy choice at a time.
///
/// Every move pushes the vertex left behind; when no unvisited neighbor
/// remains the walk pops back to it. An empty stack with nowhere to go is a
/// dead end.
pub struct BacktrackSearch<S> {
    greed: S,
    leg: SubRange,
    current: Option<VertexId>,
    stack: Vec<VertexId>,
    visited: HashSet<VertexId>,
    trace: TraceMap,
    candidates: Vec<VertexId>,
}

impl<S: Greed> BacktrackSearch<S> {
    pub fn new(greed: S) -> Self {
        Self {
            greed,
            leg: SubRange::new(VertexId(0), VertexId(0)),
            current: None,
            stack: Vec::new(),
            visited: HashSet::new(),
            trace: TraceMap::new(),
            candidates: Vec::with_capacity(8),
        }
    }

    fn reset(&mut self) {
        self.current = None;
        self.stack.clear();
        self.visited.clear();
        self.trace.clear();
    }
}

impl<G: PathGraph, S: Greed> LegSearch<G> for BacktrackSearch<S> {
    fn prepare(&mut self, _graph: &G, leg: SubRange) {
        self.reset();
        self.leg = leg;
        self.current = Some(leg.source);
    }

    fn step(&mut self, graph: &G) -> Result<Step, PathfindingError> {
        let Some(current) = self.current else {
            return Err(dead_end(graph, self.leg));
        };
        if current == self.leg.target {
            return Ok(Step::Reached);
        }
        self.visited.insert(current);

        let mut candidates = std::mem::take(&mut self.candidates);
        candidates.clear();
        candidates.extend(
            graph
                .neighbors(current)
                .iter()
                .copied()
                .filter(|n| !self.visited.contains(n) && !graph.is_obstacle(*n)),
        );
        let choice = if candidates.is_empty() {
            None
        } else {
            self.greed
                .select(graph, current, self.leg.target, &candidates)
        };
        self.candidates = candidates;

        let enqueued = match choice {
            Some(next) => {
                self.trace.insert(next, current);
                self.stack.push(current);
                self.current = Some(next);
                vec![next]
            }
            None => {
                self.current = self.stack.pop();
                Vec::new()
            }
        };
        Ok(Step::Visited { current, enqueued })
    }

    fn sub_path(&self, graph: &G) -> GraphPath {
        GraphPath::from_trace(graph, &self.trace, self.leg.target)
    }

    fn visited_count(&self) -> usize {
        self.visited.len()
    }

    fn clear(&mut self) {
        self.reset();
    }
}
