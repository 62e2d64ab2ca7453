use std::collections::{HashMap, HashSet};

use wayfind_core::VertexId;

use crate::frontier::Frontier;
use crate::path::TraceMap;
use crate::policy::{Candidate, Policy};
use crate::step_rule::StepRule;
use crate::traits::{PathGraph, VertexView};

/// One search direction: a frontier grown from `root` toward `goal`.
///
/// Shared by the unidirectional and bidirectional searches.
pub(crate) struct Expansion<F, P> {
    pub(crate) frontier: F,
    policy: P,
    /// Grown from the target: step costs are charged in the opposite
    /// direction.
    reversed: bool,
    root: VertexId,
    goal: VertexId,
    current: Option<VertexId>,
    pub(crate) visited: HashSet<VertexId>,
    pub(crate) trace: TraceMap,
    accumulated: HashMap<VertexId, f64>,
    hops: HashMap<VertexId, u32>,
}

impl<F: Frontier, P: Policy> Expansion<F, P> {
    pub(crate) fn new(frontier: F, policy: P, reversed: bool) -> Self {
        Self {
            frontier,
            policy,
            reversed,
            root: VertexId(0),
            goal: VertexId(0),
            current: None,
            visited: HashSet::new(),
            trace: TraceMap::new(),
            accumulated: HashMap::new(),
            hops: HashMap::new(),
        }
    }

    pub(crate) fn prepare(&mut self, root: VertexId, goal: VertexId) {
        self.clear();
        self.root = root;
        self.goal = goal;
        self.current = Some(root);
        self.accumulated.insert(root, 0.0);
        self.hops.insert(root, 0);
    }

    pub(crate) fn clear(&mut self) {
        self.frontier.clear();
        self.current = None;
        self.visited.clear();
        self.trace.clear();
        self.accumulated.clear();
        self.hops.clear();
    }

    /// The vertex to process next, `None` once the frontier ran dry.
    #[inline]
    pub(crate) fn current(&self) -> Option<VertexId> {
        self.current
    }

    /// Whether a chain of parents links `v` back to the root.
    #[inline]
    pub(crate) fn reached(&self, v: VertexId) -> bool {
        v == self.root || self.trace.contains_key(&v)
    }

    /// Inspect and visit the current vertex: discover (or relax) its
    /// neighbors, queue them, and mark the vertex visited.
    ///
    /// Returns the vertices queued by this call and still in the frontier.
    pub(crate) fn visit<G: PathGraph, R: StepRule>(
        &mut self,
        graph: &G,
        rule: &R,
        current: VertexId,
    ) -> Vec<VertexId> {
        self.visited.insert(current);
        let g = self.accumulated.get(&current).copied().unwrap_or(0.0);
        let hops = self.hops.get(&current).copied().unwrap_or(0) + 1;
        let goal = graph.position(self.goal);
        let here = VertexView::of(graph, current);

        let mut enqueued = Vec::new();
        for &n in graph.neighbors(current) {
            if self.visited.contains(&n) || graph.is_obstacle(n) {
                continue;
            }
            let there = VertexView::of(graph, n);
            let step = if self.reversed {
                rule.step_cost(here, there)
            } else {
                rule.step_cost(there, here)
            };
            let tentative = g + step;
            let better = match self.accumulated.get(&n) {
                None => true,
                Some(&known) => self.policy.relaxes() && tentative < known,
            };
            if !better {
                continue;
            }
            self.accumulated.insert(n, tentative);
            self.hops.insert(n, hops);
            self.trace.insert(n, current);
            let priority = self.policy.rank(&Candidate {
                accumulated: tentative,
                hops,
                position: there.position,
                goal,
            });
            enqueued.push(n);
            if let Some(dropped) = self.frontier.push(n, priority) {
                enqueued.retain(|&v| v != dropped);
            }
        }
        enqueued
    }

    /// Move to the next unvisited frontier vertex.
    pub(crate) fn advance(&mut self) {
        self.current = None;
        while let Some(v) = self.frontier.pop() {
            if !self.visited.contains(&v) {
                self.current = Some(v);
                break;
            }
        }
    }
}
