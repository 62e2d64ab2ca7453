use std::collections::{HashMap, HashSet};

use wayfind_core::VertexId;

use super::{LegSearch, Step, dead_end};
use crate::error::PathfindingError;
use crate::heuristic::Heuristic;
use crate::path::{GraphPath, TraceMap};
use crate::range::SubRange;
use crate::step_rule::StepRule;
use crate::traits::{PathGraph, VertexView};

const EPSILON: f64 = 1e-9;

struct Frame {
    vertex: VertexId,
    g: f64,
    /// Index of the next neighbor to try.
    next: usize,
}

/// Iterative-deepening A*.
///
/// Depth-first search bounded by an f-cost threshold. When an iteration
/// exhausts without reaching the target the threshold rises to the smallest
/// f-value that exceeded it. The recursion is kept on an explicit stack so
/// the search can be advanced one vertex at a time.
pub struct IdaStarSearch<H, R> {
    heuristic: H,
    rule: R,
    leg: SubRange,
    threshold: f64,
    next_threshold: f64,
    stack: Vec<Frame>,
    on_path: HashSet<VertexId>,
    /// Cheapest g seen per vertex in the current iteration.
    best: HashMap<VertexId, f64>,
    visited: HashSet<VertexId>,
    trace: TraceMap,
    found: bool,
    iterations: usize,
}

impl<H: Heuristic, R: StepRule> IdaStarSearch<H, R> {
    pub fn new(heuristic: H, rule: R) -> Self {
        Self {
            heuristic,
            rule,
            leg: SubRange::new(VertexId(0), VertexId(0)),
            threshold: 0.0,
            next_threshold: f64::INFINITY,
            stack: Vec::new(),
            on_path: HashSet::new(),
            best: HashMap::new(),
            visited: HashSet::new(),
            trace: TraceMap::new(),
            found: false,
            iterations: 0,
        }
    }

    /// Number of deepening iterations started in the current leg.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    fn reset(&mut self) {
        self.stack.clear();
        self.on_path.clear();
        self.best.clear();
        self.visited.clear();
        self.trace.clear();
        self.found = false;
        self.iterations = 0;
        self.next_threshold = f64::INFINITY;
    }

    fn push_root(&mut self) {
        let source = self.leg.source;
        self.stack.clear();
        self.on_path.clear();
        self.best.clear();
        self.stack.push(Frame {
            vertex: source,
            g: 0.0,
            next: 0,
        });
        self.on_path.insert(source);
        self.best.insert(source, 0.0);
        self.iterations += 1;
    }
}

impl<G, H, R> LegSearch<G> for IdaStarSearch<H, R>
where
    G: PathGraph,
    H: Heuristic,
    R: StepRule,
{
    fn prepare(&mut self, graph: &G, leg: SubRange) {
        self.reset();
        self.leg = leg;
        self.threshold = self
            .heuristic
            .estimate(graph.position(leg.source), graph.position(leg.target));
        self.found = leg.source == leg.target;
        self.push_root();
    }

    fn step(&mut self, graph: &G) -> Result<Step, PathfindingError> {
        if self.found {
            return Ok(Step::Reached);
        }
        let goal = graph.position(self.leg.target);
        let Some(frame) = self.stack.last_mut() else {
            if !self.next_threshold.is_finite() {
                return Err(dead_end(graph, self.leg));
            }
            log::trace!(
                "ida*: threshold {} -> {}",
                self.threshold,
                self.next_threshold
            );
            self.threshold = self.next_threshold;
            self.next_threshold = f64::INFINITY;
            self.push_root();
            return Ok(Step::Visited {
                current: self.leg.source,
                enqueued: Vec::new(),
            });
        };

        let (vertex, g) = (frame.vertex, frame.g);
        self.visited.insert(vertex);
        let here = VertexView::of(graph, vertex);
        let neighbors = graph.neighbors(vertex);
        let mut chosen = None;
        while frame.next < neighbors.len() {
            let n = neighbors[frame.next];
            frame.next += 1;
            if graph.is_obstacle(n) || self.on_path.contains(&n) {
                continue;
            }
            let there = VertexView::of(graph, n);
            let child_g = g + self.rule.step_cost(there, here);
            let f = child_g + self.heuristic.estimate(there.position, goal);
            if f > self.threshold + EPSILON {
                self.next_threshold = self.next_threshold.min(f);
                continue;
            }
            if self.best.get(&n).is_some_and(|&b| b <= child_g) {
                continue;
            }
            self.best.insert(n, child_g);
            chosen = Some((n, child_g));
            break;
        }

        match chosen {
            Some((n, child_g)) => {
                self.stack.push(Frame {
                    vertex: n,
                    g: child_g,
                    next: 0,
                });
                self.on_path.insert(n);
                if n == self.leg.target {
                    self.found = true;
                    self.trace = self
                        .stack
                        .windows(2)
                        .map(|w| (w[1].vertex, w[0].vertex))
                        .collect();
                }
                Ok(Step::Visited {
                    current: vertex,
                    enqueued: vec![n],
                })
            }
            None => {
                self.stack.pop();
                self.on_path.remove(&vertex);
                Ok(Step::Visited {
                    current: vertex,
                    enqueued: Vec::new(),
                })
            }
        }
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristic::Manhattan;
    use crate::search::testing::{assert_valid, at, grid, run};
    use crate::step_rule::DefaultStepRule;
    use wayfind_core::Topology;

    #[test]
    fn finds_optimal_path_around_walls() {
        let g = grid(
            "\
.....
.###.
...#.
.#...",
            Topology::VonNeumann,
        );
        let mut s = IdaStarSearch::new(Manhattan, DefaultStepRule);
        let (from, to) = (at(&g, 2, 0), at(&g, 2, 2));
        let p = run(&g, &mut s, from, to).unwrap();
        // Left route: (1,0) (0,0) (0,1) (0,2) (1,2) (2,2).
        assert_eq!(p.count(), 6);
        assert_eq!(p.cost(), 6.0);
        assert_valid(&g, from, &p);
        assert!(s.iterations() > 1);
    }

    #[test]
    fn respects_costs() {
        let g = grid("191\n111", Topology::VonNeumann);
        let mut s = IdaStarSearch::new(Manhattan, DefaultStepRule);
        let p = run(&g, &mut s, at(&g, 0, 0), at(&g, 2, 0)).unwrap();
        assert_eq!(p.cost(), 4.0);
    }

    #[test]
    fn unreachable_target_is_a_dead_end() {
        let g = grid("..#..", Topology::VonNeumann);
        let mut s = IdaStarSearch::new(Manhattan, DefaultStepRule);
        assert!(run(&g, &mut s, at(&g, 0, 0), at(&g, 4, 0)).is_none());
    }
}
