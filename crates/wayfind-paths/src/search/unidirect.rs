use wayfind_core::VertexId;

use super::expansion::Expansion;
use super::{LegSearch, Step, dead_end};
use crate::error::PathfindingError;
use crate::frontier::Frontier;
use crate::path::GraphPath;
use crate::policy::Policy;
use crate::range::SubRange;
use crate::step_rule::StepRule;
use crate::traits::PathGraph;

/// A single frontier grown from the leg's source.
///
/// The frontier container and ranking policy decide the algorithm:
/// a [`Fifo`](crate::Fifo) with [`Wave`](crate::Wave) is Lee's wave
/// expansion, a [`MinHeap`](crate::MinHeap) with [`Relax`](crate::Relax) is
/// Dijkstra, and so on.
pub struct FrontierSearch<F, P, R> {
    expansion: Expansion<F, P>,
    rule: R,
    leg: SubRange,
}

impl<F: Frontier, P: Policy, R: StepRule> FrontierSearch<F, P, R> {
    pub fn new(frontier: F, policy: P, rule: R) -> Self {
        Self {
            expansion: Expansion::new(frontier, policy, false),
            rule,
            leg: SubRange::new(VertexId(0), VertexId(0)),
        }
    }
}

impl<G, F, P, R> LegSearch<G> for FrontierSearch<F, P, R>
where
    G: PathGraph,
    F: Frontier,
    P: Policy,
    R: StepRule,
{
    fn prepare(&mut self, _graph: &G, leg: SubRange) {
        self.leg = leg;
        self.expansion.prepare(leg.source, leg.target);
    }

    fn step(&mut self, graph: &G) -> Result<Step, PathfindingError> {
        let Some(current) = self.expansion.current() else {
            return Err(dead_end(graph, self.leg));
        };
        if current == self.leg.target {
            return Ok(Step::Reached);
        }
        let enqueued = self.expansion.visit(graph, &self.rule, current);
        self.expansion.advance();
        Ok(Step::Visited { current, enqueued })
    }

    fn sub_path(&self, graph: &G) -> GraphPath {
        GraphPath::from_trace(graph, &self.expansion.trace, self.leg.target)
    }

    fn visited_count(&self) -> usize {
        self.expansion.visited.len()
    }

    fn clear(&mut self) {
        self.expansion.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontier::{Beam, Fifo, MinHeap};
    use crate::heuristic::Manhattan;
    use crate::policy::{AStarRank, GreedyRank, Relax, Wave};
    use crate::search::testing::{assert_valid, at, grid, run};
    use crate::step_rule::DefaultStepRule;
    use wayfind_core::Topology;

    const OPEN: &str = "...\n...\n...";
    const BLOCKED: &str = "...\n.#.\n...";

    #[test]
    fn lee_counts_hops() {
        let g = grid(OPEN, Topology::VonNeumann);
        let mut s = FrontierSearch::new(Fifo::new(), Wave, DefaultStepRule);
        let p = run(&g, &mut s, at(&g, 0, 0), at(&g, 2, 2)).unwrap();
        assert_eq!(p.count(), 4);
        assert_eq!(p.cost(), 4.0);
        assert_valid(&g, at(&g, 0, 0), &p);
    }

    #[test]
    fn dijkstra_avoids_expensive_cells() {
        // The straight route along the top row crosses two 9s.
        let g = grid("199\n111\n111", Topology::VonNeumann);
        let mut s = FrontierSearch::new(MinHeap::new(), Relax, DefaultStepRule);
        let p = run(&g, &mut s, at(&g, 0, 0), at(&g, 2, 0)).unwrap();
        // (0,1) (1,1) (2,1) then up into the target.
        assert_eq!(p.cost(), 12.0);
        assert_eq!(p.count(), 4);
        assert!(!p.coordinates().contains(&wayfind_core::Coordinate::from([1, 0])));
        assert_valid(&g, at(&g, 0, 0), &p);
    }

    #[test]
    fn astar_detours_around_obstacle() {
        let g = grid(BLOCKED, Topology::VonNeumann);
        let mut s = FrontierSearch::new(MinHeap::new(), AStarRank::new(Manhattan), DefaultStepRule);
        let p = run(&g, &mut s, at(&g, 0, 0), at(&g, 2, 2)).unwrap();
        assert_eq!(p.count(), 4);
        assert_valid(&g, at(&g, 0, 0), &p);
        assert!(LegSearch::<wayfind_core::Graph>::visited_count(&s) > 0);
    }

    #[test]
    fn walled_off_target_is_a_dead_end() {
        let g = grid("..#.\n..#.", Topology::VonNeumann);
        let mut s = FrontierSearch::new(Beam::new(3), GreedyRank::new(Manhattan), DefaultStepRule);
        assert!(run(&g, &mut s, at(&g, 0, 0), at(&g, 3, 1)).is_none());
        let mut s = FrontierSearch::new(Fifo::new(), Wave, DefaultStepRule);
        assert!(run(&g, &mut s, at(&g, 0, 0), at(&g, 3, 1)).is_none());
    }

    #[test]
    fn beam_reports_only_kept_vertices() {
        let g = grid(OPEN, Topology::Moore);
        let mut s = FrontierSearch::new(Beam::new(1), GreedyRank::new(Manhattan), DefaultStepRule);
        s.prepare(&g, SubRange::new(at(&g, 0, 0), at(&g, 2, 2)));
        let mut steps = 0;
        while let Ok(Step::Visited { enqueued, .. }) = s.step(&g) {
            // A one-wide beam keeps at most one discovery per vertex.
            assert!(enqueued.len() <= 1, "{enqueued:?}");
            steps += 1;
        }
        assert!(steps > 0);
    }

    #[test]
    fn visited_vertices_are_never_requeued() {
        let g = grid(OPEN, Topology::Moore);
        let mut s = FrontierSearch::new(Fifo::new(), Wave, DefaultStepRule);
        s.prepare(&g, SubRange::new(at(&g, 0, 0), at(&g, 2, 2)));
        let mut seen = std::collections::HashSet::new();
        while let Ok(Step::Visited { current, enqueued }) = s.step(&g) {
            assert!(seen.insert(current), "visited twice");
            for v in enqueued {
                assert!(!seen.contains(&v), "re-enqueued a visited vertex");
            }
        }
    }
}
