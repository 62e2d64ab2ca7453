//! Ranking policies: how a discovered vertex is prioritised.

use wayfind_core::Coordinate;

use crate::frontier::Priority;
use crate::heuristic::Heuristic;

/// What a policy knows about a freshly discovered vertex.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    /// Best known cost to reach the vertex.
    pub accumulated: f64,
    /// Number of steps from the search root.
    pub hops: u32,
    pub position: &'a Coordinate,
    /// Where the search is heading.
    pub goal: &'a Coordinate,
}

/// Decides frontier priority and whether cheaper routes re-parent vertices.
pub trait Policy {
    /// Whether a cheaper route to an already discovered vertex replaces the
    /// old one (relaxation). Without it the first discovery wins.
    fn relaxes(&self) -> bool;

    fn rank(&self, candidate: &Candidate<'_>) -> Priority;
}

/// Unweighted wave: rank by hop count, first discovery wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct Wave;

impl Policy for Wave {
    fn relaxes(&self) -> bool {
        false
    }

    fn rank(&self, candidate: &Candidate<'_>) -> Priority {
        Priority::new(candidate.hops as f64, 0.0)
    }
}

/// Dijkstra: rank by accumulated cost, with relaxation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Relax;

impl Policy for Relax {
    fn relaxes(&self) -> bool {
        true
    }

    fn rank(&self, candidate: &Candidate<'_>) -> Priority {
        Priority::new(candidate.accumulated, 0.0)
    }
}

/// A*: rank by `accumulated + heuristic`, ties toward the goal.
#[derive(Debug, Clone, Copy, Default)]
pub struct AStarRank<H> {
    heuristic: H,
}

impl<H: Heuristic> AStarRank<H> {
    pub fn new(heuristic: H) -> Self {
        Self { heuristic }
    }
}

impl<H: Heuristic> Policy for AStarRank<H> {
    fn relaxes(&self) -> bool {
        true
    }

    fn rank(&self, candidate: &Candidate<'_>) -> Priority {
        let h = self.heuristic.estimate(candidate.position, candidate.goal);
        Priority::new(candidate.accumulated + h, h)
    }
}

/// Greedy best-first: rank by heuristic alone, ties by accumulated cost.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyRank<H> {
    heuristic: H,
}

impl<H: Heuristic> GreedyRank<H> {
    pub fn new(heuristic: H) -> Self {
        Self { heuristic }
    }
}

impl<H: Heuristic> Policy for GreedyRank<H> {
    fn relaxes(&self) -> bool {
        false
    }

    fn rank(&self, candidate: &Candidate<'_>) -> Priority {
        Priority::new(
            self.heuristic.estimate(candidate.position, candidate.goal),
            candidate.accumulated,
        )
    }
}

/// Greedy wave: rank by heuristic, ties by hop count.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeeRank<H> {
    heuristic: H,
}

impl<H: Heuristic> LeeRank<H> {
    pub fn new(heuristic: H) -> Self {
        Self { heuristic }
    }
}

impl<H: Heuristic> Policy for LeeRank<H> {
    fn relaxes(&self) -> bool {
        false
    }

    fn rank(&self, candidate: &Candidate<'_>) -> Priority {
        Priority::new(
            self.heuristic.estimate(candidate.position, candidate.goal),
            candidate.hops as f64,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristic::Manhattan;

    #[test]
    fn ranks() {
        let position = Coordinate::from([1, 0]);
        let goal = Coordinate::from([4, 4]);
        let c = Candidate {
            accumulated: 2.5,
            hops: 2,
            position: &position,
            goal: &goal,
        };
        assert_eq!(Wave.rank(&c), Priority::new(2.0, 0.0));
        assert_eq!(Relax.rank(&c), Priority::new(2.5, 0.0));
        assert_eq!(AStarRank::new(Manhattan).rank(&c), Priority::new(9.5, 7.0));
        assert_eq!(GreedyRank::new(Manhattan).rank(&c), Priority::new(7.0, 2.5));
        assert_eq!(LeeRank::new(Manhattan).rank(&c), Priority::new(7.0, 2.0));
        assert!(Relax.relaxes() && AStarRank::new(Manhattan).relaxes());
        assert!(!Wave.relaxes() && !GreedyRank::new(Manhattan).relaxes());
    }
}
