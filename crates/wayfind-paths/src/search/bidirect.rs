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

/// Two frontiers, one from each end of the leg, expanded alternately until
/// one of them touches a vertex the other has reached.
///
/// Neighbor lists are assumed symmetric: the backward half walks them as
/// incoming edges.
pub struct BidirectSearch<F, P, R> {
    forward: Expansion<F, P>,
    backward: Expansion<F, P>,
    rule: R,
    leg: SubRange,
    meeting: Option<VertexId>,
    forward_turn: bool,
}

impl<F: Frontier, P: Policy, R: StepRule> BidirectSearch<F, P, R> {
    /// Each half gets its own frontier and policy.
    pub fn new(
        forward: (F, P),
        backward: (F, P),
        rule: R,
    ) -> Self {
        Self {
            forward: Expansion::new(forward.0, forward.1, false),
            backward: Expansion::new(backward.0, backward.1, true),
            rule,
            leg: SubRange::new(VertexId(0), VertexId(0)),
            meeting: None,
            forward_turn: true,
        }
    }

    /// Where the halves met, once they have.
    pub fn meeting(&self) -> Option<VertexId> {
        self.meeting
    }
}

impl<G, F, P, R> LegSearch<G> for BidirectSearch<F, P, R>
where
    G: PathGraph,
    F: Frontier,
    P: Policy,
    R: StepRule,
{
    fn prepare(&mut self, _graph: &G, leg: SubRange) {
        self.leg = leg;
        self.meeting = None;
        self.forward_turn = true;
        self.forward.prepare(leg.source, leg.target);
        self.backward.prepare(leg.target, leg.source);
    }

    fn step(&mut self, graph: &G) -> Result<Step, PathfindingError> {
        if self.meeting.is_some() {
            return Ok(Step::Reached);
        }
        let (side, other) = if self.forward_turn {
            (&mut self.forward, &self.backward)
        } else {
            (&mut self.backward, &self.forward)
        };
        self.forward_turn = !self.forward_turn;

        // A half that runs dry has explored its whole component without
        // touching the other one.
        let Some(current) = side.current() else {
            return Err(dead_end(graph, self.leg));
        };
        let enqueued = side.visit(graph, &self.rule, current);
        if other.reached(current) {
            self.meeting = Some(current);
        } else if let Some(&n) = enqueued.iter().find(|&&n| other.reached(n)) {
            self.meeting = Some(n);
        }
        side.advance();
        Ok(Step::Visited { current, enqueued })
    }

    fn sub_path(&self, graph: &G) -> GraphPath {
        match self.meeting {
            Some(m) => GraphPath::bidirect(graph, &self.forward.trace, &self.backward.trace, m),
            None => GraphPath::empty(),
        }
    }

    fn visited_count(&self) -> usize {
        self.forward.visited.len() + self.backward.visited.len()
    }

    fn clear(&mut self) {
        self.forward.clear();
        self.backward.clear();
        self.meeting = None;
    }
}
