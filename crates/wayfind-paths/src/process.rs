//! The multi-leg search loop.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::control::{ProcessControl, ProcessState};
use crate::error::PathfindingError;
use crate::event::ProcessEvent;
use crate::path::{CompositeGraphPath, GraphPath};
use crate::range::{SubRange, VertexRange};
use crate::search::{LegSearch, Step};
use crate::traits::PathGraph;

/// What [`PathfindingProcess::find_path`] returns when a leg dead-ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DeadEndPolicy {
    /// No path at all.
    #[default]
    Empty,
    /// The legs completed before the dead end.
    Partial,
}

/// Drives a [`LegSearch`] over every leg of a [`VertexRange`].
///
/// The process owns the search state; the graph is borrowed read-only for
/// the lifetime of the process. Pause, resume and interrupt go through the
/// shared [`ProcessControl`] and take effect between vertices.
///
/// # Example
///
/// ```
/// use wayfind_core::{Coordinate, Graph, Topology};
/// use wayfind_paths::{Algorithm, SearchConfig, VertexRange};
///
/// let mut graph = Graph::parse("...\n.#.\n...").unwrap();
/// graph.connect(Topology::VonNeumann);
/// let range = VertexRange::from_coordinates(
///     &graph,
///     &[Coordinate::from([0, 0]), Coordinate::from([2, 2])],
/// )
/// .unwrap();
///
/// let mut process = Algorithm::AStar.process(&graph, &SearchConfig::default());
/// let path = process.find_path(&range, |_| {}).unwrap();
/// assert_eq!(path.count(), 4);
/// ```
pub struct PathfindingProcess<'g, G, S> {
    graph: &'g G,
    search: S,
    name: &'static str,
    control: ProcessControl,
    dead_end: DeadEndPolicy,
    visited: usize,
    legs_completed: usize,
}

impl<'g, G: PathGraph, S: LegSearch<G>> PathfindingProcess<'g, G, S> {
    pub fn new(graph: &'g G, search: S) -> Self {
        Self {
            graph,
            search,
            name: "custom",
            control: ProcessControl::new(),
            dead_end: DeadEndPolicy::default(),
            visited: 0,
            legs_completed: 0,
        }
    }

    /// Label used in log records.
    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    pub fn with_dead_end_policy(mut self, policy: DeadEndPolicy) -> Self {
        self.dead_end = policy;
        self
    }

    /// Share an existing control token, e.g. one already handed to
    /// another thread.
    pub fn with_control(mut self, control: ProcessControl) -> Self {
        self.control = control;
        self
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The control token. Clone it to pause or interrupt from elsewhere.
    #[inline]
    pub fn control(&self) -> &ProcessControl {
        &self.control
    }

    #[inline]
    pub fn state(&self) -> ProcessState {
        self.control.state()
    }

    #[inline]
    pub fn dead_end_policy(&self) -> DeadEndPolicy {
        self.dead_end
    }

    pub fn pause(&self) {
        self.control.pause();
    }

    pub fn resume(&self) {
        self.control.resume();
    }

    pub fn interrupt(&self) {
        self.control.interrupt();
    }

    /// Vertices visited over all legs of the last run.
    #[inline]
    pub fn visited_count(&self) -> usize {
        self.visited
    }

    /// Legs that reached their target in the last run.
    #[inline]
    pub fn legs_completed(&self) -> usize {
        self.legs_completed
    }

    /// Release per-run state. Safe in any state.
    pub fn dispose(&mut self) {
        self.search.clear();
        self.visited = 0;
        self.legs_completed = 0;
    }

    /// Search every leg of `range` in order and join the leg paths.
    ///
    /// `on_event` receives lifecycle and progress events synchronously. A
    /// dead end yields a result shaped by the [`DeadEndPolicy`]; an
    /// interrupt yields an empty path. Only malformed input is an error.
    pub fn find_path(
        &mut self,
        range: &VertexRange,
        mut on_event: impl FnMut(&ProcessEvent),
    ) -> Result<CompositeGraphPath, PathfindingError> {
        if let Some(&id) = range.vertices().iter().find(|&&v| !self.graph.contains(v)) {
            return Err(PathfindingError::UnknownVertex { id });
        }

        self.control.begin_run();
        self.visited = 0;
        self.legs_completed = 0;
        log::debug!(
            "{}: find_path {} -> {} over {} legs",
            self.name,
            self.graph.position(range.source()),
            self.graph.position(range.target()),
            range.len() - 1
        );
        on_event(&ProcessEvent::Started);

        let mut legs = Vec::with_capacity(range.len() - 1);
        for leg in range.sub_ranges() {
            let outcome = self.run_leg(leg, &mut on_event);
            self.search.clear();
            match outcome {
                Ok(Some(path)) => {
                    self.legs_completed += 1;
                    legs.push(path);
                }
                Ok(None) => {
                    log::info!(
                        "{}: interrupted after {} visited vertices",
                        self.name, self.visited
                    );
                    self.control.end_run(ProcessState::Interrupted);
                    on_event(&ProcessEvent::Interrupted);
                    return Ok(CompositeGraphPath::empty());
                }
                Err(e) if e.is_dead_end() => {
                    log::warn!("{}: {e}", self.name);
                    let result = match self.dead_end {
                        DeadEndPolicy::Empty => CompositeGraphPath::empty(),
                        DeadEndPolicy::Partial => CompositeGraphPath::new(legs),
                    };
                    self.finish(&mut on_event);
                    return Ok(result);
                }
                Err(e) => {
                    log::error!("{}: search failed: {e}", self.name);
                    self.control.end_run(ProcessState::Interrupted);
                    return Err(e);
                }
            }
        }

        let path = CompositeGraphPath::new(legs);
        log::debug!(
            "{}: found {} vertices, cost {}, {} visited",
            self.name,
            path.count(),
            path.cost(),
            self.visited
        );
        self.finish(&mut on_event);
        Ok(path)
    }

    fn finish(&mut self, on_event: &mut impl FnMut(&ProcessEvent)) {
        self.control.end_run(ProcessState::Finished);
        on_event(&ProcessEvent::Finished);
    }

    /// Run one leg. `Ok(None)` means the run was interrupted.
    fn run_leg(
        &mut self,
        leg: SubRange,
        on_event: &mut impl FnMut(&ProcessEvent),
    ) -> Result<Option<GraphPath>, PathfindingError> {
        let graph = self.graph;
        log::debug!(
            "{}: leg {} -> {}",
            self.name,
            graph.position(leg.source),
            graph.position(leg.target)
        );
        if leg.source == leg.target {
            if self.control.checkpoint(&mut *on_event) {
                return Ok(None);
            }
            return Ok(Some(GraphPath::empty()));
        }

        self.search.prepare(graph, leg);
        loop {
            if self.control.checkpoint(&mut *on_event) {
                self.visited += self.search.visited_count();
                return Ok(None);
            }
            let step = match self.search.step(graph) {
                Ok(step) => step,
                Err(e) => {
                    self.visited += self.search.visited_count();
                    return Err(e);
                }
            };
            match step {
                Step::Reached => {
                    self.visited += self.search.visited_count();
                    return Ok(Some(self.search.sub_path(graph)));
                }
                Step::Visited { current, enqueued } => {
                    log::trace!(
                        "{}: visit {} (+{})",
                        self.name,
                        graph.position(current),
                        enqueued.len()
                    );
                    on_event(&ProcessEvent::VertexProcessed {
                        current: graph.position(current).clone(),
                        enqueued: enqueued
                            .iter()
                            .map(|&v| graph.position(v).clone())
                            .collect(),
                    });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontier::{Fifo, MinHeap};
    use crate::policy::{Relax, Wave};
    use crate::step_rule::DefaultStepRule;
    use std::thread;
    use std::time::Duration;
    use wayfind_core::{Coordinate, Graph, Topology};

    fn grid(text: &str) -> Graph {
        let mut g = Graph::parse(text).unwrap();
        g.connect(Topology::VonNeumann);
        g
    }

    fn range(g: &Graph, points: &[[i32; 2]]) -> VertexRange {
        let coords: Vec<Coordinate> = points.iter().map(|&p| Coordinate::from(p)).collect();
        VertexRange::from_coordinates(g, &coords).unwrap()
    }

    fn lee() -> crate::search::FrontierSearch<Fifo, Wave, DefaultStepRule> {
        crate::search::FrontierSearch::new(Fifo::new(), Wave, DefaultStepRule)
    }

    #[test]
    fn events_bracket_the_run() {
        let g = grid("...\n...\n...");
        let mut p = PathfindingProcess::new(&g, lee());
        let mut events = Vec::new();
        let path = p
            .find_path(&range(&g, &[[0, 0], [2, 2]]), |e| events.push(e.clone()))
            .unwrap();
        assert_eq!(path.count(), 4);
        assert_eq!(events.first(), Some(&ProcessEvent::Started));
        assert_eq!(events.last(), Some(&ProcessEvent::Finished));
        let processed = events
            .iter()
            .filter(|e| matches!(e, ProcessEvent::VertexProcessed { .. }))
            .count();
        assert_eq!(processed, p.visited_count());
        assert_eq!(p.state(), ProcessState::Finished);
        assert_eq!(p.legs_completed(), 1);
    }

    #[test]
    fn transit_legs_are_joined() {
        let g = grid("...\n...\n...");
        let mut p = PathfindingProcess::new(
            &g,
            crate::search::FrontierSearch::new(MinHeap::new(), Relax, DefaultStepRule),
        );
        let ab = p.find_path(&range(&g, &[[0, 0], [2, 0]]), |_| {}).unwrap();
        let bc = p.find_path(&range(&g, &[[2, 0], [2, 2]]), |_| {}).unwrap();
        let abc = p
            .find_path(&range(&g, &[[0, 0], [2, 0], [2, 2]]), |_| {})
            .unwrap();
        assert_eq!(abc.count(), ab.count() + bc.count());
        assert_eq!(abc.cost(), ab.cost() + bc.cost());
        assert_eq!(abc.legs().len(), 2);
        let b = Coordinate::from([2, 0]);
        assert_eq!(abc.coordinates().iter().filter(|&c| *c == b).count(), 1);
        assert_eq!(p.legs_completed(), 2);
    }

    #[test]
    fn same_source_and_target() {
        let g = grid("...");
        let mut p = PathfindingProcess::new(&g, lee());
        let path = p.find_path(&range(&g, &[[1, 0], [1, 0]]), |_| {}).unwrap();
        assert!(path.is_empty());
        assert_eq!(path.cost(), 0.0);
        assert_eq!(p.state(), ProcessState::Finished);
    }

    #[test]
    fn dead_end_policies() {
        let g = grid("...#.");
        let r = range(&g, &[[0, 0], [2, 0], [4, 0]]);

        let mut p = PathfindingProcess::new(&g, lee());
        assert_eq!(p.dead_end_policy(), DeadEndPolicy::Empty);
        let path = p.find_path(&r, |_| {}).unwrap();
        assert!(path.is_empty());
        assert_eq!(p.state(), ProcessState::Finished);
        assert_eq!(p.legs_completed(), 1);

        let mut p = PathfindingProcess::new(&g, lee()).with_dead_end_policy(DeadEndPolicy::Partial);
        assert_eq!(p.dead_end_policy(), DeadEndPolicy::Partial);
        let path = p.find_path(&r, |_| {}).unwrap();
        assert_eq!(path.count(), 2);
        assert_eq!(path.coordinates()[0], Coordinate::from([2, 0]));
    }

    #[test]
    fn interrupt_from_the_callback() {
        let g = grid(".....\n.....\n.....");
        let mut p = PathfindingProcess::new(&g, lee());
        let control = p.control().clone();
        let mut events = Vec::new();
        let path = p
            .find_path(&range(&g, &[[0, 0], [4, 2]]), |e| {
                if matches!(e, ProcessEvent::VertexProcessed { .. }) {
                    control.interrupt();
                }
                events.push(e.clone());
            })
            .unwrap();
        assert!(path.is_empty());
        assert_eq!(p.state(), ProcessState::Interrupted);
        assert_eq!(events.last(), Some(&ProcessEvent::Interrupted));
        // Exactly one vertex got through before the check.
        assert_eq!(p.visited_count(), 1);
    }

    #[test]
    fn an_early_interrupt_stops_only_the_next_run() {
        let g = grid("...");
        let r = range(&g, &[[0, 0], [2, 0]]);
        let mut p = PathfindingProcess::new(&g, lee());
        p.interrupt();
        let mut events = Vec::new();
        let path = p.find_path(&r, |e| events.push(e.clone())).unwrap();
        assert!(path.is_empty());
        assert_eq!(events, [ProcessEvent::Started, ProcessEvent::Interrupted]);
        assert_eq!(p.state(), ProcessState::Interrupted);

        let path = p.find_path(&r, |_| {}).unwrap();
        assert_eq!(path.count(), 2);
        assert_eq!(p.state(), ProcessState::Finished);
    }

    #[test]
    fn an_early_interrupt_applies_to_a_zero_length_leg() {
        let g = grid("...");
        let mut p = PathfindingProcess::new(&g, lee());
        p.interrupt();
        let path = p.find_path(&range(&g, &[[1, 0], [1, 0]]), |_| {}).unwrap();
        assert!(path.is_empty());
        assert_eq!(p.state(), ProcessState::Interrupted);
    }

    #[test]
    fn shared_control_pauses_before_the_first_vertex() {
        let g = grid("...\n...\n...");
        let control = ProcessControl::new();
        control.pause();
        let mut p = PathfindingProcess::new(&g, lee()).with_control(control.clone());
        let resumer = thread::spawn(move || {
            while control.state() != ProcessState::Paused {
                thread::sleep(Duration::from_millis(1));
            }
            control.resume();
        });
        let mut events = Vec::new();
        let path = p
            .find_path(&range(&g, &[[0, 0], [2, 2]]), |e| events.push(e.clone()))
            .unwrap();
        resumer.join().unwrap();
        assert_eq!(path.count(), 4);
        assert_eq!(
            events[..3],
            [ProcessEvent::Started, ProcessEvent::Paused, ProcessEvent::Resumed]
        );
        assert!(events.last().is_some_and(ProcessEvent::is_terminal));
        assert!(!p.control().is_paused());
        assert_eq!(p.state(), ProcessState::Finished);
    }

    #[test]
    fn foreign_range_is_rejected() {
        let big = grid("....");
        let small = grid("..");
        let r = range(&big, &[[0, 0], [3, 0]]);
        let mut p = PathfindingProcess::new(&small, lee());
        assert!(matches!(
            p.find_path(&r, |_| {}),
            Err(PathfindingError::UnknownVertex { .. })
        ));
        p.dispose();
        assert_eq!(p.visited_count(), 0);
    }
}
