use wayfind_core::Coordinate;

/// Progress reported by [`PathfindingProcess::find_path`](crate::PathfindingProcess::find_path).
///
/// Events are delivered synchronously on the searching thread, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessEvent {
    Started,
    /// A vertex was processed; `enqueued` lists the vertices it discovered.
    VertexProcessed {
        current: Coordinate,
        enqueued: Vec<Coordinate>,
    },
    Paused,
    Resumed,
    Finished,
    Interrupted,
}

impl ProcessEvent {
    /// Whether this event ends a run.
    pub fn is_terminal(&self) -> bool {
        matches!(self, ProcessEvent::Finished | ProcessEvent::Interrupted)
    }
}
