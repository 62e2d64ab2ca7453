//! Cross-thread control of a running search.

use std::fmt;
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};

use crate::event::ProcessEvent;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Lifecycle state of a [`PathfindingProcess`](crate::PathfindingProcess).
///
/// `Idle → Running → {Paused ⇄ Running} → Finished | Interrupted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ProcessState {
    #[default]
    Idle,
    Running,
    Paused,
    Finished,
    Interrupted,
}

impl ProcessState {
    /// Whether the last run is over.
    pub fn is_terminal(self) -> bool {
        matches!(self, ProcessState::Finished | ProcessState::Interrupted)
    }
}

impl fmt::Display for ProcessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ProcessState::Idle => "idle",
            ProcessState::Running => "running",
            ProcessState::Paused => "paused",
            ProcessState::Finished => "finished",
            ProcessState::Interrupted => "interrupted",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Default)]
struct Flags {
    paused: bool,
    interrupted: bool,
    state: ProcessState,
}

#[derive(Debug, Default)]
struct Shared {
    flags: Mutex<Flags>,
    wake: Condvar,
}

/// Pause, resume and interrupt requests for one process.
///
/// Clones share the same flags, so a clone can be handed to another thread
/// while the owning process runs `find_path`. Requests only set flags; the
/// search loop consults them between vertices.
///
/// A request made while no run is active is kept for the next run. Each run
/// clears outstanding requests when it ends.
#[derive(Debug, Clone, Default)]
pub struct ProcessControl {
    shared: Arc<Shared>,
}

impl ProcessControl {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Flags> {
        // The flags stay consistent even if a holder panicked.
        self.shared
            .flags
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Ask the search to stop after the current vertex until resumed.
    pub fn pause(&self) {
        self.lock().paused = true;
    }

    /// Release a pause. Does nothing when not paused.
    pub fn resume(&self) {
        self.lock().paused = false;
        self.shared.wake.notify_all();
    }

    /// Ask the search to abort. Idempotent, also wakes a paused search.
    pub fn interrupt(&self) {
        self.lock().interrupted = true;
        self.shared.wake.notify_all();
    }

    pub fn is_paused(&self) -> bool {
        self.lock().paused
    }

    pub fn is_interrupted(&self) -> bool {
        self.lock().interrupted
    }

    /// Current lifecycle state of the controlled process.
    pub fn state(&self) -> ProcessState {
        self.lock().state
    }

    // -----------------------------------------------------------------------
    // Search loop side
    // -----------------------------------------------------------------------

    /// Enter `Running`. Requests made before the run are kept.
    pub(crate) fn begin_run(&self) {
        self.lock().state = ProcessState::Running;
    }

    /// Enter the terminal `state` and drop the requests this run consumed.
    pub(crate) fn end_run(&self, state: ProcessState) {
        let mut flags = self.lock();
        flags.paused = false;
        flags.interrupted = false;
        flags.state = state;
    }

    /// Block while paused, reporting [`ProcessEvent::Paused`] before blocking
    /// and [`ProcessEvent::Resumed`] once a pause ends without interruption.
    ///
    /// Returns `true` when the run was interrupted.
    pub(crate) fn checkpoint(&self, mut notify: impl FnMut(&ProcessEvent)) -> bool {
        let mut flags = self.lock();
        if flags.interrupted {
            return true;
        }
        if !flags.paused {
            return false;
        }
        flags.state = ProcessState::Paused;
        drop(flags);
        notify(&ProcessEvent::Paused);

        let mut flags = self.lock();
        while flags.paused && !flags.interrupted {
            flags = self
                .shared
                .wake
                .wait(flags)
                .unwrap_or_else(PoisonError::into_inner);
        }
        if flags.interrupted {
            return true;
        }
        flags.state = ProcessState::Running;
        drop(flags);
        notify(&ProcessEvent::Resumed);
        false
    }
}
