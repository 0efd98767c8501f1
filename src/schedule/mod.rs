//! Deferred work: pair resolution and elapsed-time ticks.
//!
//! The reducer never sleeps. When something must happen later it hands a
//! [`Task`] to a [`Scheduler`] with a due time; the host advances time and
//! the reducer runs whatever has come due, in due-time order.
//!
//! ## Round Generations
//!
//! Every task carries the generation of the round that created it. A task
//! whose generation no longer matches the live round is dropped instead of
//! applied, so a resolution left over from an abandoned round can never
//! touch the new board.
//!
//! ```
//! use std::time::Duration;
//! use find_pairs::schedule::{Scheduler, Task, TaskQueue};
//!
//! let mut queue = TaskQueue::new();
//! queue.schedule_at(Duration::from_secs(2), Task::Tick { generation: 1 });
//! let tick = queue.schedule_at(Duration::from_secs(1), Task::Tick { generation: 1 });
//! assert!(queue.cancel(tick));
//!
//! assert!(queue.pop_due(Duration::from_secs(1)).is_none());
//! assert!(queue.pop_due(Duration::from_secs(2)).is_some());
//! ```

mod queue;

pub use queue::TaskQueue;

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::CardId;

/// Handle returned by [`Scheduler::schedule_at`], used to cancel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskHandle(pub u64);

impl std::fmt::Display for TaskHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Task({})", self.0)
    }
}

/// A unit of deferred work.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Task {
    /// Commit the outcome of a two-card attempt.
    ///
    /// The outcome is decided when the second card is flipped; the
    /// resolution only applies it.
    Resolve {
        first: CardId,
        second: CardId,
        is_match: bool,
        generation: u64,
    },

    /// Refresh elapsed time and reschedule.
    Tick { generation: u64 },
}

impl Task {
    /// The round generation this task belongs to.
    #[must_use]
    pub fn generation(&self) -> u64 {
        match self {
            Task::Resolve { generation, .. } | Task::Tick { generation } => *generation,
        }
    }
}

/// Timeline of deferred tasks.
///
/// Implementations must hand tasks back from [`pop_due`](Scheduler::pop_due)
/// in due-time order, breaking ties by scheduling order, and must never
/// return a cancelled task.
pub trait Scheduler {
    /// Schedule `task` to run at absolute time `due`.
    fn schedule_at(&mut self, due: Duration, task: Task) -> TaskHandle;

    /// Cancel a scheduled task.
    ///
    /// Returns `true` if the task was still pending.
    fn cancel(&mut self, handle: TaskHandle) -> bool;

    /// Cancel everything.
    fn cancel_all(&mut self);

    /// Remove and return the earliest task due at or before `now`.
    fn pop_due(&mut self, now: Duration) -> Option<(Duration, Task)>;

    /// Due time of the earliest pending task.
    fn next_deadline(&self) -> Option<Duration>;

    /// Number of pending (uncancelled) tasks.
    fn len(&self) -> usize;

    /// Check if nothing is pending.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_generation() {
        let resolve = Task::Resolve {
            first: CardId::new(1),
            second: CardId::new(2),
            is_match: false,
            generation: 4,
        };
        assert_eq!(resolve.generation(), 4);
        assert_eq!(Task::Tick { generation: 9 }.generation(), 9);
    }

    #[test]
    fn test_task_serde() {
        let task = Task::Resolve {
            first: CardId::new(1),
            second: CardId::new(2),
            is_match: true,
            generation: 1,
        };
        let json = serde_json::to_string(&task).unwrap();
        let deserialized: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(task, deserialized);
    }
}
