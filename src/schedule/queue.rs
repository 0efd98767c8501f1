//! Binary-heap task queue.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Duration;

use rustc_hash::FxHashSet;

use super::{Scheduler, Task, TaskHandle};

#[derive(Debug)]
struct Entry {
    due: Duration,
    handle: TaskHandle,
    task: Task,
}

// Min-heap on (due, handle): handles are issued in increasing order, so
// they double as the tie-breaking sequence number.
impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.handle.0.cmp(&self.handle.0))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.handle == other.handle
    }
}

impl Eq for Entry {}

/// Default [`Scheduler`]: a binary heap with lazy cancellation.
///
/// Cancelled entries stay in the heap until they surface and are skipped.
#[derive(Debug, Default)]
pub struct TaskQueue {
    heap: BinaryHeap<Entry>,
    live: FxHashSet<TaskHandle>,
    next_handle: u64,
}

impl TaskQueue {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scheduler for TaskQueue {
    fn schedule_at(&mut self, due: Duration, task: Task) -> TaskHandle {
        let handle = TaskHandle(self.next_handle);
        self.next_handle += 1;
        self.live.insert(handle);
        self.heap.push(Entry { due, handle, task });
        handle
    }

    fn cancel(&mut self, handle: TaskHandle) -> bool {
        self.live.remove(&handle)
    }

    fn cancel_all(&mut self) {
        self.heap.clear();
        self.live.clear();
    }

    fn pop_due(&mut self, now: Duration) -> Option<(Duration, Task)> {
        loop {
            let top = self.heap.peek()?;
            if !self.live.contains(&top.handle) {
                self.heap.pop();
                continue;
            }
            if top.due > now {
                return None;
            }
            let entry = self.heap.pop()?;
            self.live.remove(&entry.handle);
            return Some((entry.due, entry.task));
        }
    }

    fn next_deadline(&self) -> Option<Duration> {
        self.heap
            .iter()
            .filter(|e| self.live.contains(&e.handle))
            .map(|e| e.due)
            .min()
    }

    fn len(&self) -> usize {
        self.live.len()
    }
}
