use std::time::Instant;

/// Handle for cancelling a scheduled task
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

struct Scheduled<T> {
    id: TaskId,
    due: Instant,
    task: T,
}

/// Delayed tasks for the UI thread. Nothing runs on its own: the event loop
/// passes the current time to [`Scheduler::take_due`], which keeps tests
/// deterministic.
pub struct Scheduler<T> {
    next_id: u64,
    pending: Vec<Scheduled<T>>,
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            pending: Vec::new(),
        }
    }

    pub fn schedule(&mut self, due: Instant, task: T) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.pending.push(Scheduled { id, due, task });
        id
    }

    /// Drop a pending task; false if it already ran or never existed
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|s| s.id != id);
        self.pending.len() != before
    }

    /// Remove and return every task due at `now`, earliest first
    pub fn take_due(&mut self, now: Instant) -> Vec<T> {
        let mut due = Vec::new();
        let mut i = 0;
        while i < self.pending.len() {
            if self.pending[i].due <= now {
                due.push(self.pending.swap_remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by_key(|s| (s.due, s.id.0));
        due.into_iter().map(|s| s.task).collect()
    }

    /// When the next task becomes due
    pub fn next_due(&self) -> Option<Instant> {
        self.pending.iter().map(|s| s.due).min()
    }

    /// Due time of a pending task
    pub fn due_of(&self, id: TaskId) -> Option<Instant> {
        self.pending.iter().find(|s| s.id == id).map(|s| s.due)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}
