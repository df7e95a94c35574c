use std::time::Duration;

/// Handle to a scheduled task, used to cancel it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

#[derive(Debug)]
struct Scheduled<T> {
    handle: TaskHandle,
    at: Duration,
    task: T,
}

/// Deadline-ordered, cancelable one-shot tasks.
///
/// Time is whatever clock the host drives [`Scheduler::take_due`] with, expressed as a
/// `Duration` since an arbitrary epoch.
#[derive(Debug)]
pub struct Scheduler<T> {
    next_id: u64,
    tasks: Vec<Scheduled<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            next_id: 1,
            tasks: Vec::new(),
        }
    }
}

impl<T> Scheduler<T> {
    pub fn schedule(&mut self, at: Duration, task: T) -> TaskHandle {
        let handle = TaskHandle(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        self.tasks.push(Scheduled { handle, at, task });
        handle
    }

    /// Removes a pending task. `None` if it already ran or was canceled.
    pub fn cancel(&mut self, handle: TaskHandle) -> Option<T> {
        let index = self.tasks.iter().position(|t| t.handle == handle)?;
        Some(self.tasks.remove(index).task)
    }

    /// Removes every pending task matching `predicate`, returning how many were removed.
    pub fn cancel_where(&mut self, mut predicate: impl FnMut(&T) -> bool) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|t| !predicate(&t.task));
        before - self.tasks.len()
    }

    /// Removes and returns every task due at `now`, earliest deadline first; ties keep
    /// scheduling order.
    pub fn take_due(&mut self, now: Duration) -> Vec<(TaskHandle, T)> {
        let (mut due, pending): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.tasks).into_iter().partition(|t| t.at <= now);
        self.tasks = pending;
        due.sort_by_key(|t| (t.at, t.handle.0));
        due.into_iter().map(|t| (t.handle, t.task)).collect()
    }

    /// Earliest pending deadline, for hosts that want to sleep until the next task.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.tasks.iter().map(|t| t.at).min()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
