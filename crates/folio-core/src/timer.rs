//! Timer scheduling.
//!
//! Every delay in the site (debounce quiet periods, simulated submission
//! latency, message auto-dismissal, deferred reveal setup) goes through the
//! [`Scheduler`] trait so it can be driven by real browser timers or by a
//! [`VirtualScheduler`] that tests advance deterministically.

use std::cell::RefCell;
use std::fmt;

/// Work scheduled to run once after a delay.
pub type Task = Box<dyn FnOnce()>;

/// Handle to a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// Schedules one-shot tasks.
///
/// Implementations use interior mutability: schedulers are shared behind
/// `Rc<dyn Scheduler>` by every component that needs a delay.
pub trait Scheduler {
    /// Run `task` once after `delay_ms` milliseconds.
    fn schedule(&self, delay_ms: u32, task: Task) -> TimerId;

    /// Cancel a pending task. Unknown or already fired ids are ignored.
    fn cancel(&self, id: TimerId);
}

struct PendingTask {
    id: TimerId,
    due_ms: u64,
    task: Task,
}

#[derive(Default)]
struct VirtualState {
    now_ms: u64,
    next_id: u64,
    pending: Vec<PendingTask>,
}

/// Scheduler over virtual time for tests.
///
/// Nothing runs until [`advance`](Self::advance) is called. Due tasks run in
/// deadline order; ties run in scheduling order. Tasks may schedule further
/// tasks, which run in the same `advance` call if they fall due within it.
#[derive(Default)]
pub struct VirtualScheduler {
    state: RefCell<VirtualState>,
}

impl VirtualScheduler {
    /// Create a scheduler at virtual time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.state.borrow().now_ms
    }

    /// Number of tasks still waiting to run.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.state.borrow().pending.len()
    }

    /// Advance virtual time, running every task that falls due.
    ///
    /// Returns the number of tasks that ran.
    pub fn advance(&self, delta_ms: u64) -> usize {
        let target = self.state.borrow().now_ms.saturating_add(delta_ms);
        let mut ran = 0;

        // The borrow is released before each task runs so tasks can schedule.
        while let Some(task) = self.pop_due(target) {
            task();
            ran += 1;
        }

        self.state.borrow_mut().now_ms = target;
        ran
    }

    /// Advance until no tasks remain. Returns the number of tasks that ran.
    pub fn run_until_idle(&self) -> usize {
        let mut ran = 0;
        loop {
            let next_due = self.state.borrow().pending.iter().map(|p| p.due_ms).min();
            let Some(due) = next_due else {
                return ran;
            };
            let now = self.now_ms();
            ran += self.advance(due.saturating_sub(now));
        }
    }

    fn pop_due(&self, target: u64) -> Option<Task> {
        let mut state = self.state.borrow_mut();
        let index = state
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due_ms <= target)
            .min_by_key(|(_, p)| (p.due_ms, p.id))
            .map(|(i, _)| i)?;
        let entry = state.pending.remove(index);
        state.now_ms = entry.due_ms;
        Some(entry.task)
    }
}

impl Scheduler for VirtualScheduler {
    fn schedule(&self, delay_ms: u32, task: Task) -> TimerId {
        let mut state = self.state.borrow_mut();
        let id = TimerId(state.next_id);
        state.next_id += 1;
        let due_ms = state.now_ms + u64::from(delay_ms);
        state.pending.push(PendingTask { id, due_ms, task });
        id
    }

    fn cancel(&self, id: TimerId) {
        self.state.borrow_mut().pending.retain(|p| p.id != id);
    }
}

impl fmt::Debug for VirtualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("VirtualScheduler")
            .field("now_ms", &state.now_ms)
            .field("pending", &state.pending.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder() -> (Rc<RefCell<Vec<&'static str>>>, impl Fn(&'static str) -> Task) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let log_clone = Rc::clone(&log);
        let make = move |label: &'static str| -> Task {
            let log = Rc::clone(&log_clone);
            Box::new(move || log.borrow_mut().push(label))
        };
        (log, make)
    }

    #[test]
    fn test_nothing_runs_before_deadline() {
        let scheduler = VirtualScheduler::new();
        let (log, task) = recorder();
        scheduler.schedule(100, task("a"));

        assert_eq!(scheduler.advance(99), 0);
        assert!(log.borrow().is_empty());
        assert_eq!(scheduler.advance(1), 1);
        assert_eq!(*log.borrow(), vec!["a"]);
        assert_eq!(scheduler.now_ms(), 100);
    }

    #[test]
    fn test_deadline_order_with_ties_in_schedule_order() {
        let scheduler = VirtualScheduler::new();
        let (log, task) = recorder();
        scheduler.schedule(50, task("late"));
        scheduler.schedule(10, task("first"));
        scheduler.schedule(10, task("second"));

        scheduler.advance(100);
        assert_eq!(*log.borrow(), vec!["first", "second", "late"]);
    }

    #[test]
    fn test_cancel() {
        let scheduler = VirtualScheduler::new();
        let (log, task) = recorder();
        let id = scheduler.schedule(10, task("cancelled"));
        scheduler.schedule(10, task("kept"));
        scheduler.cancel(id);
        scheduler.cancel(TimerId(999));

        scheduler.advance(10);
        assert_eq!(*log.borrow(), vec!["kept"]);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_task_scheduled_from_task_uses_its_due_time() {
        let scheduler = Rc::new(VirtualScheduler::new());
        let fired_at = Rc::new(RefCell::new(None));

        let inner_scheduler = Rc::clone(&scheduler);
        let inner_fired = Rc::clone(&fired_at);
        scheduler.schedule(
            100,
            Box::new(move || {
                let at = Rc::clone(&inner_fired);
                let clock = Rc::clone(&inner_scheduler);
                inner_scheduler.schedule(50, Box::new(move || *at.borrow_mut() = Some(clock.now_ms())));
            }),
        );

        scheduler.advance(120);
        assert_eq!(*fired_at.borrow(), None);
        scheduler.advance(30);
        assert_eq!(*fired_at.borrow(), Some(150));
    }

    #[test]
    fn test_run_until_idle() {
        let scheduler = VirtualScheduler::new();
        let (log, task) = recorder();
        scheduler.schedule(5000, task("b"));
        scheduler.schedule(1500, task("a"));

        assert_eq!(scheduler.run_until_idle(), 2);
        assert_eq!(*log.borrow(), vec!["a", "b"]);
        assert_eq!(scheduler.now_ms(), 5000);
    }
}
