//! Debouncing on top of a [`Scheduler`].

use crate::timer::{Scheduler, TimerId};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Delays a callback until calls have been quiet for `quiet_ms`.
///
/// Each [`call`](Self::call) cancels the pending invocation, if any, and
/// schedules a new one; only the last call of a burst runs, with its own
/// arguments.
pub struct Debouncer<A> {
    scheduler: Rc<dyn Scheduler>,
    quiet_ms: u32,
    callback: Rc<RefCell<dyn FnMut(A)>>,
    pending: Rc<Cell<Option<TimerId>>>,
}

impl<A: 'static> Debouncer<A> {
    /// Wrap `callback` with a quiet period of `quiet_ms`.
    pub fn new(
        scheduler: Rc<dyn Scheduler>,
        quiet_ms: u32,
        callback: impl FnMut(A) + 'static,
    ) -> Self {
        let callback: Rc<RefCell<dyn FnMut(A)>> = Rc::new(RefCell::new(callback));
        Self {
            scheduler,
            quiet_ms,
            callback,
            pending: Rc::new(Cell::new(None)),
        }
    }

    /// Request an invocation with `args`.
    pub fn call(&self, args: A) {
        if let Some(id) = self.pending.take() {
            self.scheduler.cancel(id);
        }

        let callback = Rc::clone(&self.callback);
        let pending = Rc::clone(&self.pending);
        let id = self.scheduler.schedule(
            self.quiet_ms,
            Box::new(move || {
                pending.set(None);
                (&mut *callback.borrow_mut())(args);
            }),
        );
        self.pending.set(Some(id));
    }

    /// Whether an invocation is waiting for its quiet period to elapse.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.get().is_some()
    }
}

impl<A> fmt::Debug for Debouncer<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debouncer")
            .field("quiet_ms", &self.quiet_ms)
            .field("pending", &self.pending.get())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::VirtualScheduler;
    use proptest::prelude::*;

    fn counting(quiet_ms: u32) -> (Rc<VirtualScheduler>, Debouncer<u32>, Rc<RefCell<Vec<u32>>>) {
        let scheduler = Rc::new(VirtualScheduler::new());
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        let debouncer = Debouncer::new(scheduler.clone(), quiet_ms, move |v| sink.borrow_mut().push(v));
        (scheduler, debouncer, calls)
    }

    #[test]
    fn test_single_call_fires_after_quiet_period() {
        let (scheduler, debouncer, calls) = counting(250);
        debouncer.call(1);
        assert!(debouncer.is_pending());

        scheduler.advance(249);
        assert!(calls.borrow().is_empty());
        scheduler.advance(1);
        assert_eq!(*calls.borrow(), vec![1]);
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_burst_runs_last_call_only() {
        let (scheduler, debouncer, calls) = counting(250);
        debouncer.call(1);
        scheduler.advance(100);
        debouncer.call(2);
        scheduler.advance(200);
        debouncer.call(3);

        scheduler.advance(249);
        assert!(calls.borrow().is_empty());
        scheduler.advance(1);
        assert_eq!(*calls.borrow(), vec![3]);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_separate_windows_each_fire() {
        let (scheduler, debouncer, calls) = counting(250);
        debouncer.call(1);
        scheduler.advance(300);
        debouncer.call(2);
        scheduler.advance(300);
        assert_eq!(*calls.borrow(), vec![1, 2]);
    }

    proptest! {
        #[test]
        fn prop_burst_within_quiet_period_fires_once_with_last_value(
            gaps in proptest::collection::vec(0u64..250, 1..20)
        ) {
            let (scheduler, debouncer, calls) = counting(250);
            let mut last = 0;
            for (i, gap) in gaps.iter().enumerate() {
                last = i as u32;
                debouncer.call(last);
                scheduler.advance(*gap);
            }
            scheduler.run_until_idle();
            prop_assert_eq!(calls.borrow().clone(), vec![last]);
        }
    }
}
