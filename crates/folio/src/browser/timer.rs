//! [`Scheduler`] over `window.setTimeout`.

use folio_core::{Scheduler, Task, TimerId};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Pending,
    Running,
    Done,
}

struct Entry {
    handle: i32,
    phase: Rc<Cell<Phase>>,
    _closure: Closure<dyn FnMut()>,
}

/// Real browser timers.
///
/// Closures stay alive until their timer fires or is cancelled. Fired entries
/// are dropped on the next `schedule`, never from inside their own callback;
/// cancelling a running timer is a no-op.
pub struct BrowserScheduler {
    window: Window,
    next_id: Cell<u64>,
    entries: RefCell<HashMap<TimerId, Entry>>,
}

impl BrowserScheduler {
    /// Schedule on `window`.
    pub fn new(window: Window) -> Self {
        Self {
            window,
            next_id: Cell::new(0),
            entries: RefCell::new(HashMap::new()),
        }
    }
}

impl Scheduler for BrowserScheduler {
    fn schedule(&self, delay_ms: u32, task: Task) -> TimerId {
        self.entries
            .borrow_mut()
            .retain(|_, entry| entry.phase.get() != Phase::Done);

        let id = TimerId(self.next_id.get());
        self.next_id.set(id.0 + 1);

        let phase = Rc::new(Cell::new(Phase::Pending));
        let flag = Rc::clone(&phase);
        let closure: Closure<dyn FnMut()> = Closure::once(move || {
            flag.set(Phase::Running);
            task();
            flag.set(Phase::Done);
        });

        let timeout = i32::try_from(delay_ms).unwrap_or(i32::MAX);
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                timeout,
            ) {
            Ok(handle) => {
                self.entries.borrow_mut().insert(
                    id,
                    Entry {
                        handle,
                        phase,
                        _closure: closure,
                    },
                );
            }
            Err(err) => tracing::warn!(?err, delay_ms, "setTimeout failed"),
        }
        id
    }

    fn cancel(&self, id: TimerId) {
        let mut entries = self.entries.borrow_mut();
        let pending = entries
            .get(&id)
            .is_some_and(|entry| entry.phase.get() == Phase::Pending);
        if !pending {
            return;
        }
        if let Some(entry) = entries.remove(&id) {
            drop(entries);
            self.window.clear_timeout_with_handle(entry.handle);
        }
    }
}

impl Drop for BrowserScheduler {
    fn drop(&mut self) {
        for entry in self.entries.get_mut().values() {
            if entry.phase.get() == Phase::Pending {
                self.window.clear_timeout_with_handle(entry.handle);
            }
        }
    }
}

impl std::fmt::Debug for BrowserScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrowserScheduler")
            .field("live", &self.entries.borrow().len())
            .finish_non_exhaustive()
    }
}
