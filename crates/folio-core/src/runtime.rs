//! Command runtime for executing side effects.
//!
//! [`Runtime`] owns the [`Site`] state, feeds it messages from the event
//! table and from timers, and carries out the returned [`Command`]s against
//! a [`Platform`].

use crate::config::RevealConfig;
use crate::debounce::Debouncer;
use crate::event::{Delivery, DomEvent, EventKind, EventTable, Target};
use crate::site::{Site, SiteMessage, UiState};
use crate::state::{Command, State};
use crate::timer::Scheduler;
use std::cell::{Cell, Ref, RefCell};
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::rc::{Rc, Weak};

/// Address fragment and session history.
pub trait History {
    /// Section id in the current entry, without the `#`.
    fn fragment(&self) -> Option<String>;

    /// Add an entry for `#<fragment>` without navigating.
    fn push_fragment(&self, fragment: &str);

    /// Rewrite the current entry to `#<fragment>` without navigating.
    fn replace_fragment(&self, fragment: &str);
}

/// Everything the runtime needs from its host.
pub trait Platform: History {
    /// Open `url` in a new browsing context without opener or referrer.
    fn open_external(&self, url: &str);

    /// Clear every contact form field.
    fn reset_form(&self);

    /// Start reporting portfolio card intersections.
    fn observe_reveal(&self, config: &RevealConfig);

    /// Bring the host in line with the current state.
    fn render(&self, site: &Site);
}

/// In-memory session history for testing and native targets.
#[derive(Debug)]
pub struct MemoryHistory {
    entries: RefCell<Vec<Option<String>>>,
    index: Cell<usize>,
}

impl Default for MemoryHistory {
    fn default() -> Self {
        Self::new(None)
    }
}

impl MemoryHistory {
    /// Create a history with one entry for `fragment`.
    #[must_use]
    pub fn new(fragment: Option<&str>) -> Self {
        Self {
            entries: RefCell::new(vec![fragment.map(str::to_string)]),
            index: Cell::new(0),
        }
    }

    /// All entries, oldest first.
    #[must_use]
    pub fn entries(&self) -> Vec<Option<String>> {
        self.entries.borrow().clone()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Whether there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Position of the current entry.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index.get()
    }

    /// Move one entry back. Returns false at the oldest entry.
    pub fn back(&self) -> bool {
        let index = self.index.get();
        if index == 0 {
            return false;
        }
        self.index.set(index - 1);
        true
    }

    /// Move one entry forward. Returns false at the newest entry.
    pub fn forward(&self) -> bool {
        let index = self.index.get();
        if index + 1 >= self.len() {
            return false;
        }
        self.index.set(index + 1);
        true
    }
}

impl History for MemoryHistory {
    fn fragment(&self) -> Option<String> {
        self.entries.borrow().get(self.index.get()).cloned().flatten()
    }

    fn push_fragment(&self, fragment: &str) {
        let mut entries = self.entries.borrow_mut();
        let index = self.index.get();
        entries.truncate(index + 1);
        entries.push(Some(fragment.to_string()));
        self.index.set(index + 1);
    }

    fn replace_fragment(&self, fragment: &str) {
        let mut entries = self.entries.borrow_mut();
        if let Some(entry) = entries.get_mut(self.index.get()) {
            *entry = Some(fragment.to_string());
        }
    }
}

/// Result of delivering a DOM event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Outcome {
    /// A listener produced a message
    pub handled: bool,
    /// The browser's default action must be suppressed
    pub prevent_default: bool,
}

struct Inner<P> {
    site: RefCell<Site>,
    platform: Rc<P>,
    scheduler: Rc<dyn Scheduler>,
    events: EventTable<SiteMessage>,
    debouncers: HashMap<(Target, EventKind), Debouncer<SiteMessage>>,
    queue: RefCell<VecDeque<SiteMessage>>,
    draining: Cell<bool>,
}

/// Drives a [`Site`] on a [`Platform`].
///
/// Cloning is cheap; clones share the same state. Messages dispatched while
/// another message is being processed are queued and handled in order.
pub struct Runtime<P> {
    inner: Rc<Inner<P>>,
}

impl<P> Clone for Runtime<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

/// Non-owning [`Runtime`] handle for callbacks the platform itself keeps.
pub struct WeakRuntime<P> {
    inner: Weak<Inner<P>>,
}

impl<P> WeakRuntime<P> {
    /// The runtime, if it is still alive.
    pub fn upgrade(&self) -> Option<Runtime<P>> {
        self.inner.upgrade().map(|inner| Runtime { inner })
    }
}

impl<P> Clone for WeakRuntime<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<P: Platform + 'static> Runtime<P> {
    /// Wire `site` to `platform`. Nothing runs until [`start`](Self::start).
    pub fn new(site: Site, platform: Rc<P>, scheduler: Rc<dyn Scheduler>) -> Self {
        let events = site.events();
        let inner = Rc::new_cyclic(|weak: &Weak<Inner<P>>| {
            let debouncers = events
                .registrations()
                .iter()
                .filter_map(|reg| match reg.delivery {
                    Delivery::Immediate => None,
                    Delivery::Debounced { quiet_ms } => {
                        let weak = weak.clone();
                        let debouncer = Debouncer::new(Rc::clone(&scheduler), quiet_ms, move |msg| {
                            if let Some(inner) = weak.upgrade() {
                                Self { inner }.dispatch(msg);
                            }
                        });
                        Some(((reg.target, reg.kind), debouncer))
                    }
                })
                .collect();

            Inner {
                site: RefCell::new(site),
                platform,
                scheduler,
                events,
                debouncers,
                queue: RefCell::new(VecDeque::new()),
                draining: Cell::new(false),
            }
        });
        Self { inner }
    }

    /// Apply the load-time fragment and render.
    pub fn start(&self) {
        let fragment = self.inner.platform.fragment();
        tracing::debug!(?fragment, "starting");
        self.dispatch(SiteMessage::Loaded { fragment });
    }

    /// Deliver `event` to the listener registered for `target`.
    pub fn trigger(&self, target: Target, event: &DomEvent) -> Outcome {
        let kind = event.kind();
        let Some(registration) = self.inner.events.find(target, kind) else {
            return Outcome::default();
        };

        let message = registration.handle(event);
        let outcome = Outcome {
            handled: message.is_some(),
            prevent_default: registration.should_prevent_default(message.is_some()),
        };

        if let Some(message) = message {
            match registration.delivery {
                Delivery::Immediate => self.dispatch(message),
                Delivery::Debounced { .. } => {
                    if let Some(debouncer) = self.inner.debouncers.get(&(target, kind)) {
                        debouncer.call(message);
                    }
                }
            }
        }
        outcome
    }

    /// Update the state with `msg`, run its effects, and render.
    pub fn dispatch(&self, msg: SiteMessage) {
        self.inner.queue.borrow_mut().push_back(msg);
        if self.inner.draining.replace(true) {
            return;
        }

        loop {
            let next = self.inner.queue.borrow_mut().pop_front();
            let Some(msg) = next else { break };

            let command = self.inner.site.borrow_mut().update(msg);
            self.execute(command);
            self.inner.platform.render(&self.inner.site.borrow());
        }
        self.inner.draining.set(false);
    }

    fn execute(&self, command: Command<SiteMessage>) {
        let platform = &self.inner.platform;
        for effect in command.into_effects() {
            match effect {
                Command::None | Command::Batch(_) => {}
                Command::After { delay_ms, message } => {
                    let weak = Rc::downgrade(&self.inner);
                    self.inner.scheduler.schedule(
                        delay_ms,
                        Box::new(move || {
                            if let Some(inner) = weak.upgrade() {
                                Self { inner }.dispatch(message);
                            }
                        }),
                    );
                }
                Command::PushFragment { fragment } => platform.push_fragment(&fragment),
                Command::ReplaceFragment { fragment } => platform.replace_fragment(&fragment),
                Command::OpenExternal { url } => platform.open_external(&url),
                Command::ResetForm => platform.reset_form(),
                Command::ObserveReveal => {
                    let reveal = self.inner.site.borrow().config().reveal.clone();
                    platform.observe_reveal(&reveal);
                }
            }
        }
    }
}

impl<P> Runtime<P> {
    /// Handle that does not keep the runtime alive.
    #[must_use]
    pub fn downgrade(&self) -> WeakRuntime<P> {
        WeakRuntime {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Current state.
    pub fn site(&self) -> Ref<'_, Site> {
        self.inner.site.borrow()
    }

    /// Current UI snapshot.
    #[must_use]
    pub fn snapshot(&self) -> UiState {
        self.inner.site.borrow().snapshot()
    }

    /// The host platform.
    #[must_use]
    pub fn platform(&self) -> &Rc<P> {
        &self.inner.platform
    }

    /// Listener table.
    #[must_use]
    pub fn events(&self) -> &EventTable<SiteMessage> {
        &self.inner.events
    }
}

impl<P> fmt::Debug for Runtime<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("listeners", &self.inner.events.len())
            .field("debounced", &self.inner.debouncers.len())
            .field("queued", &self.inner.queue.borrow().len())
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Tests
// =============================================================================
