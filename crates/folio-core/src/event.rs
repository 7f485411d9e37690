//! DOM events and the event-to-handler registration table.
//!
//! The browser runtime attaches one listener per [`Registration`]; tests
//! feed the same table [`DomEvent`] values directly, no DOM required.

use crate::form::FormDraft;
use std::fmt;

/// Keyboard keys the site reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Enter / Return
    Enter,
    /// Space bar
    Space,
    /// Escape
    Escape,
    /// Tab
    Tab,
    /// Any other printable character
    Character(char),
    /// Anything else (modifiers, function keys, arrows)
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value.
    #[must_use]
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            "Enter" => Self::Enter,
            " " | "Spacebar" => Self::Space,
            "Escape" | "Esc" => Self::Escape,
            "Tab" => Self::Tab,
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Character(c),
                    _ => Self::Other,
                }
            }
        }
    }

    /// Keys that activate a focused card like a click.
    #[must_use]
    pub const fn is_activation(self) -> bool {
        matches!(self, Self::Enter | Self::Space)
    }
}

/// Element (or window) a listener is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    /// `.hamburger`
    Hamburger,
    /// `.nav-link` by document index
    NavLink(usize),
    /// `.portfolio-item` by document index
    PortfolioItem(usize),
    /// `#contactForm`
    ContactForm,
    /// The window
    Window,
}

/// Event type names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// `click`
    Click,
    /// `keypress`
    KeyPress,
    /// `submit`
    Submit,
    /// `resize`
    Resize,
    /// `popstate`
    PopState,
    /// Intersection observer entry
    Intersect,
}

impl EventKind {
    /// DOM event type string, if this kind is a DOM event.
    #[must_use]
    pub const fn dom_name(self) -> Option<&'static str> {
        match self {
            Self::Click => Some("click"),
            Self::KeyPress => Some("keypress"),
            Self::Submit => Some("submit"),
            Self::Resize => Some("resize"),
            Self::PopState => Some("popstate"),
            Self::Intersect => None,
        }
    }
}

/// Event payload, already extracted from the browser event.
#[derive(Debug, Clone, PartialEq)]
pub enum DomEvent {
    /// Click; `on_overlay_link` is set when the click target is a `.portfolio-link`
    Click {
        /// Click originated on an overlay link
        on_overlay_link: bool,
    },
    /// Key press
    KeyPress {
        /// Key pressed
        key: Key,
    },
    /// Form submission with the field values at submit time
    Submit {
        /// Field values
        draft: FormDraft,
    },
    /// Window resize
    Resize {
        /// `window.innerWidth`
        width: f64,
    },
    /// Back/forward navigation
    PopState {
        /// Section id from the new `location.hash`
        fragment: Option<String>,
    },
    /// Visibility change reported by the intersection observer
    Intersect {
        /// Whether the item crossed the threshold into view
        intersecting: bool,
    },
}

impl DomEvent {
    /// Kind of this event.
    #[must_use]
    pub const fn kind(&self) -> EventKind {
        match self {
            Self::Click { .. } => EventKind::Click,
            Self::KeyPress { .. } => EventKind::KeyPress,
            Self::Submit { .. } => EventKind::Submit,
            Self::Resize { .. } => EventKind::Resize,
            Self::PopState { .. } => EventKind::PopState,
            Self::Intersect { .. } => EventKind::Intersect,
        }
    }
}

/// When a handler's message reaches the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Dispatch synchronously
    Immediate,
    /// Dispatch only the last message of a burst, after a quiet period
    Debounced {
        /// Quiet period in milliseconds
        quiet_ms: u32,
    },
}

/// Whether the browser's default action is suppressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreventDefault {
    /// Never
    Never,
    /// Always, even if the handler ignores the event
    Always,
    /// Only when the handler produced a message
    WhenHandled,
}

type Handler<M> = Box<dyn Fn(&DomEvent) -> Option<M>>;

/// One listener: target, event kind, policy, and the handler.
pub struct Registration<M> {
    /// Listener target
    pub target: Target,
    /// Event kind
    pub kind: EventKind,
    /// Delivery policy
    pub delivery: Delivery,
    /// Default-action policy
    pub prevent_default: PreventDefault,
    handler: Handler<M>,
}

impl<M> Registration<M> {
    /// Run the handler.
    pub fn handle(&self, event: &DomEvent) -> Option<M> {
        (self.handler)(event)
    }

    /// Whether the default action should be suppressed given the handler result.
    #[must_use]
    pub const fn should_prevent_default(&self, handled: bool) -> bool {
        match self.prevent_default {
            PreventDefault::Never => false,
            PreventDefault::Always => true,
            PreventDefault::WhenHandled => handled,
        }
    }

    /// Debounce delivery.
    pub fn debounced(&mut self, quiet_ms: u32) -> &mut Self {
        self.delivery = Delivery::Debounced { quiet_ms };
        self
    }

    /// Set the default-action policy.
    pub fn prevent_default(&mut self, policy: PreventDefault) -> &mut Self {
        self.prevent_default = policy;
        self
    }
}

impl<M> fmt::Debug for Registration<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("target", &self.target)
            .field("kind", &self.kind)
            .field("delivery", &self.delivery)
            .field("prevent_default", &self.prevent_default)
            .finish_non_exhaustive()
    }
}

/// Registration table built once at startup.
pub struct EventTable<M> {
    registrations: Vec<Registration<M>>,
}

impl<M> Default for EventTable<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> EventTable<M> {
    /// Create an empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            registrations: Vec::new(),
        }
    }

    /// Register a handler. Defaults to immediate delivery and no default-action suppression.
    pub fn on(
        &mut self,
        target: Target,
        kind: EventKind,
        handler: impl Fn(&DomEvent) -> Option<M> + 'static,
    ) -> &mut Registration<M> {
        self.registrations.push(Registration {
            target,
            kind,
            delivery: Delivery::Immediate,
            prevent_default: PreventDefault::Never,
            handler: Box::new(handler),
        });
        let last = self.registrations.len() - 1;
        &mut self.registrations[last]
    }

    /// Registration for a target and kind.
    #[must_use]
    pub fn find(&self, target: Target, kind: EventKind) -> Option<&Registration<M>> {
        self.registrations
            .iter()
            .find(|r| r.target == target && r.kind == kind)
    }

    /// All registrations in insertion order.
    #[must_use]
    pub fn registrations(&self) -> &[Registration<M>] {
        &self.registrations
    }

    /// Number of registrations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }
}

impl<M> fmt::Debug for EventTable<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.registrations).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_from_dom_key() {
        assert_eq!(Key::from_dom_key("Enter"), Key::Enter);
        assert_eq!(Key::from_dom_key(" "), Key::Space);
        assert_eq!(Key::from_dom_key("Spacebar"), Key::Space);
        assert_eq!(Key::from_dom_key("a"), Key::Character('a'));
        assert_eq!(Key::from_dom_key("ArrowUp"), Key::Other);
        assert_eq!(Key::from_dom_key(""), Key::Other);
    }

    #[test]
    fn test_activation_keys() {
        assert!(Key::Enter.is_activation());
        assert!(Key::Space.is_activation());
        assert!(!Key::Tab.is_activation());
        assert!(!Key::Character('x').is_activation());
    }

    #[test]
    fn test_event_kind() {
        assert_eq!(DomEvent::Resize { width: 1.0 }.kind(), EventKind::Resize);
        assert_eq!(EventKind::KeyPress.dom_name(), Some("keypress"));
        assert_eq!(EventKind::Intersect.dom_name(), None);
    }

    #[test]
    fn test_table_register_and_find() {
        let mut table: EventTable<&'static str> = EventTable::new();
        table.on(Target::Hamburger, EventKind::Click, |_| Some("toggle"));
        table
            .on(Target::Window, EventKind::Resize, |_| Some("resize"))
            .debounced(250);
        table
            .on(Target::PortfolioItem(0), EventKind::KeyPress, |e| match e {
                DomEvent::KeyPress { key } if key.is_activation() => Some("open"),
                _ => None,
            })
            .prevent_default(PreventDefault::WhenHandled);

        assert_eq!(table.len(), 3);
        let resize = table.find(Target::Window, EventKind::Resize).unwrap();
        assert_eq!(resize.delivery, Delivery::Debounced { quiet_ms: 250 });

        let key = table
            .find(Target::PortfolioItem(0), EventKind::KeyPress)
            .unwrap();
        assert_eq!(key.handle(&DomEvent::KeyPress { key: Key::Enter }), Some("open"));
        assert_eq!(key.handle(&DomEvent::KeyPress { key: Key::Tab }), None);
        assert!(key.should_prevent_default(true));
        assert!(!key.should_prevent_default(false));

        assert!(table.find(Target::ContactForm, EventKind::Submit).is_none());
    }
}
