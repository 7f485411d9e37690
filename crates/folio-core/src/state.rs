//! State management for the site.
//!
//! Follows the Elm Architecture: `State + Message → (State, Command)`.
//! State updates are synchronous and pure with respect to the outside world;
//! everything that touches the browser (history, timers, windows, the form
//! element) is described by a [`Command`] and carried out by the runtime.
//!
//! # Examples
//!
//! ```
//! use folio_core::{Command, State};
//!
//! #[derive(Default)]
//! struct Menu {
//!     open: bool,
//! }
//!
//! enum MenuMessage {
//!     Toggle,
//! }
//!
//! impl State for Menu {
//!     type Message = MenuMessage;
//!
//!     fn update(&mut self, msg: Self::Message) -> Command<Self::Message> {
//!         match msg {
//!             MenuMessage::Toggle => self.open = !self.open,
//!         }
//!         Command::None
//!     }
//! }
//!
//! let mut menu = Menu::default();
//! menu.update(MenuMessage::Toggle);
//! assert!(menu.open);
//! ```

/// Application state trait.
pub trait State {
    /// Message type for state updates
    type Message;

    /// Update state in response to a message.
    ///
    /// Returns a command describing side effects to perform.
    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;
}

/// Side effects requested by a state update.
#[derive(Debug, Clone, PartialEq)]
pub enum Command<M> {
    /// No command
    None,
    /// Execute multiple commands in order
    Batch(Vec<Command<M>>),
    /// Deliver `message` after `delay_ms`
    After {
        /// Delay in milliseconds
        delay_ms: u32,
        /// Message to dispatch when the delay elapses
        message: M,
    },
    /// Set the address fragment, adding a history entry
    PushFragment {
        /// Section id, without the leading `#`
        fragment: String,
    },
    /// Set the address fragment in place
    ReplaceFragment {
        /// Section id, without the leading `#`
        fragment: String,
    },
    /// Open a URL in a new browsing context without opener or referrer
    OpenExternal {
        /// Absolute URL
        url: String,
    },
    /// Clear every field of the contact form
    ResetForm,
    /// Start observing portfolio items for the scroll reveal
    ObserveReveal,
}

impl<M> Default for Command<M> {
    fn default() -> Self {
        Self::None
    }
}

impl<M> Command<M> {
    /// Create a batch of commands, dropping `None` entries.
    pub fn batch(commands: impl IntoIterator<Item = Self>) -> Self {
        let commands: Vec<Self> = commands.into_iter().filter(|c| !c.is_none()).collect();
        if commands.is_empty() {
            Self::None
        } else {
            Self::Batch(commands)
        }
    }

    /// Check if this is the none command.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Flatten nested batches into the ordered list of leaf commands.
    pub fn into_effects(self) -> Vec<Self> {
        let mut out = Vec::new();
        self.flatten_into(&mut out);
        out
    }

    fn flatten_into(self, out: &mut Vec<Self>) {
        match self {
            Self::None => {}
            Self::Batch(commands) => {
                for command in commands {
                    command.flatten_into(out);
                }
            }
            other => out.push(other),
        }
    }
}
