//! Core state and behavior for the Folio portfolio site.
//!
//! This crate has no browser dependencies. It provides:
//! - Page structure read from markup: [`Page`], [`NavLink`], [`PortfolioItem`]
//! - Controllers: [`SectionNavigator`], [`NavigationBar`], [`PortfolioBinder`],
//!   [`ContactForm`], [`MessagePresenter`], [`RevealObserver`]
//! - Elm-style composition: [`Site`] implements [`State`] and returns [`Command`]s
//! - Side effects: [`Runtime`] over a [`Platform`] and a [`Scheduler`]
//! - Listener wiring: [`EventTable`] built by [`wire`]

mod config;
mod debounce;
mod email;
mod error;
mod event;
mod form;
mod message;
mod nav;
mod page;
mod portfolio;
mod reveal;
mod runtime;
mod section;
mod site;
mod state;
mod timer;

pub use config::{RevealConfig, SiteConfig};
pub use debounce::Debouncer;
pub use email::is_valid_email;
pub use error::ConfigError;
pub use event::{
    Delivery, DomEvent, EventKind, EventTable, Key, PreventDefault, Registration, Target,
};
pub use form::{ContactForm, FormDraft, FormError, SubmitControl, SUCCESS_TEXT};
pub use message::{FormMessage, MessageKind, MessagePresenter, MessageStyle};
pub use nav::{wire, NavigationBar};
pub use page::{NavLink, Page, PortfolioItem};
pub use portfolio::{
    ClickOrigin, ExternalLink, ItemDecoration, PortfolioBinder, EXTERNAL_REL, NEW_CONTEXT,
    WINDOW_FEATURES,
};
pub use reveal::{Reveal, RevealObserver, RevealStyle};
pub use runtime::{History, MemoryHistory, Outcome, Platform, Runtime, WeakRuntime};
pub use section::{parse_fragment, HistoryMode, SectionNavigator};
pub use site::{Site, SiteMessage, UiState};
pub use state::{Command, State};
pub use timer::{Scheduler, Task, TimerId, VirtualScheduler};
