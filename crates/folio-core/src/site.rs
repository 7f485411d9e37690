//! The whole page as one Elm-style state.

use crate::config::SiteConfig;
use crate::event::EventTable;
use crate::form::{ContactForm, FormDraft, SubmitControl};
use crate::message::{FormMessage, MessagePresenter};
use crate::nav::{self, NavigationBar};
use crate::page::Page;
use crate::portfolio::{ClickOrigin, ItemDecoration, PortfolioBinder};
use crate::reveal::{Reveal, RevealObserver};
use crate::section::SectionNavigator;
use crate::state::{Command, State};
use serde::Serialize;

/// Messages handled by [`Site`].
#[derive(Debug, Clone, PartialEq)]
pub enum SiteMessage {
    /// Document finished loading with this fragment in the address
    Loaded {
        /// Section id from `location.hash`
        fragment: Option<String>,
    },
    /// Hamburger clicked
    MenuToggled,
    /// Nav link clicked
    NavLinkClicked {
        /// Link index
        index: usize,
    },
    /// Viewport width settled after resizing
    ViewportResized {
        /// New width in CSS pixels
        width: f64,
    },
    /// Back/forward navigation
    HistoryPopped {
        /// Section id from `location.hash`
        fragment: Option<String>,
    },
    /// Portfolio card clicked or activated from the keyboard
    ItemActivated {
        /// Card index
        index: usize,
        /// Where the click started
        origin: ClickOrigin,
    },
    /// Contact form submitted
    FormSubmitted {
        /// Field values at submit time
        draft: FormDraft,
    },
    /// Simulated send finished
    SubmissionSettled {
        /// What was sent
        draft: FormDraft,
        /// Button label to put back
        restore_label: String,
    },
    /// Message lifetime elapsed
    MessageExpired {
        /// Message identity
        id: u64,
    },
    /// Time to hide and observe portfolio cards
    RevealArmed,
    /// Intersection report for a card
    ItemIntersected {
        /// Card index
        index: usize,
        /// Whether the card is in view
        intersecting: bool,
    },
}

/// Serializable snapshot of everything the user can see change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UiState {
    /// Visible section id
    pub visible_section: Option<String>,
    /// Highlighted nav link
    pub active_link: Option<usize>,
    /// Mobile menu open
    pub menu_open: bool,
    /// Submit button
    pub submit: SubmitControl,
    /// Current form message
    pub message: Option<FormMessage>,
    /// Per-card reveal state
    pub reveal: Vec<Reveal>,
}

impl UiState {
    /// Pretty JSON for debugging.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Page state composed from the individual controllers.
#[derive(Debug, Clone)]
pub struct Site {
    config: SiteConfig,
    page: Page,
    sections: SectionNavigator,
    nav: NavigationBar,
    portfolio: PortfolioBinder,
    form: ContactForm,
    presenter: MessagePresenter,
    reveal: RevealObserver,
}

impl Site {
    /// Build the state for `page` in its markup state.
    #[must_use]
    pub fn new(page: Page, config: SiteConfig) -> Self {
        let sections = SectionNavigator::new(&page, config.default_section.clone());
        let nav = NavigationBar::new(&page, config.breakpoint);
        let portfolio = PortfolioBinder::new(&page);
        let form = ContactForm::new(
            page.submit_label.clone(),
            config.pending_label.clone(),
            config.submit_latency_ms,
        );
        let presenter = MessagePresenter::new(config.message_timeout_ms);
        let reveal = RevealObserver::new(page.items.len());

        Self {
            config,
            page,
            sections,
            nav,
            portfolio,
            form,
            presenter,
            reveal,
        }
    }

    /// Configuration in effect.
    #[must_use]
    pub const fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Declared page structure.
    #[must_use]
    pub const fn page(&self) -> &Page {
        &self.page
    }

    /// Section navigator.
    #[must_use]
    pub const fn sections(&self) -> &SectionNavigator {
        &self.sections
    }

    /// Navigation bar.
    #[must_use]
    pub const fn nav(&self) -> &NavigationBar {
        &self.nav
    }

    /// Contact form.
    #[must_use]
    pub const fn form(&self) -> &ContactForm {
        &self.form
    }

    /// Form message slot.
    #[must_use]
    pub const fn presenter(&self) -> &MessagePresenter {
        &self.presenter
    }

    /// Scroll reveal tracker.
    #[must_use]
    pub const fn reveal(&self) -> &RevealObserver {
        &self.reveal
    }

    /// Overlay link attributes for every portfolio card.
    #[must_use]
    pub fn decorations(&self) -> Vec<ItemDecoration> {
        self.portfolio.decorations()
    }

    /// Listener table for this page.
    #[must_use]
    pub fn events(&self) -> EventTable<SiteMessage> {
        nav::wire(&self.page, &self.config)
    }

    /// Current UI state.
    #[must_use]
    pub fn snapshot(&self) -> UiState {
        UiState {
            visible_section: self.sections.visible().map(str::to_string),
            active_link: self.nav.active(),
            menu_open: self.nav.is_menu_open(),
            submit: self.form.submit_control().clone(),
            message: self.presenter.current().cloned(),
            reveal: self.reveal.states().to_vec(),
        }
    }

    fn on_loaded(&mut self, fragment: Option<&str>) -> Command<SiteMessage> {
        let restore = self.sections.restore_deep_link(fragment);
        if restore.is_some() {
            if let Some(id) = fragment {
                self.nav.highlight_section(id);
            }
        }

        Command::batch([
            restore.unwrap_or_default(),
            Command::After {
                delay_ms: self.config.reveal.delay_ms,
                message: SiteMessage::RevealArmed,
            },
        ])
    }
}

impl State for Site {
    type Message = SiteMessage;

    fn update(&mut self, msg: Self::Message) -> Command<Self::Message> {
        match msg {
            SiteMessage::Loaded { fragment } => self.on_loaded(fragment.as_deref()),
            SiteMessage::MenuToggled => {
                self.nav.toggle_menu();
                Command::None
            }
            SiteMessage::NavLinkClicked { index } => self.nav.follow_link(index, &mut self.sections),
            SiteMessage::ViewportResized { width } => {
                self.nav.on_viewport_resized(width);
                Command::None
            }
            // The nav highlight is left as it was.
            SiteMessage::HistoryPopped { fragment } => {
                self.sections.on_history_pop(fragment.as_deref())
            }
            SiteMessage::ItemActivated { index, origin } => self.portfolio.activate(index, origin),
            SiteMessage::FormSubmitted { draft } => self.form.submit(draft, &mut self.presenter),
            SiteMessage::SubmissionSettled {
                draft,
                restore_label,
            } => self.form.settle(&draft, restore_label, &mut self.presenter),
            SiteMessage::MessageExpired { id } => {
                self.presenter.expire(id);
                Command::None
            }
            SiteMessage::RevealArmed => self.reveal.arm(),
            SiteMessage::ItemIntersected {
                index,
                intersecting,
            } => {
                if self.reveal.intersect(index, intersecting) {
                    tracing::debug!(item = index, "revealed");
                }
                Command::None
            }
        }
    }
}
