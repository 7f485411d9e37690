//! Navigation bar: mobile menu, link routing, active highlight, and the
//! listener wiring for the whole page.

use crate::config::SiteConfig;
use crate::event::{DomEvent, EventKind, EventTable, PreventDefault, Target};
use crate::page::{NavLink, Page};
use crate::portfolio::ClickOrigin;
use crate::section::{HistoryMode, SectionNavigator};
use crate::site::SiteMessage;
use crate::state::Command;
use serde::Serialize;

/// Navigation bar state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavigationBar {
    links: Vec<NavLink>,
    active: Option<usize>,
    menu_open: bool,
    breakpoint: f64,
}

impl NavigationBar {
    /// Start from the page's markup state.
    #[must_use]
    pub fn new(page: &Page, breakpoint: f64) -> Self {
        let active = page
            .initial_link
            .filter(|i| *i < page.links.len())
            .or_else(|| {
                page.initial_section
                    .as_deref()
                    .and_then(|id| page.link_for_section(id))
            });
        Self {
            links: page.links.clone(),
            active,
            menu_open: false,
            breakpoint,
        }
    }

    /// Whether the mobile menu is open.
    #[must_use]
    pub const fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    /// Index of the highlighted link.
    #[must_use]
    pub const fn active(&self) -> Option<usize> {
        self.active
    }

    /// Number of links.
    #[must_use]
    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Flip the mobile menu.
    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
        tracing::debug!(open = self.menu_open, "menu toggled");
    }

    /// Close the mobile menu.
    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }

    /// Follow link `index`: close the menu, show its section, then highlight
    /// the link. The highlight happens even when no section matched.
    pub fn follow_link(&mut self, index: usize, sections: &mut SectionNavigator) -> Command<SiteMessage> {
        let Some(link) = self.links.get(index) else {
            return Command::None;
        };
        let target = link.target().to_string();

        self.close_menu();
        let cmd = sections.show_section(&target, HistoryMode::Push);
        self.active = Some(index);
        cmd
    }

    /// Highlight the first link whose `href` is `#<id>`, clearing the rest.
    pub fn highlight_section(&mut self, id: &str) {
        let href = format!("#{id}");
        self.active = self.links.iter().position(|l| l.href == href);
    }

    /// Apply a settled viewport width. Wide viewports close the menu; narrow
    /// ones leave it as is.
    pub fn on_viewport_resized(&mut self, width: f64) {
        if width > self.breakpoint && self.menu_open {
            tracing::debug!(width, "closing menu for desktop layout");
            self.menu_open = false;
        }
    }
}

/// Build the listener table for a page.
///
/// Called once at startup; links, sections and items are fixed afterwards.
#[must_use]
pub fn wire(page: &Page, config: &SiteConfig) -> EventTable<SiteMessage> {
    let mut table = EventTable::new();

    table.on(Target::Hamburger, EventKind::Click, |_| Some(SiteMessage::MenuToggled));

    for index in 0..page.links.len() {
        table
            .on(Target::NavLink(index), EventKind::Click, move |_| {
                Some(SiteMessage::NavLinkClicked { index })
            })
            .prevent_default(PreventDefault::Always);
    }

    for index in 0..page.items.len() {
        table.on(Target::PortfolioItem(index), EventKind::Click, move |event| match event {
            DomEvent::Click { on_overlay_link } => Some(SiteMessage::ItemActivated {
                index,
                origin: if *on_overlay_link {
                    ClickOrigin::OverlayLink
                } else {
                    ClickOrigin::Item
                },
            }),
            _ => None,
        });
        table
            .on(Target::PortfolioItem(index), EventKind::KeyPress, move |event| match event {
                DomEvent::KeyPress { key } if key.is_activation() => Some(SiteMessage::ItemActivated {
                    index,
                    origin: ClickOrigin::Item,
                }),
                _ => None,
            })
            .prevent_default(PreventDefault::WhenHandled);
        table.on(Target::PortfolioItem(index), EventKind::Intersect, move |event| match event {
            DomEvent::Intersect { intersecting } => Some(SiteMessage::ItemIntersected {
                index,
                intersecting: *intersecting,
            }),
            _ => None,
        });
    }

    table
        .on(Target::ContactForm, EventKind::Submit, |event| match event {
            DomEvent::Submit { draft } => Some(SiteMessage::FormSubmitted { draft: draft.clone() }),
            _ => None,
        })
        .prevent_default(PreventDefault::Always);

    table
        .on(Target::Window, EventKind::Resize, |event| match event {
            DomEvent::Resize { width } => Some(SiteMessage::ViewportResized { width: *width }),
            _ => None,
        })
        .debounced(config.resize_quiet_ms);

    table.on(Target::Window, EventKind::PopState, |event| match event {
        DomEvent::PopState { fragment } => Some(SiteMessage::HistoryPopped {
            fragment: fragment.clone(),
        }),
        _ => None,
    });

    table
}
