//! Section navigation synchronized with the address fragment.

use crate::page::Page;
use crate::state::Command;
use serde::Serialize;

/// How a section change is recorded in session history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryMode {
    /// Add a new entry (user navigation)
    Push,
    /// Rewrite the current entry (deep links and back/forward restores)
    Replace,
}

/// Extract the section id from a `location.hash` value.
///
/// Returns `None` for an empty hash or a bare `#`.
#[must_use]
pub fn parse_fragment(hash: &str) -> Option<&str> {
    let id = hash.strip_prefix('#').unwrap_or(hash);
    (!id.is_empty()).then_some(id)
}

/// Tracks which declared section is visible.
///
/// At most one section is visible. Showing an undeclared id hides every
/// section and still updates the fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionNavigator {
    sections: Vec<String>,
    visible: Option<String>,
    default_section: String,
}

impl SectionNavigator {
    /// Start from the page's markup state.
    pub fn new(page: &Page, default_section: impl Into<String>) -> Self {
        let visible = page
            .initial_section
            .clone()
            .filter(|id| page.has_section(id));
        Self {
            sections: page.sections.clone(),
            visible,
            default_section: default_section.into(),
        }
    }

    /// Currently visible section.
    #[must_use]
    pub fn visible(&self) -> Option<&str> {
        self.visible.as_deref()
    }

    /// Whether `id` is a declared section.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.sections.iter().any(|s| s == id)
    }

    /// Section shown when history lands on an empty fragment.
    #[must_use]
    pub fn default_section(&self) -> &str {
        &self.default_section
    }

    /// Hide every section, show `id` if declared, and record `#<id>`.
    pub fn show_section<M>(&mut self, id: &str, mode: HistoryMode) -> Command<M> {
        if self.contains(id) {
            tracing::debug!(section = id, "showing section");
            self.visible = Some(id.to_string());
        } else {
            tracing::debug!(section = id, "no such section, hiding all");
            self.visible = None;
        }

        let fragment = id.to_string();
        match mode {
            HistoryMode::Push => Command::PushFragment { fragment },
            HistoryMode::Replace => Command::ReplaceFragment { fragment },
        }
    }

    /// Apply a deep link on load.
    ///
    /// Returns `None`, leaving the markup state alone, when the fragment is
    /// empty or names no declared section.
    pub fn restore_deep_link<M>(&mut self, fragment: Option<&str>) -> Option<Command<M>> {
        let id = fragment.filter(|f| !f.is_empty())?;
        if !self.contains(id) {
            tracing::debug!(section = id, "ignoring deep link to unknown section");
            return None;
        }
        Some(self.show_section(id, HistoryMode::Replace))
    }

    /// Re-derive the visible section after back/forward navigation.
    pub fn on_history_pop<M>(&mut self, fragment: Option<&str>) -> Command<M> {
        let id = fragment
            .filter(|f| !f.is_empty())
            .map_or_else(|| self.default_section.clone(), str::to_string);
        self.show_section(&id, HistoryMode::Replace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn navigator() -> SectionNavigator {
        let page = Page::new()
            .section("home")
            .section("about")
            .section("portfolio")
            .section("contact")
            .visible("home");
        SectionNavigator::new(&page, "home")
    }

    #[test]
    fn test_parse_fragment() {
        assert_eq!(parse_fragment("#about"), Some("about"));
        assert_eq!(parse_fragment("about"), Some("about"));
        assert_eq!(parse_fragment("#"), None);
        assert_eq!(parse_fragment(""), None);
    }

    #[test]
    fn test_initial_visible_from_markup() {
        assert_eq!(navigator().visible(), Some("home"));
    }

    #[test]
    fn test_undeclared_initial_section_ignored() {
        let page = Page::new().section("home").visible("missing");
        assert_eq!(SectionNavigator::new(&page, "home").visible(), None);
    }

    #[test]
    fn test_show_section_switches_and_pushes() {
        let mut nav = navigator();
        let cmd: Command<()> = nav.show_section("about", HistoryMode::Push);
        assert_eq!(
            cmd,
            Command::PushFragment {
                fragment: "about".to_string()
            }
        );

        let _: Command<()> = nav.show_section("contact", HistoryMode::Push);
        assert_eq!(nav.visible(), Some("contact"));
    }

    #[test]
    fn test_show_unknown_section_hides_all_but_updates_fragment() {
        let mut nav = navigator();
        let cmd: Command<()> = nav.show_section("doesNotExist", HistoryMode::Push);
        assert_eq!(nav.visible(), None);
        assert_eq!(
            cmd,
            Command::PushFragment {
                fragment: "doesNotExist".to_string()
            }
        );
    }

    #[test]
    fn test_deep_link_known_section() {
        let mut nav = navigator();
        let cmd: Option<Command<()>> = nav.restore_deep_link(Some("portfolio"));
        assert_eq!(nav.visible(), Some("portfolio"));
        assert_eq!(
            cmd,
            Some(Command::ReplaceFragment {
                fragment: "portfolio".to_string()
            })
        );
    }

    #[test]
    fn test_deep_link_unknown_section_leaves_state() {
        let mut nav = navigator();
        let cmd: Option<Command<()>> = nav.restore_deep_link(Some("nope"));
        assert!(cmd.is_none());
        assert_eq!(nav.visible(), Some("home"));

        let cmd: Option<Command<()>> = nav.restore_deep_link(None);
        assert!(cmd.is_none());
    }

    #[test]
    fn test_history_pop_falls_back_to_default() {
        let mut nav = navigator();
        let _: Command<()> = nav.show_section("about", HistoryMode::Push);

        let cmd: Command<()> = nav.on_history_pop(None);
        assert_eq!(nav.visible(), Some("home"));
        assert_eq!(
            cmd,
            Command::ReplaceFragment {
                fragment: "home".to_string()
            }
        );

        let _: Command<()> = nav.on_history_pop(Some("contact"));
        assert_eq!(nav.visible(), Some("contact"));
    }
}
