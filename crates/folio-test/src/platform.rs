//! In-memory [`Platform`] that records every effect.

use folio_core::{FormDraft, History, MemoryHistory, Platform, RevealConfig, Site, UiState};
use std::cell::{Cell, RefCell};

/// Records effects instead of touching a browser.
#[derive(Debug, Default)]
pub struct MemoryPlatform {
    history: MemoryHistory,
    opened: RefCell<Vec<String>>,
    form: RefCell<FormDraft>,
    resets: Cell<usize>,
    observed: RefCell<Option<RevealConfig>>,
    renders: Cell<usize>,
    rendered: RefCell<Option<UiState>>,
}

impl MemoryPlatform {
    /// Create a platform with an empty address fragment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a platform whose address ends in `#<fragment>`.
    pub fn with_fragment(fragment: &str) -> Self {
        Self {
            history: MemoryHistory::new(Some(fragment)),
            ..Self::default()
        }
    }

    /// Session history.
    pub fn history(&self) -> &MemoryHistory {
        &self.history
    }

    /// URLs opened in new browsing contexts, in order.
    pub fn opened(&self) -> Vec<String> {
        self.opened.borrow().clone()
    }

    /// Type into the contact form.
    pub fn fill_form(&self, draft: FormDraft) {
        *self.form.borrow_mut() = draft;
    }

    /// Current contact form field values.
    pub fn form_fields(&self) -> FormDraft {
        self.form.borrow().clone()
    }

    /// How many times the form was reset.
    pub fn reset_count(&self) -> usize {
        self.resets.get()
    }

    /// Reveal settings passed to the observer, once observing started.
    pub fn observed(&self) -> Option<RevealConfig> {
        self.observed.borrow().clone()
    }

    /// Number of renders.
    pub fn render_count(&self) -> usize {
        self.renders.get()
    }

    /// State as of the last render.
    pub fn rendered(&self) -> Option<UiState> {
        self.rendered.borrow().clone()
    }
}

impl History for MemoryPlatform {
    fn fragment(&self) -> Option<String> {
        self.history.fragment()
    }

    fn push_fragment(&self, fragment: &str) {
        self.history.push_fragment(fragment);
    }

    fn replace_fragment(&self, fragment: &str) {
        self.history.replace_fragment(fragment);
    }
}

impl Platform for MemoryPlatform {
    fn open_external(&self, url: &str) {
        self.opened.borrow_mut().push(url.to_string());
    }

    fn reset_form(&self) {
        *self.form.borrow_mut() = FormDraft::default();
        self.resets.set(self.resets.get() + 1);
    }

    fn observe_reveal(&self, config: &RevealConfig) {
        *self.observed.borrow_mut() = Some(config.clone());
    }

    fn render(&self, site: &Site) {
        self.renders.set(self.renders.get() + 1);
        *self.rendered.borrow_mut() = Some(site.snapshot());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_clears_fields() {
        let platform = MemoryPlatform::new();
        platform.fill_form(FormDraft::new("Ada", "ada@example.com", "Hi"));
        platform.reset_form();
        assert_eq!(platform.form_fields(), FormDraft::default());
        assert_eq!(platform.reset_count(), 1);
    }

    #[test]
    fn test_with_fragment() {
        let platform = MemoryPlatform::with_fragment("about");
        assert_eq!(platform.fragment().as_deref(), Some("about"));
        platform.push_fragment("contact");
        assert_eq!(platform.history().len(), 2);
    }
}
