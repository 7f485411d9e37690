//! Test harness driving a whole page through the runtime.

use crate::platform::MemoryPlatform;
use folio_core::{
    DomEvent, FormDraft, FormMessage, History, Key, MessageKind, Outcome, Page, Runtime, Scheduler,
    SiteConfig, Site, SubmitControl, Target, UiState, VirtualScheduler,
};
use std::rc::Rc;

/// Drives a [`Site`] with simulated DOM events on a virtual clock.
///
/// ```
/// use folio_test::{fixture, PageHarness};
///
/// let mut harness = PageHarness::new(fixture::portfolio_page());
/// harness.click_nav_link(1);
/// harness.assert_visible("about").assert_active_link(1);
/// ```
pub struct PageHarness {
    runtime: Runtime<MemoryPlatform>,
    platform: Rc<MemoryPlatform>,
    scheduler: Rc<VirtualScheduler>,
    last_outcome: Outcome,
}

impl PageHarness {
    /// Load `page` with the default configuration and no fragment.
    pub fn new(page: Page) -> Self {
        Self::open(page, SiteConfig::default(), None)
    }

    /// Load `page` with `config`, as if the address ended in `#<fragment>`.
    pub fn open(page: Page, config: SiteConfig, fragment: Option<&str>) -> Self {
        let platform = Rc::new(fragment.map_or_else(MemoryPlatform::new, MemoryPlatform::with_fragment));
        let scheduler = Rc::new(VirtualScheduler::new());
        let runtime = Runtime::new(
            Site::new(page, config),
            Rc::clone(&platform),
            Rc::clone(&scheduler) as Rc<dyn Scheduler>,
        );
        runtime.start();

        Self {
            runtime,
            platform,
            scheduler,
            last_outcome: Outcome::default(),
        }
    }

    // === Event Simulation ===

    /// Click the hamburger button.
    pub fn click_hamburger(&mut self) -> &mut Self {
        self.fire(Target::Hamburger, &DomEvent::Click { on_overlay_link: false })
    }

    /// Click nav link `index`.
    pub fn click_nav_link(&mut self, index: usize) -> &mut Self {
        self.fire(Target::NavLink(index), &DomEvent::Click { on_overlay_link: false })
    }

    /// Click the body of portfolio card `index`.
    pub fn click_item(&mut self, index: usize) -> &mut Self {
        self.fire(Target::PortfolioItem(index), &DomEvent::Click { on_overlay_link: false })
    }

    /// Click an overlay link inside portfolio card `index`.
    pub fn click_overlay_link(&mut self, index: usize) -> &mut Self {
        self.fire(Target::PortfolioItem(index), &DomEvent::Click { on_overlay_link: true })
    }

    /// Press `key` while portfolio card `index` has focus.
    pub fn press_key_on_item(&mut self, index: usize, key: Key) -> &mut Self {
        self.fire(Target::PortfolioItem(index), &DomEvent::KeyPress { key })
    }

    /// Resize the window to `width` CSS pixels.
    pub fn resize(&mut self, width: f64) -> &mut Self {
        self.fire(Target::Window, &DomEvent::Resize { width })
    }

    /// Report an intersection for portfolio card `index`.
    pub fn scroll_into_view(&mut self, index: usize) -> &mut Self {
        self.fire(
            Target::PortfolioItem(index),
            &DomEvent::Intersect { intersecting: true },
        )
    }

    /// Type into every contact form field.
    pub fn fill_form(&mut self, name: &str, email: &str, message: &str) -> &mut Self {
        self.platform.fill_form(FormDraft::new(name, email, message));
        self
    }

    /// Submit the contact form with whatever the fields hold.
    pub fn submit_form(&mut self) -> &mut Self {
        let draft = self.platform.form_fields();
        self.fire(Target::ContactForm, &DomEvent::Submit { draft })
    }

    /// Browser back button. Does nothing at the oldest entry.
    pub fn back(&mut self) -> &mut Self {
        if self.platform.history().back() {
            self.pop_state();
        }
        self
    }

    /// Browser forward button. Does nothing at the newest entry.
    pub fn forward(&mut self) -> &mut Self {
        if self.platform.history().forward() {
            self.pop_state();
        }
        self
    }

    /// Advance the virtual clock by `ms`, running due timers.
    pub fn advance(&mut self, ms: u64) -> &mut Self {
        self.scheduler.advance(ms);
        self
    }

    /// Run every pending timer.
    pub fn settle(&mut self) -> &mut Self {
        self.scheduler.run_until_idle();
        self
    }

    // === Queries ===

    /// Outcome of the last simulated event.
    pub const fn last_outcome(&self) -> Outcome {
        self.last_outcome
    }

    /// Current UI state.
    pub fn state(&self) -> UiState {
        self.runtime.snapshot()
    }

    /// Visible section id.
    pub fn visible_section(&self) -> Option<String> {
        self.state().visible_section
    }

    /// Current form message.
    pub fn message(&self) -> Option<FormMessage> {
        self.state().message
    }

    /// Submit button state.
    pub fn submit_control(&self) -> SubmitControl {
        self.state().submit
    }

    /// Address fragment.
    pub fn fragment(&self) -> Option<String> {
        self.platform.fragment()
    }

    /// Platform recording every effect.
    pub fn platform(&self) -> &MemoryPlatform {
        &self.platform
    }

    /// Virtual time in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    /// Timers waiting to fire.
    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending()
    }

    // === Assertions ===

    /// Assert that `id` is the visible section.
    ///
    /// # Panics
    ///
    /// Panics if another section, or none, is visible.
    pub fn assert_visible(&self, id: &str) -> &Self {
        let actual = self.visible_section();
        assert_eq!(
            actual.as_deref(),
            Some(id),
            "Expected section '{id}' to be visible but got {actual:?}"
        );
        self
    }

    /// Assert that no section is visible.
    ///
    /// # Panics
    ///
    /// Panics if a section is visible.
    pub fn assert_no_section_visible(&self) -> &Self {
        let actual = self.visible_section();
        assert!(actual.is_none(), "Expected no visible section but got {actual:?}");
        self
    }

    /// Assert which nav link is highlighted.
    ///
    /// # Panics
    ///
    /// Panics if a different link, or none, is active.
    pub fn assert_active_link(&self, index: usize) -> &Self {
        let actual = self.state().active_link;
        assert_eq!(
            actual,
            Some(index),
            "Expected nav link {index} to be active but got {actual:?}"
        );
        self
    }

    /// Assert the mobile menu state.
    ///
    /// # Panics
    ///
    /// Panics if the menu state differs.
    pub fn assert_menu_open(&self, open: bool) -> &Self {
        assert_eq!(self.state().menu_open, open, "Expected menu_open == {open}");
        self
    }

    /// Assert the address fragment.
    ///
    /// # Panics
    ///
    /// Panics if the fragment differs.
    pub fn assert_fragment(&self, fragment: &str) -> &Self {
        let actual = self.fragment();
        assert_eq!(
            actual.as_deref(),
            Some(fragment),
            "Expected fragment '#{fragment}' but got {actual:?}"
        );
        self
    }

    /// Assert that exactly this message is shown.
    ///
    /// # Panics
    ///
    /// Panics if no message, or a different one, is shown.
    pub fn assert_message(&self, kind: MessageKind, text: &str) -> &Self {
        let message = self.message();
        let actual = message.as_ref().map(|m| (m.kind, m.text.as_str()));
        assert_eq!(
            actual,
            Some((kind, text)),
            "Expected {kind:?} message '{text}' but got {message:?}"
        );
        self
    }

    /// Assert that no message is shown.
    ///
    /// # Panics
    ///
    /// Panics if a message is shown.
    pub fn assert_no_message(&self) -> &Self {
        let message = self.message();
        assert!(message.is_none(), "Expected no message but got {message:?}");
        self
    }

    /// Assert whether a submission is pending.
    ///
    /// # Panics
    ///
    /// Panics if the submit control disagrees.
    pub fn assert_pending(&self, pending: bool) -> &Self {
        let submit = self.submit_control();
        assert_eq!(
            submit.disabled, pending,
            "Expected pending == {pending} but submit control is {submit:?}"
        );
        self
    }

    // === Internal ===

    fn fire(&mut self, target: Target, event: &DomEvent) -> &mut Self {
        self.last_outcome = self.runtime.trigger(target, event);
        self
    }

    fn pop_state(&mut self) {
        let fragment = self.platform.fragment();
        self.fire(Target::Window, &DomEvent::PopState { fragment });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::portfolio_page;

    #[test]
    fn test_harness_starts_runtime() {
        let harness = PageHarness::new(portfolio_page());
        harness.assert_visible("home").assert_active_link(0);
        assert_eq!(harness.platform().render_count(), 1);
        assert_eq!(harness.pending_timers(), 1);
    }

    #[test]
    fn test_advance_moves_clock() {
        let mut harness = PageHarness::new(portfolio_page());
        harness.advance(40).advance(60);
        assert_eq!(harness.now_ms(), 100);
        assert!(harness.platform().observed().is_some());
    }

    #[test]
    fn test_back_at_first_entry_does_nothing() {
        let mut harness = PageHarness::new(portfolio_page());
        let renders = harness.platform().render_count();
        harness.back();
        assert_eq!(harness.platform().render_count(), renders);
    }
}
