//! DOM-backed [`Platform`]: reads the markup contract and renders state.

use super::history::FragmentHistory;
use folio_core::{
    History, ItemDecoration, Page, Platform, PortfolioItem, Reveal, RevealConfig, RevealStyle, Site,
    Target, UiState, WeakRuntime, WINDOW_FEATURES,
};
use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, HtmlElement, HtmlFormElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, Window,
};

/// `.section`
pub const SECTION: &str = ".section";
/// `.nav-link`
pub const NAV_LINK: &str = ".nav-link";
/// `.hamburger`
pub const HAMBURGER: &str = ".hamburger";
/// `.nav-menu`
pub const NAV_MENU: &str = ".nav-menu";
/// `.portfolio-item`
pub const PORTFOLIO_ITEM: &str = ".portfolio-item";
/// Overlay anchors inside a portfolio item
pub const PORTFOLIO_LINK: &str = ".portfolio-link";
/// `#contactForm`
pub const CONTACT_FORM: &str = "contactForm";
/// Submit button inside the contact form
pub const SUBMIT_BUTTON: &str = ".submit-button";
/// State class shared by sections, links, hamburger and menu
pub const ACTIVE: &str = "active";

type ObserverCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

/// The page's elements and what has been rendered into them.
pub struct DomPlatform {
    window: Window,
    document: Document,
    history: FragmentHistory,
    page: Page,
    sections: Vec<(String, Element)>,
    links: Vec<Element>,
    hamburger: Option<Element>,
    menu: Option<Element>,
    items: Vec<HtmlElement>,
    form: Option<HtmlFormElement>,
    submit: Option<Element>,
    message: RefCell<Option<(u64, Element)>>,
    reveal: RefCell<Vec<Reveal>>,
    observer: RefCell<Option<(IntersectionObserver, ObserverCallback)>>,
    runtime: RefCell<Option<WeakRuntime<DomPlatform>>>,
}

fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>, JsValue> {
    let nodes = document.query_selector_all(selector)?;
    Ok((0..nodes.length())
        .filter_map(|i| nodes.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

fn has_active(element: &Element) -> bool {
    element.class_list().contains(ACTIVE)
}

fn set_active(element: &Element, active: bool) {
    let _ = element.class_list().toggle_with_force(ACTIVE, active);
}

impl DomPlatform {
    /// Read the markup contract from `document`.
    ///
    /// Missing optional elements are tolerated; only DOM API failures error.
    pub fn mount(window: Window, document: Document) -> Result<Self, JsValue> {
        let sections: Vec<(String, Element)> = query_all(&document, SECTION)?
            .into_iter()
            .filter(|el| !el.id().is_empty())
            .map(|el| (el.id(), el))
            .collect();
        let links = query_all(&document, NAV_LINK)?;
        let items: Vec<HtmlElement> = query_all(&document, PORTFOLIO_ITEM)?
            .into_iter()
            .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
            .collect();
        let form = document
            .get_element_by_id(CONTACT_FORM)
            .and_then(|el| el.dyn_into::<HtmlFormElement>().ok());
        let submit = match &form {
            Some(form) => form.query_selector(SUBMIT_BUTTON)?,
            None => None,
        };

        let mut page = Page::new();
        for (id, el) in &sections {
            page = page.section(id.clone());
            if has_active(el) && page.initial_section.is_none() {
                page = page.visible(id.clone());
            }
        }
        for (index, el) in links.iter().enumerate() {
            page = page.link(el.get_attribute("href").unwrap_or_default());
            if has_active(el) && page.initial_link.is_none() {
                page = page.active_link(index);
            }
        }
        for el in &items {
            page = page.item(PortfolioItem::new(
                el.get_attribute("data-live").as_deref(),
                el.get_attribute("data-github").as_deref(),
            ));
        }
        if let Some(label) = submit.as_ref().and_then(|el| el.text_content()) {
            page = page.submit_label(label);
        }

        tracing::debug!(
            sections = sections.len(),
            links = links.len(),
            items = items.len(),
            form = form.is_some(),
            "markup read"
        );

        Ok(Self {
            hamburger: document.query_selector(HAMBURGER)?,
            menu: document.query_selector(NAV_MENU)?,
            reveal: RefCell::new(vec![Reveal::Idle; items.len()]),
            window,
            document,
            history: FragmentHistory::new(),
            page,
            sections,
            links,
            items,
            form,
            submit,
            message: RefCell::new(None),
            observer: RefCell::new(None),
            runtime: RefCell::new(None),
        })
    }

    /// Page structure read from the markup.
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// `.hamburger`, if present.
    pub fn hamburger(&self) -> Option<&Element> {
        self.hamburger.as_ref()
    }

    /// Nav link `index`.
    pub fn link(&self, index: usize) -> Option<&Element> {
        self.links.get(index)
    }

    /// Portfolio card `index`.
    pub fn item(&self, index: usize) -> Option<&HtmlElement> {
        self.items.get(index)
    }

    /// `#contactForm`, if present.
    pub fn form(&self) -> Option<&HtmlFormElement> {
        self.form.as_ref()
    }

    /// Route intersection reports to `runtime`.
    pub fn connect(&self, runtime: WeakRuntime<Self>) {
        *self.runtime.borrow_mut() = Some(runtime);
    }

    /// Write overlay link attributes and make cards focusable.
    pub fn decorate(&self, decorations: &[ItemDecoration]) {
        for (item, decoration) in self.items.iter().zip(decorations) {
            for (class, link) in [("live", &decoration.live), ("github", &decoration.source)] {
                let Some(link) = link else { continue };
                let selector = format!("{PORTFOLIO_LINK}.{class}");
                if let Ok(Some(anchor)) = item.query_selector(&selector) {
                    let _ = anchor.set_attribute("href", &link.href);
                    let _ = anchor.set_attribute("target", link.target);
                    let _ = anchor.set_attribute("rel", link.rel);
                }
            }
            if decoration.focusable {
                item.set_tab_index(0);
            }
        }
    }

    fn render_sections(&self, ui: &UiState) {
        for (id, el) in &self.sections {
            set_active(el, ui.visible_section.as_deref() == Some(id.as_str()));
        }
    }

    fn render_nav(&self, ui: &UiState) {
        for (index, el) in self.links.iter().enumerate() {
            set_active(el, ui.active_link == Some(index));
        }
        for el in [&self.hamburger, &self.menu].into_iter().flatten() {
            set_active(el, ui.menu_open);
        }
    }

    fn render_submit(&self, ui: &UiState) {
        let Some(submit) = &self.submit else { return };
        if submit.text_content().as_deref() != Some(ui.submit.label.as_str()) {
            submit.set_text_content(Some(&ui.submit.label));
        }
        if ui.submit.disabled {
            let _ = submit.set_attribute("disabled", "");
        } else {
            let _ = submit.remove_attribute("disabled");
        }
    }

    fn render_message(&self, ui: &UiState) -> Result<(), JsValue> {
        let mut shown = self.message.borrow_mut();
        let current = ui.message.as_ref().map(|m| m.id);
        if shown.as_ref().map(|(id, _)| *id) == current {
            return Ok(());
        }

        if let Some((_, el)) = shown.take() {
            el.remove();
        }
        let (Some(message), Some(form)) = (&ui.message, &self.form) else {
            return Ok(());
        };

        let el = self.document.create_element("div")?;
        el.set_class_name(&message.class_name());
        el.set_attribute("style", &message.kind.style().css())?;
        el.set_text_content(Some(&message.text));
        form.insert_before(&el, form.first_child().as_ref())?;
        *shown = Some((message.id, el));
        Ok(())
    }

    fn render_reveal(&self, ui: &UiState, config: &RevealConfig) {
        let mut applied = self.reveal.borrow_mut();
        for ((item, state), last) in self.items.iter().zip(&ui.reveal).zip(applied.iter_mut()) {
            if *state == *last {
                continue;
            }
            if let Some(style) = RevealStyle::for_state(*state, config) {
                let css = item.style();
                let _ = css.set_property("opacity", style.opacity);
                let _ = css.set_property("transform", &style.transform);
                if let Some(transition) = &style.transition {
                    let _ = css.set_property("transition", transition);
                }
            }
            *last = *state;
        }
    }

    fn on_intersections(&self, entries: &js_sys::Array) {
        let Some(runtime) = self.runtime.borrow().as_ref().and_then(WeakRuntime::upgrade) else {
            return;
        };
        for entry in entries.iter() {
            let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                continue;
            };
            let target = entry.target();
            let Some(index) = self.items.iter().position(|item| **item == target) else {
                continue;
            };
            runtime.trigger(
                Target::PortfolioItem(index),
                &folio_core::DomEvent::Intersect {
                    intersecting: entry.is_intersecting(),
                },
            );
        }
    }
}

impl History for DomPlatform {
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

impl Platform for DomPlatform {
    fn open_external(&self, url: &str) {
        if let Err(err) = self
            .window
            .open_with_url_and_target_and_features(url, folio_core::NEW_CONTEXT, WINDOW_FEATURES)
        {
            tracing::warn!(?err, url, "window.open failed");
        }
    }

    fn reset_form(&self) {
        if let Some(form) = &self.form {
            form.reset();
        }
    }

    fn observe_reveal(&self, config: &RevealConfig) {
        let Some(runtime) = self.runtime.borrow().as_ref().and_then(WeakRuntime::upgrade) else {
            return;
        };
        let platform = std::rc::Rc::downgrade(runtime.platform());
        let callback: ObserverCallback =
            Closure::new(move |entries: js_sys::Array, _observer: IntersectionObserver| {
                if let Some(platform) = platform.upgrade() {
                    platform.on_intersections(&entries);
                }
            });

        let options = IntersectionObserverInit::new();
        options.set_threshold(&JsValue::from_f64(config.threshold));
        options.set_root_margin(&config.root_margin);

        match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options) {
            Ok(observer) => {
                for item in &self.items {
                    observer.observe(item);
                }
                *self.observer.borrow_mut() = Some((observer, callback));
            }
            Err(err) => tracing::warn!(?err, "IntersectionObserver unavailable"),
        }
    }

    fn render(&self, site: &Site) {
        let ui = site.snapshot();
        self.render_sections(&ui);
        self.render_nav(&ui);
        self.render_submit(&ui);
        if let Err(err) = self.render_message(&ui) {
            tracing::warn!(?err, "form message not rendered");
        }
        self.render_reveal(&ui, &site.config().reveal);
    }
}

impl Drop for DomPlatform {
    fn drop(&mut self) {
        if let Some((observer, _callback)) = self.observer.get_mut().take() {
            observer.disconnect();
        }
    }
}

impl std::fmt::Debug for DomPlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DomPlatform")
            .field("page", &self.page)
            .finish_non_exhaustive()
    }
}
