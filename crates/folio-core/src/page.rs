//! Static page model read from the markup.
//!
//! A [`Page`] lists what the document declares once at load: content
//! sections, navigation links, and portfolio items. It never changes after
//! initialization. Lookups return `Option` so callers decide what a missing
//! element means.

use serde::{Deserialize, Serialize};

/// Navigation link pointing at a section through its `href` fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    /// Raw `href` attribute, normally `#<section-id>`
    pub href: String,
}

impl NavLink {
    /// Create a link from its `href`.
    pub fn new(href: impl Into<String>) -> Self {
        Self { href: href.into() }
    }

    /// Section id targeted by this link: the text after the first `#`, or
    /// the whole `href` when it has no fragment marker.
    #[must_use]
    pub fn target(&self) -> &str {
        self.href
            .split_once('#')
            .map_or(self.href.as_str(), |(_, fragment)| fragment)
    }
}

/// A work sample card with optional live-demo and source URLs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortfolioItem {
    /// `data-live` URL
    #[serde(default)]
    pub live: Option<String>,
    /// `data-github` URL
    #[serde(default)]
    pub source: Option<String>,
}

impl PortfolioItem {
    /// Create an item. Empty strings count as absent.
    #[must_use]
    pub fn new(live: Option<&str>, source: Option<&str>) -> Self {
        let present = |url: Option<&str>| url.filter(|u| !u.is_empty()).map(str::to_string);
        Self {
            live: present(live),
            source: present(source),
        }
    }

    /// URL opened when the whole card is activated: live demo first, then source.
    #[must_use]
    pub fn primary_url(&self) -> Option<&str> {
        self.live
            .as_deref()
            .filter(|u| !u.is_empty())
            .or_else(|| self.source.as_deref().filter(|u| !u.is_empty()))
    }

    /// Whether activating the card does anything.
    #[must_use]
    pub fn is_actionable(&self) -> bool {
        self.primary_url().is_some()
    }
}

/// Everything the document declares at load time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Section ids in document order
    #[serde(default)]
    pub sections: Vec<String>,
    /// Section marked visible in the markup
    #[serde(default)]
    pub initial_section: Option<String>,
    /// Navigation links in document order
    #[serde(default)]
    pub links: Vec<NavLink>,
    /// Link marked active in the markup
    #[serde(default)]
    pub initial_link: Option<usize>,
    /// Portfolio items in document order
    #[serde(default)]
    pub items: Vec<PortfolioItem>,
    /// Submit button label in the markup
    #[serde(default = "default_submit_label")]
    pub submit_label: String,
}

fn default_submit_label() -> String {
    "Send Message".to_string()
}

impl Page {
    /// Create an empty page.
    #[must_use]
    pub fn new() -> Self {
        Self {
            submit_label: default_submit_label(),
            ..Self::default()
        }
    }

    /// Declare a section.
    #[must_use]
    pub fn section(mut self, id: impl Into<String>) -> Self {
        self.sections.push(id.into());
        self
    }

    /// Mark the section visible in the markup.
    #[must_use]
    pub fn visible(mut self, id: impl Into<String>) -> Self {
        self.initial_section = Some(id.into());
        self
    }

    /// Declare a navigation link.
    #[must_use]
    pub fn link(mut self, href: impl Into<String>) -> Self {
        self.links.push(NavLink::new(href));
        self
    }

    /// Mark a link active in the markup.
    #[must_use]
    pub const fn active_link(mut self, index: usize) -> Self {
        self.initial_link = Some(index);
        self
    }

    /// Declare a portfolio item.
    #[must_use]
    pub fn item(mut self, item: PortfolioItem) -> Self {
        self.items.push(item);
        self
    }

    /// Set the submit button label.
    #[must_use]
    pub fn submit_label(mut self, label: impl Into<String>) -> Self {
        self.submit_label = label.into();
        self
    }

    /// Whether a section with this id is declared.
    #[must_use]
    pub fn has_section(&self, id: &str) -> bool {
        self.sections.iter().any(|s| s == id)
    }

    /// Link at `index`.
    #[must_use]
    pub fn link_at(&self, index: usize) -> Option<&NavLink> {
        self.links.get(index)
    }

    /// First link whose `href` is exactly `#<id>`.
    #[must_use]
    pub fn link_for_section(&self, id: &str) -> Option<usize> {
        let href = format!("#{id}");
        self.links.iter().position(|l| l.href == href)
    }

    /// Item at `index`.
    #[must_use]
    pub fn item_at(&self, index: usize) -> Option<&PortfolioItem> {
        self.items.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_target() {
        assert_eq!(NavLink::new("#about").target(), "about");
        assert_eq!(NavLink::new("/index.html#contact").target(), "contact");
        assert_eq!(NavLink::new("#").target(), "");
        assert_eq!(NavLink::new("about").target(), "about");
    }

    #[test]
    fn test_item_empty_urls_are_absent() {
        let item = PortfolioItem::new(Some(""), Some("https://github.com/x/y"));
        assert_eq!(item.live, None);
        assert_eq!(item.primary_url(), Some("https://github.com/x/y"));

        let item = PortfolioItem::new(Some(""), None);
        assert!(!item.is_actionable());
    }

    #[test]
    fn test_item_prefers_live_url() {
        let item = PortfolioItem::new(Some("https://demo.example"), Some("https://github.com/x/y"));
        assert_eq!(item.primary_url(), Some("https://demo.example"));
    }

    #[test]
    fn test_page_lookups() {
        let page = Page::new()
            .section("home")
            .section("about")
            .link("#home")
            .link("#about");

        assert!(page.has_section("about"));
        assert!(!page.has_section("blog"));
        assert_eq!(page.link_for_section("about"), Some(1));
        assert_eq!(page.link_for_section("blog"), None);
        assert!(page.link_at(5).is_none());
        assert!(page.item_at(0).is_none());
        assert_eq!(page.submit_label, "Send Message");
    }

    #[test]
    fn test_page_from_yaml() {
        let yaml = r##"
sections: [home, contact]
initial_section: home
links:
  - href: "#home"
  - href: "#contact"
items:
  - live: https://demo.example
  - source: https://github.com/x/y
"##;
        let page: Page = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(page.sections.len(), 2);
        assert_eq!(page.items[1].primary_url(), Some("https://github.com/x/y"));
        assert_eq!(page.submit_label, "Send Message");
    }
}
