//! Portfolio card links and activation.

use crate::page::{Page, PortfolioItem};
use crate::state::Command;
use serde::Serialize;

/// `target` for links that open in a new browsing context.
pub const NEW_CONTEXT: &str = "_blank";
/// `rel` for overlay links: no opener handle, no referrer.
pub const EXTERNAL_REL: &str = "noopener noreferrer";
/// `window.open` features equivalent to [`EXTERNAL_REL`].
pub const WINDOW_FEATURES: &str = "noopener,noreferrer";

/// Attributes written onto an overlay anchor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExternalLink {
    /// `href`
    pub href: String,
    /// `target`
    pub target: &'static str,
    /// `rel`
    pub rel: &'static str,
}

impl ExternalLink {
    fn new(href: &str) -> Self {
        Self {
            href: href.to_string(),
            target: NEW_CONTEXT,
            rel: EXTERNAL_REL,
        }
    }
}

/// Decoration applied to one card at initialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemDecoration {
    /// `.portfolio-link.live` attributes
    pub live: Option<ExternalLink>,
    /// `.portfolio-link.github` attributes
    pub source: Option<ExternalLink>,
    /// Card gets `tabindex="0"`
    pub focusable: bool,
}

/// Where a click on a card started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ClickOrigin {
    /// The card body
    Item,
    /// One of the overlay anchors, which navigates on its own
    OverlayLink,
}

/// Binds portfolio cards to their URLs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortfolioBinder {
    items: Vec<PortfolioItem>,
}

impl PortfolioBinder {
    /// Bind the page's items.
    #[must_use]
    pub fn new(page: &Page) -> Self {
        Self {
            items: page.items.clone(),
        }
    }

    /// Overlay link attributes and focusability for every card.
    #[must_use]
    pub fn decorations(&self) -> Vec<ItemDecoration> {
        self.items
            .iter()
            .map(|item| ItemDecoration {
                live: item.live.as_deref().map(ExternalLink::new),
                source: item.source.as_deref().map(ExternalLink::new),
                focusable: true,
            })
            .collect()
    }

    /// Activate card `index` by click or keyboard.
    ///
    /// Opens the live URL, else the source URL. Nothing happens for clicks
    /// that started on an overlay link, for cards without URLs, or for
    /// unknown indices.
    pub fn activate<M>(&self, index: usize, origin: ClickOrigin) -> Command<M> {
        if origin == ClickOrigin::OverlayLink {
            return Command::None;
        }
        self.items
            .get(index)
            .and_then(PortfolioItem::primary_url)
            .map_or(Command::None, |url| {
                tracing::debug!(item = index, url, "opening portfolio item");
                Command::OpenExternal {
                    url: url.to_string(),
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binder() -> PortfolioBinder {
        let page = Page::new()
            .item(PortfolioItem::new(
                Some("https://demo.example"),
                Some("https://github.com/me/demo"),
            ))
            .item(PortfolioItem::new(None, Some("https://github.com/me/lib")))
            .item(PortfolioItem::new(None, None));
        PortfolioBinder::new(&page)
    }

    #[test]
    fn test_decorations() {
        let decorations = binder().decorations();
        assert_eq!(decorations.len(), 3);

        let first = &decorations[0];
        let live = first.live.as_ref().unwrap();
        assert_eq!(live.href, "https://demo.example");
        assert_eq!(live.target, "_blank");
        assert_eq!(live.rel, "noopener noreferrer");
        assert_eq!(first.source.as_ref().unwrap().href, "https://github.com/me/demo");

        assert!(decorations[1].live.is_none());
        assert!(decorations[2].source.is_none());
        assert!(decorations.iter().all(|d| d.focusable));
    }

    #[test]
    fn test_activate_prefers_live() {
        let cmd: Command<()> = binder().activate(0, ClickOrigin::Item);
        assert_eq!(
            cmd,
            Command::OpenExternal {
                url: "https://demo.example".to_string()
            }
        );
    }

    #[test]
    fn test_activate_falls_back_to_source() {
        let cmd: Command<()> = binder().activate(1, ClickOrigin::Item);
        assert_eq!(
            cmd,
            Command::OpenExternal {
                url: "https://github.com/me/lib".to_string()
            }
        );
    }

    #[test]
    fn test_overlay_click_does_not_double_navigate() {
        let cmd: Command<()> = binder().activate(0, ClickOrigin::OverlayLink);
        assert!(cmd.is_none());
    }

    #[test]
    fn test_no_urls_or_unknown_index_is_noop() {
        let cmd: Command<()> = binder().activate(2, ClickOrigin::Item);
        assert!(cmd.is_none());
        let cmd: Command<()> = binder().activate(99, ClickOrigin::Item);
        assert!(cmd.is_none());
    }
}
