//! Page fixtures.
//!
//! The stock portfolio page has four sections, one nav link per section, and
//! three portfolio cards covering every URL combination:
//!
//! | card | live | source |
//! |------|------|--------|
//! | 0    | yes  | yes    |
//! | 1    | no   | yes    |
//! | 2    | no   | no     |

use folio_core::{FormDraft, Page};

/// Stock page as YAML, in the shape the browser crate reads from markup.
pub const PORTFOLIO_YAML: &str = r##"
sections: [home, about, portfolio, contact]
initial_section: home
links:
  - href: "#home"
  - href: "#about"
  - href: "#portfolio"
  - href: "#contact"
initial_link: 0
items:
  - live: https://weather.example.dev
    source: https://github.com/folio/weather
  - source: https://github.com/folio/cli
  - {}
submit_label: Send Message
"##;

/// Error type for fixture operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixtureError {
    /// YAML parsing error
    YamlError(String),
}

impl std::fmt::Display for FixtureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::YamlError(msg) => write!(f, "YAML error: {msg}"),
        }
    }
}

impl std::error::Error for FixtureError {}

/// Parse a page description.
pub fn page_from_yaml(yaml: &str) -> Result<Page, FixtureError> {
    serde_yaml_ng::from_str(yaml).map_err(|e| FixtureError::YamlError(e.to_string()))
}

/// The stock portfolio page.
pub fn portfolio_page() -> Page {
    page_from_yaml(PORTFOLIO_YAML).unwrap_or_else(|e| panic!("stock fixture is invalid: {e}"))
}

/// A draft that passes validation.
pub fn valid_draft() -> FormDraft {
    FormDraft::new("Ada Lovelace", "ada@example.com", "I'd like to talk about engines.")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_portfolio_page_shape() {
        let page = portfolio_page();
        assert_eq!(page.sections, vec!["home", "about", "portfolio", "contact"]);
        assert_eq!(page.initial_section.as_deref(), Some("home"));
        assert_eq!(page.links.len(), 4);
        assert_eq!(page.link_for_section("contact"), Some(3));
        assert_eq!(page.items.len(), 3);
        assert_eq!(
            page.items[0].primary_url(),
            Some("https://weather.example.dev")
        );
        assert_eq!(page.items[1].primary_url(), Some("https://github.com/folio/cli"));
        assert!(!page.items[2].is_actionable());
        assert_eq!(page.submit_label, "Send Message");
    }

    #[test]
    fn test_invalid_yaml() {
        let err = page_from_yaml("sections: {").unwrap_err();
        assert!(err.to_string().starts_with("YAML error:"));
    }

    #[test]
    fn test_valid_draft_validates() {
        assert_eq!(valid_draft().validate(), Ok(()));
    }
}
