//! Transient success/error banner shown above the contact form.

use crate::site::SiteMessage;
use crate::state::Command;
use serde::Serialize;

/// Message variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    /// Submission accepted
    Success,
    /// Validation failure
    Error,
}

impl MessageKind {
    /// Modifier class added next to `form-message`.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }

    /// Fixed palette for this kind.
    #[must_use]
    pub const fn style(self) -> MessageStyle {
        match self {
            Self::Success => MessageStyle {
                background: "#166534",
                text: "#BBF7D0",
                border: "#22C55E",
            },
            Self::Error => MessageStyle {
                background: "#7F1D1D",
                text: "#FECACA",
                border: "#EF4444",
            },
        }
    }
}

/// Colors of a message banner, as CSS hex strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MessageStyle {
    /// Background fill
    pub background: &'static str,
    /// Text color
    pub text: &'static str,
    /// 1px border color
    pub border: &'static str,
}

impl MessageStyle {
    /// Inline CSS for the banner element.
    #[must_use]
    pub fn css(&self) -> String {
        format!(
            "padding: 1rem; margin: 1rem 0; border-radius: 6px; font-weight: 500; \
             background: {}; color: {}; border: 1px solid {};",
            self.background, self.text, self.border
        )
    }
}

/// A banner currently in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormMessage {
    /// Identity used by the expiry timer
    pub id: u64,
    /// Text content
    pub text: String,
    /// Variant
    pub kind: MessageKind,
}

impl FormMessage {
    /// `class` attribute value.
    #[must_use]
    pub fn class_name(&self) -> String {
        format!("form-message {}", self.kind.css_class())
    }
}

/// Owns the single form message slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessagePresenter {
    current: Option<FormMessage>,
    next_id: u64,
    timeout_ms: u32,
}

impl MessagePresenter {
    /// Create an empty presenter whose messages live for `timeout_ms`.
    #[must_use]
    pub const fn new(timeout_ms: u32) -> Self {
        Self {
            current: None,
            next_id: 0,
            timeout_ms,
        }
    }

    /// Replace any current message and schedule this one's removal.
    pub fn show(&mut self, text: impl Into<String>, kind: MessageKind) -> Command<SiteMessage> {
        let id = self.next_id;
        self.next_id += 1;
        self.current = Some(FormMessage {
            id,
            text: text.into(),
            kind,
        });
        Command::After {
            delay_ms: self.timeout_ms,
            message: SiteMessage::MessageExpired { id },
        }
    }

    /// Remove message `id` if it is still shown. Returns whether it was.
    pub fn expire(&mut self, id: u64) -> bool {
        if self.current.as_ref().is_some_and(|m| m.id == id) {
            self.current = None;
            true
        } else {
            false
        }
    }

    /// Message in the document, if any.
    #[must_use]
    pub const fn current(&self) -> Option<&FormMessage> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_schedules_expiry() {
        let mut presenter = MessagePresenter::new(5000);
        let cmd = presenter.show("hello", MessageKind::Success);
        assert_eq!(
            cmd,
            Command::After {
                delay_ms: 5000,
                message: SiteMessage::MessageExpired { id: 0 }
            }
        );
        assert_eq!(presenter.current().map(|m| m.text.as_str()), Some("hello"));
    }

    #[test]
    fn test_second_show_replaces_first() {
        let mut presenter = MessagePresenter::new(5000);
        presenter.show("first", MessageKind::Error);
        presenter.show("second", MessageKind::Success);

        let current = presenter.current().unwrap();
        assert_eq!(current.text, "second");
        assert_eq!(current.id, 1);

        // The first message's timer finds nothing to remove.
        assert!(!presenter.expire(0));
        assert!(presenter.current().is_some());
        assert!(presenter.expire(1));
        assert!(presenter.current().is_none());
    }

    #[test]
    fn test_class_name() {
        let mut presenter = MessagePresenter::new(10);
        presenter.show("x", MessageKind::Error);
        assert_eq!(presenter.current().unwrap().class_name(), "form-message error");
    }

    #[test]
    fn test_palette_is_css_hex() {
        let is_hex = |s: &str| {
            s.len() == 7
                && s.starts_with('#')
                && s[1..].chars().all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c))
        };
        for kind in [MessageKind::Success, MessageKind::Error] {
            let style = kind.style();
            for color in [style.background, style.text, style.border] {
                assert!(is_hex(color), "{kind:?}: {color}");
            }
        }
    }

    #[test]
    fn test_css() {
        let css = MessageKind::Success.style().css();
        assert!(css.contains("background: #166534;"));
        assert!(css.contains("color: #BBF7D0;"));
        assert!(css.contains("border: 1px solid #22C55E;"));
        assert!(css.starts_with("padding: 1rem;"));

        let css = MessageKind::Error.style().css();
        assert!(css.contains("background: #7F1D1D;"));
    }
}
