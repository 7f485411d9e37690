//! Contact form validation and simulated submission.

use crate::email::is_valid_email;
use crate::message::{MessageKind, MessagePresenter};
use crate::site::SiteMessage;
use crate::state::Command;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Text shown once the simulated send completes.
pub const SUCCESS_TEXT: &str = "Message sent successfully! I'll get back to you soon.";

/// Field values captured at submit time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormDraft {
    /// `name` field
    pub name: String,
    /// `email` field
    pub email: String,
    /// `message` field
    pub message: String,
}

impl FormDraft {
    /// Create a draft.
    pub fn new(name: impl Into<String>, email: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    /// Validate in order; the first failure wins.
    ///
    /// Fields are checked for emptiness as submitted, without trimming.
    pub fn validate(&self) -> Result<(), FormError> {
        if self.name.is_empty() || self.email.is_empty() || self.message.is_empty() {
            return Err(FormError::MissingField);
        }
        if !is_valid_email(&self.email) {
            return Err(FormError::InvalidEmail);
        }
        Ok(())
    }
}

/// Validation failure. The `Display` text is what the user sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormError {
    /// A field is empty
    #[error("Please fill in all fields.")]
    MissingField,
    /// The email does not look like `local@domain.tld`
    #[error("Please enter a valid email address.")]
    InvalidEmail,
}

/// Submit button state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitControl {
    /// Button text
    pub label: String,
    /// `disabled` attribute
    pub disabled: bool,
}

/// Contact form controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactForm {
    submit: SubmitControl,
    pending_label: String,
    latency_ms: u32,
}

impl ContactForm {
    /// Create a controller for a form whose submit button reads `label`.
    pub fn new(label: impl Into<String>, pending_label: impl Into<String>, latency_ms: u32) -> Self {
        Self {
            submit: SubmitControl {
                label: label.into(),
                disabled: false,
            },
            pending_label: pending_label.into(),
            latency_ms,
        }
    }

    /// Submit button state.
    #[must_use]
    pub const fn submit_control(&self) -> &SubmitControl {
        &self.submit
    }

    /// Whether a simulated send is in flight.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.submit.disabled
    }

    /// Handle a submit event.
    ///
    /// Validation errors are presented immediately. A valid draft disables
    /// the button, shows the pending label, and schedules completion. Only the
    /// disabled button guards against a second submission.
    pub fn submit(&mut self, draft: FormDraft, presenter: &mut MessagePresenter) -> Command<SiteMessage> {
        if let Err(err) = draft.validate() {
            tracing::debug!(error = %err, "contact form rejected");
            return presenter.show(err.to_string(), MessageKind::Error);
        }

        let restore_label = std::mem::replace(&mut self.submit.label, self.pending_label.clone());
        self.submit.disabled = true;
        Command::After {
            delay_ms: self.latency_ms,
            message: SiteMessage::SubmissionSettled { draft, restore_label },
        }
    }

    /// Finish a simulated send.
    pub fn settle(
        &mut self,
        draft: &FormDraft,
        restore_label: String,
        presenter: &mut MessagePresenter,
    ) -> Command<SiteMessage> {
        self.submit.label = restore_label;
        self.submit.disabled = false;

        // A real backend call belongs here; the draft only reaches the log.
        tracing::info!(
            name = %draft.name,
            email = %draft.email,
            message = %draft.message,
            "form submitted"
        );

        Command::batch([Command::ResetForm, presenter.show(SUCCESS_TEXT, MessageKind::Success)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> FormDraft {
        FormDraft::new("Ada", "ada@example.com", "Hello")
    }

    #[test]
    fn test_validate_ok() {
        assert_eq!(valid().validate(), Ok(()));
    }

    #[test]
    fn test_validate_missing_field() {
        for draft in [
            FormDraft::new("", "ada@example.com", "Hello"),
            FormDraft::new("Ada", "", "Hello"),
            FormDraft::new("Ada", "ada@example.com", ""),
        ] {
            assert_eq!(draft.validate(), Err(FormError::MissingField));
        }
    }

    #[test]
    fn test_missing_field_wins_over_invalid_email() {
        let draft = FormDraft::new("", "not-an-email", "Hello");
        assert_eq!(draft.validate(), Err(FormError::MissingField));
    }

    #[test]
    fn test_validate_invalid_email() {
        let draft = FormDraft::new("Ada", "ada@example", "Hello");
        assert_eq!(draft.validate(), Err(FormError::InvalidEmail));
    }

    #[test]
    fn test_whitespace_only_fields_count_as_filled() {
        let draft = FormDraft::new(" ", "ada@example.com", " ");
        assert_eq!(draft.validate(), Ok(()));
    }

    #[test]
    fn test_error_text() {
        assert_eq!(FormError::MissingField.to_string(), "Please fill in all fields.");
        assert_eq!(
            FormError::InvalidEmail.to_string(),
            "Please enter a valid email address."
        );
    }

    #[test]
    fn test_invalid_submit_shows_error_without_pending() {
        let mut form = ContactForm::new("Send Message", "Sending...", 1500);
        let mut presenter = MessagePresenter::new(5000);

        let cmd = form.submit(FormDraft::new("Ada", "ada@example.com", ""), &mut presenter);

        assert!(!form.is_pending());
        assert_eq!(form.submit_control().label, "Send Message");
        let shown = presenter.current().unwrap();
        assert_eq!(shown.kind, MessageKind::Error);
        assert_eq!(shown.text, "Please fill in all fields.");
        assert!(matches!(
            cmd,
            Command::After {
                message: SiteMessage::MessageExpired { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_valid_submit_goes_pending() {
        let mut form = ContactForm::new("Send Message", "Sending...", 1500);
        let mut presenter = MessagePresenter::new(5000);

        let cmd = form.submit(valid(), &mut presenter);

        assert!(form.is_pending());
        assert_eq!(form.submit_control().label, "Sending...");
        assert!(presenter.current().is_none());
        assert_eq!(
            cmd,
            Command::After {
                delay_ms: 1500,
                message: SiteMessage::SubmissionSettled {
                    draft: valid(),
                    restore_label: "Send Message".to_string(),
                },
            }
        );
    }

    #[test]
    fn test_settle_restores_and_resets() {
        let mut form = ContactForm::new("Send Message", "Sending...", 1500);
        let mut presenter = MessagePresenter::new(5000);
        form.submit(valid(), &mut presenter);

        let effects = form
            .settle(&valid(), "Send Message".to_string(), &mut presenter)
            .into_effects();

        assert!(!form.is_pending());
        assert_eq!(form.submit_control().label, "Send Message");
        assert_eq!(effects[0], Command::ResetForm);
        let shown = presenter.current().unwrap();
        assert_eq!(shown.kind, MessageKind::Success);
        assert_eq!(shown.text, SUCCESS_TEXT);
    }

    #[test]
    fn test_forced_second_submit_captures_pending_label() {
        let mut form = ContactForm::new("Send Message", "Sending...", 1500);
        let mut presenter = MessagePresenter::new(5000);
        form.submit(valid(), &mut presenter);

        let cmd = form.submit(valid(), &mut presenter);
        assert!(matches!(
            cmd,
            Command::After {
                message: SiteMessage::SubmissionSettled { ref restore_label, .. },
                ..
            } if restore_label == "Sending..."
        ));
    }
}
