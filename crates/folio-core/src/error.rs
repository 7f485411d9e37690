//! Error types.

use thiserror::Error;

/// Error loading a [`SiteConfig`](crate::SiteConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// YAML parsing error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
    /// A field parsed but holds an unusable value
    #[error("Invalid value for '{field}': {message}")]
    Invalid {
        /// Field name
        field: &'static str,
        /// Error message
        message: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            message: message.into(),
        }
    }
}
