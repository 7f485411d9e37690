//! Site configuration.
//!
//! Every field has a default matching the stock portfolio page, so an empty
//! document is a valid configuration:
//!
//! ```yaml
//! default_section: home
//! breakpoint: 768
//! resize_quiet_ms: 250
//! submit_latency_ms: 1500
//! message_timeout_ms: 5000
//! pending_label: "Sending..."
//! log_level: info
//! reveal:
//!   delay_ms: 100
//!   threshold: 0.1
//!   root_margin: "0px 0px -50px 0px"
//!   offset_px: 30
//!   transition: "opacity 0.6s ease, transform 0.6s ease"
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Behavior settings for the site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Section shown when history navigation lands on an empty fragment
    pub default_section: String,
    /// Viewport width above which the mobile menu is force-closed
    pub breakpoint: f64,
    /// Quiet period for resize handling
    pub resize_quiet_ms: u32,
    /// Simulated contact form submission latency
    pub submit_latency_ms: u32,
    /// Lifetime of a form message
    pub message_timeout_ms: u32,
    /// Submit button label while a submission is pending
    pub pending_label: String,
    /// Maximum log level (`trace`, `debug`, `info`, `warn`, `error`)
    pub log_level: String,
    /// Scroll reveal settings
    pub reveal: RevealConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            default_section: "home".to_string(),
            breakpoint: 768.0,
            resize_quiet_ms: 250,
            submit_latency_ms: 1500,
            message_timeout_ms: 5000,
            pending_label: "Sending...".to_string(),
            log_level: "info".to_string(),
            reveal: RevealConfig::default(),
        }
    }
}

/// Scroll reveal settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Delay after load before items are hidden and observed
    pub delay_ms: u32,
    /// Fraction of an item that must be visible to reveal it
    pub threshold: f64,
    /// Observer root margin (CSS margin syntax)
    pub root_margin: String,
    /// Initial downward offset of hidden items
    pub offset_px: f64,
    /// CSS transition applied to hidden items
    pub transition: String,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            delay_ms: 100,
            threshold: 0.1,
            root_margin: "0px 0px -50px 0px".to_string(),
            offset_px: 30.0,
            transition: "opacity 0.6s ease, transform 0.6s ease".to_string(),
        }
    }
}

impl SiteConfig {
    /// Parse and validate a configuration from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        // serde_yaml_ng reads an empty document as unit, not as an empty map.
        let config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml_ng::from_str(yaml)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_section.trim().is_empty() {
            return Err(ConfigError::invalid("default_section", "must not be empty"));
        }
        if !(self.breakpoint.is_finite() && self.breakpoint > 0.0) {
            return Err(ConfigError::invalid("breakpoint", "must be a positive width"));
        }
        if !(0.0..=1.0).contains(&self.reveal.threshold) {
            return Err(ConfigError::invalid("reveal.threshold", "must be between 0 and 1"));
        }
        if !self.reveal.offset_px.is_finite() {
            return Err(ConfigError::invalid("reveal.offset_px", "must be finite"));
        }
        self.max_level()?;
        Ok(())
    }

    /// Parsed [`log_level`](Self::log_level).
    pub fn max_level(&self) -> Result<tracing::Level, ConfigError> {
        tracing::Level::from_str(self.log_level.trim())
            .map_err(|_| ConfigError::invalid("log_level", format!("unknown level '{}'", self.log_level)))
    }
}
