#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::new_without_default)]
//! Testing harness for the Folio portfolio site.
//!
//! [`PageHarness`] runs a page through the real [`folio_core::Runtime`] with a
//! [`MemoryPlatform`] standing in for the browser and a virtual clock standing
//! in for `setTimeout`, so timing-dependent behavior is tested without waiting.

pub mod fixture;
mod harness;
mod platform;

pub use fixture::{page_from_yaml, portfolio_page, valid_draft, FixtureError, PORTFOLIO_YAML};
pub use harness::PageHarness;
pub use platform::MemoryPlatform;
