//! Folio: portfolio site behavior compiled to WebAssembly.
//!
//! # Browser Usage (WASM)
//!
//! ```javascript
//! import init, { App } from './folio.js';
//!
//! async function main() {
//!     await init();
//!     const app = new App(`
//! log_level: debug
//! resize_quiet_ms: 150
//! `);
//!     console.log(app.state_json());
//! }
//! ```

#![allow(
    clippy::missing_const_for_fn,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::new_without_default,
    unreachable_pub
)]

pub use folio_core::*;

pub mod browser;
pub mod logging;

#[cfg(target_arch = "wasm32")]
pub use browser::{App, BrowserScheduler, DomPlatform};

pub use browser::FragmentHistory;
