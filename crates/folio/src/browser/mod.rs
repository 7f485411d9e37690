//! Browser runtime for the Folio portfolio site.
//!
//! This module is the bridge between `folio-core` and the DOM: it reads the
//! markup, attaches listeners, renders state, and provides real timers and
//! history.

// WASM-only modules
#[cfg(target_arch = "wasm32")]
pub mod app;
#[cfg(target_arch = "wasm32")]
pub mod dom;
#[cfg(target_arch = "wasm32")]
pub mod events;
#[cfg(target_arch = "wasm32")]
pub mod timer;

// Cross-platform modules
pub mod history;

#[cfg(target_arch = "wasm32")]
pub use app::App;
#[cfg(target_arch = "wasm32")]
pub use dom::DomPlatform;
#[cfg(target_arch = "wasm32")]
pub use timer::BrowserScheduler;
pub use history::FragmentHistory;
