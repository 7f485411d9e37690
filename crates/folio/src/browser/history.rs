//! Address fragment history over the History API.
//!
//! In WASM, this writes `#<section>` with `history.pushState`/`replaceState`,
//! which updates the address bar without navigating or firing `popstate`.
//! On native targets it keeps an in-memory history so the same code can be
//! exercised in tests.

use folio_core::History;
#[cfg(not(target_arch = "wasm32"))]
use folio_core::MemoryHistory;

/// Fragment history backed by the browser.
#[derive(Debug, Default)]
pub struct FragmentHistory {
    #[cfg(not(target_arch = "wasm32"))]
    memory: MemoryHistory,
}

impl FragmentHistory {
    /// Create a history bound to the current window.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// `#<fragment>` as a URL for the History API.
fn fragment_url(fragment: &str) -> String {
    format!("#{fragment}")
}

#[cfg(target_arch = "wasm32")]
impl History for FragmentHistory {
    fn fragment(&self) -> Option<String> {
        let hash = web_sys::window().and_then(|w| w.location().hash().ok())?;
        folio_core::parse_fragment(&hash).map(str::to_string)
    }

    fn push_fragment(&self, fragment: &str) {
        if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
            let url = fragment_url(fragment);
            if let Err(err) = history.push_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&url)) {
                tracing::warn!(?err, "pushState failed");
            }
        }
    }

    fn replace_fragment(&self, fragment: &str) {
        if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
            let url = fragment_url(fragment);
            if let Err(err) =
                history.replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&url))
            {
                tracing::warn!(?err, "replaceState failed");
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl History for FragmentHistory {
    fn fragment(&self) -> Option<String> {
        self.memory.fragment()
    }

    fn push_fragment(&self, fragment: &str) {
        tracing::trace!(url = %fragment_url(fragment), "push");
        self.memory.push_fragment(fragment);
    }

    fn replace_fragment(&self, fragment: &str) {
        tracing::trace!(url = %fragment_url(fragment), "replace");
        self.memory.replace_fragment(fragment);
    }
}
