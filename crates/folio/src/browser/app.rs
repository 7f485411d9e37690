//! WASM application entry point.

use super::dom::DomPlatform;
use super::events::{attach, Listeners};
use super::timer::BrowserScheduler;
use crate::logging;
use folio_core::{Runtime, Scheduler, Site, SiteConfig};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys::window;

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// The portfolio page behavior, mounted on the current document.
#[wasm_bindgen]
pub struct App {
    runtime: Runtime<DomPlatform>,
    listeners: Listeners,
}

#[wasm_bindgen]
impl App {
    /// Mount on the current document, optionally with a YAML configuration.
    #[wasm_bindgen(constructor)]
    pub fn new(config_yaml: Option<String>) -> Result<App, JsValue> {
        console_error_panic_hook::set_once();

        let config = match config_yaml.as_deref() {
            Some(yaml) => SiteConfig::from_yaml(yaml).map_err(to_js)?,
            None => SiteConfig::default(),
        };
        logging::install(config.max_level().map_err(to_js)?);

        let window = window().ok_or("No window")?;
        let document = window.document().ok_or("No document")?;

        let platform = Rc::new(DomPlatform::mount(window.clone(), document)?);
        let scheduler: Rc<dyn Scheduler> = Rc::new(BrowserScheduler::new(window));
        let site = Site::new(platform.page().clone(), config);
        platform.decorate(&site.decorations());

        let runtime = Runtime::new(site, Rc::clone(&platform), scheduler);
        platform.connect(runtime.downgrade());
        let listeners = attach(&runtime)?;
        runtime.start();

        tracing::info!(listeners = listeners.len(), "folio mounted");
        Ok(Self { runtime, listeners })
    }

    /// Current UI state as pretty JSON.
    pub fn state_json(&self) -> Result<String, JsValue> {
        self.runtime.snapshot().to_json().map_err(to_js)
    }

    /// Number of DOM listeners attached.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

/// Initialize WASM module (called automatically).
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Log to browser console.
#[wasm_bindgen]
pub fn log(msg: &str) {
    web_sys::console::log_1(&JsValue::from_str(msg));
}
