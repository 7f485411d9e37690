//! Browser event handling - converts web events to folio [`DomEvent`]s and
//! attaches one listener per registration.

use super::dom::{DomPlatform, PORTFOLIO_LINK};
use folio_core::{parse_fragment, DomEvent, EventKind, FormDraft, Key, Runtime, Target};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Element, Event, EventTarget, HtmlFormElement, HtmlInputElement, HtmlTextAreaElement,
    KeyboardEvent,
};

/// Convert a click: was it inside an overlay link?
pub fn click_to_folio(event: &Event) -> DomEvent {
    let on_overlay_link = event
        .target()
        .and_then(|t| t.dyn_into::<Element>().ok())
        .and_then(|el| el.closest(PORTFOLIO_LINK).ok().flatten())
        .is_some();
    DomEvent::Click { on_overlay_link }
}

/// Convert a key press.
pub fn keyboard_event_to_folio(event: &KeyboardEvent) -> DomEvent {
    DomEvent::KeyPress {
        key: Key::from_dom_key(&event.key()),
    }
}

/// Read a named control of `form`, `input` or `textarea`.
fn field_value(form: &HtmlFormElement, name: &str) -> String {
    let Ok(Some(element)) = form.query_selector(&format!("[name=\"{name}\"]")) else {
        return String::new();
    };
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        return input.value();
    }
    if let Some(area) = element.dyn_ref::<HtmlTextAreaElement>() {
        return area.value();
    }
    String::new()
}

/// Capture the contact form fields.
pub fn form_to_draft(form: &HtmlFormElement) -> FormDraft {
    FormDraft::new(
        field_value(form, "name"),
        field_value(form, "email"),
        field_value(form, "message"),
    )
}

/// Convert a raw event of `kind` to a [`DomEvent`].
///
/// Returns `None` when the event lacks what the kind needs.
pub fn to_folio(kind: EventKind, event: &Event) -> Option<DomEvent> {
    match kind {
        EventKind::Click => Some(click_to_folio(event)),
        EventKind::KeyPress => event.dyn_ref::<KeyboardEvent>().map(keyboard_event_to_folio),
        EventKind::Submit => {
            let form = event.current_target()?.dyn_into::<HtmlFormElement>().ok()?;
            Some(DomEvent::Submit {
                draft: form_to_draft(&form),
            })
        }
        EventKind::Resize => {
            let width = web_sys::window()?.inner_width().ok()?.as_f64()?;
            Some(DomEvent::Resize { width })
        }
        EventKind::PopState => {
            let hash = web_sys::window()?.location().hash().ok()?;
            Some(DomEvent::PopState {
                fragment: parse_fragment(&hash).map(str::to_string),
            })
        }
        EventKind::Intersect => None,
    }
}

struct Listener {
    element: EventTarget,
    name: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

/// Attached listeners. Dropping this removes them from their elements
/// before their closures are freed.
pub struct Listeners {
    attached: Vec<Listener>,
}

impl Listeners {
    /// Number of attached listeners.
    pub fn len(&self) -> usize {
        self.attached.len()
    }

    /// Whether nothing was attached.
    pub fn is_empty(&self) -> bool {
        self.attached.is_empty()
    }
}

impl Drop for Listeners {
    fn drop(&mut self) {
        for listener in &self.attached {
            let callback = listener.closure.as_ref().unchecked_ref();
            if let Err(err) = listener
                .element
                .remove_event_listener_with_callback(listener.name, callback)
            {
                tracing::warn!(?err, name = listener.name, "listener not removed");
            }
        }
        tracing::debug!(listeners = self.attached.len(), "listeners detached");
    }
}

fn event_target(platform: &DomPlatform, target: Target) -> Option<EventTarget> {
    let element: Element = match target {
        Target::Hamburger => platform.hamburger()?.clone(),
        Target::NavLink(i) => platform.link(i)?.clone(),
        Target::PortfolioItem(i) => platform.item(i)?.clone().into(),
        Target::ContactForm => platform.form()?.clone().into(),
        Target::Window => return web_sys::window().map(Into::into),
    };
    Some(element.into())
}

/// Attach a DOM listener for every registration of the runtime's table.
///
/// Registrations whose element is missing from the markup are skipped.
pub fn attach(runtime: &Runtime<DomPlatform>) -> Result<Listeners, JsValue> {
    let mut attached = Vec::new();

    for registration in runtime.events().registrations() {
        let (target, kind) = (registration.target, registration.kind);
        let Some(name) = kind.dom_name() else {
            continue;
        };
        let Some(element) = event_target(runtime.platform(), target) else {
            tracing::debug!(?target, "no element for listener");
            continue;
        };

        let runtime = runtime.clone();
        let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let Some(dom_event) = to_folio(kind, &event) else {
                return;
            };
            if runtime.trigger(target, &dom_event).prevent_default {
                event.prevent_default();
            }
        });
        element.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
        attached.push(Listener {
            element,
            name,
            closure,
        });
    }

    tracing::debug!(listeners = attached.len(), "listeners attached");
    Ok(Listeners { attached })
}
