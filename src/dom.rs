//! Browser glue shared by the component adapters.
//!
//! These helpers are all `#[cfg(feature = "hydrate")]` because they depend on
//! `web_sys`. They keep the component modules free of repeated lookup,
//! conversion and error-logging boilerplate.

use gloo_events::EventListener;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, MediaQueryList, Window};

use crate::effect::{Effect, Node};
use crate::error::PageError;
use crate::load_timer::{LoadHook, ReadyState};

pub fn window() -> Result<Window, PageError> {
    web_sys::window().ok_or_else(|| PageError::MissingElement { selector: "window".to_owned() })
}

pub fn document(window: &Window) -> Result<Document, PageError> {
    window
        .document()
        .ok_or_else(|| PageError::MissingElement { selector: "document".to_owned() })
}

/// `<html>` element.
pub fn root(document: &Document) -> Result<Element, PageError> {
    document
        .document_element()
        .ok_or_else(|| PageError::MissingElement { selector: "html".to_owned() })
}

/// `<body>` element.
pub fn body(document: &Document) -> Result<Element, PageError> {
    document
        .body()
        .map(Element::from)
        .ok_or_else(|| PageError::MissingElement { selector: "body".to_owned() })
}

/// Every element under `document` matching `selector`, in document order.
pub fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>, PageError> {
    let list = document.query_selector_all(selector)?;
    Ok((0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_ref::<Element>().cloned())
        .collect())
}

/// First element matching `selector`, or `MissingElement`.
pub fn query_one(document: &Document, selector: &str) -> Result<Element, PageError> {
    document
        .query_selector(selector)?
        .ok_or_else(|| PageError::MissingElement { selector: selector.to_owned() })
}

/// First descendant of `parent` matching `selector`, if any.
pub fn query_within(parent: &Element, selector: &str) -> Result<Option<Element>, PageError> {
    parent.query_selector(selector).map_err(PageError::from)
}

pub fn apply_effect(element: &Element, effect: &Effect) -> Result<(), PageError> {
    match effect {
        Effect::AddClass { class, .. } => element.class_list().add_1(class)?,
        Effect::RemoveClass { class, .. } => element.class_list().remove_1(class)?,
        Effect::SetAttribute { name, value, .. } => element.set_attribute(name, value)?,
        Effect::RemoveAttribute { name, .. } => element.remove_attribute(name)?,
    }
    Ok(())
}

/// Apply `effects` in order. Unresolvable nodes and failed calls are logged
/// and skipped so one bad element never blocks the rest of the batch.
pub fn apply_all<R>(effects: &[Effect], resolve: R)
where
    R: Fn(Node) -> Option<Element>,
{
    for effect in effects {
        let Some(element) = resolve(effect.node()) else {
            log::debug!("no element for {:?}", effect.node());
            continue;
        };
        if let Err(err) = apply_effect(&element, effect) {
            log::warn!("effect {effect:?} failed: {err}");
        }
    }
}

/// `window.matchMedia(query)`, or `None` when unsupported or invalid.
pub fn media_query(window: &Window, query: &str) -> Option<MediaQueryList> {
    match window.match_media(query) {
        Ok(list) => list,
        Err(err) => {
            log::debug!("matchMedia({query}) failed: {err:?}");
            None
        }
    }
}

pub fn media_matches(window: &Window, query: &str) -> bool {
    media_query(window, query).is_some_and(|list| list.matches())
}

/// Whether `target` exposes property `name`. Used for capability checks.
pub fn has_property(target: &JsValue, name: &str) -> bool {
    js_sys::Reflect::has(target, &JsValue::from_str(name)).unwrap_or(false)
}

/// Computed value of a custom property on `element`, trimmed.
pub fn css_variable(window: &Window, element: &Element, name: &str) -> Option<String> {
    let style = match window.get_computed_style(element) {
        Ok(style) => style?,
        Err(err) => {
            log::debug!("getComputedStyle failed: {err:?}");
            return None;
        }
    };
    match style.get_property_value(name) {
        Ok(value) => Some(value.trim().to_owned()),
        Err(err) => {
            log::debug!("reading {name} failed: {err:?}");
            None
        }
    }
}

pub fn ready_state(document: &Document) -> ReadyState {
    match document.ready_state().as_str() {
        "complete" => ReadyState::Complete,
        "interactive" => ReadyState::Interactive,
        _ => ReadyState::Loading,
    }
}

/// Run `hook` once the window has loaded: immediately when `load` already
/// fired, otherwise from a one-shot `load` listener.
pub fn after_load<F: FnOnce() + 'static>(window: &Window, document: &Document, hook: F) {
    match ready_state(document).load_hook() {
        LoadHook::RunNow => hook(),
        LoadHook::AwaitLoad => EventListener::once(window, "load", move |_| hook()).forget(),
    }
}
