//! Browser entry point
//!
//! Reads the config block, then mounts the contact form and the page effects
//! once the DOM is parsed. Each mount is independent; a failure in one is
//! logged and leaves the other running.

mod console;
mod effects;
mod form;

pub(crate) use console::ConsoleWriter;

use crate::clock::from_millis_f64;
use crate::config::{SiteConfig, CONFIG_ELEMENT_ID};
use crate::logging;
use anyhow::anyhow;
use std::time::Duration;
use tracing::{error, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, NodeList, Window};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    logging::init(logging::DEFAULT_DIRECTIVE);

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("window has no document"))?;

    if document.ready_state() == "loading" {
        let target = document.clone();
        let boot = Closure::once_into_js(move || mount(&window, &document));
        target.add_event_listener_with_callback("DOMContentLoaded", boot.unchecked_ref())?;
    } else {
        mount(&window, &document);
    }
    Ok(())
}

fn mount(window: &Window, document: &Document) {
    let config = load_config(document);

    if let Err(err) = form::mount(document, &config.form) {
        error!("contact form not mounted: {err:#}");
    }
    if let Err(err) = effects::mount(window, document, &config.effects) {
        error!("page effects not mounted: {err:#}");
    }
}

fn load_config(document: &Document) -> SiteConfig {
    let Some(raw) = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
    else {
        return SiteConfig::default();
    };
    SiteConfig::from_json(&raw).unwrap_or_else(|err| {
        warn!("{err}, using defaults");
        SiteConfig::default()
    })
}

/// Time since page origin, from `performance.now()`
pub(crate) fn page_clock() -> Duration {
    let millis = web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_default();
    from_millis_f64(millis)
}

pub(crate) fn js_error(value: JsValue) -> anyhow::Error {
    match value.as_string() {
        Some(message) => anyhow!(message),
        None => anyhow!("{value:?}"),
    }
}

/// Attach a handler for the lifetime of the page
pub(crate) fn listen<F>(target: &EventTarget, event: &str, handler: F) -> anyhow::Result<()>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(js_error)?;
    closure.forget();
    Ok(())
}

pub(crate) fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub(crate) fn query_all(document: &Document, selector: &str) -> anyhow::Result<Vec<Element>> {
    document
        .query_selector_all(selector)
        .map(elements)
        .map_err(js_error)
}
