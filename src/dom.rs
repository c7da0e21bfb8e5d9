//! Element lookup plus RAII guards for listeners and observers.
//!
//! Every guard detaches from the page when dropped, so a behavior is torn
//! down simply by dropping the struct that owns its guards.

use crate::error::EnhanceError;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, NodeList,
};

/// Look up a required element and cast it to `T`.
pub fn require<T: JsCast>(document: &Document, selector: &str) -> Result<T, EnhanceError> {
    let element = document
        .query_selector(selector)?
        .ok_or_else(|| EnhanceError::MissingElement(selector.to_string()))?;
    element
        .dyn_into::<T>()
        .map_err(|_| EnhanceError::WrongElementKind {
            selector: selector.to_string(),
            expected: std::any::type_name::<T>(),
        })
}

/// Look up an element that the behavior can live without.
pub fn optional<T: JsCast>(document: &Document, selector: &str) -> Option<T> {
    require(document, selector).ok()
}

/// All HTML elements matching `selector`, in document order.
pub fn all(document: &Document, selector: &str) -> Result<Vec<HtmlElement>, EnhanceError> {
    Ok(html_elements(document.query_selector_all(selector)?))
}

/// All HTML elements under `parent` matching `selector`, in document order.
pub fn all_within(parent: &Element, selector: &str) -> Result<Vec<HtmlElement>, EnhanceError> {
    Ok(html_elements(parent.query_selector_all(selector)?))
}

fn html_elements(list: NodeList) -> Vec<HtmlElement> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

/// The element an event was dispatched to, if it is an element at all.
pub fn event_element(event: &Event) -> Option<Element> {
    event.target().and_then(|t| t.dyn_into::<Element>().ok())
}

/// An event listener that is removed when dropped.
pub struct EventListener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl EventListener {
    pub fn new<F>(target: &EventTarget, event: &'static str, handler: F) -> Result<Self, EnhanceError>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

/// Fires a callback the first time each watched element becomes visible,
/// then stops watching that element.
pub struct VisibilityWatch {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
}

impl VisibilityWatch {
    pub fn once<F>(elements: &[HtmlElement], threshold: f64, mut on_visible: F) -> Result<Self, EnhanceError>
    where
        F: FnMut(&Element) + 'static,
    {
        let callback = Closure::wrap(Box::new(
            move |entries: js_sys::Array, observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    if entry.is_intersecting() {
                        let target = entry.target();
                        observer.unobserve(&target);
                        on_visible(&target);
                    }
                }
            },
        ) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(threshold));
        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;
        for element in elements {
            observer.observe(element);
        }

        Ok(Self {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for VisibilityWatch {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}
