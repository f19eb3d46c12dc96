//! Small helpers over web-sys shared by the behaviors.

use js_sys::Array;
use log::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, Event, EventTarget, IntersectionObserver, NodeList};

use crate::error::BehaviorError;

/// An event listener removed from its target when dropped.
pub struct Listener {
    target: EventTarget,
    event_type: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub fn new<F>(target: &EventTarget, event_type: &'static str, handler: F) -> Result<Self, BehaviorError>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(event_type, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event_type,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event_type, self.callback.as_ref().unchecked_ref());
    }
}

pub type ObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

/// An intersection observer disconnected when dropped. Keeps its callback
/// alive for as long as the observer can fire.
pub struct ObserverGuard {
    observer: IntersectionObserver,
    _callback: ObserverCallback,
}

impl ObserverGuard {
    pub fn new(observer: IntersectionObserver, callback: ObserverCallback) -> Self {
        Self {
            observer,
            _callback: callback,
        }
    }
}

impl Drop for ObserverGuard {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Everything registered by one [`crate::init`] call. Dropping it tears the
/// behaviors down.
#[derive(Default)]
pub struct Disposer {
    listeners: Vec<Listener>,
    observers: Vec<ObserverGuard>,
}

impl Disposer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_observer(&mut self, observer: ObserverGuard) {
        self.observers.push(observer);
    }

    pub fn extend(&mut self, other: Disposer) {
        self.listeners.extend(other.listeners);
        self.observers.extend(other.observers);
    }

    /// Keeps the listener when registration succeeded, logs otherwise.
    pub fn keep(&mut self, what: &str, listener: Result<Listener, BehaviorError>) {
        match listener {
            Ok(listener) => self.listeners.push(listener),
            Err(e) => warn!("Failed to attach {} listener: {}", what, e),
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }
}

pub fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// `querySelectorAll` on the document, empty on error.
pub fn select_all(document: &web_sys::Document, selector: &str) -> Vec<Element> {
    document
        .query_selector_all(selector)
        .map(elements)
        .unwrap_or_default()
}

pub fn select_all_within(root: &Element, selector: &str) -> Vec<Element> {
    root.query_selector_all(selector)
        .map(elements)
        .unwrap_or_default()
}

pub fn add_class(element: &Element, class: &str) {
    if let Err(e) = element.class_list().add_1(class) {
        warn!("Failed to add class {}: {:?}", class, e);
    }
}

pub fn remove_class(element: &Element, class: &str) {
    if let Err(e) = element.class_list().remove_1(class) {
        warn!("Failed to remove class {}: {:?}", class, e);
    }
}

pub fn set_class(element: &Element, class: &str, on: bool) {
    if on {
        add_class(element, class);
    } else {
        remove_class(element, class);
    }
}

/// Whether the window exposes `IntersectionObserver`.
pub fn supports_intersection_observer(window: &web_sys::Window) -> bool {
    js_sys::Reflect::has(window, &JsValue::from_str("IntersectionObserver")).unwrap_or(false)
}

/// Element with `id`, or a new empty hidden one appended to the body.
pub fn mount_point(document: &web_sys::Document, id: &str) -> Option<Element> {
    if let Some(existing) = document.get_element_by_id(id) {
        return Some(existing);
    }
    let body = document.body()?;
    let root = document.create_element("div").ok()?;
    root.set_id(id);
    if let Err(e) = root.set_attribute("hidden", "") {
        warn!("Failed to hide mount point: {:?}", e);
    }
    body.append_child(&root).ok()?;
    Some(root)
}
