use std::rc::Rc;

use log::debug;
use web_sys::{Document, Element, Window};

use crate::behaviors::reveal::{self, RevealHandle};
use crate::dom::{self, Disposer, Listener};

pub const BUTTON_SELECTOR: &str = ".tab-btn";
pub const PANEL_SELECTOR: &str = ".tab-content";
pub const TAB_ATTR: &str = "data-tab";
const ACTIVE_CLASS: &str = "active";

/// Tab id named by a location hash, if any.
pub fn hash_target(hash: &str) -> Option<&str> {
    let id = hash.strip_prefix('#').unwrap_or(hash);
    (!id.is_empty()).then_some(id)
}

struct TabSet {
    document: Document,
    buttons: Vec<Element>,
    panels: Vec<Element>,
    reveal: RevealHandle,
}

impl TabSet {
    fn activate(&self, button: &Element) {
        for b in &self.buttons {
            dom::remove_class(b, ACTIVE_CLASS);
        }
        for p in &self.panels {
            dom::remove_class(p, ACTIVE_CLASS);
        }
        dom::add_class(button, ACTIVE_CLASS);

        let Some(tab_id) = button.get_attribute(TAB_ATTR) else {
            return;
        };
        if let Some(panel) = self.document.get_element_by_id(&tab_id) {
            dom::add_class(&panel, ACTIVE_CLASS);
            reveal::replay_within(&self.reveal, &panel);
        }
    }

    fn button_for(&self, tab_id: &str) -> Option<&Element> {
        self.buttons
            .iter()
            .find(|b| b.get_attribute(TAB_ATTR).as_deref() == Some(tab_id))
    }
}

pub fn bind(document: &Document, window: &Window, reveal: RevealHandle) -> Disposer {
    let mut disposer = Disposer::new();
    let buttons = dom::select_all(document, BUTTON_SELECTOR);
    let panels = dom::select_all(document, PANEL_SELECTOR);
    if buttons.is_empty() || panels.is_empty() {
        return disposer;
    }

    let tabs = Rc::new(TabSet {
        document: document.clone(),
        buttons,
        panels,
        reveal,
    });

    for button in &tabs.buttons {
        let tabs = tabs.clone();
        let clicked = button.clone();
        disposer.keep(
            "tab button",
            Listener::new(button, "click", move |_| tabs.activate(&clicked)),
        );
    }

    let hash = window.location().hash().unwrap_or_default();
    if let Some(button) = hash_target(&hash).and_then(|id| tabs.button_for(id)) {
        debug!("Opening tab from location hash {}", hash);
        tabs.activate(button);
    }

    disposer
}
