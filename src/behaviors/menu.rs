use std::cell::Cell;
use std::rc::Rc;

use log::warn;
use web_sys::{Document, Element};

use crate::dom::{self, Disposer, Listener};

pub const TOGGLE_ID: &str = "navToggle";
pub const MENU_ID: &str = "navMenu";
pub const OVERLAY_ID: &str = "overlay";
const ACTIVE_CLASS: &str = "active";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MenuState {
    pub open: bool,
}

impl MenuState {
    pub fn toggled(self) -> Self {
        Self { open: !self.open }
    }

    pub fn closed() -> Self {
        Self { open: false }
    }

    /// Body `overflow` while in this state; scrolling is locked while open.
    pub fn body_overflow(self) -> &'static str {
        if self.open {
            "hidden"
        } else {
            ""
        }
    }
}

#[derive(Clone)]
struct MenuParts {
    toggle: Element,
    menu: Element,
    overlay: Option<Element>,
    document: Document,
    state: Rc<Cell<MenuState>>,
}

impl MenuParts {
    fn apply(&self, next: MenuState) {
        self.state.set(next);
        dom::set_class(&self.toggle, ACTIVE_CLASS, next.open);
        dom::set_class(&self.menu, ACTIVE_CLASS, next.open);
        if let Some(overlay) = &self.overlay {
            dom::set_class(overlay, ACTIVE_CLASS, next.open);
        }
        if let Some(body) = self.document.body() {
            if let Err(e) = body.style().set_property("overflow", next.body_overflow()) {
                warn!("Failed to set body overflow: {:?}", e);
            }
        }
    }
}

pub fn bind(document: &Document) -> Disposer {
    let mut disposer = Disposer::new();
    let (Some(toggle), Some(menu)) = (
        document.get_element_by_id(TOGGLE_ID),
        document.get_element_by_id(MENU_ID),
    ) else {
        return disposer;
    };

    let parts = MenuParts {
        toggle: toggle.clone(),
        menu: menu.clone(),
        overlay: document.get_element_by_id(OVERLAY_ID),
        document: document.clone(),
        state: Rc::new(Cell::new(MenuState::default())),
    };

    {
        let parts = parts.clone();
        disposer.keep(
            "menu toggle",
            Listener::new(&toggle, "click", move |_| parts.apply(parts.state.get().toggled())),
        );
    }

    if let Some(overlay) = parts.overlay.clone() {
        let parts = parts.clone();
        disposer.keep(
            "menu overlay",
            Listener::new(&overlay, "click", move |_| parts.apply(MenuState::closed())),
        );
    }

    for link in dom::select_all_within(&menu, "a") {
        let parts = parts.clone();
        disposer.keep(
            "menu link",
            Listener::new(&link, "click", move |_| parts.apply(MenuState::closed())),
        );
    }

    disposer
}
