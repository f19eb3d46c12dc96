use log::info;
use web_sys::{Document, Window};

use crate::dom::{self, Disposer, Listener};

pub const LOADED_CLASS: &str = "loaded";

/// Marks the body `loaded` once the window has finished loading.
pub fn bind(document: &Document, window: &Window) -> Disposer {
    let mut disposer = Disposer::new();
    let Some(body) = document.body() else {
        return disposer;
    };

    // The wasm bundle often starts after `load` has already fired.
    if document.ready_state() == "complete" {
        dom::add_class(&body, LOADED_CLASS);
        return disposer;
    }

    disposer.keep(
        "window load",
        Listener::new(window, "load", move |_| dom::add_class(&body, LOADED_CLASS)),
    );
    disposer
}

pub fn welcome() {
    info!("Nurture Sync");
    info!("Revolutionizing Healthcare with Digital Innovation");
}
