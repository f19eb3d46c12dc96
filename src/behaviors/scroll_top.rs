use web_sys::{Document, ScrollBehavior, ScrollToOptions, Window};

use crate::behaviors::navbar::ScrollClass;
use crate::dom::{self, Disposer, Listener};

pub const BUTTON_ID: &str = "scrollTop";
const VISIBLE_CLASS: &str = "visible";

pub fn bind(document: &Document, window: &Window, threshold: f64) -> Disposer {
    let mut disposer = Disposer::new();
    let Some(button) = document.get_element_by_id(BUTTON_ID) else {
        return disposer;
    };

    let rule = ScrollClass::new(threshold);
    {
        let scrolled = window.clone();
        let button = button.clone();
        disposer.keep(
            "scroll-top visibility",
            Listener::new(window, "scroll", move |_| {
                let scroll_y = scrolled.scroll_y().unwrap_or(0.0);
                dom::set_class(&button, VISIBLE_CLASS, rule.is_active(scroll_y));
            }),
        );
    }

    let window = window.clone();
    disposer.keep(
        "scroll-top click",
        Listener::new(&button, "click", move |_| {
            let options = ScrollToOptions::new();
            options.set_top(0.0);
            options.set_behavior(ScrollBehavior::Smooth);
            window.scroll_to_with_scroll_to_options(&options);
        }),
    );

    disposer
}
