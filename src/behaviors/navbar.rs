use log::debug;
use web_sys::{Document, Window};

use crate::dom::{self, Disposer, Listener};

pub const NAVBAR_ID: &str = "navbar";
pub const SCROLLED_CLASS: &str = "scrolled";

/// Class toggled on once the page is scrolled past a threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollClass {
    pub threshold: f64,
}

impl ScrollClass {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn is_active(&self, scroll_y: f64) -> bool {
        scroll_y > self.threshold
    }
}

pub fn bind(document: &Document, window: &Window, threshold: f64) -> Disposer {
    let mut disposer = Disposer::new();
    let Some(navbar) = document.get_element_by_id(NAVBAR_ID) else {
        return disposer;
    };

    // Inner pages ship the navbar already scrolled.
    if navbar.class_list().contains(SCROLLED_CLASS) {
        debug!("Navbar pinned to scrolled style");
        return disposer;
    }

    let rule = ScrollClass::new(threshold);
    let update = {
        let window = window.clone();
        move || {
            let scroll_y = window.scroll_y().unwrap_or(0.0);
            dom::set_class(&navbar, SCROLLED_CLASS, rule.is_active(scroll_y));
        }
    };
    update();

    disposer.keep("navbar scroll", Listener::new(window, "scroll", move |_| update()));
    disposer
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_exclusive() {
        let rule = ScrollClass::new(50.0);

        assert!(!rule.is_active(0.0));
        assert!(!rule.is_active(50.0));
        assert!(rule.is_active(50.5));
        assert!(rule.is_active(1200.0));
    }
}
