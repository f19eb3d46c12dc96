use web_sys::{Document, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};

use crate::dom::{self, Disposer, Listener};

pub const ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";

/// Id an in-page link points at. A bare `#` points nowhere.
pub fn anchor_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

pub fn bind(document: &Document) -> Disposer {
    let mut disposer = Disposer::new();

    for anchor in dom::select_all(document, ANCHOR_SELECTOR) {
        let document = document.clone();
        let link = anchor.clone();
        disposer.keep(
            "anchor",
            Listener::new(&anchor, "click", move |event| {
                let href = link.get_attribute("href").unwrap_or_default();
                let Some(target) = anchor_target(&href).and_then(|id| document.get_element_by_id(id)) else {
                    return;
                };
                event.prevent_default();
                let options = ScrollIntoViewOptions::new();
                options.set_behavior(ScrollBehavior::Smooth);
                options.set_block(ScrollLogicalPosition::Start);
                target.scroll_into_view_with_scroll_into_view_options(&options);
            }),
        );
    }

    disposer
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_hash_is_ignored() {
        assert_eq!(anchor_target("#"), None);
    }

    #[test]
    fn fragment_is_target_id() {
        assert_eq!(anchor_target("#services"), Some("services"));
        assert_eq!(anchor_target("/about#team"), None);
    }
}
