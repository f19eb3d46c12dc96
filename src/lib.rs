//! Client-side behaviors for the Nurture Sync marketing site.
//!
//! [`init`] wires every behavior against a document and hands back a
//! [`Disposer`] that removes all of it again.

use log::{info, warn};
use web_sys::Document;

pub mod behaviors;
pub mod config;
pub mod dom;
pub mod error;
pub mod reveal;
pub mod validation;

pub use config::SiteConfig;
pub use dom::Disposer;
pub use error::BehaviorError;

use behaviors::{anchors, forms, lazy_images, menu, navbar, page, reveal as reveal_dom, scroll_top, tabs, video};

/// Attaches all behaviors to `document`. Missing elements disable the
/// matching behavior; nothing here fails the page.
pub fn init(document: &Document, config: &SiteConfig) -> Disposer {
    let mut disposer = Disposer::new();
    let Some(window) = document.default_view() else {
        warn!("Document has no window, behaviors disabled");
        return disposer;
    };

    disposer.extend(navbar::bind(document, &window, config.navbar_scroll_threshold));
    disposer.extend(menu::bind(document));

    let reveal_handle = reveal_dom::new_handle(&config.reveal);
    match reveal_dom::bind(document, &window, &reveal_handle, &config.reveal) {
        Ok(Some(guard)) => disposer.push_observer(guard),
        Ok(None) => {}
        Err(e) => warn!("Scroll animations disabled: {}", e),
    }

    disposer.extend(scroll_top::bind(document, &window, config.scroll_top_threshold));
    disposer.extend(tabs::bind(document, &window, reveal_handle));
    disposer.extend(anchors::bind(document));
    disposer.extend(forms::bind(document));
    disposer.extend(video::bind(document));

    match lazy_images::bind(document, &window) {
        Ok(Some(guard)) => disposer.push_observer(guard),
        Ok(None) => {}
        Err(e) => warn!("Lazy images disabled: {}", e),
    }

    disposer.extend(page::bind(document, &window));

    info!(
        "Site behaviors ready ({} listeners, {} observers)",
        disposer.listener_count(),
        disposer.observer_count()
    );
    disposer
}
