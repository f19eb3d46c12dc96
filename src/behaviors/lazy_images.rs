use js_sys::Array;
use log::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlImageElement, IntersectionObserver, IntersectionObserverEntry, Window};

use crate::dom::{self, ObserverGuard};
use crate::error::BehaviorError;

pub const IMAGE_SELECTOR: &str = "img[data-src]";
pub const DATA_SRC_ATTR: &str = "data-src";

/// Source to swap in, if the placeholder carries a usable one.
pub fn pending_source(data_src: Option<String>) -> Option<String> {
    data_src.filter(|src| !src.trim().is_empty())
}

/// Swaps the placeholder for its real source. Returns whether it swapped.
pub fn load(image: &HtmlImageElement) -> bool {
    let Some(src) = pending_source(image.get_attribute(DATA_SRC_ATTR)) else {
        return false;
    };
    image.set_src(&src);
    if let Err(e) = image.remove_attribute(DATA_SRC_ATTR) {
        warn!("Failed to clear data-src: {:?}", e);
    }
    debug!("Loaded lazy image {}", src);
    true
}

/// Swaps each placeholder for its real source when it scrolls into view.
/// Without `IntersectionObserver` the placeholders stay as they are.
pub fn bind(document: &Document, window: &Window) -> Result<Option<ObserverGuard>, BehaviorError> {
    bind_with(document, dom::supports_intersection_observer(window))
}

pub fn bind_with(document: &Document, supported: bool) -> Result<Option<ObserverGuard>, BehaviorError> {
    if !supported {
        debug!("IntersectionObserver unavailable, skipping lazy images");
        return Ok(None);
    }
    let images = dom::select_all(document, IMAGE_SELECTOR);
    if images.is_empty() {
        return Ok(None);
    }

    let callback = Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
        for entry in entries
            .iter()
            .filter_map(|value| value.dyn_into::<IntersectionObserverEntry>().ok())
            .filter(|entry| entry.is_intersecting())
        {
            let target = entry.target();
            if let Some(image) = target.dyn_ref::<HtmlImageElement>() {
                load(image);
            }
            observer.unobserve(&target);
        }
    }) as Box<dyn FnMut(Array, IntersectionObserver)>);

    let observer = IntersectionObserver::new(callback.as_ref().unchecked_ref())?;
    for image in &images {
        observer.observe(image);
    }
    Ok(Some(ObserverGuard::new(observer, callback)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_data_src_is_not_swapped() {
        assert_eq!(pending_source(None), None);
        assert_eq!(pending_source(Some("  ".into())), None);
        assert_eq!(
            pending_source(Some("/img/clinic.webp".into())),
            Some("/img/clinic.webp".to_string())
        );
    }
}
