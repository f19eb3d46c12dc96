use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo_timers::callback::Timeout;
use js_sys::Array;
use log::{debug, info, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, Window};

use crate::config::RevealConfig;
use crate::dom::{self, ObserverGuard};
use crate::error::BehaviorError;
use crate::reveal::{AnimationKind, IntersectionEvent, RevealHost, RevealScheduler, Visibility, VISIBLE_CLASS};

/// Index of an element in the binding's element table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RevealId(usize);

struct DomHost {
    elements: Vec<Element>,
    observer: Option<IntersectionObserver>,
}

impl DomHost {
    fn id_of(&self, element: &Element) -> Option<RevealId> {
        self.elements.iter().position(|e| e == element).map(RevealId)
    }
}

impl RevealHost<RevealId> for DomHost {
    fn observe(&mut self, target: &RevealId) {
        if let (Some(observer), Some(element)) = (&self.observer, self.elements.get(target.0)) {
            observer.observe(element);
        }
    }

    fn unobserve(&mut self, target: &RevealId) {
        if let (Some(observer), Some(element)) = (&self.observer, self.elements.get(target.0)) {
            observer.unobserve(element);
        }
    }

    fn present(&mut self, target: &RevealId, visibility: Visibility) {
        if let Some(element) = self.elements.get(target.0) {
            dom::set_class(element, VISIBLE_CLASS, visibility == Visibility::Revealed);
        }
    }
}

pub struct RevealBinding {
    scheduler: RevealScheduler<RevealId>,
    host: DomHost,
    replay_delay_ms: u32,
}

pub type RevealHandle = Rc<RefCell<RevealBinding>>;

impl RevealBinding {
    fn new(config: &RevealConfig) -> Self {
        Self {
            scheduler: RevealScheduler::from_config(config),
            host: DomHost {
                elements: Vec::new(),
                observer: None,
            },
            replay_delay_ms: config.replay_delay_ms,
        }
    }

    /// Looks the element up, adding it to the table when it is new.
    fn track(&mut self, element: &Element) -> Option<(RevealId, AnimationKind)> {
        let kind = AnimationKind::detect(&element.class_name())?;
        let id = match self.host.id_of(element) {
            Some(id) => id,
            None => {
                self.host.elements.push(element.clone());
                RevealId(self.host.elements.len() - 1)
            }
        };
        Some((id, kind))
    }

    /// Id of an element still waiting for its first intersection. Only
    /// observed ids are compared, revealed ones can no longer fire.
    fn observed_id_of(&self, element: &Element) -> Option<RevealId> {
        self.host
            .elements
            .iter()
            .enumerate()
            .find(|(i, e)| self.scheduler.is_observed(&RevealId(*i)) && *e == element)
            .map(|(i, _)| RevealId(i))
    }

    fn handle_entries(&mut self, entries: Array) {
        let batch: Vec<IntersectionEvent<RevealId>> = entries
            .iter()
            .filter_map(|value| value.dyn_into::<IntersectionObserverEntry>().ok())
            .filter_map(|entry| {
                let target = self.observed_id_of(&entry.target())?;
                Some(IntersectionEvent {
                    target,
                    is_intersecting: entry.is_intersecting(),
                    ratio: entry.intersection_ratio(),
                })
            })
            .collect();
        self.scheduler.handle_batch(batch, &mut self.host);
    }

    pub fn visibility_of(&self, element: &Element) -> Option<Visibility> {
        self.host
            .id_of(element)
            .and_then(|id| self.scheduler.visibility(&id))
    }

    pub fn observed_len(&self) -> usize {
        self.scheduler.observed_len()
    }
}

impl Drop for RevealBinding {
    fn drop(&mut self) {
        self.scheduler.stop(&mut self.host);
    }
}

fn observer_options(config: &RevealConfig) -> IntersectionObserverInit {
    let options = IntersectionObserverInit::new();
    options.set_root_margin(&config.root_margin);
    options.set_threshold(&JsValue::from_f64(config.threshold));
    options
}

pub fn new_handle(config: &RevealConfig) -> RevealHandle {
    Rc::new(RefCell::new(RevealBinding::new(config)))
}

/// Starts observing every animated element in the document. Returns `None`
/// when there is nothing to observe or the browser lacks
/// `IntersectionObserver`; the handle still serves tab replays either way.
pub fn bind(
    document: &Document,
    window: &Window,
    handle: &RevealHandle,
    config: &RevealConfig,
) -> Result<Option<ObserverGuard>, BehaviorError> {
    let targets = dom::select_all(document, &AnimationKind::selector());
    if targets.is_empty() {
        debug!("No animated elements found");
        return Ok(None);
    }
    if !dom::supports_intersection_observer(window) {
        warn!("IntersectionObserver unavailable, {} elements will not animate", targets.len());
        return Ok(None);
    }

    let callback = {
        let handle = handle.clone();
        Closure::wrap(Box::new(move |entries: Array, _observer: IntersectionObserver| {
            handle.borrow_mut().handle_entries(entries);
        }) as Box<dyn FnMut(Array, IntersectionObserver)>)
    };
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &observer_options(config))?;

    {
        let mut binding = handle.borrow_mut();
        binding.host.observer = Some(observer.clone());
        let tracked: Vec<_> = targets.iter().filter_map(|el| binding.track(el)).collect();
        let RevealBinding { scheduler, host, .. } = &mut *binding;
        let registered = scheduler.start(tracked, host);
        info!("Observing {} animated elements", registered);
    }

    Ok(Some(ObserverGuard::new(observer, callback)))
}

/// Replays the entrance animation of every animated element inside `panel`.
pub fn replay_within(handle: &RevealHandle, panel: &Element) {
    let (keys, delay) = {
        let mut binding = handle.borrow_mut();
        let tracked: Vec<_> = dom::select_all_within(panel, &AnimationKind::selector())
            .iter()
            .filter_map(|el| binding.track(el))
            .collect();
        let RevealBinding {
            scheduler,
            host,
            replay_delay_ms,
        } = &mut *binding;
        (scheduler.begin_replay(tracked, host), *replay_delay_ms)
    };
    if keys.is_empty() {
        return;
    }

    debug!("Replaying {} elements in #{}", keys.len(), panel.id());
    // Weak so a torn-down binding is not revived by a pending replay.
    let handle: Weak<RefCell<RevealBinding>> = Rc::downgrade(handle);
    Timeout::new(delay, move || {
        let Some(handle) = handle.upgrade() else {
            return;
        };
        let mut binding = handle.borrow_mut();
        let RevealBinding { scheduler, host, .. } = &mut *binding;
        for key in &keys {
            scheduler.finish_replay(key, host);
        }
    })
    .forget();
}
