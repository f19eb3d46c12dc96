//! Scroll-triggered entrance animations.
//!
//! The scheduler owns the visibility state of every observable element and
//! decides when an element is revealed. It does not touch the DOM itself: a
//! [`RevealHost`] performs the observation and presentation side effects, so
//! the same logic drives the browser binding and the unit tests.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use log::debug;

use crate::config::RevealConfig;

/// Class applied to an element once it is revealed.
pub const VISIBLE_CLASS: &str = "visible";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationKind {
    FadeIn,
    SlideInLeft,
    SlideInRight,
    ScaleIn,
}

impl AnimationKind {
    pub const ALL: [AnimationKind; 4] = [
        AnimationKind::FadeIn,
        AnimationKind::SlideInLeft,
        AnimationKind::SlideInRight,
        AnimationKind::ScaleIn,
    ];

    pub fn class_name(self) -> &'static str {
        match self {
            AnimationKind::FadeIn => "fade-in",
            AnimationKind::SlideInLeft => "slide-in-left",
            AnimationKind::SlideInRight => "slide-in-right",
            AnimationKind::ScaleIn => "scale-in",
        }
    }

    pub fn from_class_name(class: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.class_name() == class)
    }

    /// First animation class found in a whitespace separated class attribute.
    pub fn detect(class_attr: &str) -> Option<Self> {
        class_attr.split_whitespace().find_map(Self::from_class_name)
    }

    /// CSS selector matching every animated element.
    pub fn selector() -> String {
        Self::ALL
            .iter()
            .map(|kind| format!(".{}", kind.class_name()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Pending,
    Revealed,
}

impl Visibility {
    /// Pending -> Revealed. Returns false when already revealed.
    fn reveal(&mut self) -> bool {
        let changed = *self == Visibility::Pending;
        *self = Visibility::Revealed;
        changed
    }

    // Only the replay path may go backwards.
    fn reset_for_replay(&mut self) {
        *self = Visibility::Pending;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObservableElement {
    pub kind: AnimationKind,
    pub visibility: Visibility,
}

/// One intersection-change notification.
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionEvent<K> {
    pub target: K,
    pub is_intersecting: bool,
    pub ratio: f64,
}

/// Side effects the scheduler asks for.
pub trait RevealHost<K> {
    fn observe(&mut self, target: &K);
    fn unobserve(&mut self, target: &K);
    fn present(&mut self, target: &K, visibility: Visibility);
}

/// Outcome of [`RevealScheduler::finish_replay`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayOutcome {
    /// The element was revealed again.
    Replayed,
    /// The element was still waiting for its first intersection; it is now
    /// revealed and no longer observed.
    ReplayedAndUnobserved,
    /// The scheduler has never seen this element.
    Unknown,
}

#[derive(Debug)]
pub struct RevealScheduler<K> {
    threshold: f64,
    elements: HashMap<K, ObservableElement>,
    observed: HashSet<K>,
}

impl<K> RevealScheduler<K>
where
    K: Clone + Eq + Hash + std::fmt::Debug,
{
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            elements: HashMap::new(),
            observed: HashSet::new(),
        }
    }

    pub fn from_config(config: &RevealConfig) -> Self {
        Self::new(config.threshold)
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Registers every element with the host. Keys already known are
    /// skipped. Returns the number of new registrations.
    pub fn start<I, H>(&mut self, elements: I, host: &mut H) -> usize
    where
        I: IntoIterator<Item = (K, AnimationKind)>,
        H: RevealHost<K>,
    {
        let mut registered = 0;
        for (key, kind) in elements {
            if self.elements.contains_key(&key) {
                continue;
            }
            self.elements.insert(
                key.clone(),
                ObservableElement {
                    kind,
                    visibility: Visibility::Pending,
                },
            );
            host.observe(&key);
            self.observed.insert(key);
            registered += 1;
        }
        registered
    }

    /// Consumes one notification batch in delivery order and returns the
    /// elements revealed by it.
    pub fn handle_batch<I, H>(&mut self, batch: I, host: &mut H) -> Vec<K>
    where
        I: IntoIterator<Item = IntersectionEvent<K>>,
        H: RevealHost<K>,
    {
        let mut revealed = Vec::new();
        for event in batch {
            if !event.is_intersecting || event.ratio < self.threshold {
                continue;
            }
            if !self.observed.remove(&event.target) {
                continue;
            }
            if let Some(element) = self.elements.get_mut(&event.target) {
                element.visibility.reveal();
            }
            host.present(&event.target, Visibility::Revealed);
            host.unobserve(&event.target);
            debug!("revealed {:?} at ratio {:.3}", event.target, event.ratio);
            revealed.push(event.target);
        }
        revealed
    }

    /// Resets the given elements to pending ahead of a replay. Elements the
    /// scheduler has not seen are tracked from here on, without being
    /// observed.
    pub fn begin_replay<I, H>(&mut self, elements: I, host: &mut H) -> Vec<K>
    where
        I: IntoIterator<Item = (K, AnimationKind)>,
        H: RevealHost<K>,
    {
        elements
            .into_iter()
            .map(|(key, kind)| {
                self.elements
                    .entry(key.clone())
                    .or_insert(ObservableElement {
                        kind,
                        visibility: Visibility::Revealed,
                    })
                    .visibility
                    .reset_for_replay();
                host.present(&key, Visibility::Pending);
                key
            })
            .collect()
    }

    /// Re-applies the revealed state unconditionally.
    pub fn finish_replay<H>(&mut self, key: &K, host: &mut H) -> ReplayOutcome
    where
        H: RevealHost<K>,
    {
        let Some(element) = self.elements.get_mut(key) else {
            return ReplayOutcome::Unknown;
        };
        element.visibility.reveal();
        host.present(key, Visibility::Revealed);
        if self.observed.remove(key) {
            host.unobserve(key);
            ReplayOutcome::ReplayedAndUnobserved
        } else {
            ReplayOutcome::Replayed
        }
    }

    pub fn visibility(&self, key: &K) -> Option<Visibility> {
        self.elements.get(key).map(|element| element.visibility)
    }

    pub fn element(&self, key: &K) -> Option<&ObservableElement> {
        self.elements.get(key)
    }

    pub fn is_observed(&self, key: &K) -> bool {
        self.observed.contains(key)
    }

    pub fn observed_len(&self) -> usize {
        self.observed.len()
    }

    /// Stops observing everything still pending.
    pub fn stop<H>(&mut self, host: &mut H)
    where
        H: RevealHost<K>,
    {
        for key in self.observed.drain() {
            host.unobserve(&key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Observe(u32),
        Unobserve(u32),
        Present(u32, Visibility),
    }

    #[derive(Default)]
    struct RecordingHost {
        calls: Vec<Call>,
    }

    impl RevealHost<u32> for RecordingHost {
        fn observe(&mut self, target: &u32) {
            self.calls.push(Call::Observe(*target));
        }

        fn unobserve(&mut self, target: &u32) {
            self.calls.push(Call::Unobserve(*target));
        }

        fn present(&mut self, target: &u32, visibility: Visibility) {
            self.calls.push(Call::Present(*target, visibility));
        }
    }

    fn hit(target: u32, ratio: f64) -> IntersectionEvent<u32> {
        IntersectionEvent {
            target,
            is_intersecting: true,
            ratio,
        }
    }

    fn started(keys: &[u32]) -> (RevealScheduler<u32>, RecordingHost) {
        let mut scheduler = RevealScheduler::new(0.1);
        let mut host = RecordingHost::default();
        scheduler.start(keys.iter().map(|k| (*k, AnimationKind::FadeIn)), &mut host);
        host.calls.clear();
        (scheduler, host)
    }

    #[test]
    fn selector_lists_all_kinds() {
        assert_eq!(
            AnimationKind::selector(),
            ".fade-in, .slide-in-left, .slide-in-right, .scale-in"
        );
    }

    #[test]
    fn detects_kind_from_class_attribute() {
        assert_eq!(
            AnimationKind::detect("card slide-in-right delay-2"),
            Some(AnimationKind::SlideInRight)
        );
        assert_eq!(AnimationKind::detect("card visible"), None);
    }

    #[test]
    fn empty_document_registers_nothing() {
        let mut scheduler = RevealScheduler::<u32>::new(0.1);
        let mut host = RecordingHost::default();

        assert_eq!(scheduler.start(std::iter::empty(), &mut host), 0);
        assert!(host.calls.is_empty());
        assert_eq!(scheduler.observed_len(), 0);
    }

    #[test]
    fn duplicate_elements_register_once() {
        let mut scheduler = RevealScheduler::new(0.1);
        let mut host = RecordingHost::default();
        let count = scheduler.start(
            [(1, AnimationKind::FadeIn), (1, AnimationKind::FadeIn), (2, AnimationKind::ScaleIn)],
            &mut host,
        );

        assert_eq!(count, 2);
        assert_eq!(host.calls, vec![Call::Observe(1), Call::Observe(2)]);
    }

    #[test]
    fn fade_in_reveals_and_stops_observing() {
        let (mut scheduler, mut host) = started(&[7]);

        let revealed = scheduler.handle_batch(vec![hit(7, 0.25)], &mut host);

        assert_eq!(revealed, vec![7]);
        assert_eq!(
            host.calls,
            vec![Call::Present(7, Visibility::Revealed), Call::Unobserve(7)]
        );
        assert_eq!(scheduler.visibility(&7), Some(Visibility::Revealed));
        assert!(!scheduler.is_observed(&7));
    }

    #[test]
    fn reveals_at_most_once() {
        let (mut scheduler, mut host) = started(&[1]);
        scheduler.handle_batch(vec![hit(1, 0.5)], &mut host);
        host.calls.clear();

        let leave = IntersectionEvent {
            target: 1,
            is_intersecting: false,
            ratio: 0.0,
        };
        let again = scheduler.handle_batch(vec![leave, hit(1, 1.0), hit(1, 0.8)], &mut host);

        assert!(again.is_empty());
        assert!(host.calls.is_empty());
        assert_eq!(scheduler.visibility(&1), Some(Visibility::Revealed));
    }

    #[test]
    fn below_threshold_stays_pending() {
        let (mut scheduler, mut host) = started(&[3]);

        let revealed = scheduler.handle_batch(vec![hit(3, 0.0), hit(3, 0.05), hit(3, 0.099)], &mut host);

        assert!(revealed.is_empty());
        assert!(host.calls.is_empty());
        assert_eq!(scheduler.visibility(&3), Some(Visibility::Pending));
        assert!(scheduler.is_observed(&3));
    }

    #[test]
    fn threshold_boundary_reveals() {
        let (mut scheduler, mut host) = started(&[3, 4]);

        let revealed = scheduler.handle_batch(vec![hit(3, 0.1), hit(4, 0.0999)], &mut host);

        assert_eq!(revealed, vec![3]);
        assert_eq!(scheduler.visibility(&4), Some(Visibility::Pending));
        assert!(scheduler.is_observed(&4));
    }

    #[test]
    fn default_config_uses_ten_percent() {
        let scheduler = RevealScheduler::<u32>::from_config(&RevealConfig::default());

        assert_eq!(scheduler.threshold(), 0.1);
    }

    #[test]
    fn not_intersecting_is_ignored_even_with_ratio() {
        let (mut scheduler, mut host) = started(&[5]);
        let event = IntersectionEvent {
            target: 5,
            is_intersecting: false,
            ratio: 0.6,
        };

        assert!(scheduler.handle_batch(vec![event], &mut host).is_empty());
        assert_eq!(scheduler.visibility(&5), Some(Visibility::Pending));
    }

    #[test]
    fn batch_is_processed_in_delivery_order() {
        let (mut scheduler, mut host) = started(&[1, 2, 3]);

        let revealed = scheduler.handle_batch(vec![hit(3, 1.0), hit(9, 1.0), hit(1, 1.0)], &mut host);

        assert_eq!(revealed, vec![3, 1]);
        assert_eq!(scheduler.observed_len(), 1);
    }

    #[test]
    fn batch_is_consumed_lazily() {
        let (mut scheduler, mut host) = started(&[1, 2]);
        let raw = [(1u32, true, 0.3), (2u32, false, 0.0)];
        let batch = raw.iter().map(|(target, is_intersecting, ratio)| IntersectionEvent {
            target: *target,
            is_intersecting: *is_intersecting,
            ratio: *ratio,
        });

        assert_eq!(scheduler.handle_batch(batch, &mut host), vec![1]);
    }

    #[test]
    fn replay_resets_then_reveals_without_observing() {
        let (mut scheduler, mut host) = started(&[1, 2]);
        scheduler.handle_batch(vec![hit(1, 1.0), hit(2, 1.0)], &mut host);
        host.calls.clear();

        let keys = scheduler.begin_replay(
            [(1, AnimationKind::SlideInLeft), (2, AnimationKind::SlideInLeft)],
            &mut host,
        );
        assert_eq!(scheduler.visibility(&1), Some(Visibility::Pending));
        assert_eq!(scheduler.visibility(&2), Some(Visibility::Pending));

        for key in &keys {
            assert_eq!(scheduler.finish_replay(key, &mut host), ReplayOutcome::Replayed);
        }

        assert_eq!(
            host.calls,
            vec![
                Call::Present(1, Visibility::Pending),
                Call::Present(2, Visibility::Pending),
                Call::Present(1, Visibility::Revealed),
                Call::Present(2, Visibility::Revealed),
            ]
        );
        assert_eq!(scheduler.visibility(&1), Some(Visibility::Revealed));
        assert_eq!(scheduler.observed_len(), 0);
    }

    #[test]
    fn replay_of_unrevealed_element_deregisters_it() {
        let (mut scheduler, mut host) = started(&[4]);

        scheduler.begin_replay([(4, AnimationKind::ScaleIn)], &mut host);
        let outcome = scheduler.finish_replay(&4, &mut host);

        assert_eq!(outcome, ReplayOutcome::ReplayedAndUnobserved);
        assert!(!scheduler.is_observed(&4));
        assert!(scheduler.handle_batch(vec![hit(4, 1.0)], &mut host).is_empty());
    }

    #[test]
    fn replay_tracks_elements_added_later() {
        let mut scheduler = RevealScheduler::new(0.1);
        let mut host = RecordingHost::default();

        scheduler.begin_replay([(11, AnimationKind::FadeIn)], &mut host);
        assert_eq!(scheduler.visibility(&11), Some(Visibility::Pending));
        assert!(!scheduler.is_observed(&11));
        assert_eq!(scheduler.finish_replay(&11, &mut host), ReplayOutcome::Replayed);
        assert_eq!(
            scheduler.element(&11).map(|e| e.kind),
            Some(AnimationKind::FadeIn)
        );
    }

    #[test]
    fn finish_replay_of_unknown_element_does_nothing() {
        let mut scheduler = RevealScheduler::new(0.1);
        let mut host = RecordingHost::default();

        assert_eq!(scheduler.finish_replay(&1, &mut host), ReplayOutcome::Unknown);
        assert!(host.calls.is_empty());
    }

    #[test]
    fn stop_unobserves_pending_elements() {
        let (mut scheduler, mut host) = started(&[1, 2]);
        scheduler.handle_batch(vec![hit(1, 1.0)], &mut host);
        host.calls.clear();

        scheduler.stop(&mut host);

        assert_eq!(host.calls, vec![Call::Unobserve(2)]);
        assert_eq!(scheduler.observed_len(), 0);
    }
}
