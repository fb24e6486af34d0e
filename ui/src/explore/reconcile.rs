//! Keyed reconciliation of rendered elements.
//!
//! [`diff`] is the pure part: given the previous and next keyed sets it partitions keys into
//! entering, updating, and exiting. [`Stage`] applies a diff to live tweens: entering elements
//! grow out of a baseline, updating elements are re-targeted from wherever they currently are
//! (so a state change that lands mid-animation wins immediately), and exiting elements collapse
//! and are dropped once their tween finishes.

use std::collections::BTreeMap;

use super::transition::{Ease, Interpolate, Timing, Tween};

/// Disjoint key partition between two renders. Keys are in ascending order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diff<K> {
    pub entering: Vec<K>,
    pub updating: Vec<K>,
    pub exiting: Vec<K>,
}

impl<K> Default for Diff<K> {
    fn default() -> Self {
        Self {
            entering: Vec::new(),
            updating: Vec::new(),
            exiting: Vec::new(),
        }
    }
}

impl<K> Diff<K> {
    pub fn is_noop(&self) -> bool {
        self.entering.is_empty() && self.exiting.is_empty()
    }
}

pub fn diff<K, A, B>(previous: &BTreeMap<K, A>, next: &BTreeMap<K, B>) -> Diff<K>
where
    K: Ord + Clone,
{
    let mut out = Diff::default();
    for key in next.keys() {
        if previous.contains_key(key) {
            out.updating.push(key.clone());
        } else {
            out.entering.push(key.clone());
        }
    }
    out.exiting = previous
        .keys()
        .filter(|key| !next.contains_key(*key))
        .cloned()
        .collect();
    out
}

/// A drawable state that knows how to collapse onto its own baseline.
pub trait Visual: Interpolate {
    /// The neutral state an exiting element animates toward.
    fn collapsed(&self) -> Self;
}

/// Where an element should end up, where it starts if it is new, and how long it waits.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement<V> {
    pub target: V,
    pub baseline: V,
    pub delay_ms: f64,
}

/// Durations and easing for each phase. Delays come from the placements, not from here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    pub enter: Timing,
    pub update: Timing,
    pub exit: Timing,
}

impl Motion {
    pub fn new(move_ms: f64, exit_ms: f64) -> Self {
        Self {
            enter: Timing::new(move_ms, Ease::CubicOut),
            update: Timing::new(move_ms, Ease::CubicOut),
            exit: Timing::new(exit_ms, Ease::CubicIn),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Entering,
    Updating,
    Exiting,
}

#[derive(Debug, Clone, PartialEq)]
struct Element<V> {
    tween: Tween<V>,
    phase: Phase,
}

/// One element of a rendered frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite<K, V> {
    pub key: K,
    pub value: V,
    pub phase: Phase,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stage<K, V> {
    elements: BTreeMap<K, Element<V>>,
    motion: Motion,
}

impl<K, V> Stage<K, V>
where
    K: Ord + Clone,
    V: Visual,
{
    pub fn new(motion: Motion) -> Self {
        Self {
            elements: BTreeMap::new(),
            motion,
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn phase_of(&self, key: &K) -> Option<Phase> {
        self.elements.get(key).map(|element| element.phase)
    }

    /// Current visual state of `key`, if it is still on stage.
    pub fn value_of(&self, key: &K, now_ms: f64) -> Option<V> {
        self.elements
            .get(key)
            .map(|element| element.tween.value_at(now_ms))
    }

    /// Drops every element without an exit animation.
    pub fn clear(&mut self) {
        self.elements.clear();
    }

    /// Retargets the stage onto `next` and returns the key partition that was applied.
    pub fn reconcile(&mut self, next: BTreeMap<K, Placement<V>>, now_ms: f64) -> Diff<K> {
        let partition = diff(&self.elements, &next);
        let motion = self.motion;

        for key in &partition.exiting {
            if let Some(element) = self.elements.get_mut(key) {
                if element.phase == Phase::Exiting {
                    continue;
                }
                let current = element.tween.value_at(now_ms);
                let collapsed = current.collapsed();
                element.tween = Tween::new(current, collapsed, now_ms, motion.exit);
                element.phase = Phase::Exiting;
            }
        }

        for (key, placement) in next {
            match self.elements.get_mut(&key) {
                Some(element) => {
                    let current = element.tween.value_at(now_ms);
                    element.tween = Tween::new(
                        current,
                        placement.target,
                        now_ms,
                        motion.update.with_delay(placement.delay_ms),
                    );
                    element.phase = Phase::Updating;
                }
                None => {
                    let tween = Tween::new(
                        placement.baseline,
                        placement.target,
                        now_ms,
                        motion.enter.with_delay(placement.delay_ms),
                    );
                    self.elements.insert(
                        key,
                        Element {
                            tween,
                            phase: Phase::Entering,
                        },
                    );
                }
            }
        }

        partition
    }

    /// Removes exiting elements whose collapse has finished.
    pub fn prune(&mut self, now_ms: f64) {
        self.elements.retain(|_, element| {
            !(element.phase == Phase::Exiting && element.tween.is_finished(now_ms))
        });
    }

    /// Interpolated state of every element still on stage.
    pub fn frame(&self, now_ms: f64) -> Vec<Sprite<K, V>> {
        self.elements
            .iter()
            .map(|(key, element)| Sprite {
                key: key.clone(),
                value: element.tween.value_at(now_ms),
                phase: element.phase,
            })
            .collect()
    }

    /// True once every tween has finished and nothing is left exiting.
    pub fn is_settled(&self, now_ms: f64) -> bool {
        self.elements.values().all(|element| {
            element.phase != Phase::Exiting && element.tween.is_finished(now_ms)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    struct Height(f64);

    impl Interpolate for Height {
        fn interpolate(&self, other: &Self, t: f64) -> Self {
            Height(self.0.interpolate(&other.0, t))
        }
    }

    impl Visual for Height {
        fn collapsed(&self) -> Self {
            Height(0.0)
        }
    }

    fn placements(items: &[(&'static str, f64)]) -> BTreeMap<&'static str, Placement<Height>> {
        items
            .iter()
            .map(|(key, target)| {
                (
                    *key,
                    Placement {
                        target: Height(*target),
                        baseline: Height(0.0),
                        delay_ms: 0.0,
                    },
                )
            })
            .collect()
    }

    fn stage() -> Stage<&'static str, Height> {
        Stage::new(Motion::new(100.0, 50.0))
    }

    #[test]
    fn diff_partitions_are_disjoint() {
        let previous: BTreeMap<&str, ()> = [("a", ()), ("b", ()), ("c", ())].into_iter().collect();
        let next: BTreeMap<&str, ()> = [("b", ()), ("c", ()), ("d", ())].into_iter().collect();
        let d = diff(&previous, &next);
        assert_eq!(d.entering, vec!["d"]);
        assert_eq!(d.updating, vec!["b", "c"]);
        assert_eq!(d.exiting, vec!["a"]);
    }

    #[test]
    fn identical_key_sets_only_update() {
        let keys: BTreeMap<&str, ()> = [("a", ()), ("b", ())].into_iter().collect();
        let d = diff(&keys, &keys);
        assert!(d.is_noop());
        assert_eq!(d.updating.len(), 2);
    }

    #[test]
    fn entering_elements_grow_from_baseline() {
        let mut stage = stage();
        let d = stage.reconcile(placements(&[("a", 10.0)]), 0.0);
        assert_eq!(d.entering, vec!["a"]);
        assert_eq!(stage.value_of(&"a", 0.0), Some(Height(0.0)));
        assert_eq!(stage.value_of(&"a", 100.0), Some(Height(10.0)));
        assert_eq!(stage.phase_of(&"a"), Some(Phase::Entering));
        assert!(stage.is_settled(100.0));
    }

    #[test]
    fn update_retargets_from_the_in_flight_value() {
        let mut stage = stage();
        stage.reconcile(placements(&[("a", 10.0)]), 0.0);
        let mid = stage.value_of(&"a", 50.0).unwrap();
        assert!(mid.0 > 0.0 && mid.0 < 10.0);

        stage.reconcile(placements(&[("a", 40.0)]), 50.0);
        assert_eq!(stage.phase_of(&"a"), Some(Phase::Updating));
        assert_eq!(stage.value_of(&"a", 50.0), Some(mid));
        assert_eq!(stage.value_of(&"a", 150.0), Some(Height(40.0)));
    }

    #[test]
    fn exiting_elements_collapse_then_leave() {
        let mut stage = stage();
        stage.reconcile(placements(&[("a", 10.0), ("b", 20.0)]), 0.0);
        let d = stage.reconcile(placements(&[("b", 25.0)]), 200.0);
        assert_eq!(d.exiting, vec!["a"]);
        assert_eq!(stage.phase_of(&"a"), Some(Phase::Exiting));
        assert_eq!(stage.value_of(&"a", 200.0), Some(Height(10.0)));
        assert!(!stage.is_settled(240.0));

        stage.prune(250.0);
        let frame = stage.frame(250.0);
        assert_eq!(frame.len(), 1);
        assert_eq!(frame[0].key, "b");
        assert_eq!(stage.value_of(&"a", 250.0), None);
    }

    #[test]
    fn exit_is_not_restarted_by_later_renders() {
        let mut stage = stage();
        stage.reconcile(placements(&[("a", 10.0)]), 0.0);
        stage.reconcile(placements(&[]), 100.0);
        stage.reconcile(placements(&[]), 125.0);
        stage.prune(150.0);
        assert!(stage.is_empty());
    }

    #[test]
    fn returning_element_is_caught_mid_exit() {
        let mut stage = stage();
        stage.reconcile(placements(&[("a", 10.0)]), 0.0);
        stage.reconcile(placements(&[]), 100.0);
        let shrinking = stage.value_of(&"a", 125.0).unwrap();
        let d = stage.reconcile(placements(&[("a", 30.0)]), 125.0);
        assert_eq!(d.updating, vec!["a"]);
        assert_eq!(stage.phase_of(&"a"), Some(Phase::Updating));
        assert_eq!(stage.value_of(&"a", 125.0), Some(shrinking));
        assert_eq!(stage.value_of(&"a", 225.0), Some(Height(30.0)));
    }

    #[test]
    fn delays_hold_the_start_value() {
        let mut stage = stage();
        let mut next = placements(&[("a", 10.0)]);
        next.get_mut("a").unwrap().delay_ms = 40.0;
        stage.reconcile(next, 0.0);
        assert_eq!(stage.value_of(&"a", 40.0), Some(Height(0.0)));
        assert!(!stage.is_settled(100.0));
        assert!(stage.is_settled(140.0));
    }

    #[test]
    fn clear_skips_exit_animation() {
        let mut stage = stage();
        stage.reconcile(placements(&[("a", 10.0)]), 0.0);
        stage.clear();
        let d = stage.reconcile(placements(&[("a", 10.0)]), 10.0);
        assert_eq!(d.entering, vec!["a"]);
    }
}
