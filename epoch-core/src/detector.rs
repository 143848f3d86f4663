//! Era detection: which watch target is sitting on the viewport's trigger
//! line, and when does that change.
//!
//! The DOM observer in `epoch-ui` is a thin driver over [`EraDetector`]; the
//! detector itself never touches the DOM, so the transition rules are
//! testable natively.

use crate::Era;

/// One DOM-anchored region the detector watches. Era-group anchors carry
/// their era label; the hero/intro anchor is neutral and maps to "no era".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchTarget {
    era: Option<Era>,
}

impl WatchTarget {
    pub fn era(era: Era) -> Self {
        Self { era: Some(era) }
    }

    pub fn neutral() -> Self {
        Self { era: None }
    }

    pub fn era_label(&self) -> Option<&Era> {
        self.era.as_ref()
    }
}

/// One entry of an observer callback batch, in delivery order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntersectionRecord {
    /// Index into the current target set.
    pub target: usize,
    pub is_intersecting: bool,
}

/// A reported era transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EraShift {
    pub from: Option<Era>,
    pub to: Option<Era>,
}

/// Tracks the latest intersecting watch target and reports era transitions.
///
/// Transition rules:
/// - only intersecting records count; leave notifications are ignored;
/// - records referencing an index outside the current target set are
///   dropped, so a stale batch delivered across a re-subscription cannot
///   reactivate a torn-down target;
/// - within one batch the last intersecting record wins;
/// - a shift is reported only when the incoming label differs from the last
///   reported one, so a target that stays on the trigger line stays silent.
#[derive(Debug, Default)]
pub struct EraDetector {
    targets: Vec<WatchTarget>,
    current: Option<Era>,
}

impl EraDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the watch set. Indices handed out for the previous set are
    /// invalidated; the last reported era is kept so re-rendering the same
    /// layout does not re-emit it.
    pub fn set_targets(&mut self, targets: Vec<WatchTarget>) {
        self.targets = targets;
    }

    pub fn targets(&self) -> &[WatchTarget] {
        &self.targets
    }

    /// Process one callback batch in delivery order. Returns every
    /// transition in occurrence order; callers may coalesce strictly
    /// superseded ones but must apply the final one.
    pub fn observe_batch(&mut self, records: &[IntersectionRecord]) -> Vec<EraShift> {
        let mut shifts = Vec::new();

        for record in records {
            if !record.is_intersecting {
                continue;
            }
            let Some(target) = self.targets.get(record.target) else {
                continue;
            };

            let next = target.era.clone();
            if next != self.current {
                shifts.push(EraShift {
                    from: self.current.clone(),
                    to: next.clone(),
                });
                self.current = next;
            }
        }

        shifts
    }

    /// Last reported era label, `None` while the hero region is active or
    /// nothing has intersected yet.
    pub fn current_era(&self) -> Option<&Era> {
        self.current.as_ref()
    }
}
