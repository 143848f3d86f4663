//! Detector-to-synchronizer flow over a small rendered timeline, applied
//! against a simulated class list.

use epoch_core::{
    Era, EraDetector, EventRecord, IntersectionRecord, ThemeSynchronizer, TimelineSnapshot,
    WatchTarget,
};

fn record(id: &str, year: i32, era: &str) -> EventRecord {
    EventRecord {
        id: id.to_string(),
        title: format!("event {id}"),
        description: String::new(),
        year,
        era: era.to_string(),
        image_url: String::new(),
    }
}

/// Stand-in for `document.body.classList`, recording every mutation.
#[derive(Default)]
struct ClassList {
    classes: Vec<String>,
    log: Vec<String>,
}

impl ClassList {
    fn apply(&mut self, sync: &mut ThemeSynchronizer, next: Option<Era>) {
        let Some(transition) = sync.transition(next) else {
            return;
        };
        if let Some(remove) = transition.remove {
            self.classes.retain(|class| class != &remove);
            self.log.push(format!("remove {remove}"));
        }
        if let Some(add) = transition.add {
            self.classes.push(add.clone());
            self.log.push(format!("add {add}"));
        }
        assert!(
            self.classes.len() <= 1,
            "two theme classes applied at once: {:?}",
            self.classes
        );
    }
}

fn enter(target: usize) -> IntersectionRecord {
    IntersectionRecord {
        target,
        is_intersecting: true,
    }
}

#[test]
fn scrolling_through_three_anchors_applies_two_themes_in_order() {
    // Three per-event anchors: two 1820s entries, one 1920s entry.
    let mut detector = EraDetector::new();
    detector.set_targets(vec![
        WatchTarget::era(Era::new("1820s")),
        WatchTarget::era(Era::new("1820s")),
        WatchTarget::era(Era::new("1920s")),
    ]);

    let mut sync = ThemeSynchronizer::new();
    let mut body = ClassList::default();

    // The second anchor becomes active, then the third.
    for batch in [[enter(1)], [enter(2)]] {
        for shift in detector.observe_batch(&batch) {
            body.apply(&mut sync, shift.to);
        }
    }

    assert_eq!(
        body.log,
        vec![
            "add era-1820s".to_string(),
            "remove era-1820s".to_string(),
            "add era-1920s".to_string(),
        ]
    );
    assert_eq!(body.classes, vec!["era-1920s".to_string()]);
}

#[test]
fn returning_to_the_hero_leaves_the_body_unthemed() {
    let mut detector = EraDetector::new();
    detector.set_targets(vec![
        WatchTarget::neutral(),
        WatchTarget::era(Era::new("1820s")),
    ]);

    let mut sync = ThemeSynchronizer::new();
    let mut body = ClassList::default();

    for batch in [[enter(1)], [enter(0)]] {
        for shift in detector.observe_batch(&batch) {
            body.apply(&mut sync, shift.to);
        }
    }

    assert!(body.classes.is_empty());
    assert_eq!(
        body.log,
        vec!["add era-1820s".to_string(), "remove era-1820s".to_string()]
    );
}

#[test]
fn unmount_teardown_strips_the_last_theme() {
    let mut detector = EraDetector::new();
    detector.set_targets(vec![WatchTarget::era(Era::new("1980s"))]);

    let mut sync = ThemeSynchronizer::new();
    let mut body = ClassList::default();

    for shift in detector.observe_batch(&[enter(0)]) {
        body.apply(&mut sync, shift.to);
    }
    assert_eq!(body.classes, vec!["era-1980s".to_string()]);

    if let Some(class) = sync.teardown() {
        body.classes.retain(|applied| applied != &class);
    }
    assert!(body.classes.is_empty());
}

#[test]
fn snapshot_groups_feed_the_detector_target_set() {
    let snapshot = TimelineSnapshot::new(vec![
        record("c", 1923, "1920s"),
        record("a", 1821, "1820s"),
        record("b", 1825, "1820s"),
    ]);

    // Hero target first, then one target per era group, mirroring the
    // rendered anchor order.
    let mut targets = vec![WatchTarget::neutral()];
    targets.extend(
        snapshot
            .groups()
            .iter()
            .map(|group| WatchTarget::era(group.era.clone())),
    );

    let mut detector = EraDetector::new();
    detector.set_targets(targets);

    let shifts = detector.observe_batch(&[enter(2)]);
    assert_eq!(shifts.len(), 1);
    assert_eq!(shifts[0].to, Some(Era::new("1920s")));
}
