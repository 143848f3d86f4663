//! Theme synchronization: at most one era theme class on the document root,
//! always matching the latest detector output.

use crate::Era;

/// One pair of class mutations. `remove` must be applied before `add` so two
/// theme classes never coexist, and so the outgoing theme can fade out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeTransition {
    pub remove: Option<String>,
    pub add: Option<String>,
}

/// The single writer of the document-level theme state. Owns the previously
/// applied era explicitly instead of threading it through the view layer.
#[derive(Debug, Default)]
pub struct ThemeSynchronizer {
    current: Option<Era>,
}

impl ThemeSynchronizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Diff the incoming label against the applied one. Returns `None` when
    /// nothing changed (idempotent under repeated identical input); a `None`
    /// label removes the active class and adds nothing.
    pub fn transition(&mut self, next: Option<Era>) -> Option<ThemeTransition> {
        if next == self.current {
            return None;
        }

        let transition = ThemeTransition {
            remove: self.current.as_ref().map(Era::theme_class),
            add: next.as_ref().map(Era::theme_class),
        };
        self.current = next;
        Some(transition)
    }

    /// Class to strip on unmount, if any. Resets to the neutral state.
    pub fn teardown(&mut self) -> Option<String> {
        self.current.take().map(|era| era.theme_class())
    }

    pub fn active(&self) -> Option<&Era> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_era_adds_without_removing() {
        let mut sync = ThemeSynchronizer::new();

        let transition = sync.transition(Some(Era::new("1820s"))).unwrap();
        assert_eq!(transition.remove, None);
        assert_eq!(transition.add, Some("era-1820s".to_string()));
    }

    #[test]
    fn era_change_removes_old_before_adding_new() {
        let mut sync = ThemeSynchronizer::new();
        sync.transition(Some(Era::new("1820s")));

        let transition = sync.transition(Some(Era::new("1920s"))).unwrap();
        assert_eq!(transition.remove, Some("era-1820s".to_string()));
        assert_eq!(transition.add, Some("era-1920s".to_string()));
    }

    #[test]
    fn identical_input_is_a_no_op() {
        let mut sync = ThemeSynchronizer::new();

        assert!(sync.transition(Some(Era::new("1920s"))).is_some());
        assert!(sync.transition(Some(Era::new("1920s"))).is_none());
        assert!(sync.transition(Some(Era::new("1920s"))).is_none());
    }

    #[test]
    fn null_label_removes_and_adds_nothing() {
        let mut sync = ThemeSynchronizer::new();
        sync.transition(Some(Era::new("1980s")));

        let transition = sync.transition(None).unwrap();
        assert_eq!(transition.remove, Some("era-1980s".to_string()));
        assert_eq!(transition.add, None);
        assert!(sync.transition(None).is_none());
    }

    #[test]
    fn at_most_one_class_applied_over_any_sequence() {
        let mut sync = ThemeSynchronizer::new();
        let mut applied: Vec<String> = Vec::new();

        let inputs = [
            Some(Era::new("1820s")),
            Some(Era::new("1820s")),
            Some(Era::new("1920s")),
            None,
            Some(Era::new("1980s")),
        ];

        for input in inputs {
            if let Some(transition) = sync.transition(input) {
                if let Some(remove) = transition.remove {
                    applied.retain(|class| class != &remove);
                }
                if let Some(add) = transition.add {
                    applied.push(add);
                }
            }
            assert!(applied.len() <= 1, "theme classes overlapped: {applied:?}");
        }

        assert_eq!(applied, vec!["era-1980s".to_string()]);
    }

    #[test]
    fn teardown_strips_the_active_class() {
        let mut sync = ThemeSynchronizer::new();
        sync.transition(Some(Era::new("1940s")));

        assert_eq!(sync.teardown(), Some("era-1940s".to_string()));
        assert_eq!(sync.teardown(), None);
        assert_eq!(sync.active(), None);
    }
}
