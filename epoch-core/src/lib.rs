//! Core timeline logic for the Epoch Timeline: event model, era detection,
//! theme synchronization and scroll bookkeeping. No DOM types live here.

use serde::{Deserialize, Serialize};

pub mod detector;
pub mod paging;
pub mod scroll;
pub mod theme;

pub use detector::{EraDetector, EraShift, IntersectionRecord, WatchTarget};
pub use paging::{PageRequest, Paginator, PAGE_LIMIT};
pub use scroll::{puck_position, scroll_progress, PUCK_MAX_PERCENT, SCROLL_TOP_REVEAL_PX};
pub use theme::{ThemeSynchronizer, ThemeTransition};

/// Era label used when an event carries no usable era of its own.
pub const UNKNOWN_ERA: &str = "unknown";

const THEME_CLASS_PREFIX: &str = "era-";

/// One historical entry as rendered on the timeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EventRecord {
    #[serde(default)]
    pub id: String,
    pub title: String,
    pub description: String,
    pub year: i32,
    pub era: String,
    pub image_url: String,
}

/// A coarse decade bucket ("1920s") with exactly one associated visual theme.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Era(String);

impl Era {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    /// Decade bucket for a year: 1985 becomes "1980s".
    pub fn from_year(year: i32) -> Self {
        Self(format!("{}s", year.div_euclid(10) * 10))
    }

    pub fn label(&self) -> &str {
        &self.0
    }

    /// The CSS class keying this era's theme, e.g. "era-1920s".
    pub fn theme_class(&self) -> String {
        format!("{THEME_CLASS_PREFIX}{}", self.0)
    }

    /// Inverse of [`Era::theme_class`]. Anything not of the `era-<label>`
    /// form maps to `None` so a malformed tag degrades to the neutral theme.
    pub fn from_theme_class(class: &str) -> Option<Self> {
        let label = class.strip_prefix(THEME_CLASS_PREFIX)?;
        if label.is_empty() {
            return None;
        }
        Some(Self(label.to_string()))
    }
}

impl std::fmt::Display for Era {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Events sharing one era, in rendered order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EraGroup {
    pub era: Era,
    pub events: Vec<EventRecord>,
}

/// The fully fetched, sorted and grouped timeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimelineSnapshot {
    events: Vec<EventRecord>,
    groups: Vec<EraGroup>,
}

impl TimelineSnapshot {
    /// Build a snapshot from fetched records. Events are sorted ascending by
    /// year (stable) and grouped by era in first-seen order.
    pub fn new(mut events: Vec<EventRecord>) -> Self {
        events.sort_by_key(|event| event.year);
        let groups = group_by_era(&events);
        Self { events, groups }
    }

    /// Flat event list, ascending by year.
    pub fn events(&self) -> &[EventRecord] {
        &self.events
    }

    /// Era groups in first-seen order.
    pub fn groups(&self) -> &[EraGroup] {
        &self.groups
    }

    pub fn event_count(&self) -> usize {
        self.events.len()
    }

    pub fn era_count(&self) -> usize {
        self.groups.len()
    }
}

/// Group events by their era label, preserving first-seen era order. Events
/// with an empty era label bucket under [`UNKNOWN_ERA`].
pub fn group_by_era(events: &[EventRecord]) -> Vec<EraGroup> {
    let mut groups: Vec<EraGroup> = Vec::new();

    for event in events {
        let label = if event.era.is_empty() {
            UNKNOWN_ERA
        } else {
            event.era.as_str()
        };

        match groups.iter_mut().find(|group| group.era.label() == label) {
            Some(group) => group.events.push(event.clone()),
            None => groups.push(EraGroup {
                era: Era::new(label),
                events: vec![event.clone()],
            }),
        }
    }

    groups
}

/// Failures surfaced by the timeline pipeline.
#[derive(Debug, thiserror::Error)]
pub enum TimelineError {
    #[error("missing required configuration value: {0}")]
    MissingConfig(&'static str),
    #[error("backend request failed: {0}")]
    Fetch(String),
    #[error("could not parse event documents: {0}")]
    Parse(String),
}
