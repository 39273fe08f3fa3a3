//! Creation-time window for listings.

use serde::{Deserialize, Serialize};
use shared_types::Timestamp;

/// Inclusive `[start, end]` bounds on submission creation time.
///
/// A missing bound leaves that side unconstrained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: Option<Timestamp>,
    pub end: Option<Timestamp>,
}

impl TimeWindow {
    pub fn new(start: Option<Timestamp>, end: Option<Timestamp>) -> Self {
        Self { start, end }
    }

    /// Window with no bounds.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// True when no timestamp can satisfy both bounds.
    pub fn is_empty(&self) -> bool {
        matches!((self.start, self.end), (Some(start), Some(end)) if start > end)
    }

    pub fn contains(&self, created: Timestamp) -> bool {
        self.start.map_or(true, |start| created >= start)
            && self.end.map_or(true, |end| created <= end)
    }
}
