use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Half-open interval `[start, end)` of local wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeRange {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    pub fn starting_at(start: NaiveDateTime, length: Duration) -> Self {
        Self {
            start,
            end: start + length,
        }
    }

    /// Two ranges overlap iff `s1 < e2 && s2 < e1`. Touching ranges
    /// (`e1 == s2`) and empty ranges never overlap anything.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn contains(&self, other: &TimeRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}
