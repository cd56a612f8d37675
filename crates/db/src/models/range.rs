use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A stay or unavailability period as a half-open calendar-date interval
/// `[start, end)`. The end date is the checkout date and is reusable as the
/// next stay's check-in date.
///
/// `NaiveDate` serializes as an ISO `YYYY-MM-DD` string, so stored ranges
/// stay human-readable and order correctly under lexicographic comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// A range must span at least one night. Equal start and end is invalid
    /// input and is rejected by validation before any range math runs.
    pub fn is_ordered(&self) -> bool {
        self.start < self.end
    }

    /// Half-open overlap test: `a.start < b.end && b.start < a.end`.
    /// Back-to-back stays (one ending the day the other starts) do not
    /// overlap.
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Number of nights the range spans. Dates are whole days, so this is
    /// exactly `end - start`.
    pub fn nights(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}
