//! Timetable combination entries.

use chrono::NaiveDate;

/// A resolved timetable combination: the guid the API issued for it and
/// the dates that bound how long we may keep using it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombinationEntry {
    /// Opaque identifier required by the connections endpoint
    pub guid: String,
    /// Last day the timetable is valid (`ttValidTo`)
    pub valid_to: NaiveDate,
    /// Day the guid was fetched
    pub day_refreshed: NaiveDate,
}

impl CombinationEntry {
    /// Create a new entry.
    pub fn new(guid: impl Into<String>, valid_to: NaiveDate, day_refreshed: NaiveDate) -> Self {
        Self {
            guid: guid.into(),
            valid_to,
            day_refreshed,
        }
    }

    /// An entry is only trusted on the day it was refreshed, and only while
    /// the timetable is still valid.
    pub fn is_fresh(&self, today: NaiveDate) -> bool {
        self.day_refreshed == today && today <= self.valid_to
    }
}
