//! Day group bucketing.
//!
//! Every activity window lands in exactly one `(round, calendar day)` bucket.
//! Buckets are stacked by round first, then by day.

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};
use tracing::debug;

use crate::window_merger::ActivityWindow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DayKey {
    pub round: u32,
    pub day: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayGroup {
    pub key: DayKey,
    pub windows: Vec<ActivityWindow>,
}

impl DayGroup {
    pub fn round(&self) -> u32 {
        self.key.round
    }

    pub fn day(&self) -> NaiveDate {
        self.key.day
    }

    /// Local midnight of the group's day.
    pub fn midnight(&self, tz: &FixedOffset) -> Option<DateTime<FixedOffset>> {
        self.key
            .day
            .and_hms_opt(0, 0, 0)?
            .and_local_timezone(*tz)
            .single()
    }

    pub fn fixture_count(&self) -> usize {
        self.windows.iter().map(ActivityWindow::active_count).sum()
    }
}

pub struct DayGrouper {
    tz: FixedOffset,
}

impl DayGrouper {
    pub fn new(tz: FixedOffset) -> Self {
        Self { tz }
    }

    pub fn utc() -> Self {
        Self::new(Utc.fix())
    }

    pub fn day_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        instant.with_timezone(&self.tz).date_naive()
    }

    pub fn group(&self, windows: &[ActivityWindow]) -> Vec<DayGroup> {
        let mut ordered = windows.to_vec();
        ordered.sort_by_key(|x| x.start);

        let mut groups: Vec<DayGroup> = Vec::new();
        let mut index: HashMap<DayKey, usize> = HashMap::new();

        for window in ordered {
            let Some(round) = window.round() else {
                continue;
            };
            let key = DayKey {
                round,
                day: self.day_of(window.start),
            };
            let slot = *index.entry(key).or_insert_with(|| {
                groups.push(DayGroup {
                    key,
                    windows: Vec::new(),
                });
                groups.len() - 1
            });
            groups[slot].windows.push(window);
        }

        groups.sort_by_key(|x| x.key);
        debug!(groups = groups.len(), "grouped activity windows by round and day");
        groups
    }
}
