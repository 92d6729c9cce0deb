//! Activity window merging.
//!
//! Sweeps start-ordered fixtures once and folds every fixture whose kickoff
//! falls inside the open window into it, extending the window end to the
//! latest fixture end seen so far.

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::constant::ChartError;
use crate::fixture::Fixture;

#[derive(Debug, Clone, PartialEq)]
pub struct ActivityWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Contributing fixtures in discovery order.
    pub fixtures: Vec<Fixture>,
}

impl ActivityWindow {
    fn open(fixture: Fixture) -> Self {
        Self {
            start: fixture.start,
            end: fixture.end,
            fixtures: vec![fixture],
        }
    }

    fn absorb(mut self, fixture: Fixture) -> Self {
        self.end = self.end.max(fixture.end);
        self.fixtures.push(fixture);
        self
    }

    pub fn active_count(&self) -> usize {
        self.fixtures.len()
    }

    /// Round of the first contributing fixture.
    pub fn round(&self) -> Option<u32> {
        self.fixtures.first().map(|x| x.round)
    }

    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

pub struct WindowMerger;

impl WindowMerger {
    pub fn merge(fixtures: &[Fixture]) -> Result<Vec<ActivityWindow>, ChartError> {
        if let Some(bad) = fixtures.iter().find(|x| x.end < x.start) {
            return Err(ChartError::MalformedInput(format!(
                "fixture {} ends before it starts ({} < {})",
                bad.id, bad.end, bad.start
            )));
        }

        let ordered = start_ordered(fixtures);
        let mut windows = Vec::new();
        let mut open: Option<ActivityWindow> = None;

        for fixture in ordered {
            open = Some(match open.take() {
                None => ActivityWindow::open(fixture),
                Some(current) if fixture.start > current.end => {
                    windows.push(current);
                    ActivityWindow::open(fixture)
                }
                Some(current) => current.absorb(fixture),
            });
        }
        windows.extend(open);

        debug!(
            fixtures = fixtures.len(),
            windows = windows.len(),
            "merged fixtures into activity windows"
        );
        Ok(windows)
    }

    /// Contributing fixtures of every window, flattened back into start order.
    pub fn flatten(windows: &[ActivityWindow]) -> Vec<Fixture> {
        start_ordered(
            &windows
                .iter()
                .flat_map(|x| x.fixtures.iter().cloned())
                .collect::<Vec<_>>(),
        )
    }
}

fn start_ordered(fixtures: &[Fixture]) -> Vec<Fixture> {
    let mut ordered = fixtures.to_vec();
    let in_order = ordered
        .windows(2)
        .all(|pair| (pair[0].start, pair[0].id) <= (pair[1].start, pair[1].id));
    if !in_order {
        warn!(fixtures = ordered.len(), "fixtures not start-ordered, sorting");
        ordered.sort_by_key(|x| (x.start, x.id));
    }
    ordered
}
