//! Fixture ingestion from the season `fixtures.csv` export.
//!
//! Only the scheduling columns are read; result and difficulty columns the
//! export also carries are ignored.

use std::io::Read;
use std::path::Path;

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use serde::Deserialize;
use tracing::debug;

use crate::config::ChartConfig;
use crate::constant::ChartError;
use crate::fixture::Fixture;

#[derive(Debug, Deserialize)]
struct CsvFixtureRow {
    id: u64,
    #[serde(default, alias = "round", alias = "matchweek")]
    event: Option<u32>,
    #[serde(default, alias = "start_time")]
    kickoff_time: Option<String>,
    team_h: u32,
    team_a: u32,
    #[serde(default)]
    team_h_score: Option<f64>,
    #[serde(default)]
    team_a_score: Option<f64>,
}

pub struct FixtureLoader {
    match_duration: Duration,
}

impl FixtureLoader {
    pub fn new(match_duration: Duration) -> Self {
        Self { match_duration }
    }

    pub fn from_config(config: &ChartConfig) -> Self {
        Self::new(config.match_duration())
    }

    pub fn load(&self, file_path: impl AsRef<Path>) -> Result<Vec<Fixture>, ChartError> {
        let reader = csv::Reader::from_path(file_path)?;
        self.collect(reader)
    }

    pub fn load_from_reader<R: Read>(&self, reader: R) -> Result<Vec<Fixture>, ChartError> {
        self.collect(csv::Reader::from_reader(reader))
    }

    /// Parses every row, failing on the first malformed one, and returns the
    /// fixtures ordered by `(kickoff, id)`.
    fn collect<R: Read>(&self, mut reader: csv::Reader<R>) -> Result<Vec<Fixture>, ChartError> {
        let mut out = Vec::new();
        for row in reader.deserialize::<CsvFixtureRow>() {
            out.push(self.to_fixture(row?)?);
        }
        out.sort_by_key(|x| (x.start, x.id));
        debug!(fixtures = out.len(), "loaded fixtures");
        Ok(out)
    }

    fn to_fixture(&self, row: CsvFixtureRow) -> Result<Fixture, ChartError> {
        let kickoff = match row.kickoff_time.as_deref().map(str::trim) {
            Some(value) if !value.is_empty() => parse_kickoff(value).map_err(|_| {
                ChartError::MalformedInput(format!(
                    "fixture {}: unparsable kickoff_time {value:?}",
                    row.id
                ))
            })?,
            _ => {
                return Err(ChartError::MalformedInput(format!(
                    "fixture {}: missing kickoff_time",
                    row.id
                )));
            }
        };
        let round = row.event.ok_or_else(|| {
            ChartError::MalformedInput(format!("fixture {}: missing event", row.id))
        })?;

        let mut fixture =
            Fixture::scheduled(row.id, kickoff, self.match_duration, round, row.team_h, row.team_a);
        fixture.team_h_score = score(row.id, row.team_h_score)?;
        fixture.team_a_score = score(row.id, row.team_a_score)?;
        Ok(fixture)
    }
}

fn score(id: u64, value: Option<f64>) -> Result<Option<u32>, ChartError> {
    match value {
        None => Ok(None),
        Some(v) if v.is_finite() && v >= 0.0 => Ok(Some(v.round() as u32)),
        Some(v) => Err(ChartError::MalformedInput(format!(
            "fixture {id}: invalid score {v}"
        ))),
    }
}

pub fn parse_kickoff(value: &str) -> Result<DateTime<Utc>, ChartError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }

    let patterns = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y/%m/%d %H:%M:%S%.f",
        "%Y%m%d%H%M%S%.f",
    ];

    for pattern in patterns {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, pattern) {
            return Ok(DateTime::<Utc>::from_naive_utc_and_offset(dt, Utc));
        }
    }

    Err(ChartError::MalformedInput(format!("invalid kickoff time: {value}")))
}
