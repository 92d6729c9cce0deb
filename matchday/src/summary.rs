//! Operator summary of merged windows, in merge order.

use chrono::SecondsFormat;
use polars::df;
use polars::prelude::DataFrame;

use crate::constant::ChartError;
use crate::window_merger::ActivityWindow;

pub fn summary_lines(windows: &[ActivityWindow]) -> Vec<String> {
    let mut lines = Vec::with_capacity(windows.len() + 1);
    lines.push(format!("found {} distinct match windows", windows.len()));
    for (i, window) in windows.iter().enumerate() {
        lines.push(format!(
            "window {}: start={}, end={}, active={}",
            i + 1,
            window.start.to_rfc3339_opts(SecondsFormat::Millis, true),
            window.end.to_rfc3339_opts(SecondsFormat::Millis, true),
            window.active_count()
        ));
    }
    lines
}

pub fn window_summary(windows: &[ActivityWindow]) -> String {
    summary_lines(windows).join("\n")
}

pub fn windows_dataframe(windows: &[ActivityWindow]) -> Result<DataFrame, ChartError> {
    let window: Vec<u32> = (1..=windows.len() as u32).collect();
    let start_ms: Vec<i64> = windows.iter().map(|x| x.start.timestamp_millis()).collect();
    let end_ms: Vec<i64> = windows.iter().map(|x| x.end.timestamp_millis()).collect();
    let active: Vec<u32> = windows.iter().map(|x| x.active_count() as u32).collect();
    let round: Vec<u32> = windows.iter().map(|x| x.round().unwrap_or_default()).collect();

    Ok(df!(
        "window" => window,
        "start_ms" => start_ms,
        "end_ms" => end_ms,
        "active" => active,
        "round" => round
    )?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::Fixture;
    use crate::window_merger::WindowMerger;
    use chrono::{Duration, TimeZone, Utc};

    fn sample_windows() -> Vec<ActivityWindow> {
        let fixtures = [(1, 12, 0), (2, 12, 30), (3, 15, 0)]
            .into_iter()
            .map(|(id, hour, minute)| {
                let kickoff = Utc.with_ymd_and_hms(2024, 8, 17, hour, minute, 0).unwrap();
                Fixture::scheduled(id, kickoff, Duration::minutes(120), 1, 1, 2)
            })
            .collect::<Vec<_>>();
        WindowMerger::merge(&fixtures).unwrap()
    }

    #[test]
    fn summary_lists_windows_in_merge_order() {
        let lines = summary_lines(&sample_windows());
        assert_eq!(
            lines,
            vec![
                "found 2 distinct match windows".to_string(),
                "window 1: start=2024-08-17T12:00:00.000Z, end=2024-08-17T14:30:00.000Z, active=2"
                    .to_string(),
                "window 2: start=2024-08-17T15:00:00.000Z, end=2024-08-17T17:00:00.000Z, active=1"
                    .to_string(),
            ]
        );
    }

    #[test]
    fn empty_summary_has_only_count_line() {
        assert_eq!(window_summary(&[]), "found 0 distinct match windows");
    }

    #[test]
    fn dataframe_has_one_row_per_window() {
        let df = windows_dataframe(&sample_windows()).unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), 5);
    }
}
