//! Timeline layout planning.
//!
//! Two passes over the ordered day groups:
//! - sizing: total canvas height, needed before anything is drawn;
//! - coordinates: row offsets plus per-window bar spans.
//!
//! Both passes insert round separators through `starts_new_round`, so the
//! declared height and the last drawn row always agree.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, Utc};
use serde::Serialize;
use tracing::debug;

use crate::config::ChartConfig;
use crate::constant::{ChartError, Const};
use crate::day_grouper::DayGroup;
use crate::window_merger::ActivityWindow;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutPlan {
    pub width: i32,
    pub height: i32,
    pub top_margin: i32,
    pub left_margin: i32,
    pub row_height: i32,
    pub hour_marks: Vec<HourMark>,
    /// X positions of the block gridlines between hour marks.
    pub block_marks: Vec<i32>,
    pub rows: Vec<RowLayout>,
}

impl LayoutPlan {
    pub fn window_count(&self) -> usize {
        self.rows.iter().map(|x| x.windows.len()).sum()
    }

    pub fn bar_count(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|x| x.windows.iter())
            .filter(|x| x.bar.is_some())
            .count()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourMark {
    pub hour: i32,
    pub x: i32,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowLayout {
    pub round: u32,
    pub day: NaiveDate,
    pub label: String,
    pub y: i32,
    /// Row is preceded by a round separator gap.
    pub separated: bool,
    pub windows: Vec<WindowLayout>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowLayout {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub active: usize,
    pub intensity: u8,
    /// `None` when the window lies wholly outside the visible hours.
    pub bar: Option<BarSpan>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BarSpan {
    pub start_x: i32,
    pub end_x: i32,
}

impl BarSpan {
    pub fn width(&self) -> i32 {
        self.end_x - self.start_x
    }
}

pub struct LayoutPlanner {
    config: ChartConfig,
    tz: FixedOffset,
}

impl LayoutPlanner {
    pub fn new(config: ChartConfig) -> Result<Self, ChartError> {
        config.validate()?;
        let tz = config.timezone()?;
        Ok(Self { config, tz })
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Pass 1: canvas height for the ordered groups.
    pub fn measure_height(&self, groups: &[DayGroup]) -> Result<i32, ChartError> {
        let mut height = self.config.top_margin;
        let mut previous_round = None;

        for group in groups {
            if starts_new_round(previous_round, group.round()) {
                height = grow(height, self.config.round_separator)?;
            }
            previous_round = Some(group.round());
            height = grow(height, self.config.row_height)?;
        }

        grow(height, self.config.top_margin)
    }

    /// Pass 2: row offsets and bar spans, on a canvas sized by pass 1.
    pub fn plan(&self, groups: &[DayGroup]) -> Result<LayoutPlan, ChartError> {
        let height = self.measure_height(groups)?;
        let mut rows = Vec::with_capacity(groups.len());
        let mut cursor = self.config.top_margin;
        let mut previous_round = None;

        for group in groups {
            let separated = starts_new_round(previous_round, group.round());
            if separated {
                cursor = grow(cursor, self.config.round_separator)?;
            }
            previous_round = Some(group.round());

            let midnight = group.midnight(&self.tz).ok_or_else(|| {
                ChartError::MalformedInput(format!("no local midnight for {}", group.day()))
            })?;
            let windows = group
                .windows
                .iter()
                .map(|window| self.window_layout(window, midnight))
                .collect();

            rows.push(RowLayout {
                round: group.round(),
                day: group.day(),
                label: day_label(group.day(), group.round()),
                y: cursor,
                separated,
                windows,
            });
            cursor = grow(cursor, self.config.row_height)?;
        }

        debug_assert_eq!(cursor + self.config.top_margin, height);
        debug!(rows = rows.len(), height, "planned timeline layout");

        Ok(LayoutPlan {
            width: self.config.canvas_width,
            height,
            top_margin: self.config.top_margin,
            left_margin: self.config.left_margin,
            row_height: self.config.row_height,
            hour_marks: self.hour_marks(),
            block_marks: self.block_marks(),
            rows,
        })
    }

    fn window_layout(&self, window: &ActivityWindow, midnight: DateTime<FixedOffset>) -> WindowLayout {
        WindowLayout {
            start: window.start,
            end: window.end,
            active: window.active_count(),
            intensity: intensity(window.active_count()),
            bar: self.bar_span(window.start, window.end, midnight),
        }
    }

    /// Maps `[start, end]` onto the row of the day starting at `midnight`.
    ///
    /// The interval is clipped to the visible hours; the start is floored and
    /// the end ceiled to block boundaries so the bar never under-covers.
    pub fn bar_span(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        midnight: DateTime<FixedOffset>,
    ) -> Option<BarSpan> {
        let midnight = midnight.with_timezone(&Utc);
        let visible_start = midnight + Duration::hours(self.config.start_hour as i64);
        let visible_end = midnight + Duration::hours(self.config.end_hour as i64);

        let clipped_start = start.max(visible_start);
        let clipped_end = end.min(visible_end);
        if clipped_end <= clipped_start {
            return None;
        }

        let block_ms = self.config.block_minutes as i64 * 60_000;
        let start_ms = (clipped_start - visible_start).num_milliseconds();
        let end_ms = (clipped_end - visible_start).num_milliseconds();
        let start_units = start_ms / block_ms;
        let end_units = (end_ms + block_ms - 1) / block_ms;

        // validate() keeps left_margin + visible_width within MAX_PIXELS
        let left = self.config.left_margin as i64;
        let right = left + self.config.visible_width();
        let block_width = self.config.block_width as i64;
        Some(BarSpan {
            start_x: (left + start_units * block_width) as i32,
            end_x: (left + end_units * block_width).min(right) as i32,
        })
    }

    fn hour_marks(&self) -> Vec<HourMark> {
        (self.config.start_hour..=self.config.end_hour)
            .map(|hour| HourMark {
                hour,
                x: self.hour_x(hour),
                label: hour_label(hour),
            })
            .collect()
    }

    fn block_marks(&self) -> Vec<i32> {
        (self.config.start_hour..self.config.end_hour)
            .flat_map(|hour| {
                let hour_x = self.hour_x(hour);
                (1..self.config.blocks_per_hour()).map(move |block| hour_x + block * self.config.block_width)
            })
            .collect()
    }

    fn hour_x(&self, hour: i32) -> i32 {
        self.config.left_margin + (hour - self.config.start_hour) * self.config.hour_width()
    }
}

/// A round separator goes before every group whose round differs from the
/// previous group's, never before the first group.
fn starts_new_round(previous: Option<u32>, current: u32) -> bool {
    matches!(previous, Some(round) if round != current)
}

fn grow(offset: i32, by: i32) -> Result<i32, ChartError> {
    offset.checked_add(by).ok_or_else(|| {
        ChartError::Configuration(format!("canvas height overflows past y={offset}"))
    })
}

/// Bar colour intensity in `[50, 255]`, rising with the number of fixtures.
pub fn intensity(active: usize) -> u8 {
    let value = Const::MIN_INTENSITY as usize + active.saturating_mul(Const::INTENSITY_STEP as usize);
    value.min(255) as u8
}

/// `SAT AUG 17, MW 1`
pub fn day_label(day: NaiveDate, round: u32) -> String {
    format!("{}, MW {}", day.format("%a %b %-d").to_string().to_uppercase(), round)
}

/// 12-hour clock label, `6AM`, `12PM`, `6PM`.
pub fn hour_label(hour: i32) -> String {
    let hour = hour.rem_euclid(24);
    let display = match hour % 12 {
        0 => 12,
        h => h,
    };
    let period = if hour >= 12 { "PM" } else { "AM" };
    format!("{display}{period}")
}
