//! Chart configuration.
//!
//! Defaults follow the season chart: 06:00 to 18:00 visible, 15 minute
//! blocks 20px wide, 30px rows. A YAML or JSON file may override any subset
//! of fields.

use std::fs;
use std::path::Path;

use chrono::{Duration, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::constant::{ChartError, Const};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    pub start_hour: i32,
    pub end_hour: i32,
    pub block_minutes: i32,
    pub block_width: i32,
    pub row_height: i32,
    pub round_separator: i32,
    pub top_margin: i32,
    pub left_margin: i32,
    pub canvas_width: i32,
    /// Applied by `FixtureLoader` when it derives each fixture's end; fixtures
    /// handed straight to the assembler keep the end they were built with.
    pub match_duration_minutes: i64,
    /// Chart timezone, minutes east of UTC. Day boundaries and hour columns use it.
    pub utc_offset_minutes: i32,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChartConfigPatch {
    pub start_hour: Option<i32>,
    pub end_hour: Option<i32>,
    pub block_minutes: Option<i32>,
    pub block_width: Option<i32>,
    pub row_height: Option<i32>,
    pub round_separator: Option<i32>,
    pub top_margin: Option<i32>,
    pub left_margin: Option<i32>,
    pub canvas_width: Option<i32>,
    pub match_duration_minutes: Option<i64>,
    pub utc_offset_minutes: Option<i32>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            start_hour: Const::START_HOUR as i32,
            end_hour: Const::END_HOUR as i32,
            block_minutes: Const::BLOCK_MINUTES as i32,
            block_width: Const::BLOCK_WIDTH as i32,
            row_height: Const::ROW_HEIGHT as i32,
            round_separator: Const::ROUND_SEPARATOR as i32,
            top_margin: Const::TOP_MARGIN as i32,
            left_margin: Const::LEFT_MARGIN as i32,
            canvas_width: Const::CANVAS_WIDTH as i32,
            match_duration_minutes: Const::MATCH_DURATION_MINUTES,
            utc_offset_minutes: 0,
        }
    }
}

impl ChartConfig {
    pub fn apply_patch(mut self, patch: ChartConfigPatch) -> Self {
        if let Some(v) = patch.start_hour {
            self.start_hour = v;
        }
        if let Some(v) = patch.end_hour {
            self.end_hour = v;
        }
        if let Some(v) = patch.block_minutes {
            self.block_minutes = v;
        }
        if let Some(v) = patch.block_width {
            self.block_width = v;
        }
        if let Some(v) = patch.row_height {
            self.row_height = v;
        }
        if let Some(v) = patch.round_separator {
            self.round_separator = v;
        }
        if let Some(v) = patch.top_margin {
            self.top_margin = v;
        }
        if let Some(v) = patch.left_margin {
            self.left_margin = v;
        }
        if let Some(v) = patch.canvas_width {
            self.canvas_width = v;
        }
        if let Some(v) = patch.match_duration_minutes {
            self.match_duration_minutes = v;
        }
        if let Some(v) = patch.utc_offset_minutes {
            self.utc_offset_minutes = v;
        }
        self
    }

    /// Loads overrides from a `.yaml`/`.yml`/`.json` file on top of the defaults
    /// and validates the result.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ChartError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;

        let patch: ChartConfigPatch = match path.extension().and_then(|x| x.to_str()) {
            Some("json") => serde_json::from_str(&text)?,
            Some("yaml") | Some("yml") => serde_yaml::from_str(&text)?,
            _ => {
                return Err(ChartError::Configuration(format!(
                    "unsupported config file format: {}",
                    path.display()
                )));
            }
        };

        let config = Self::default().apply_patch(patch);
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ChartError> {
        if self.start_hour < 0 || self.end_hour > 24 {
            return Err(ChartError::Configuration(format!(
                "visible hours {}..{} outside 0..24",
                self.start_hour, self.end_hour
            )));
        }
        if self.start_hour > self.end_hour {
            return Err(ChartError::Configuration(format!(
                "start_hour {} is after end_hour {}",
                self.start_hour, self.end_hour
            )));
        }
        if self.block_minutes <= 0 || 60 % self.block_minutes != 0 {
            return Err(ChartError::Configuration(format!(
                "block_minutes must be a positive divisor of 60, got {}",
                self.block_minutes
            )));
        }

        let dimensions = [
            ("block_width", self.block_width),
            ("row_height", self.row_height),
            ("canvas_width", self.canvas_width),
        ];
        for (name, value) in dimensions {
            if value <= 0 {
                return Err(ChartError::Configuration(format!(
                    "{name} must be positive, got {value}"
                )));
            }
            if value as i64 > Const::MAX_PIXELS {
                return Err(ChartError::Configuration(format!(
                    "{name} {value} exceeds {} pixels",
                    Const::MAX_PIXELS
                )));
            }
        }

        let margins = [
            ("round_separator", self.round_separator),
            ("top_margin", self.top_margin),
            ("left_margin", self.left_margin),
        ];
        for (name, value) in margins {
            if value < 0 {
                return Err(ChartError::Configuration(format!(
                    "{name} must not be negative, got {value}"
                )));
            }
            if value as i64 > Const::MAX_PIXELS {
                return Err(ChartError::Configuration(format!(
                    "{name} {value} exceeds {} pixels",
                    Const::MAX_PIXELS
                )));
            }
        }

        let extent = self.left_margin as i64 + self.visible_width();
        if extent > Const::MAX_PIXELS {
            return Err(ChartError::Configuration(format!(
                "timeline extends to x={extent}, beyond {} pixels",
                Const::MAX_PIXELS
            )));
        }

        if self.match_duration_minutes <= 0 {
            return Err(ChartError::Configuration(format!(
                "match_duration_minutes must be positive, got {}",
                self.match_duration_minutes
            )));
        }
        self.timezone()?;
        Ok(())
    }

    pub fn match_duration(&self) -> Duration {
        Duration::minutes(self.match_duration_minutes)
    }

    pub fn timezone(&self) -> Result<FixedOffset, ChartError> {
        FixedOffset::east_opt(self.utc_offset_minutes.saturating_mul(60)).ok_or_else(|| {
            ChartError::Configuration(format!(
                "utc_offset_minutes {} out of range",
                self.utc_offset_minutes
            ))
        })
    }

    pub fn blocks_per_hour(&self) -> i32 {
        60 / self.block_minutes
    }

    pub fn hour_width(&self) -> i32 {
        self.blocks_per_hour() * self.block_width
    }

    /// Pixel width of the visible hour range.
    pub fn visible_width(&self) -> i64 {
        (self.end_hour - self.start_hour) as i64
            * self.blocks_per_hour() as i64
            * self.block_width as i64
    }
}
