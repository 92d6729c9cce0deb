use std::fmt::{Display, Formatter};

pub struct Const;

impl Const {
    pub const MATCH_DURATION_MINUTES: i64 = 120;
    pub const START_HOUR: u32 = 6;
    pub const END_HOUR: u32 = 18;
    pub const BLOCK_MINUTES: u32 = 15;
    pub const BLOCK_WIDTH: u32 = 20;
    pub const ROW_HEIGHT: u32 = 30;
    pub const ROUND_SEPARATOR: u32 = 20;
    pub const TOP_MARGIN: u32 = 60;
    pub const LEFT_MARGIN: u32 = 160;
    pub const CANVAS_WIDTH: u32 = 1200;
    /// Upper bound for any single pixel dimension or horizontal extent.
    pub const MAX_PIXELS: i64 = 1_000_000;
    pub const MIN_INTENSITY: u8 = 50;
    pub const INTENSITY_STEP: u32 = 50;
}

#[derive(Debug)]
pub enum ChartError {
    MalformedInput(String),
    Configuration(String),
    Io(std::io::Error),
    Csv(csv::Error),
    Json(serde_json::Error),
    Yaml(serde_yaml::Error),
    Polars(polars::error::PolarsError),
}

impl Display for ChartError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedInput(v) => write!(f, "malformed input: {v}"),
            Self::Configuration(v) => write!(f, "inconsistent configuration: {v}"),
            Self::Io(e) => write!(f, "io error: {e}"),
            Self::Csv(e) => write!(f, "csv error: {e}"),
            Self::Json(e) => write!(f, "json error: {e}"),
            Self::Yaml(e) => write!(f, "yaml error: {e}"),
            Self::Polars(e) => write!(f, "polars error: {e}"),
        }
    }
}

impl std::error::Error for ChartError {}

impl From<std::io::Error> for ChartError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<csv::Error> for ChartError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

impl From<serde_json::Error> for ChartError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<serde_yaml::Error> for ChartError {
    fn from(value: serde_yaml::Error) -> Self {
        Self::Yaml(value)
    }
}

impl From<polars::error::PolarsError> for ChartError {
    fn from(value: polars::error::PolarsError) -> Self {
        Self::Polars(value)
    }
}
