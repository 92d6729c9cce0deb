pub mod assembler;
pub mod config;
pub mod constant;
pub mod day_grouper;
pub mod fixture;
pub mod layout;
pub mod loader;
pub mod logging;
pub mod render;
pub mod summary;
pub mod window_merger;

pub use assembler::{ChartAssembler, ChartOutput};
pub use config::{ChartConfig, ChartConfigPatch};
pub use constant::{ChartError, Const};
pub use day_grouper::{DayGroup, DayGrouper, DayKey};
pub use fixture::Fixture;
pub use layout::{BarSpan, HourMark, LayoutPlan, LayoutPlanner, RowLayout, WindowLayout};
pub use loader::{FixtureLoader, parse_kickoff};
pub use logging::{LOG_LEVEL_ENV, init_logging, init_logging_with_level, log_level};
pub use render::{RenderSink, Rgb, SvgSink, TextAlign, draw_plan};
pub use summary::{summary_lines, window_summary, windows_dataframe};
pub use window_merger::{ActivityWindow, WindowMerger};
