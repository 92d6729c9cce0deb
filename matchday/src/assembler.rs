use polars::prelude::DataFrame;
use tracing::info;

use crate::config::ChartConfig;
use crate::constant::ChartError;
use crate::day_grouper::{DayGroup, DayGrouper};
use crate::fixture::Fixture;
use crate::layout::{LayoutPlan, LayoutPlanner};
use crate::summary::{summary_lines, window_summary, windows_dataframe};
use crate::window_merger::{ActivityWindow, WindowMerger};

#[derive(Debug, Clone)]
pub struct ChartOutput {
    /// Windows in merge order.
    pub windows: Vec<ActivityWindow>,
    /// Groups in stacking order.
    pub groups: Vec<DayGroup>,
    pub plan: LayoutPlan,
}

impl ChartOutput {
    pub fn summary(&self) -> String {
        window_summary(&self.windows)
    }

    pub fn summary_lines(&self) -> Vec<String> {
        summary_lines(&self.windows)
    }

    pub fn windows_dataframe(&self) -> Result<DataFrame, ChartError> {
        windows_dataframe(&self.windows)
    }

    pub fn fixture_count(&self) -> usize {
        self.windows.iter().map(ActivityWindow::active_count).sum()
    }
}

pub struct ChartAssembler {
    grouper: DayGrouper,
    planner: LayoutPlanner,
}

impl ChartAssembler {
    pub fn new(config: ChartConfig) -> Result<Self, ChartError> {
        let planner = LayoutPlanner::new(config)?;
        let grouper = DayGrouper::new(planner.config().timezone()?);
        Ok(Self { grouper, planner })
    }

    pub fn config(&self) -> &ChartConfig {
        self.planner.config()
    }

    pub fn assemble(&self, fixtures: &[Fixture]) -> Result<ChartOutput, ChartError> {
        let windows = WindowMerger::merge(fixtures)?;
        let groups = self.grouper.group(&windows);
        let plan = self.planner.plan(&groups)?;

        info!(
            fixtures = fixtures.len(),
            windows = windows.len(),
            rows = plan.rows.len(),
            height = plan.height,
            "assembled fixture chart"
        );
        Ok(ChartOutput {
            windows,
            groups,
            plan,
        })
    }
}
