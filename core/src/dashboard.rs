//! The dashboard: one summary, three views built from it.
//!
//! An empty record set is an explicit `NoData` state rather than three
//! empty charts. Records skipped at intake travel with the dashboard so a
//! JSON consumer sees what was dropped.

use crate::{
    config::DashboardConfig,
    error::{AcvError, AcvResult},
    record::{ParsedRecords, Record, Rejection},
    summary::AcvSummary,
    views::{DonutView, StackedBarView, SummaryTableView},
};
use serde::{Deserialize, Serialize};

pub const NO_DATA_MESSAGE: &str = "No won deals to display.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum DashboardState {
    NoData {
        message: String,
    },
    Ready {
        summary: AcvSummary,
        bar: StackedBarView,
        donut: DonutView,
        table: SummaryTableView,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub title: String,
    /// Input elements skipped as malformed, by array index.
    #[serde(default)]
    pub rejected: Vec<Rejection>,
    #[serde(flatten)]
    pub state: DashboardState,
}

impl Dashboard {
    pub fn build(records: &[Record], config: &DashboardConfig) -> AcvResult<Self> {
        let summary = AcvSummary::build(records, config);
        Self::from_summary(summary, config)
    }

    /// Build from intake output, keeping its rejections in the dashboard.
    pub fn from_parsed(parsed: &ParsedRecords, config: &DashboardConfig) -> AcvResult<Self> {
        let mut dashboard = Self::build(&parsed.records, config)?;
        dashboard.rejected = parsed.rejected.clone();
        Ok(dashboard)
    }

    /// Build the three views from an already computed summary.
    pub fn from_summary(summary: AcvSummary, config: &DashboardConfig) -> AcvResult<Self> {
        if summary.is_empty() {
            log::info!("Dashboard has no records; rendering the no-data state");
            return Ok(Self {
                title: config.title.clone(),
                rejected: Vec::new(),
                state: DashboardState::NoData {
                    message: NO_DATA_MESSAGE.into(),
                },
            });
        }

        // Records built in code skip intake, so their total can still overflow.
        if !summary.grand_total.acv.is_finite() {
            return Err(AcvError::InvalidDataset {
                reason: format!(
                    "total ACV of {} records is not finite",
                    summary.grand_total.count
                ),
            });
        }

        summary.check_conservation()?;

        let bar = StackedBarView::build(&summary, config);
        let donut = DonutView::build(&summary, config);
        let table = SummaryTableView::build(&summary);

        Ok(Self {
            title: config.title.clone(),
            rejected: Vec::new(),
            state: DashboardState::Ready {
                summary,
                bar,
                donut,
                table,
            },
        })
    }

    pub fn rejected_count(&self) -> usize {
        self.rejected.len()
    }

    pub fn is_empty(&self) -> bool {
        matches!(self.state, DashboardState::NoData { .. })
    }

    pub fn summary(&self) -> Option<&AcvSummary> {
        match &self.state {
            DashboardState::Ready { summary, .. } => Some(summary),
            DashboardState::NoData { .. } => None,
        }
    }

    pub fn bar(&self) -> Option<&StackedBarView> {
        match &self.state {
            DashboardState::Ready { bar, .. } => Some(bar),
            DashboardState::NoData { .. } => None,
        }
    }

    pub fn donut(&self) -> Option<&DonutView> {
        match &self.state {
            DashboardState::Ready { donut, .. } => Some(donut),
            DashboardState::NoData { .. } => None,
        }
    }

    pub fn table(&self) -> Option<&SummaryTableView> {
        match &self.state {
            DashboardState::Ready { table, .. } => Some(table),
            DashboardState::NoData { .. } => None,
        }
    }
}
