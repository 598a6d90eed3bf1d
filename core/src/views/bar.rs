//! Stacked bar chart: one bar per quarter, one segment per customer type.

use super::LegendEntry;
use crate::{
    config::DashboardConfig,
    format::{format_compact_thousands, format_percent},
    summary::AcvSummary,
    types::{Acv, CustomerType, Quarter},
};
use serde::{Deserialize, Serialize};

pub const X_AXIS_LABEL: &str = "Closed Fiscal Quarter";

/// Roughly how many intervals the ACV axis is split into.
const TARGET_TICK_INTERVALS: f64 = 5.0;

/// A labeled gridline on the ACV axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisTick {
    pub value: Acv,
    /// e.g. "$50K"
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSegment {
    pub customer_type: CustomerType,
    pub acv: Acv,
    /// Cumulative lower and upper bounds, in currency units.
    pub y0: Acv,
    pub y1: Acv,
    /// Fraction of the bar's total.
    pub percent: f64,
    pub color: String,
    /// e.g. "$88K (46%)"
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub quarter: Quarter,
    pub segments: Vec<BarSegment>,
    pub total: Acv,
    pub total_label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StackedBarView {
    pub bars: Vec<Bar>,
    /// Height of the tallest bar; the renderer's y-domain upper bound.
    pub y_max: Acv,
    /// From zero up to the first tick at or above `y_max`.
    pub y_ticks: Vec<AxisTick>,
    pub x_axis_label: String,
    pub legend: Vec<LegendEntry>,
}

impl StackedBarView {
    pub fn build(summary: &AcvSummary, config: &DashboardConfig) -> Self {
        let types = &summary.customer_types;
        let legend: Vec<LegendEntry> = types
            .iter()
            .map(|t| LegendEntry {
                customer_type: t.clone(),
                color: config.color_for(t, types),
            })
            .collect();

        let bars: Vec<Bar> = summary
            .quarters
            .iter()
            .map(|q| {
                let total = summary.quarter_total(q).acv;
                let mut y0 = 0.0;
                let segments = legend
                    .iter()
                    .map(|entry| {
                        let acv = summary.cell(q, &entry.customer_type).acv;
                        let percent = summary.percent_in_quarter(q, &entry.customer_type);
                        let segment = BarSegment {
                            customer_type: entry.customer_type.clone(),
                            acv,
                            y0,
                            y1: y0 + acv,
                            percent,
                            color: entry.color.clone(),
                            label: format!(
                                "{} ({})",
                                format_compact_thousands(acv),
                                format_percent(percent)
                            ),
                        };
                        y0 += acv;
                        segment
                    })
                    .collect();
                Bar {
                    quarter: q.clone(),
                    segments,
                    total,
                    total_label: format_compact_thousands(total),
                }
            })
            .collect();

        let y_max = bars.iter().map(|b| b.total).fold(0.0, f64::max);

        Self {
            bars,
            y_max,
            y_ticks: y_ticks(y_max),
            x_axis_label: X_AXIS_LABEL.into(),
            legend,
        }
    }

    pub fn bar(&self, quarter: &str) -> Option<&Bar> {
        self.bars.iter().find(|b| b.quarter == quarter)
    }
}

// ── Axis ─────────────────────────────────────────────────────────────────────

fn y_ticks(y_max: Acv) -> Vec<AxisTick> {
    if !y_max.is_finite() || y_max <= 0.0 {
        return vec![tick(0.0)];
    }
    let step = nice_step(y_max / TARGET_TICK_INTERVALS);
    let intervals = (y_max / step).ceil() as usize;
    (0..=intervals).map(|i| tick(i as f64 * step)).collect()
}

/// The smallest 1, 2 or 5 × 10^k that is at least `raw`.
fn nice_step(raw: f64) -> f64 {
    let magnitude = 10f64.powi(raw.log10().floor() as i32);
    let residual = raw / magnitude;
    let factor = if residual <= 1.0 {
        1.0
    } else if residual <= 2.0 {
        2.0
    } else if residual <= 5.0 {
        5.0
    } else {
        10.0
    };
    factor * magnitude
}

fn tick(value: Acv) -> AxisTick {
    AxisTick {
        value,
        label: format_compact_thousands(value),
    }
}
