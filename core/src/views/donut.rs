//! Donut chart of each customer type's share of total ACV.

use crate::{
    aggregation::percent_of_group,
    config::DashboardConfig,
    format::{format_compact_thousands, format_percent},
    summary::AcvSummary,
    types::{Acv, CustomerType},
};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

pub const CENTER_CAPTION: &str = "Total";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonutSlice {
    pub customer_type: CustomerType,
    pub value: Acv,
    /// Fraction of the donut total.
    pub share: f64,
    /// Radians, clockwise from twelve o'clock.
    pub start_angle: f64,
    pub end_angle: f64,
    pub color: String,
    /// e.g. "$120K (64%)"
    pub label: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DonutView {
    pub slices: Vec<DonutSlice>,
    pub total: Acv,
    pub center_caption: String,
    pub center_label: String,
}

impl DonutView {
    pub fn build(summary: &AcvSummary, config: &DashboardConfig) -> Self {
        let total: Acv = summary.shares.iter().map(|(_, acv)| acv).sum();
        let types = &summary.customer_types;

        // A zero total has no arcs to draw.
        let slices = if total == 0.0 {
            Vec::new()
        } else {
            let mut cumulative = 0.0;
            summary
                .shares
                .iter()
                .map(|(customer_type, value)| {
                    let share = percent_of_group(*value, total);
                    let start_angle = cumulative * TAU;
                    cumulative += share;
                    DonutSlice {
                        customer_type: customer_type.clone(),
                        value: *value,
                        share,
                        start_angle,
                        end_angle: cumulative * TAU,
                        color: config.color_for(customer_type, types),
                        label: format!(
                            "{} ({})",
                            format_compact_thousands(*value),
                            format_percent(share)
                        ),
                    }
                })
                .collect()
        };

        Self {
            slices,
            total,
            center_caption: CENTER_CAPTION.into(),
            center_label: format_compact_thousands(total),
        }
    }

    pub fn slice(&self, customer_type: &str) -> Option<&DonutSlice> {
        self.slices.iter().find(|s| s.customer_type == customer_type)
    }
}
