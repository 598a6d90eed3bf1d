//! The precomputed aggregation handed to every view.
//!
//! RULE: views read only from an AcvSummary. None of them sees the raw
//! records, so the bar chart, donut and table can never disagree.

use crate::{
    aggregation::{
        compute_grand_total, compute_grid_indexed, compute_totals, percent_of_group, quarter_total,
        share_by_type, AggregationGrid, Cell, TypeTotal,
    },
    config::DashboardConfig,
    dimensions::{derive_customer_types, derive_quarters},
    error::{AcvError, AcvResult},
    record::Record,
    types::{Acv, CustomerType, Quarter},
};
use serde::{Deserialize, Serialize};

/// Relative tolerance for ACV conservation checks.
pub const ACV_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuarterTotal {
    pub quarter: Quarter,
    pub total: Cell,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AcvSummary {
    pub quarters: Vec<Quarter>,
    pub customer_types: Vec<CustomerType>,
    pub grid: AggregationGrid,
    pub type_totals: Vec<TypeTotal>,
    pub quarter_totals: Vec<QuarterTotal>,
    pub grand_total: Cell,
    /// Total ACV per type, in summary type order.
    pub shares: Vec<(CustomerType, Acv)>,
}

impl AcvSummary {
    pub fn build(records: &[Record], config: &DashboardConfig) -> Self {
        let quarters = derive_quarters(records, config.quarter_order);
        let customer_types = derive_customer_types(records, config);
        let grid = compute_grid_indexed(records, &quarters, &customer_types);
        let type_totals = compute_totals(records, &customer_types);
        let quarter_totals = quarters
            .iter()
            .map(|q| QuarterTotal {
                quarter: q.clone(),
                total: quarter_total(&grid, q),
            })
            .collect();
        let grand_total = compute_grand_total(records);

        let first_seen = share_by_type(records);
        let shares = customer_types
            .iter()
            .map(|t| {
                let acv = first_seen
                    .iter()
                    .find(|(s, _)| s == t)
                    .map_or(0.0, |(_, acv)| *acv);
                (t.clone(), acv)
            })
            .collect();

        log::debug!(
            "Aggregated {} records into {} quarters x {} customer types",
            records.len(),
            quarters.len(),
            customer_types.len()
        );

        Self {
            quarters,
            customer_types,
            grid,
            type_totals,
            quarter_totals,
            grand_total,
            shares,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.grand_total.count == 0
    }

    pub fn cell(&self, quarter: &str, customer_type: &str) -> Cell {
        self.grid.get(quarter, customer_type).unwrap_or(Cell::ZERO)
    }

    pub fn quarter_total(&self, quarter: &str) -> Cell {
        self.quarter_totals
            .iter()
            .find(|q| q.quarter == quarter)
            .map_or(Cell::ZERO, |q| q.total)
    }

    pub fn type_total(&self, customer_type: &str) -> Cell {
        self.type_totals
            .iter()
            .find(|t| t.customer_type == customer_type)
            .map_or(Cell::ZERO, |t| t.total)
    }

    /// Share of the quarter's ACV held by `customer_type`, as a fraction.
    pub fn percent_in_quarter(&self, quarter: &str, customer_type: &str) -> f64 {
        percent_of_group(
            self.cell(quarter, customer_type).acv,
            self.quarter_total(quarter).acv,
        )
    }

    /// Share of all ACV held by `customer_type`, as a fraction.
    pub fn percent_of_grand_total(&self, customer_type: &str) -> f64 {
        percent_of_group(self.type_total(customer_type).acv, self.grand_total.acv)
    }

    /// Verify the three conservation identities:
    ///   1. Σ type totals         == grand total
    ///   2. Σ cells in a quarter  == that quarter's total
    ///   3. Σ quarter totals      == grand total
    ///
    /// Counts must match exactly; ACV within a relative epsilon.
    pub fn check_conservation(&self) -> AcvResult<()> {
        let mut by_type = Cell::ZERO;
        for t in &self.type_totals {
            by_type.merge(t.total);
        }
        check_cell("type totals vs grand total", self.grand_total, by_type)?;

        for row in &self.grid.rows {
            let mut cells = Cell::ZERO;
            for c in &row.cells {
                cells.merge(*c);
            }
            check_cell(
                &format!("cells of quarter {}", row.quarter),
                self.quarter_total(&row.quarter),
                cells,
            )?;
        }

        let mut by_quarter = Cell::ZERO;
        for q in &self.quarter_totals {
            by_quarter.merge(q.total);
        }
        check_cell("quarter totals vs grand total", self.grand_total, by_quarter)?;
        Ok(())
    }
}

pub fn acv_close(expected: f64, actual: f64) -> bool {
    if expected == actual {
        return true;
    }
    let scale = expected.abs().max(actual.abs()).max(1.0);
    (expected - actual).abs() <= ACV_EPSILON * scale
}

fn check_cell(identity: &str, expected: Cell, actual: Cell) -> AcvResult<()> {
    if expected.count != actual.count {
        return Err(AcvError::ConservationViolation {
            identity: format!("{identity} (count)"),
            expected: expected.count as f64,
            actual: actual.count as f64,
        });
    }
    if !acv_close(expected.acv, actual.acv) {
        return Err(AcvError::ConservationViolation {
            identity: format!("{identity} (acv)"),
            expected: expected.acv,
            actual: actual.acv,
        });
    }
    Ok(())
}
