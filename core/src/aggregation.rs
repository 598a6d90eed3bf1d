//! Aggregation engine: the quarter × customer-type grid and its totals.
//!
//! RULE: every function here is pure. No I/O, no mutation of inputs, no
//! global state. Sums are plain f64 additions in input order; nothing is
//! rounded until a formatter touches it.
//!
//! Two grid strategies exist:
//!   - `compute_grid` scans the records once per cell (Q × T × N).
//!   - `compute_grid_indexed` makes a single pass keyed by (quarter, type).
//! Both add each cell's records in input order, so for the same input
//! sequence they produce bit-identical sums.

use crate::{
    record::Record,
    types::{Acv, CustomerType, Quarter},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ── Public types ─────────────────────────────────────────────────────────────

/// Sum and count of a group of records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub acv: Acv,
    pub count: u64,
}

impl Cell {
    pub const ZERO: Cell = Cell { acv: 0.0, count: 0 };

    pub fn add_record(&mut self, acv: Acv) {
        self.acv += acv;
        self.count += 1;
    }

    pub fn merge(&mut self, other: Cell) {
        self.acv += other.acv;
        self.count += other.count;
    }
}

/// One quarter's row of the grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuarterRow {
    pub quarter: Quarter,
    /// One cell per customer type, in the grid's type order.
    pub cells: Vec<Cell>,
}

/// Quarter → customer type → Cell, with both axes in a fixed order.
///
/// Every (quarter, type) pair of the axes has a cell. Pairs absent from
/// the input hold `Cell::ZERO`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregationGrid {
    pub types: Vec<CustomerType>,
    pub rows: Vec<QuarterRow>,
}

impl AggregationGrid {
    fn zeroed(quarters: &[Quarter], types: &[CustomerType]) -> Self {
        Self {
            types: types.to_vec(),
            rows: quarters
                .iter()
                .map(|q| QuarterRow {
                    quarter: q.clone(),
                    cells: vec![Cell::ZERO; types.len()],
                })
                .collect(),
        }
    }

    pub fn row(&self, quarter: &str) -> Option<&QuarterRow> {
        self.rows.iter().find(|r| r.quarter == quarter)
    }

    /// The cell for (quarter, type), or `None` when either is off-axis.
    pub fn get(&self, quarter: &str, customer_type: &str) -> Option<Cell> {
        let ti = self.types.iter().position(|t| t == customer_type)?;
        self.row(quarter).map(|r| r.cells[ti])
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Total for one customer type across all quarters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeTotal {
    pub customer_type: CustomerType,
    pub total: Cell,
}

// ── Engine ───────────────────────────────────────────────────────────────────

/// Build the grid by filtering the records once per (quarter, type) pair.
pub fn compute_grid(records: &[Record], quarters: &[Quarter], types: &[CustomerType]) -> AggregationGrid {
    let mut grid = AggregationGrid::zeroed(quarters, types);
    for row in &mut grid.rows {
        for (ti, customer_type) in types.iter().enumerate() {
            let mut cell = Cell::ZERO;
            for r in records
                .iter()
                .filter(|r| r.fiscal_quarter == row.quarter && &r.customer_type == customer_type)
            {
                cell.add_record(r.acv);
            }
            row.cells[ti] = cell;
        }
    }
    grid
}

/// Build the grid in a single pass over the records.
///
/// Records whose quarter or type is not on an axis are ignored, exactly as
/// `compute_grid` ignores them.
pub fn compute_grid_indexed(
    records: &[Record],
    quarters: &[Quarter],
    types: &[CustomerType],
) -> AggregationGrid {
    let mut grid = AggregationGrid::zeroed(quarters, types);
    let quarter_index: HashMap<&str, usize> =
        quarters.iter().enumerate().map(|(i, q)| (q.as_str(), i)).collect();
    let type_index: HashMap<&str, usize> =
        types.iter().enumerate().map(|(i, t)| (t.as_str(), i)).collect();

    for r in records {
        let (Some(&qi), Some(&ti)) = (
            quarter_index.get(r.fiscal_quarter.as_str()),
            type_index.get(r.customer_type.as_str()),
        ) else {
            continue;
        };
        grid.rows[qi].cells[ti].add_record(r.acv);
    }
    grid
}

/// Per-type totals across all quarters, in `types` order.
pub fn compute_totals(records: &[Record], types: &[CustomerType]) -> Vec<TypeTotal> {
    types
        .iter()
        .map(|t| {
            let mut total = Cell::ZERO;
            for r in records.iter().filter(|r| &r.customer_type == t) {
                total.add_record(r.acv);
            }
            TypeTotal {
                customer_type: t.clone(),
                total,
            }
        })
        .collect()
}

/// Sum and count over every record, unconditionally.
pub fn compute_grand_total(records: &[Record]) -> Cell {
    let mut total = Cell::ZERO;
    for r in records {
        total.add_record(r.acv);
    }
    total
}

/// `cell / group`, or 0 when the group total is 0. Never NaN or infinite
/// for finite inputs.
pub fn percent_of_group(cell_acv: Acv, group_total_acv: Acv) -> f64 {
    if group_total_acv != 0.0 {
        cell_acv / group_total_acv
    } else {
        0.0
    }
}

/// Column total for one quarter: its cells summed in type order.
/// A quarter that is not on the grid totals to zero.
pub fn quarter_total(grid: &AggregationGrid, quarter: &str) -> Cell {
    let mut total = Cell::ZERO;
    if let Some(row) = grid.row(quarter) {
        for cell in &row.cells {
            total.merge(*cell);
        }
    }
    total
}

/// Customer type → total ACV, in first-seen order. Feeds the donut share.
pub fn share_by_type(records: &[Record]) -> Vec<(CustomerType, Acv)> {
    let mut shares: Vec<(CustomerType, Acv)> = Vec::new();
    for r in records {
        match shares.iter().position(|(t, _)| t == &r.customer_type) {
            Some(i) => shares[i].1 += r.acv,
            None => shares.push((r.customer_type.clone(), r.acv)),
        }
    }
    shares
}
