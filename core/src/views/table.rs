//! Cross-tabulated summary table: customer types down, quarters across.
//!
//! Layout:
//!   header row 1: "Closed Fiscal Quarter" | Q1 (span 3) | ... | "Total" (span 3)
//!   header row 2: "Cust Type" | "# of Opps" "ACV" "% of Total" | ...
//!   one body row per customer type, then a "Total" row.
//!
//! Percentages in quarter groups are of the quarter's ACV; in the Total
//! group they are of the grand total.

use crate::{
    aggregation::Cell,
    format::{format_money, format_percent},
    summary::AcvSummary,
};
use serde::{Deserialize, Serialize};

pub const CORNER_HEADER: &str = "Closed Fiscal Quarter";
pub const ROW_HEADER: &str = "Cust Type";
pub const TOTAL_LABEL: &str = "Total";
pub const METRIC_HEADERS: [&str; 3] = ["# of Opps", "ACV", "% of Total"];

const COLUMN_SEPARATOR: &str = " | ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shade {
    Dark,
    Light,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderGroup {
    pub label: String,
    pub span: usize,
    pub shade: Shade,
}

/// The three formatted cells of one (row, group) intersection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupCells {
    pub count: String,
    pub acv: String,
    pub percent: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub label: String,
    /// One entry per quarter, then the Total group.
    pub groups: Vec<GroupCells>,
    pub is_total: bool,
}

impl TableRow {
    pub fn columns(&self) -> Vec<String> {
        let mut cols = Vec::with_capacity(1 + self.groups.len() * 3);
        cols.push(self.label.clone());
        for g in &self.groups {
            cols.push(g.count.clone());
            cols.push(g.acv.clone());
            cols.push(g.percent.clone());
        }
        cols
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryTableView {
    pub header_groups: Vec<HeaderGroup>,
    pub sub_headers: Vec<String>,
    pub rows: Vec<TableRow>,
}

impl SummaryTableView {
    pub fn build(summary: &AcvSummary) -> Self {
        let mut header_groups = vec![HeaderGroup {
            label: CORNER_HEADER.into(),
            span: 1,
            shade: Shade::Dark,
        }];
        for (i, q) in summary.quarters.iter().enumerate() {
            header_groups.push(HeaderGroup {
                label: q.clone(),
                span: 3,
                shade: if i % 2 == 0 { Shade::Dark } else { Shade::Light },
            });
        }
        header_groups.push(HeaderGroup {
            label: TOTAL_LABEL.into(),
            span: 3,
            shade: Shade::Dark,
        });

        let group_count = summary.quarters.len() + 1;
        let mut sub_headers = vec![ROW_HEADER.to_string()];
        for _ in 0..group_count {
            sub_headers.extend(METRIC_HEADERS.iter().map(|h| h.to_string()));
        }

        let mut rows: Vec<TableRow> = summary
            .customer_types
            .iter()
            .map(|t| {
                let mut groups: Vec<GroupCells> = summary
                    .quarters
                    .iter()
                    .map(|q| group_cells(summary.cell(q, t), summary.percent_in_quarter(q, t)))
                    .collect();
                groups.push(group_cells(
                    summary.type_total(t),
                    summary.percent_of_grand_total(t),
                ));
                TableRow {
                    label: t.clone(),
                    groups,
                    is_total: false,
                }
            })
            .collect();

        let mut total_groups: Vec<GroupCells> = summary
            .quarter_totals
            .iter()
            .map(|q| whole_group_cells(q.total))
            .collect();
        total_groups.push(whole_group_cells(summary.grand_total));
        rows.push(TableRow {
            label: TOTAL_LABEL.into(),
            groups: total_groups,
            is_total: true,
        });

        Self {
            header_groups,
            sub_headers,
            rows,
        }
    }

    pub fn row(&self, label: &str) -> Option<&TableRow> {
        self.rows.iter().find(|r| r.label == label)
    }

    pub fn total_row(&self) -> Option<&TableRow> {
        self.rows.iter().find(|r| r.is_total)
    }

    /// Lay the table out as aligned plain text, one line per row.
    pub fn render_text(&self) -> String {
        let body: Vec<Vec<String>> = self.rows.iter().map(TableRow::columns).collect();
        let column_count = self.sub_headers.len();

        let mut widths: Vec<usize> = self.sub_headers.iter().map(|h| h.chars().count()).collect();
        for cols in &body {
            for (i, c) in cols.iter().enumerate().take(column_count) {
                widths[i] = widths[i].max(c.chars().count());
            }
        }

        // Widen the last column of any group whose label overflows its span.
        let mut col = 0;
        for g in &self.header_groups {
            let span_width = spanned_width(&widths[col..col + g.span]);
            let label_width = g.label.chars().count();
            if label_width > span_width {
                widths[col + g.span - 1] += label_width - span_width;
            }
            col += g.span;
        }

        let mut lines = Vec::with_capacity(body.len() + 3);

        let mut col = 0;
        let group_line: Vec<String> = self
            .header_groups
            .iter()
            .map(|g| {
                let width = spanned_width(&widths[col..col + g.span]);
                col += g.span;
                format!("{:^width$}", g.label)
            })
            .collect();
        lines.push(group_line.join(COLUMN_SEPARATOR));
        lines.push(align_row(&self.sub_headers, &widths));
        lines.push(
            widths
                .iter()
                .map(|w| "-".repeat(*w))
                .collect::<Vec<_>>()
                .join("-+-"),
        );
        for cols in &body {
            lines.push(align_row(cols, &widths));
        }

        let mut out = lines
            .iter()
            .map(|l| l.trim_end())
            .collect::<Vec<_>>()
            .join("\n");
        out.push('\n');
        out
    }
}

fn group_cells(cell: Cell, fraction: f64) -> GroupCells {
    GroupCells {
        count: cell.count.to_string(),
        acv: format_money(cell.acv),
        percent: format_percent(fraction),
    }
}

// A total-row group is the whole of itself, unless it is empty.
fn whole_group_cells(cell: Cell) -> GroupCells {
    let fraction = if cell.acv != 0.0 { 1.0 } else { 0.0 };
    group_cells(cell, fraction)
}

fn spanned_width(widths: &[usize]) -> usize {
    widths.iter().sum::<usize>() + COLUMN_SEPARATOR.len() * widths.len().saturating_sub(1)
}

// Labels left, numbers right.
fn align_row(cols: &[String], widths: &[usize]) -> String {
    cols.iter()
        .zip(widths)
        .enumerate()
        .map(|(i, (c, &w))| {
            if i == 0 {
                format!("{c:<w$}")
            } else {
                format!("{c:>w$}")
            }
        })
        .collect::<Vec<_>>()
        .join(COLUMN_SEPARATOR)
}
