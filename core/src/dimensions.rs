//! Dimension derivation: the ordered quarter and customer-type lists.
//!
//! Every view draws its axes, legend and table rows from these two lists,
//! so they are computed once and never reordered downstream.

use crate::{
    config::{DashboardConfig, QuarterOrder},
    record::Record,
    types::{CustomerType, Quarter},
};
use std::collections::BTreeSet;

/// Distinct quarter labels present in `records`, sorted by `order`.
pub fn derive_quarters(records: &[Record], order: QuarterOrder) -> Vec<Quarter> {
    let distinct: BTreeSet<&str> = records.iter().map(|r| r.fiscal_quarter.as_str()).collect();
    let mut quarters: Vec<Quarter> = distinct.into_iter().map(str::to_owned).collect();

    if order == QuarterOrder::Chronological {
        quarters.sort_by(|a, b| chronological_key(a).cmp(&chronological_key(b)));
    }
    quarters
}

/// Distinct customer types present in `records`.
///
/// Configured categories come first, in configured order, but only when
/// they occur in the data. Anything else follows in first-seen order.
pub fn derive_customer_types(records: &[Record], config: &DashboardConfig) -> Vec<CustomerType> {
    let mut types: Vec<CustomerType> = config
        .categories
        .iter()
        .filter(|c| records.iter().any(|r| r.customer_type == c.label))
        .map(|c| c.label.clone())
        .collect();

    for r in records {
        if !config.is_recognized(&r.customer_type) && !types.contains(&r.customer_type) {
            types.push(r.customer_type.clone());
        }
    }
    types
}

/// Parse a fiscal quarter label into (year, quarter).
///
/// Accepts "Q1-24", "Q1-2024", "Q1 2024", "FY24-Q1" and "2024-Q1".
/// Two-digit years are taken as 20xx.
pub fn parse_quarter_label(label: &str) -> Option<(u32, u8)> {
    let upper = label.trim().to_ascii_uppercase();
    let parts: Vec<&str> = upper
        .split(|c: char| c == '-' || c == ' ' || c == '_' || c == '/')
        .filter(|p| !p.is_empty())
        .collect();
    if parts.len() != 2 {
        return None;
    }

    let (q_part, y_part) = if parts[0].starts_with('Q') {
        (parts[0], parts[1])
    } else {
        (parts[1], parts[0])
    };

    let quarter: u8 = q_part.strip_prefix('Q')?.parse().ok()?;
    if !(1..=4).contains(&quarter) {
        return None;
    }

    let digits = y_part.strip_prefix("FY").unwrap_or(y_part);
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let year: u32 = match digits.len() {
        2 => 2000 + digits.parse::<u32>().ok()?,
        4 => digits.parse().ok()?,
        _ => return None,
    };
    Some((year, quarter))
}

// Parsed labels first, by (year, quarter); unparseable ones after, by label.
fn chronological_key(label: &str) -> (u8, u32, u8, &str) {
    match parse_quarter_label(label) {
        Some((year, quarter)) => (0, year, quarter, label),
        None => (1, 0, 0, label),
    }
}
