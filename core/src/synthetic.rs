//! Synthetic won-deal datasets for demos and tests.

use crate::{record::Record, rng::DealRng};
use serde::{Deserialize, Serialize};

pub const EXISTING_CUSTOMER: &str = "Existing Customer";
pub const NEW_CUSTOMER: &str = "New Customer";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntheticSpec {
    pub seed: u64,
    pub quarters: usize,
    pub deals_per_quarter: usize,
    /// Fiscal year of the first quarter; labels run "Q1-24", "Q2-24", ...
    pub start_year: u32,
    pub new_customer_rate: f64,
    pub acv_min: f64,
    pub acv_alpha: f64,
    pub acv_cap: f64,
}

impl Default for SyntheticSpec {
    fn default() -> Self {
        Self {
            seed: 42,
            quarters: 4,
            deals_per_quarter: 25,
            start_year: 2024,
            new_customer_rate: 0.35,
            acv_min: 5_000.0,
            acv_alpha: 1.6,
            acv_cap: 400_000.0,
        }
    }
}

/// "Q{n}-{yy}" for the quarter `index` quarters after Q1 of `start_year`.
pub fn quarter_label(start_year: u32, index: usize) -> String {
    let year = start_year as usize + index / 4;
    format!("Q{}-{:02}", index % 4 + 1, year % 100)
}

/// Generate a dataset. Equal inputs give equal records, in the same order.
pub fn generate(spec: &SyntheticSpec) -> Vec<Record> {
    let mut records = Vec::with_capacity(spec.quarters * spec.deals_per_quarter);
    for qi in 0..spec.quarters {
        let quarter = quarter_label(spec.start_year, qi);
        let mut rng = DealRng::new(spec.seed, qi as u64);
        for _ in 0..spec.deals_per_quarter {
            let customer_type = if rng.chance(spec.new_customer_rate) {
                NEW_CUSTOMER
            } else {
                EXISTING_CUSTOMER
            };
            let acv = rng.pareto(spec.acv_min, spec.acv_alpha).min(spec.acv_cap).round();
            records.push(Record::new(customer_type, quarter.clone(), acv));
        }
    }
    log::debug!(
        "Generated {} synthetic records (seed {})",
        records.len(),
        spec.seed
    );
    records
}
