//! Aggregation engine and view models for the won-ACV mix dashboard.
//!
//! Raw won-deal records flow through one pipeline:
//!   records → AcvSummary → { stacked bar, donut, summary table }

pub mod aggregation;
pub mod config;
pub mod dashboard;
pub mod dimensions;
pub mod error;
pub mod format;
pub mod loader;
pub mod record;
pub mod rng;
pub mod summary;
pub mod synthetic;
pub mod types;
pub mod views;
