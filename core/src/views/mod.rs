//! Presentation view models.
//!
//! Each view turns one AcvSummary into renderer-agnostic data: ordered
//! segments, labels, colors and table cells. Pixel layout belongs to the
//! renderer.

pub mod bar;
pub mod donut;
pub mod table;

pub use bar::StackedBarView;
pub use donut::DonutView;
pub use table::SummaryTableView;

use serde::{Deserialize, Serialize};

/// One legend entry: a customer type and its color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub customer_type: String,
    pub color: String,
}
