//! Shared primitive types used across the aggregation engine and views.

/// A fiscal quarter label as it appears in the data, e.g. "Q1-24".
pub type Quarter = String;

/// A customer type label, e.g. "Existing Customer". Open set.
pub type CustomerType = String;

/// Annual contract value in currency units.
pub type Acv = f64;
