//! Won-deal records and the JSON intake that validates them.
//!
//! POLICY: malformed records are skipped and counted, never coerced.
//! A record is rejected when it is not an object, when any of the three
//! fields is missing or has the wrong JSON type, or when `acv` is negative
//! or not finite. Every rejection carries its array index so the caller can
//! report exactly what was dropped.
//!
//! A record whose `acv` would push the dataset's running ACV total past
//! the largest finite f64 is rejected too, so the accepted records always
//! sum to a finite total.

use crate::{
    error::{AcvError, AcvResult},
    types::{Acv, CustomerType, Quarter},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const FIELD_CUSTOMER_TYPE: &str = "Cust_Type";
pub const FIELD_FISCAL_QUARTER: &str = "closed_fiscal_quarter";
pub const FIELD_ACV: &str = "acv";

/// One closed deal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "Cust_Type")]
    pub customer_type: CustomerType,
    #[serde(rename = "closed_fiscal_quarter")]
    pub fiscal_quarter: Quarter,
    pub acv: Acv,
}

impl Record {
    pub fn new(customer_type: impl Into<String>, fiscal_quarter: impl Into<String>, acv: Acv) -> Self {
        Self {
            customer_type: customer_type.into(),
            fiscal_quarter: fiscal_quarter.into(),
            acv,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    NotAnObject,
    MissingField { field: String },
    WrongType { field: String },
    NegativeAcv,
    NonFiniteAcv,
    TotalOverflow,
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAnObject => write!(f, "element is not an object"),
            Self::MissingField { field } => write!(f, "missing field '{field}'"),
            Self::WrongType { field } => write!(f, "field '{field}' has the wrong type"),
            Self::NegativeAcv => write!(f, "acv is negative"),
            Self::NonFiniteAcv => write!(f, "acv is not finite"),
            Self::TotalOverflow => write!(f, "acv overflows the dataset total"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rejection {
    pub index: usize,
    pub reason: RejectReason,
}

/// Records that passed validation plus everything that was skipped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedRecords {
    pub records: Vec<Record>,
    pub rejected: Vec<Rejection>,
}

impl ParsedRecords {
    pub fn rejected_count(&self) -> usize {
        self.rejected.len()
    }
}

/// Parse a JSON array of won-deal records.
///
/// Fails only when the document is not valid JSON or its top level is not
/// an array. Bad elements are skipped and reported in `rejected`.
pub fn parse_records(json: &str) -> AcvResult<ParsedRecords> {
    let value: Value = serde_json::from_str(json)?;
    parse_value(value)
}

pub fn parse_value(value: Value) -> AcvResult<ParsedRecords> {
    let Value::Array(items) = value else {
        return Err(AcvError::InvalidDataset {
            reason: "top-level value is not an array".into(),
        });
    };

    let mut parsed = ParsedRecords::default();
    let mut running_total = 0.0;
    for (index, item) in items.iter().enumerate() {
        let checked = validate(item).and_then(|record| {
            if (running_total + record.acv).is_finite() {
                Ok(record)
            } else {
                Err(RejectReason::TotalOverflow)
            }
        });
        match checked {
            Ok(record) => {
                running_total += record.acv;
                parsed.records.push(record);
            }
            Err(reason) => parsed.rejected.push(Rejection { index, reason }),
        }
    }

    if !parsed.rejected.is_empty() {
        log::warn!(
            "Skipped {} of {} records as malformed",
            parsed.rejected.len(),
            items.len()
        );
        for r in &parsed.rejected {
            log::debug!("  record {}: {}", r.index, r.reason);
        }
    }
    Ok(parsed)
}

fn validate(item: &Value) -> Result<Record, RejectReason> {
    let Value::Object(map) = item else {
        return Err(RejectReason::NotAnObject);
    };

    let customer_type = string_field(map, FIELD_CUSTOMER_TYPE)?;
    let fiscal_quarter = string_field(map, FIELD_FISCAL_QUARTER)?;

    let acv = match map.get(FIELD_ACV) {
        None => {
            return Err(RejectReason::MissingField {
                field: FIELD_ACV.into(),
            })
        }
        Some(v) => v.as_f64().ok_or_else(|| RejectReason::WrongType {
            field: FIELD_ACV.into(),
        })?,
    };
    if !acv.is_finite() {
        return Err(RejectReason::NonFiniteAcv);
    }
    if acv < 0.0 {
        return Err(RejectReason::NegativeAcv);
    }

    Ok(Record {
        customer_type,
        fiscal_quarter,
        acv,
    })
}

fn string_field(map: &serde_json::Map<String, Value>, field: &str) -> Result<String, RejectReason> {
    match map.get(field) {
        None => Err(RejectReason::MissingField {
            field: field.into(),
        }),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(RejectReason::WrongType {
            field: field.into(),
        }),
    }
}
