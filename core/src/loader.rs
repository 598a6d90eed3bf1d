//! One-shot dataset load.
//!
//! RULE: a failed load never stops the dashboard. It is logged and the
//! caller gets an empty record set, which renders as the no-data state.

use crate::{
    error::AcvResult,
    record::{parse_records, ParsedRecords},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadOutcome {
    pub parsed: ParsedRecords,
    /// Why the load failed, when it did.
    pub failure: Option<String>,
}

impl LoadOutcome {
    pub fn is_failure(&self) -> bool {
        self.failure.is_some()
    }
}

/// Read and parse a dataset file. Errors on I/O failure or a bad document.
pub fn load_records(path: &str) -> AcvResult<ParsedRecords> {
    let content = std::fs::read_to_string(path)?;
    let parsed = parse_records(&content)?;
    log::info!(
        "Loaded {} records from {path} ({} rejected)",
        parsed.records.len(),
        parsed.rejected_count()
    );
    Ok(parsed)
}

/// Like `load_records`, but falls back to an empty dataset on failure.
pub fn load_or_empty(path: &str) -> LoadOutcome {
    match load_records(path) {
        Ok(parsed) => LoadOutcome {
            parsed,
            failure: None,
        },
        Err(e) => {
            log::error!("Error loading dataset {path}: {e}");
            LoadOutcome {
                parsed: ParsedRecords::default(),
                failure: Some(e.to_string()),
            }
        }
    }
}
