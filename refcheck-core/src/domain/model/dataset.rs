// refcheck-core/src/domain/model/dataset.rs

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One row of the dataset under verification: field name → textual value.
pub type RowRecord = HashMap<String, String>;

/// Rows to verify, plus the format version of the producing loader.
///
/// `version` is carried through to the report but does not influence validation.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct RowDataset {
    #[serde(default, rename = "Version", alias = "version")]
    pub version: u64,

    #[serde(default, rename = "Data", alias = "data", alias = "rows")]
    pub rows: Vec<RowRecord>,
}

impl RowDataset {
    pub fn new(version: u64, rows: Vec<RowRecord>) -> Self {
        Self { version, rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
