// refcheck-core/src/infrastructure/loader/dataset.rs

use serde::Deserialize;
use serde_json::value::RawValue;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{info, instrument};

use crate::domain::error::DomainError;
use crate::domain::model::{RowDataset, RowRecord};
use crate::domain::verification::ValueEncoding;
use crate::error::RefcheckError;
use crate::infrastructure::error::InfrastructureError;

type RawRow = HashMap<String, Box<RawValue>>;

#[derive(Deserialize)]
struct RawDataset {
    #[serde(default, rename = "Version", alias = "version")]
    version: u64,
    #[serde(default, rename = "Data", alias = "data", alias = "rows")]
    rows: Vec<RawRow>,
}

/// Loads `{ "Version": n, "Data": [ {field: value} ] }`.
///
/// Row values become text the way a flat-file loader would produce them:
/// strings unquoted, numbers and booleans exactly as written (`1.50` stays
/// `1.50`), `null` means the field is absent.
#[instrument]
pub fn load_row_dataset(path: &Path) -> Result<RowDataset, RefcheckError> {
    let content = fs::read_to_string(path)?;
    let raw: RawDataset = serde_json::from_str(&content).map_err(InfrastructureError::JsonError)?;

    let rows = raw
        .rows
        .into_iter()
        .enumerate()
        .map(|(i, fields)| to_row(i, fields))
        .collect::<Result<Vec<_>, _>>()?;

    info!(version = raw.version, rows = rows.len(), "Dataset loaded");
    Ok(RowDataset::new(raw.version, rows))
}

fn to_row(index: usize, fields: RawRow) -> Result<RowRecord, DomainError> {
    let mut row = RowRecord::with_capacity(fields.len());
    for (key, value) in fields {
        let raw = value.get();
        let text = match raw.as_bytes().first() {
            // null
            Some(b'n') => continue,
            Some(b'"') => ValueEncoding::Text.encode(raw),
            Some(b'[' | b'{') => {
                return Err(DomainError::InvalidDataset(format!(
                    "row {} field '{}' is not a scalar",
                    index, key
                )));
            }
            _ => raw.to_string(),
        };
        row.insert(key, text);
    }
    Ok(row)
}
