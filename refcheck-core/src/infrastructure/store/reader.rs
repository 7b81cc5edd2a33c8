// refcheck-core/src/infrastructure/store/reader.rs

use serde::Deserialize;
use serde_json::value::RawValue;
use std::collections::HashMap;

use crate::domain::ports::ShardRecord;

#[derive(Deserialize)]
struct ShardDocument {
    #[serde(rename = "Data")]
    data: Vec<Box<RawValue>>,
}

/// Parses a shard document. Values keep their serialized text exactly as written
/// in the file (`1`, `"1"`, `1.0` are three different values).
pub fn parse_shard(content: &str) -> Result<Vec<Option<ShardRecord>>, serde_json::Error> {
    let doc: ShardDocument = serde_json::from_str(content)?;
    Ok(doc.data.iter().map(|raw| parse_record(raw)).collect())
}

fn parse_record(raw: &RawValue) -> Option<ShardRecord> {
    // null, arrays and scalars are not records
    let fields: HashMap<String, Box<RawValue>> = serde_json::from_str(raw.get()).ok()?;
    let record = fields
        .into_iter()
        .map(|(k, v)| (k, v.get().to_string()))
        .collect();
    Some(record)
}
