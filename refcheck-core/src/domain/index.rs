// refcheck-core/src/domain/index.rs

use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::PathBuf;

/// Distinct admissible values for one `(table, field)`.
pub type ValueSet = HashSet<String>;

/// field -> values, for one reference table.
pub type FieldValues = HashMap<String, ValueSet>;

/// Result of looking up a `(table, field)` pair.
#[derive(Debug, PartialEq, Eq)]
pub enum Lookup<'a> {
    TableNotFound,
    FieldNotFound,
    Values(&'a ValueSet),
}

/// Materialized reference sets, scoped to a single verification.
///
/// Tables are inserted once, after their build completed, and never mutated
/// afterwards.
#[derive(Debug, Default, Clone)]
pub struct ReferenceIndex {
    tables: HashMap<String, FieldValues>,
}

impl ReferenceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a completed table. Returns `false` and leaves the index untouched
    /// if the table was already present.
    pub fn insert_table(&mut self, table: impl Into<String>, fields: FieldValues) -> bool {
        let table = table.into();
        if self.tables.contains_key(&table) {
            return false;
        }
        self.tables.insert(table, fields);
        true
    }

    pub fn lookup(&self, table: &str, field: &str) -> Lookup<'_> {
        match self.tables.get(table) {
            None => Lookup::TableNotFound,
            Some(fields) => match fields.get(field) {
                None => Lookup::FieldNotFound,
                Some(values) => Lookup::Values(values),
            },
        }
    }

    pub fn contains_table(&self, table: &str) -> bool {
        self.tables.contains_key(table)
    }

    pub fn fields(&self, table: &str) -> Option<&FieldValues> {
        self.tables.get(table)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// table -> field -> number of distinct values, sorted for display.
    pub fn summary(&self) -> BTreeMap<String, BTreeMap<String, usize>> {
        self.tables
            .iter()
            .map(|(table, fields)| {
                let counts = fields
                    .iter()
                    .map(|(field, values)| (field.clone(), values.len()))
                    .collect();
                (table.clone(), counts)
            })
            .collect()
    }
}

/// A shard that contributed nothing because it could not be read or parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedShard {
    pub path: PathBuf,
    pub reason: String,
}

/// What happened while building one table's reference sets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildStats {
    pub table: String,
    pub shards_discovered: usize,
    pub shards_read: usize,
    pub records_seen: usize,
    /// `null` or non-object entries of a `Data` array.
    pub records_skipped: usize,
    pub skipped_shards: Vec<SkippedShard>,
}

/// Private output of one table's build unit, merged into the index after join.
#[derive(Debug, Clone, Default)]
pub struct TableBuild {
    pub table: String,
    pub fields: FieldValues,
    pub stats: BuildStats,
}

impl TableBuild {
    pub fn new(table: impl Into<String>) -> Self {
        let table = table.into();
        Self {
            stats: BuildStats {
                table: table.clone(),
                ..Default::default()
            },
            table,
            fields: FieldValues::new(),
        }
    }
}
