// refcheck-core/src/domain/verification/report.rs

use serde::Serialize;
use std::fmt;

use crate::domain::constraint::FkConstraint;
use crate::domain::index::BuildStats;
use crate::domain::verification::configuration::ValidationMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ViolationKind {
    /// The referenced table was never indexed (no shard file found).
    TableNotFound,
    /// The table was indexed but no record exposed the referenced field.
    FieldNotFound,
    /// The row value is absent from a populated reference set.
    ValueNotFound,
}

impl ViolationKind {
    /// Structural failures point at configuration or deployment, not at a bad row.
    pub fn is_structural(&self) -> bool {
        !matches!(self, Self::ValueNotFound)
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TableNotFound => write!(f, "reference table not found"),
            Self::FieldNotFound => write!(f, "reference field not found"),
            Self::ValueNotFound => write!(f, "reference value not found"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub kind: ViolationKind,
    /// Field of the verified dataset.
    pub source_field: String,
    /// Referenced table and field.
    pub table: String,
    pub field: String,
    pub row_index: usize,
    pub value: String,
}

impl Violation {
    pub fn new(
        kind: ViolationKind,
        constraint: &FkConstraint,
        row_index: usize,
        value: &str,
    ) -> Self {
        Self {
            kind,
            source_field: constraint.source_field.clone(),
            table: constraint.target_table.clone(),
            field: constraint.target_field.clone(),
            row_index,
            value: value.to_string(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: row {} field '{}' = {} -> {}:{}",
            self.kind, self.row_index, self.source_field, self.value, self.table, self.field
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum VerificationResult {
    Success,
    Failure { violations: Vec<Violation> },
}

impl VerificationResult {
    pub fn from_violations(violations: Vec<Violation>) -> Self {
        if violations.is_empty() {
            Self::Success
        } else {
            Self::Failure { violations }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    pub fn violations(&self) -> &[Violation] {
        match self {
            Self::Success => &[],
            Self::Failure { violations } => violations,
        }
    }

    pub fn first_violation(&self) -> Option<&Violation> {
        self.violations().first()
    }
}

/// Outcome of one `Verifier::verify` call.
#[derive(Debug, Clone, Serialize)]
pub struct VerificationReport {
    pub result: VerificationResult,
    pub mode: ValidationMode,
    pub dataset_version: u64,
    pub rows_checked: usize,
    pub constraints: Vec<FkConstraint>,
    /// Per referenced table, sorted by table name.
    pub builds: Vec<BuildStats>,
    pub verified_at: String,
}

impl VerificationReport {
    pub fn is_success(&self) -> bool {
        self.result.is_success()
    }

    pub fn violations(&self) -> &[Violation] {
        self.result.violations()
    }

    /// Shards that could not be read. A non-empty list means a `ValueNotFound`
    /// may come from missing data rather than from a bad row.
    pub fn has_skipped_shards(&self) -> bool {
        self.builds.iter().any(|b| !b.skipped_shards.is_empty())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
