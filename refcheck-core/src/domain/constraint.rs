// refcheck-core/src/domain/constraint.rs

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use tracing::warn;

use crate::domain::model::TableModel;

/// A single-column foreign key: `source_field` values must exist in
/// `target_table.target_field`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FkConstraint {
    pub source_field: String,
    pub target_table: String,
    pub target_field: String,
}

impl FkConstraint {
    /// Parses `"<Table>:<Field>"`. Anything but exactly two non-empty trimmed
    /// tokens yields `None`.
    pub fn parse(source_field: &str, raw: &str) -> Option<Self> {
        let tokens: Vec<&str> = raw.split(':').map(str::trim).collect();
        match tokens.as_slice() {
            [table, field] if !table.is_empty() && !field.is_empty() => Some(Self {
                source_field: source_field.to_string(),
                target_table: (*table).to_string(),
                target_field: (*field).to_string(),
            }),
            _ => None,
        }
    }
}

impl fmt::Display for FkConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {}:{}",
            self.source_field, self.target_table, self.target_field
        )
    }
}

/// Constraints derived from a table model, plus the build jobs they require.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConstraintSet {
    constraints: Vec<FkConstraint>,
    /// target table -> target fields to index. One entry per build job.
    targets: BTreeMap<String, BTreeSet<String>>,
}

impl ConstraintSet {
    /// Pure function of the model: same model, same set.
    pub fn extract(model: &TableModel) -> Self {
        let mut set = Self::default();

        for variable in &model.variables {
            let Some(raw) = variable.fk() else {
                continue;
            };

            match FkConstraint::parse(&variable.name, raw) {
                Some(constraint) => set.push(constraint),
                None => warn!(
                    variable = %variable.name,
                    fk = %raw,
                    "Malformed fk metadata (expected '<Table>:<Field>'), constraint skipped"
                ),
            }
        }

        set
    }

    fn push(&mut self, constraint: FkConstraint) {
        self.targets
            .entry(constraint.target_table.clone())
            .or_default()
            .insert(constraint.target_field.clone());
        self.constraints.push(constraint);
    }

    pub fn constraints(&self) -> &[FkConstraint] {
        &self.constraints
    }

    pub fn targets(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.targets
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }
}
