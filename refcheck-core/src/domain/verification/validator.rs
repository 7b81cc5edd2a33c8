// refcheck-core/src/domain/verification/validator.rs

use std::ops::ControlFlow;

use crate::domain::constraint::{ConstraintSet, FkConstraint};
use crate::domain::index::{Lookup, ReferenceIndex};
use crate::domain::model::RowDataset;
use crate::domain::verification::configuration::ValidationMode;
use crate::domain::verification::report::{VerificationResult, Violation, ViolationKind};

/// Checks dataset rows against a completed, read-only reference index.
pub struct RowValidator<'a> {
    index: &'a ReferenceIndex,
    mode: ValidationMode,
}

impl<'a> RowValidator<'a> {
    pub fn new(index: &'a ReferenceIndex, mode: ValidationMode) -> Self {
        Self { index, mode }
    }

    /// Constraints in model order, rows in dataset order.
    pub fn validate(
        &self,
        dataset: &RowDataset,
        constraints: &ConstraintSet,
    ) -> VerificationResult {
        let mut violations = Vec::new();

        for constraint in constraints.constraints() {
            let flow = self.check_constraint(constraint, dataset, &mut violations);
            if flow.is_break() {
                break;
            }
        }

        VerificationResult::from_violations(violations)
    }

    fn check_constraint(
        &self,
        constraint: &FkConstraint,
        dataset: &RowDataset,
        violations: &mut Vec<Violation>,
    ) -> ControlFlow<()> {
        let lookup = self
            .index
            .lookup(&constraint.target_table, &constraint.target_field);

        for (row_index, row) in dataset.rows.iter().enumerate() {
            // Absence is not a violation.
            let Some(value) = row.get(&constraint.source_field) else {
                continue;
            };

            let kind = match &lookup {
                Lookup::Values(set) if set.contains(value) => continue,
                Lookup::Values(_) => ViolationKind::ValueNotFound,
                Lookup::TableNotFound => ViolationKind::TableNotFound,
                Lookup::FieldNotFound => ViolationKind::FieldNotFound,
            };

            violations.push(Violation::new(kind, constraint, row_index, value));

            if self.mode == ValidationMode::FailFast {
                return ControlFlow::Break(());
            }
        }

        ControlFlow::Continue(())
    }
}
