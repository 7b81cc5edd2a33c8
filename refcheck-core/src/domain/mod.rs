// refcheck-core/src/domain/mod.rs

pub mod constraint;
pub mod error;
pub mod index;
pub mod model;
pub mod ports;
pub mod verification;

// Re-exports pratiques pour simplifier les imports ailleurs
pub use constraint::{ConstraintSet, FkConstraint};
pub use error::DomainError;
pub use index::ReferenceIndex;
pub use model::{RowDataset, RowRecord, TableModel, Variable};
