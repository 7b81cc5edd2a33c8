// refcheck-core/src/domain/error.rs

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum DomainError {
    #[error("Table model is invalid: {0}")]
    #[diagnostic(
        code(refcheck::domain::model),
        help("Every variable needs a non-empty name.")
    )]
    InvalidModel(String),

    #[error("Dataset is invalid: {0}")]
    #[diagnostic(code(refcheck::domain::dataset))]
    InvalidDataset(String),
}
