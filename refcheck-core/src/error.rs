// refcheck-core/src/error.rs

use crate::domain::error::DomainError;
use crate::infrastructure::error::InfrastructureError;
use miette::Diagnostic;
use thiserror::Error;

/// Failures of the reference build phase. None of them carries a partial index.
#[derive(Error, Debug, Diagnostic)]
pub enum BuildError {
    #[error("Reference build timed out after {0:.2?}")]
    #[diagnostic(
        code(refcheck::build::timeout),
        help("Raise `build-timeout-secs` or reduce the number of shard files.")
    )]
    TimedOut(std::time::Duration),

    #[error("Reference build cancelled")]
    #[diagnostic(code(refcheck::build::cancelled))]
    Cancelled,

    #[error("Build worker for table '{table}' failed: {reason}")]
    #[diagnostic(code(refcheck::build::worker))]
    WorkerFailed { table: String, reason: String },
}

#[derive(Error, Debug)]
pub enum RefcheckError {
    // --- ERREURS DU DOMAINE (Model, Dataset) ---
    #[error(transparent)]
    Domain(#[from] DomainError),

    // --- ERREURS D'INFRASTRUCTURE (IO, Parsing, Config) ---
    #[error(transparent)]
    Infrastructure(#[from] InfrastructureError),

    // --- ERREURS DE CONSTRUCTION (Timeout, Cancel) ---
    #[error(transparent)]
    Build(#[from] BuildError),

    // --- ERREURS GÉNÉRIQUES / APPLICATIVES ---
    #[error("Internal Error: {0}")]
    InternalError(String),
}

// Manual implementation to avoid duplicate enum variant but keep ergonomics
impl From<std::io::Error> for RefcheckError {
    fn from(err: std::io::Error) -> Self {
        RefcheckError::Infrastructure(InfrastructureError::Io(err))
    }
}
