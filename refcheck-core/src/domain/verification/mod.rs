// refcheck-core/src/domain/verification/mod.rs

pub mod configuration;
pub mod report;
pub mod validator;

pub use configuration::{ValidationMode, ValueEncoding, VerifierConfig};
pub use report::{VerificationReport, VerificationResult, Violation, ViolationKind};
pub use validator::RowValidator;
