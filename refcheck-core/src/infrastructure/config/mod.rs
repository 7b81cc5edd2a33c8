pub mod project;

pub use crate::domain::verification::VerifierConfig;
pub use project::{ConfigOverrides, load_verifier_config};
