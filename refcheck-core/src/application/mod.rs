// refcheck-core/src/application/mod.rs

pub mod builder;
pub mod verifier;

// --- RE-EXPORTS (FACADE PATTERN) ---
// `use refcheck_core::application::{Verifier, ReferenceSetBuilder};`
pub use builder::{BuiltIndex, ReferenceSetBuilder};
pub use verifier::Verifier;
