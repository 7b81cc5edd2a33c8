// refcheck-core/src/infrastructure/error.rs

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug, Diagnostic)]
pub enum InfrastructureError {
    // --- FILESYSTEM (IO) ---
    #[error("File System Error: {0}")]
    #[diagnostic(
        code(refcheck::infra::io),
        help("Check file permissions or path validity.")
    )]
    Io(#[from] std::io::Error),

    // --- JSON (Shards, Datasets) ---
    #[error("JSON Parsing Error: {0}")]
    #[diagnostic(
        code(refcheck::infra::json),
        help("Shard files need a top-level \"Data\" array of records.")
    )]
    JsonError(#[from] serde_json::Error),

    // --- CONFIG / YAML ---
    #[error("YAML Parsing Error: {0}")]
    #[diagnostic(
        code(refcheck::infra::yaml),
        help("Check your YAML syntax (indentation, types).")
    )]
    YamlError(#[from] serde_yaml::Error),

    #[error("Configuration Error: {0}")]
    #[diagnostic(code(refcheck::infra::config))]
    ConfigError(String),

    #[error("Invalid configuration: {0}")]
    #[diagnostic(code(refcheck::infra::config_invalid))]
    InvalidConfig(#[from] validator::ValidationErrors),

    #[error("Verifier configuration not found at '{0}'")]
    #[diagnostic(
        code(refcheck::infra::config_missing),
        help("Create refcheck.yaml or pass --reference-dir.")
    )]
    ConfigNotFound(String),

    #[error("Unsupported file format for {0:?} (expected .json, .yaml or .yml)")]
    #[diagnostic(code(refcheck::infra::format))]
    UnsupportedFormat(PathBuf),
}
