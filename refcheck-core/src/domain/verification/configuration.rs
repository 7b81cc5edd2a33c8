// refcheck-core/src/domain/verification/configuration.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use validator::{Validate, ValidationError};

/// How many violations a verification collects.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    /// Stop at the first violation (gating pipelines).
    #[default]
    #[serde(alias = "fail-fast")]
    FailFast,
    /// Report every violation (authoring feedback).
    Accumulate,
}

impl FromStr for ValidationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "fail_fast" => Ok(Self::FailFast),
            "accumulate" => Ok(Self::Accumulate),
            other => Err(format!(
                "unknown mode '{}' (expected 'fail-fast' or 'accumulate')",
                other
            )),
        }
    }
}

impl fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FailFast => write!(f, "fail-fast"),
            Self::Accumulate => write!(f, "accumulate"),
        }
    }
}

/// How a shard value is turned into the text compared against row values.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ValueEncoding {
    /// Serialized JSON text as written in the shard: `1` and `"1"` differ.
    #[default]
    Raw,
    /// JSON strings compare by content, every other value stays raw.
    Text,
}

impl ValueEncoding {
    pub fn encode(&self, raw: &str) -> String {
        match self {
            Self::Raw => raw.to_string(),
            Self::Text => serde_json::from_str::<String>(raw).unwrap_or_else(|_| raw.to_string()),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Validate, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct VerifierConfig {
    /// Directory scanned for `<Table>*` shard files.
    #[validate(custom(function = "validate_reference_dir"))]
    pub reference_dir: PathBuf,

    #[serde(default)]
    pub mode: ValidationMode,

    #[serde(default)]
    pub value_encoding: ValueEncoding,

    #[validate(range(min = 1, max = 256, message = "must be in 1..=256"))]
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    #[validate(range(min = 1, message = "must be at least 1"))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_timeout_secs: Option<u64>,
}

impl VerifierConfig {
    pub fn new(reference_dir: impl Into<PathBuf>) -> Self {
        Self {
            reference_dir: reference_dir.into(),
            mode: ValidationMode::default(),
            value_encoding: ValueEncoding::default(),
            max_concurrency: default_max_concurrency(),
            build_timeout_secs: None,
        }
    }

    pub fn with_mode(mut self, mode: ValidationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_value_encoding(mut self, encoding: ValueEncoding) -> Self {
        self.value_encoding = encoding;
        self
    }

    pub fn with_max_concurrency(mut self, max: usize) -> Self {
        self.max_concurrency = max;
        self
    }

    pub fn build_timeout(&self) -> Option<Duration> {
        self.build_timeout_secs.map(Duration::from_secs)
    }
}

fn default_max_concurrency() -> usize {
    8
}

#[allow(clippy::ptr_arg)]
fn validate_reference_dir(dir: &PathBuf) -> Result<(), ValidationError> {
    if dir.as_os_str().is_empty() {
        let mut err = ValidationError::new("reference_dir_empty");
        err.message = Some("reference-dir cannot be empty".into());
        return Err(err);
    }
    Ok(())
}
