// refcheck-core/src/domain/model/table.rs

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::error::DomainError;

/// Metadata key declaring a foreign-key reference (`"<Table>:<Field>"`).
pub const FK_META_KEY: &str = "fk";

/// Ordered list of variables describing the table under verification.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct TableModel {
    #[serde(default, alias = "Variables")]
    pub variables: Vec<Variable>,
}

/// A column of the table model with its free-form metadata.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Variable {
    #[serde(alias = "Name")]
    pub name: String,

    #[serde(default, alias = "Metas")]
    pub metas: HashMap<String, String>,
}

impl Variable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            metas: HashMap::new(),
        }
    }

    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metas.insert(key.into(), value.into());
        self
    }

    /// Raw `fk` metadata, if declared.
    pub fn fk(&self) -> Option<&str> {
        self.metas.get(FK_META_KEY).map(String::as_str)
    }
}

impl TableModel {
    pub fn new(variables: Vec<Variable>) -> Self {
        Self { variables }
    }

    /// Structural check run by the loaders. Metadata content is never checked here.
    pub fn validate(&self) -> Result<(), DomainError> {
        for (i, v) in self.variables.iter().enumerate() {
            if v.name.trim().is_empty() {
                return Err(DomainError::InvalidModel(format!(
                    "variable #{} has an empty name",
                    i
                )));
            }
        }
        Ok(())
    }
}
