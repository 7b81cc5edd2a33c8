// refcheck-core/src/infrastructure/loader/model.rs

use std::fs;
use std::path::Path;
use tracing::{info, instrument};

use crate::domain::model::TableModel;
use crate::error::RefcheckError;
use crate::infrastructure::error::InfrastructureError;

/// Loads a table model from `.yaml`/`.yml` or `.json`.
#[instrument]
pub fn load_table_model(path: &Path) -> Result<TableModel, RefcheckError> {
    let content = fs::read_to_string(path)?;

    let model: TableModel = match path.extension().and_then(|e| e.to_str()) {
        Some("yaml" | "yml") => {
            serde_yaml::from_str(&content).map_err(InfrastructureError::YamlError)?
        }
        Some("json") => serde_json::from_str(&content).map_err(InfrastructureError::JsonError)?,
        _ => return Err(InfrastructureError::UnsupportedFormat(path.into()).into()),
    };

    model.validate()?;
    info!(variables = model.variables.len(), "Table model loaded");
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;
    use anyhow::Result;
    use tempfile::tempdir;

    #[test]
    fn test_load_yaml_and_json() -> Result<()> {
        let dir = tempdir()?;
        let yaml_text = "variables:\n  - name: cust\n    metas:\n      fk: Customers:id\n";
        let json_text = r#"{"variables":[{"name":"cust","metas":{"fk":"Customers:id"}}]}"#;
        let yaml = dir.path().join("model.yaml");
        let json = dir.path().join("model.json");
        fs::write(&yaml, yaml_text)?;
        fs::write(&json, json_text)?;

        assert_eq!(load_table_model(&yaml)?, load_table_model(&json)?);
        Ok(())
    }

    #[test]
    fn test_unsupported_extension() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("model.toml");
        fs::write(&path, "")?;
        assert!(matches!(
            load_table_model(&path),
            Err(RefcheckError::Infrastructure(InfrastructureError::UnsupportedFormat(_)))
        ));
        Ok(())
    }

    #[test]
    fn test_invalid_model_rejected() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("model.yml");
        fs::write(&path, "variables:\n  - name: \"\"\n")?;
        assert!(matches!(
            load_table_model(&path),
            Err(RefcheckError::Domain(DomainError::InvalidModel(_)))
        ));
        Ok(())
    }
}
