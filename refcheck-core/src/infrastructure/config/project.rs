// refcheck-core/src/infrastructure/config/project.rs

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};
use validator::Validate;

use crate::domain::verification::{ValidationMode, VerifierConfig};
use crate::infrastructure::error::InfrastructureError;

const CONFIG_CANDIDATES: [&str; 2] = ["refcheck.yaml", "refcheck.yml"];

/// Values given on the command line. They win over the file and the environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub reference_dir: Option<PathBuf>,
    pub mode: Option<ValidationMode>,
}

#[instrument(skip(project_dir, overrides))]
pub fn load_verifier_config(
    project_dir: &Path,
    overrides: &ConfigOverrides,
) -> Result<VerifierConfig, InfrastructureError> {
    // 1. Main file, otherwise a minimal config from the flags
    let mut config = match find_main_config(project_dir) {
        Some(config_path) => {
            info!(path = ?config_path, "Loading verifier configuration");
            let content = fs::read_to_string(&config_path)?;
            let mut config = serde_yaml::from_str::<VerifierConfig>(&content)?;
            config.reference_dir =
                resolve_in_project(project_dir, std::mem::take(&mut config.reference_dir));
            config
        }
        None => match &overrides.reference_dir {
            Some(dir) => VerifierConfig::new(dir.clone()),
            None => {
                return Err(InfrastructureError::ConfigNotFound(format!(
                    "{:?} (checked {:?})",
                    project_dir, CONFIG_CANDIDATES
                )));
            }
        },
    };

    // 2. Layering: ENV, then flags (paths kept as given, relative to cwd)
    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    apply_overrides(&mut config, overrides);

    config.validate()?;
    Ok(config)
}

/// A relative `reference-dir` read from the file points inside the project,
/// not at the caller's cwd.
fn resolve_in_project(project_dir: &Path, dir: PathBuf) -> PathBuf {
    if dir.is_relative() && !dir.as_os_str().is_empty() {
        project_dir.join(dir)
    } else {
        dir
    }
}

fn find_main_config(root: &Path) -> Option<PathBuf> {
    CONFIG_CANDIDATES
        .iter()
        .map(|name| root.join(name))
        .find(|p| p.exists())
}

/// REFCHECK_REFERENCE_DIR=/data/ref REFCHECK_MODE=accumulate refcheck verify ...
fn apply_env_overrides<F>(config: &mut VerifierConfig, lookup: F) -> Result<(), InfrastructureError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(val) = lookup("REFCHECK_REFERENCE_DIR") {
        info!(old = ?config.reference_dir, new = ?val, "Overriding reference dir via ENV");
        config.reference_dir = PathBuf::from(val);
    }
    if let Some(val) = lookup("REFCHECK_MODE") {
        config.mode = val
            .parse()
            .map_err(|e| InfrastructureError::ConfigError(format!("REFCHECK_MODE: {}", e)))?;
        info!(mode = %config.mode, "Overriding mode via ENV");
    }
    Ok(())
}

fn apply_overrides(config: &mut VerifierConfig, overrides: &ConfigOverrides) {
    if let Some(dir) = &overrides.reference_dir {
        config.reference_dir = dir.clone();
    }
    if let Some(mode) = overrides.mode {
        config.mode = mode;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_load_from_file_resolves_relative_dir() -> Result<()> {
        let dir = tempdir()?;
        fs::write(
            dir.path().join("refcheck.yaml"),
            "reference-dir: ref\nmode: accumulate\n",
        )?;

        let config = load_verifier_config(dir.path(), &ConfigOverrides::default())?;
        assert_eq!(config.reference_dir, dir.path().join("ref"));
        assert_eq!(config.mode, ValidationMode::Accumulate);
        Ok(())
    }

    #[test]
    fn test_flags_override_file() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("refcheck.yml"), "reference-dir: ref\n")?;

        let overrides = ConfigOverrides {
            reference_dir: Some(PathBuf::from("/abs/shards")),
            mode: Some(ValidationMode::Accumulate),
        };
        let config = load_verifier_config(dir.path(), &overrides)?;
        assert_eq!(config.reference_dir, PathBuf::from("/abs/shards"));
        assert_eq!(config.mode, ValidationMode::Accumulate);
        Ok(())
    }

    #[test]
    fn test_missing_file_without_flag() -> Result<()> {
        let dir = tempdir()?;
        let res = load_verifier_config(dir.path(), &ConfigOverrides::default());
        assert!(matches!(res, Err(InfrastructureError::ConfigNotFound(_))));
        Ok(())
    }

    #[test]
    fn test_missing_file_with_flag() -> Result<()> {
        let dir = tempdir()?;
        let overrides = ConfigOverrides {
            reference_dir: Some(PathBuf::from("ref")),
            mode: None,
        };
        let config = load_verifier_config(dir.path(), &overrides)?;
        assert_eq!(config.reference_dir, PathBuf::from("ref"));
        assert_eq!(config.max_concurrency, 8);
        Ok(())
    }

    #[test]
    fn test_relative_flag_is_not_joined_to_project_dir() -> Result<()> {
        let dir = tempdir()?;
        fs::write(dir.path().join("refcheck.yaml"), "reference-dir: ref\n")?;

        let overrides = ConfigOverrides {
            reference_dir: Some(PathBuf::from("elsewhere/shards")),
            mode: None,
        };
        let config = load_verifier_config(dir.path(), &overrides)?;
        assert_eq!(config.reference_dir, PathBuf::from("elsewhere/shards"));
        Ok(())
    }

    #[test]
    fn test_invalid_file_is_rejected() -> Result<()> {
        let dir = tempdir()?;
        fs::write(
            dir.path().join("refcheck.yaml"),
            "reference-dir: ref\nmax-concurrency: 0\n",
        )?;
        let res = load_verifier_config(dir.path(), &ConfigOverrides::default());
        assert!(matches!(res, Err(InfrastructureError::InvalidConfig(_))));
        Ok(())
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("REFCHECK_REFERENCE_DIR", "/env/ref"),
            ("REFCHECK_MODE", "accumulate"),
        ]
        .into_iter()
        .collect();

        let mut config = VerifierConfig::new("ref");
        apply_env_overrides(&mut config, |k| env.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(config.reference_dir, PathBuf::from("/env/ref"));
        assert_eq!(config.mode, ValidationMode::Accumulate);

        let bad = |k: &str| (k == "REFCHECK_MODE").then(|| "sometimes".to_string());
        assert!(matches!(
            apply_env_overrides(&mut config, bad),
            Err(InfrastructureError::ConfigError(_))
        ));
    }
}
