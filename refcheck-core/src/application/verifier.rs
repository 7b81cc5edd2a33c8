// refcheck-core/src/application/verifier.rs

use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

use crate::application::builder::{BuiltIndex, ReferenceSetBuilder};
use crate::domain::constraint::ConstraintSet;
use crate::domain::model::{RowDataset, TableModel};
use crate::domain::ports::ShardStore;
use crate::domain::verification::{RowValidator, VerificationReport, VerifierConfig};
use crate::error::RefcheckError;
use crate::infrastructure::store::FsShardStore;

/// Extract -> Build -> Validate -> Report.
///
/// Holds no index between calls: every `verify` rescans the shards, so two
/// verifications never share stale reference data.
pub struct Verifier {
    store: Arc<dyn ShardStore>,
    config: VerifierConfig,
}

impl Verifier {
    pub fn new(store: Arc<dyn ShardStore>, config: VerifierConfig) -> Self {
        Self { store, config }
    }

    /// Verifier reading shards from `config.reference_dir`.
    pub fn from_config(config: VerifierConfig) -> Self {
        let store = Arc::new(FsShardStore::new(config.reference_dir.clone()));
        Self::new(store, config)
    }

    pub async fn verify(
        &self,
        dataset: &RowDataset,
        model: &TableModel,
    ) -> Result<VerificationReport, RefcheckError> {
        self.verify_with_cancellation(dataset, model, &CancellationToken::new())
            .await
    }

    /// Integrity violations come back inside the report. `Err` only means the
    /// reference build itself could not complete (timeout, cancellation).
    #[instrument(skip_all, fields(rows = dataset.len(), mode = %self.config.mode))]
    pub async fn verify_with_cancellation(
        &self,
        dataset: &RowDataset,
        model: &TableModel,
        cancel: &CancellationToken,
    ) -> Result<VerificationReport, RefcheckError> {
        // 1. Constraints (pure)
        let constraints = ConstraintSet::extract(model);
        info!(
            constraints = constraints.len(),
            tables = constraints.targets().len(),
            "Foreign keys extracted"
        );

        // 2. Reference sets (parallel I/O, joined before anything reads them)
        let built = if constraints.is_empty() {
            BuiltIndex::default()
        } else {
            self.builder().build(&constraints, cancel).await?
        };

        for stats in &built.stats {
            if !stats.skipped_shards.is_empty() {
                warn!(
                    table = %stats.table,
                    skipped = stats.skipped_shards.len(),
                    "Some shards were unreadable, missing values may be false negatives"
                );
            }
        }

        // 3. Rows (read-only over the completed index)
        let validator = RowValidator::new(&built.index, self.config.mode);
        let result = validator.validate(dataset, &constraints);

        info!(
            success = result.is_success(),
            violations = result.violations().len(),
            "Verification finished"
        );

        // 4. Report
        Ok(VerificationReport {
            result,
            mode: self.config.mode,
            dataset_version: dataset.version,
            rows_checked: dataset.len(),
            constraints: constraints.constraints().to_vec(),
            builds: built.stats,
            verified_at: chrono::Utc::now().to_rfc3339(),
        })
    }

    /// Builds the reference index for `model` without validating any row.
    pub async fn build_index(&self, model: &TableModel) -> Result<BuiltIndex, RefcheckError> {
        let constraints = ConstraintSet::extract(model);
        self.builder()
            .build(&constraints, &CancellationToken::new())
            .await
    }

    fn builder(&self) -> ReferenceSetBuilder {
        ReferenceSetBuilder::from_config(Arc::clone(&self.store), &self.config)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::model::{RowRecord, Variable};
    use crate::domain::verification::{ValidationMode, ValueEncoding, ViolationKind};
    use crate::error::BuildError;
    use anyhow::Result;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    /// Writes a shard whose `Data` array is `records`.
    fn write_shard(dir: &Path, name: &str, records: &str) -> Result<()> {
        fs::write(dir.join(name), format!(r#"{{"Data":{}}}"#, records))?;
        Ok(())
    }

    fn model(vars: &[(&str, Option<&str>)]) -> TableModel {
        let variables = vars
            .iter()
            .map(|(name, fk)| match fk {
                Some(fk) => Variable::new(*name).with_meta("fk", *fk),
                None => Variable::new(*name),
            })
            .collect();
        TableModel::new(variables)
    }

    fn rows(field: &str, values: &[&str]) -> RowDataset {
        RowDataset::new(
            1,
            values
                .iter()
                .map(|v| {
                    let mut r = RowRecord::new();
                    r.insert(field.to_string(), v.to_string());
                    r
                })
                .collect(),
        )
    }

    #[tokio::test]
    async fn test_no_fk_metadata_always_passes() -> Result<()> {
        let dir = tempdir()?;
        let verifier = Verifier::from_config(VerifierConfig::new(dir.path()));

        let report = verifier
            .verify(&rows("id", &["whatever"]), &model(&[("id", None)]))
            .await?;

        assert!(report.is_success());
        assert!(report.constraints.is_empty());
        assert!(report.builds.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_fk_never_fails_verification() -> Result<()> {
        let dir = tempdir()?;
        let verifier = Verifier::from_config(VerifierConfig::new(dir.path()));

        for fk in ["", "Orders", "Orders:id:x"] {
            let report = verifier
                .verify(&rows("order", &["1"]), &model(&[("order", Some(fk))]))
                .await?;
            assert!(report.is_success(), "fk '{}' should be ignored", fk);
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_value_found_and_not_found() -> Result<()> {
        let dir = tempdir()?;
        write_shard(dir.path(), "Orders_1.json", r#"[{"id":1},{"id":2}]"#)?;
        let verifier = Verifier::from_config(VerifierConfig::new(dir.path()));
        let m = model(&[("order", Some("Orders:id"))]);

        let report = verifier.verify(&rows("order", &["1"]), &m).await?;
        assert!(report.is_success());

        let report = verifier.verify(&rows("order", &["3"]), &m).await?;
        let v = report.violations()[0].clone();
        assert_eq!(v.kind, ViolationKind::ValueNotFound);
        assert_eq!(v.table, "Orders");
        assert_eq!(v.field, "id");
        assert_eq!(v.row_index, 0);
        assert_eq!(v.value, "3");
        Ok(())
    }

    #[tokio::test]
    async fn test_string_keys_need_text_encoding() -> Result<()> {
        let dir = tempdir()?;
        write_shard(dir.path(), "Customers.json", r#"[{"id":"1"},{"id":"2"}]"#)?;
        let m = model(&[("cust", Some("Customers:id"))]);

        // Raw: the shard value is `"1"` (quoted), the row value is `1`.
        let raw = Verifier::from_config(VerifierConfig::new(dir.path()));
        let report = raw.verify(&rows("cust", &["1"]), &m).await?;
        assert_eq!(
            report.violations().first().map(|v| v.kind),
            Some(ViolationKind::ValueNotFound)
        );

        let config = VerifierConfig::new(dir.path()).with_value_encoding(ValueEncoding::Text);
        let text = Verifier::from_config(config);
        assert!(text.verify(&rows("cust", &["1"]), &m).await?.is_success());
        assert!(!text.verify(&rows("cust", &["3"]), &m).await?.is_success());
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_table_reports_table_not_found() -> Result<()> {
        let dir = tempdir()?;
        write_shard(dir.path(), "Customers.json", r#"[{"id":1}]"#)?;
        let verifier = Verifier::from_config(VerifierConfig::new(dir.path()));
        let m = model(&[("order", Some("Orders:id"))]);

        let report = verifier.verify(&rows("order", &["1"]), &m).await?;

        assert_eq!(report.violations()[0].kind, ViolationKind::TableNotFound);
        assert_eq!(report.builds[0].shards_discovered, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_accumulate_mode_reports_every_bad_row() -> Result<()> {
        let dir = tempdir()?;
        write_shard(dir.path(), "Orders.json", r#"[{"id":1}]"#)?;
        let config = VerifierConfig::new(dir.path()).with_mode(ValidationMode::Accumulate);
        let verifier = Verifier::from_config(config);
        let m = model(&[("order", Some("Orders:id"))]);

        let report = verifier.verify(&rows("order", &["9", "1", "8"]), &m).await?;

        let idx: Vec<usize> = report.violations().iter().map(|v| v.row_index).collect();
        assert_eq!(idx, vec![0, 2]);
        assert_eq!(report.mode, ValidationMode::Accumulate);
        Ok(())
    }

    #[tokio::test]
    async fn test_index_is_not_reused_between_calls() -> Result<()> {
        let dir = tempdir()?;
        write_shard(dir.path(), "Orders.json", r#"[{"id":1}]"#)?;
        let verifier = Verifier::from_config(VerifierConfig::new(dir.path()));
        let m = model(&[("order", Some("Orders:id"))]);

        let before = verifier.verify(&rows("order", &["2"]), &m).await?;
        assert!(!before.is_success());

        write_shard(dir.path(), "Orders_new.json", r#"[{"id":2}]"#)?;
        let after = verifier.verify(&rows("order", &["2"]), &m).await?;
        assert!(after.is_success());
        Ok(())
    }

    #[tokio::test]
    async fn test_cancellation_is_an_error_not_a_partial_report() -> Result<()> {
        let dir = tempdir()?;
        write_shard(dir.path(), "Orders.json", r#"[{"id":1}]"#)?;
        let verifier = Verifier::from_config(VerifierConfig::new(dir.path()));
        let token = CancellationToken::new();
        token.cancel();

        let res = verifier
            .verify_with_cancellation(
                &rows("order", &["1"]),
                &model(&[("order", Some("Orders:id"))]),
                &token,
            )
            .await;
        assert!(matches!(res, Err(RefcheckError::Build(BuildError::Cancelled))));
        Ok(())
    }

    #[tokio::test]
    async fn test_build_index_summary() -> Result<()> {
        let dir = tempdir()?;
        write_shard(dir.path(), "Orders_a.json", r#"[{"id":1,"code":"x"}]"#)?;
        write_shard(dir.path(), "Orders_b.json", r#"[{"id":2}]"#)?;
        let verifier = Verifier::from_config(VerifierConfig::new(dir.path()));
        let m = model(&[("a", Some("Orders:id")), ("b", Some("Orders:code"))]);

        let built = verifier.build_index(&m).await?;

        let summary = built.index.summary();
        assert_eq!(summary["Orders"]["id"], 2);
        assert_eq!(summary["Orders"]["code"], 1);
        Ok(())
    }
}
