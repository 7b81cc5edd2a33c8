// refcheck-core/src/infrastructure/store/fs_store.rs

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::instrument;

use crate::domain::ports::{ShardRecord, ShardStore};
use crate::error::RefcheckError;
use crate::infrastructure::error::InfrastructureError;
use crate::infrastructure::store::{discover_shards, parse_shard};

/// Shard files in a single reference directory.
#[derive(Debug, Clone)]
pub struct FsShardStore {
    reference_dir: PathBuf,
}

impl FsShardStore {
    pub fn new(reference_dir: impl Into<PathBuf>) -> Self {
        Self {
            reference_dir: reference_dir.into(),
        }
    }
}

#[async_trait]
impl ShardStore for FsShardStore {
    async fn list_shards(&self, table: &str) -> Result<Vec<PathBuf>, RefcheckError> {
        let dir = self.reference_dir.clone();
        let table = table.to_string();
        tokio::task::spawn_blocking(move || discover_shards(&dir, &table))
            .await
            .map_err(|e| RefcheckError::InternalError(format!("Shard discovery panicked: {}", e)))
    }

    #[instrument(skip(self))]
    async fn read_shard(&self, shard: &Path) -> Result<Vec<Option<ShardRecord>>, RefcheckError> {
        let content = tokio::fs::read_to_string(shard)
            .await
            .map_err(InfrastructureError::Io)?;
        let records = parse_shard(&content).map_err(InfrastructureError::JsonError)?;
        Ok(records)
    }
}
