// refcheck-core/src/domain/ports/shard.rs

// What the build phase needs from reference data, without knowing where it lives.
// The filesystem adapter is in infrastructure::store; tests plug in-memory stores.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::RefcheckError;

/// One entry of a shard's `Data` array: field -> raw serialized JSON text.
pub type ShardRecord = HashMap<String, String>;

#[async_trait]
pub trait ShardStore: Send + Sync {
    /// Every shard whose file name starts with `table`, in a stable order.
    async fn list_shards(&self, table: &str) -> Result<Vec<PathBuf>, RefcheckError>;

    /// Records of one shard. `None` marks a `null` or non-object entry.
    async fn read_shard(&self, shard: &Path) -> Result<Vec<Option<ShardRecord>>, RefcheckError>;
}
