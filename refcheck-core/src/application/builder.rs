// refcheck-core/src/application/builder.rs

use futures::StreamExt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

use crate::domain::constraint::ConstraintSet;
use crate::domain::index::{BuildStats, ReferenceIndex, SkippedShard, TableBuild};
use crate::domain::ports::{ShardRecord, ShardStore};
use crate::domain::verification::{ValueEncoding, VerifierConfig};
use crate::error::{BuildError, RefcheckError};

/// Completed reference sets plus what each table's build went through.
#[derive(Debug, Default)]
pub struct BuiltIndex {
    pub index: ReferenceIndex,
    /// Sorted by table name.
    pub stats: Vec<BuildStats>,
}

/// Builds one reference set per `(table, field)` requested by a constraint set.
///
/// Each referenced table is an independent unit running on its own task and
/// owning its sets; files of a table are read one after the other. Units are
/// merged into the index only after all of them joined, so nothing downstream
/// can observe a partially built table.
pub struct ReferenceSetBuilder {
    store: Arc<dyn ShardStore>,
    max_concurrency: usize,
    encoding: ValueEncoding,
    timeout: Option<Duration>,
}

impl ReferenceSetBuilder {
    pub fn new(store: Arc<dyn ShardStore>) -> Self {
        Self {
            store,
            max_concurrency: 8,
            encoding: ValueEncoding::Raw,
            timeout: None,
        }
    }

    pub fn from_config(store: Arc<dyn ShardStore>, config: &VerifierConfig) -> Self {
        let builder = Self::new(store)
            .with_max_concurrency(config.max_concurrency)
            .with_encoding(config.value_encoding);
        match config.build_timeout() {
            Some(limit) => builder.with_timeout(limit),
            None => builder,
        }
    }

    pub fn with_max_concurrency(mut self, max: usize) -> Self {
        self.max_concurrency = max.max(1);
        self
    }

    pub fn with_encoding(mut self, encoding: ValueEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Runs every table unit and waits for all of them.
    ///
    /// Cancelling `cancel` (or hitting the timeout) stops in-flight reads and
    /// returns a `BuildError`; no partial index is ever returned.
    #[instrument(skip_all, fields(tables = constraints.targets().len()))]
    pub async fn build(
        &self,
        constraints: &ConstraintSet,
        cancel: &CancellationToken,
    ) -> Result<BuiltIndex, RefcheckError> {
        // Child token: a timeout stops our units without cancelling the caller.
        let token = cancel.child_token();
        let work = self.run_units(constraints, token.clone());

        let builds = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, work).await {
                Ok(res) => res?,
                Err(_) => {
                    token.cancel();
                    warn!(?limit, "Reference build timed out");
                    return Err(BuildError::TimedOut(limit).into());
                }
            },
            None => work.await?,
        };

        Ok(merge(builds))
    }

    async fn run_units(
        &self,
        constraints: &ConstraintSet,
        token: CancellationToken,
    ) -> Result<Vec<TableBuild>, RefcheckError> {
        let jobs: Vec<(String, Vec<String>)> = constraints
            .targets()
            .iter()
            .map(|(table, fields)| (table.clone(), fields.iter().cloned().collect()))
            .collect();

        info!(
            tables = jobs.len(),
            workers = self.max_concurrency,
            "Building reference sets"
        );

        // Spawning happens lazily, so at most `max_concurrency` units run at once.
        let units = jobs.into_iter().map(|(table, fields)| {
            let store = Arc::clone(&self.store);
            let token = token.clone();
            let encoding = self.encoding;
            let handle = tokio::spawn(build_table(store, table.clone(), fields, encoding, token));
            async move { (table, handle.await) }
        });

        let results: Vec<_> = futures::stream::iter(units)
            .buffer_unordered(self.max_concurrency)
            .collect()
            .await;

        let mut builds = Vec::with_capacity(results.len());
        for (table, joined) in results {
            match joined {
                Ok(Ok(build)) => builds.push(build),
                Ok(Err(e)) => return Err(e),
                Err(join_err) => {
                    token.cancel();
                    return Err(BuildError::WorkerFailed {
                        table,
                        reason: join_err.to_string(),
                    }
                    .into());
                }
            }
        }
        Ok(builds)
    }
}

/// One table: discover its shards, read them in order, fold every requested
/// field into the table's private sets.
async fn build_table(
    store: Arc<dyn ShardStore>,
    table: String,
    fields: Vec<String>,
    encoding: ValueEncoding,
    cancel: CancellationToken,
) -> Result<TableBuild, RefcheckError> {
    let mut build = TableBuild::new(&table);

    let listed = tokio::select! {
        biased;
        _ = cancel.cancelled() => return Err(BuildError::Cancelled.into()),
        res = store.list_shards(&table) => res,
    };
    let shards: Vec<PathBuf> = listed.unwrap_or_else(|e| {
        warn!(table = %table, error = %e, "Shard discovery failed, table left empty");
        Vec::new()
    });
    build.stats.shards_discovered = shards.len();

    for shard in shards {
        let read = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(BuildError::Cancelled.into()),
            res = store.read_shard(&shard) => res,
        };

        match read {
            Ok(records) => {
                build.stats.shards_read += 1;
                absorb_records(&mut build, records, &fields, encoding);
            }
            Err(e) => {
                warn!(table = %table, shard = ?shard, error = %e, "Shard skipped");
                build.stats.skipped_shards.push(SkippedShard {
                    path: shard,
                    reason: e.to_string(),
                });
            }
        }
    }

    debug!(
        table = %table,
        shards = build.stats.shards_read,
        records = build.stats.records_seen,
        "Table reference sets built"
    );
    Ok(build)
}

fn absorb_records(
    build: &mut TableBuild,
    records: Vec<Option<ShardRecord>>,
    fields: &[String],
    encoding: ValueEncoding,
) {
    for record in records {
        build.stats.records_seen += 1;
        let Some(record) = record else {
            build.stats.records_skipped += 1;
            continue;
        };

        // A record without the field contributes nothing for it.
        for field in fields {
            if let Some(raw) = record.get(field) {
                build
                    .fields
                    .entry(field.clone())
                    .or_default()
                    .insert(encoding.encode(raw));
            }
        }
    }
}

/// A table is indexed only if at least one shard file was found for it.
fn merge(mut builds: Vec<TableBuild>) -> BuiltIndex {
    builds.sort_by(|a, b| a.table.cmp(&b.table));

    let mut built = BuiltIndex::default();
    for build in builds {
        if build.stats.shards_discovered > 0 {
            built.index.insert_table(build.table, build.fields);
        }
        built.stats.push(build.stats);
    }
    built
}
