// refcheck-core/src/infrastructure/store/discovery.rs

use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Lists the shard files of `table`: every regular file directly under
/// `reference_dir` whose name starts with `table`.
///
/// This is a prefix match. `Order` also picks up `Orders_01.json`; callers that
/// share a directory between such tables get the union.
pub fn discover_shards(reference_dir: &Path, table: &str) -> Vec<PathBuf> {
    if !reference_dir.is_dir() {
        warn!(dir = ?reference_dir, table, "Reference directory not found, no shards");
        return Vec::new();
    }

    let walker = WalkDir::new(reference_dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    let mut shards = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!(table, error = %e, "Unreadable directory entry skipped");
                continue;
            }
        };

        if entry.file_type().is_file() && entry.file_name().to_string_lossy().starts_with(table) {
            shards.push(entry.into_path());
        }
    }

    debug!(table, count = shards.len(), "Shards discovered");
    shards
}
