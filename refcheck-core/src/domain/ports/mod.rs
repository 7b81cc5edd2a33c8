// refcheck-core/src/domain/ports/mod.rs

pub mod shard;

pub use shard::{ShardRecord, ShardStore};
