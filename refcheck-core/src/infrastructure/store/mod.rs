// refcheck-core/src/infrastructure/store/mod.rs

pub mod discovery;
pub mod fs_store;
pub mod reader;

pub use discovery::discover_shards;
pub use fs_store::FsShardStore;
pub use reader::parse_shard;
