// refcheck-core/src/infrastructure/loader/mod.rs

pub mod dataset;
pub mod model;

pub use dataset::load_row_dataset;
pub use model::load_table_model;
