// refcheck-core/src/domain/model/mod.rs

pub mod dataset;
pub mod table;

pub use dataset::{RowDataset, RowRecord};
pub use table::{FK_META_KEY, TableModel, Variable};
