// Engine-side views over the shared table model.
pub mod schema;

pub use schema::{ColumnNames, TableSchema};
