// Engine library root: discount engine, table operations and price-list I/O.
// The engine holds no session state; callers pass the table and discounts on every call.

pub mod config;
pub mod data;
pub mod discount;
pub mod error;
pub mod models;
pub mod table;

pub use discount::{apply_discount, recompute_table, DiscountRule};
pub use error::EngineError;
