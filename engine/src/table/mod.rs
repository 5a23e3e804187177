// Row views and edits over a loaded price list
pub mod edit;
pub mod filter;

pub use edit::{append_blank_row, coerce_text_columns, reset_row_discounts, row_discounts, set_row_discounts};
pub use filter::{distinct_values, filter_rows, filtered_table, RowFilter};
