// Decides which discounts apply to each row and fills the computed price columns
use shared::models::{CellValue, DiscountSet, Row, Table};

use super::{apply_discount, DiscountRule};
use crate::error::EngineError;
use crate::models::schema::{ColumnNames, TableSchema};

/// The discounts stored on a row, if the table has all three discount columns.
/// Unparseable or empty discount cells read as 0.
pub fn stored_discounts(row: &Row, schema: &TableSchema) -> Option<DiscountSet> {
    let [a, b, c] = schema.discount_columns()?;
    Some(DiscountSet::new(
        discount_value(row.get(a)),
        discount_value(row.get(b)),
        discount_value(row.get(c)),
    ))
}

/// A row has its own discounts when the user set them (even to zero) or when
/// it was loaded with a non-zero stored set.
pub fn has_override(row: &Row, schema: &TableSchema) -> bool {
    row.overridden || stored_discounts(row, schema).is_some_and(|set| !set.is_zero())
}

/// Overridden rows keep their stored set; every other row follows `general` live.
pub fn effective_discounts(row: &Row, schema: &TableSchema, general: &DiscountSet) -> DiscountSet {
    if has_override(row, schema) {
        stored_discounts(row, schema).unwrap_or(DiscountSet::ZERO)
    } else {
        *general
    }
}

/// Returns a copy of `table` with the discounted price columns populated.
///
/// A computed column is appended the first time and overwritten afterwards, so
/// calling this twice with the same inputs gives the same table. Base price
/// columns missing from the table are skipped.
pub fn recompute_table(table: &Table, general: &DiscountSet, rule: DiscountRule, names: &ColumnNames) -> Table {
    let schema = TableSchema::resolve(table, names);
    let mut updated = table.clone();

    for (base_column, computed_column) in names.price_columns() {
        let Some(base_idx) = schema_price_index(&schema, names, base_column) else {
            continue;
        };
        let computed_idx = updated.ensure_column(computed_column, CellValue::Empty);

        for (row_idx, row) in updated.rows.iter_mut().enumerate() {
            let discounts = effective_discounts(row, &schema, general);
            let value = discounted_cell(row.get(base_idx), base_column, row_idx, &discounts, rule);
            row.set(computed_idx, value);
        }
    }

    tracing::debug!(sheet = %table.name, rows = table.len(), %general, ?rule, "Recomputed discounted prices");
    updated
}

fn schema_price_index(schema: &TableSchema, names: &ColumnNames, column: &str) -> Option<usize> {
    if column == names.raw_price {
        schema.raw_price
    } else if column == names.galvanized_price {
        schema.galvanized_price
    } else {
        None
    }
}

fn discounted_cell(base: &CellValue, column: &str, row_idx: usize, discounts: &DiscountSet, rule: DiscountRule) -> CellValue {
    match apply_discount(base, discounts, rule) {
        Some(price) => CellValue::Number(price),
        None => {
            if !base.is_empty() {
                let err = EngineError::ParseError { column: column.to_string(), value: base.to_string() };
                tracing::debug!(row = row_idx, "{}", err);
            }
            CellValue::Empty
        }
    }
}

fn discount_value(cell: &CellValue) -> f64 {
    cell.as_number().unwrap_or(0.0)
}
