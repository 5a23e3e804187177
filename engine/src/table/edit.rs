// Edits on a price list: blank rows, per-row discount overrides, text coercion
use shared::models::{CellValue, DiscountSet, Table};

use crate::discount::reconcile::{has_override, stored_discounts};
use crate::error::{EngineError, Result};
use crate::models::schema::{ColumnNames, TableSchema};

/// Returns a copy of `table` with one blank row appended.
///
/// Discount columns get `0`, every other column is left empty.
pub fn append_blank_row(table: &Table, names: &ColumnNames) -> Table {
    let mut extended = table.clone();
    let cells = table
        .columns
        .iter()
        .map(|column| {
            if names.discounts.contains(column) {
                CellValue::Number(0.0)
            } else {
                CellValue::Empty
            }
        })
        .collect();
    extended.push_row(cells);
    extended
}

/// The row's override, or `None` when it follows the general discount.
pub fn row_discounts(table: &Table, index: usize, names: &ColumnNames) -> Option<DiscountSet> {
    let row = table.rows.get(index)?;
    let schema = TableSchema::resolve(table, names);
    if !has_override(row, &schema) {
        return None;
    }
    Some(stored_discounts(row, &schema).unwrap_or(DiscountSet::ZERO))
}

/// Stores a per-row override. Missing discount columns are added, zero-filled.
pub fn set_row_discounts(table: &mut Table, index: usize, discounts: DiscountSet, names: &ColumnNames) -> Result<()> {
    check_index(table, index)?;
    let columns = [
        table.ensure_column(&names.discounts[0], CellValue::Number(0.0)),
        table.ensure_column(&names.discounts[1], CellValue::Number(0.0)),
        table.ensure_column(&names.discounts[2], CellValue::Number(0.0)),
    ];
    let row = &mut table.rows[index];
    for (column, value) in columns.iter().zip(discounts.as_array()) {
        row.set(*column, CellValue::Number(value));
    }
    row.overridden = true;
    tracing::debug!(sheet = %table.name, row = index, %discounts, "Stored row discount override");
    Ok(())
}

/// Zeroes the row's stored discounts and drops its override, so it follows the
/// general discount again.
pub fn reset_row_discounts(table: &mut Table, index: usize, names: &ColumnNames) -> Result<()> {
    check_index(table, index)?;
    let schema = TableSchema::resolve(table, names);
    let row = &mut table.rows[index];
    row.overridden = false;
    let Some(columns) = schema.discount_columns() else {
        return Ok(());
    };
    for column in columns {
        row.set(column, CellValue::Number(0.0));
    }
    Ok(())
}

/// Turns product, mesh and plate cells into text so search and category filters
/// see "30" rather than a number.
pub fn coerce_text_columns(table: &mut Table, names: &ColumnNames) {
    let indexes: Vec<usize> = names
        .text_columns()
        .iter()
        .filter_map(|column| table.column_index(column))
        .collect();
    for row in &mut table.rows {
        for idx in &indexes {
            let cell = row.get(*idx);
            if matches!(cell, CellValue::Number(_) | CellValue::Bool(_)) {
                let text = cell.to_string();
                row.set(*idx, CellValue::Text(text));
            }
        }
    }
}

fn check_index(table: &Table, index: usize) -> Result<()> {
    if index >= table.len() {
        return Err(EngineError::RowOutOfRange { index, len: table.len() });
    }
    Ok(())
}
