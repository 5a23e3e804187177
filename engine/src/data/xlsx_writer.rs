// Spreadsheet export (xlsx only)
use rust_xlsxwriter::{Format, Workbook as XlsxWorkbook, Worksheet};
use shared::models::{CellValue, Table, Workbook};
use std::path::Path;

use crate::error::{EngineError, Result};
use crate::models::schema::ColumnNames;

const MAX_SHEET_NAME: usize = 31;

/// Serializes every sheet of `workbook` to xlsx bytes.
pub fn workbook_to_buffer(workbook: &Workbook, names: &ColumnNames) -> Result<Vec<u8>> {
    let mut target = build(&workbook.tables, names)?;
    Ok(target.save_to_buffer()?)
}

/// Serializes a single table, e.g. the filtered view offered for download.
pub fn table_to_buffer(table: &Table, names: &ColumnNames) -> Result<Vec<u8>> {
    let mut target = build(std::slice::from_ref(table), names)?;
    Ok(target.save_to_buffer()?)
}

pub fn save_workbook(workbook: &Workbook, path: &Path, names: &ColumnNames) -> Result<()> {
    let mut target = build(&workbook.tables, names)?;
    target.save(path)?;
    tracing::info!(path = %path.display(), sheets = workbook.tables.len(), "Saved workbook");
    Ok(())
}

pub fn save_table(table: &Table, path: &Path, names: &ColumnNames) -> Result<()> {
    let mut target = build(std::slice::from_ref(table), names)?;
    target.save(path)?;
    tracing::info!(path = %path.display(), sheet = %table.name, rows = table.len(), "Saved table");
    Ok(())
}

fn build(tables: &[Table], names: &ColumnNames) -> Result<XlsxWorkbook> {
    let mut target = XlsxWorkbook::new();
    for (i, table) in tables.iter().enumerate() {
        let worksheet = target.add_worksheet();
        worksheet.set_name(sheet_name(&table.name, i))?;
        write_table(worksheet, table, names)?;
    }
    Ok(target)
}

fn write_table(worksheet: &mut Worksheet, table: &Table, names: &ColumnNames) -> Result<()> {
    let header_format = Format::new().set_bold();
    let price_format = Format::new().set_num_format("0.00");

    let computed: Vec<bool> = table
        .columns
        .iter()
        .map(|c| *c == names.discounted_raw_price || *c == names.discounted_galvanized_price)
        .collect();

    for (col, title) in table.columns.iter().enumerate() {
        worksheet.write_string_with_format(0, column_number(col)?, title, &header_format)?;
    }

    for (row_idx, row) in table.rows.iter().enumerate() {
        // Header occupies row 0
        let row_num = u32::try_from(row_idx + 1)
            .map_err(|_| EngineError::UnsupportedFormat(format!("too many rows for xlsx: {}", table.len())))?;
        for (col, cell) in row.cells.iter().enumerate().take(table.columns.len()) {
            let col_num = column_number(col)?;
            match cell {
                CellValue::Empty => {}
                CellValue::Text(s) => {
                    worksheet.write_string(row_num, col_num, s)?;
                }
                CellValue::Number(n) if computed[col] => {
                    worksheet.write_number_with_format(row_num, col_num, *n, &price_format)?;
                }
                CellValue::Number(n) => {
                    worksheet.write_number(row_num, col_num, *n)?;
                }
                CellValue::Bool(b) => {
                    worksheet.write_boolean(row_num, col_num, *b)?;
                }
            }
        }
    }

    worksheet.autofit();
    Ok(())
}

fn column_number(col: usize) -> Result<u16> {
    u16::try_from(col).map_err(|_| EngineError::UnsupportedFormat(format!("too many columns for xlsx: {}", col + 1)))
}

// Excel sheet names: at most 31 chars, none of []:*?/\ and not blank.
fn sheet_name(name: &str, position: usize) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if matches!(c, '[' | ']' | ':' | '*' | '?' | '/' | '\\') { '_' } else { c })
        .take(MAX_SHEET_NAME)
        .collect();
    let cleaned = cleaned.trim().trim_matches('\'').to_string();
    if cleaned.is_empty() {
        format!("Foglio{}", position + 1)
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::xlsx_reader::{read_workbook, read_workbook_from_bytes};

    fn listino() -> Table {
        let names = ColumnNames::default();
        let mut table = Table::new(
            "Grigliati",
            vec![
                names.product.clone(),
                names.raw_price.clone(),
                names.discounted_raw_price.clone(),
                "Disponibile".to_string(),
            ],
        );
        table.push_row(vec![
            CellValue::text("Grigliato 30x2"),
            CellValue::Number(41.5),
            CellValue::Number(35.28),
            CellValue::Bool(true),
        ]);
        table.push_row(vec![CellValue::text("Gradino"), CellValue::text("n/d"), CellValue::Empty, CellValue::Bool(false)]);
        table
    }

    #[test]
    fn test_table_round_trip_through_bytes() {
        let names = ColumnNames::default();
        let table = listino();
        let bytes = table_to_buffer(&table, &names).unwrap();
        let workbook = read_workbook_from_bytes(&bytes).unwrap();

        assert_eq!(workbook.sheet_names(), vec!["Grigliati".to_string()]);
        let back = workbook.first().unwrap();
        assert_eq!(back.columns, table.columns);
        assert_eq!(back.rows, table.rows);
    }

    #[test]
    fn test_workbook_round_trip_through_file() {
        let names = ColumnNames::default();
        let mut other = listino();
        other.name = "Pedane".to_string();
        other.rows.truncate(1);
        let workbook = Workbook::new(vec![listino(), other]);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("listino.xlsx");
        save_workbook(&workbook, &path, &names).unwrap();

        let back = read_workbook(&path).unwrap();
        assert_eq!(back.sheet_names(), vec!["Grigliati".to_string(), "Pedane".to_string()]);
        assert_eq!(back.sheet("Pedane").map(Table::len), Some(1));
    }

    #[test]
    fn test_sheet_name_sanitized() {
        assert_eq!(sheet_name("Listino 2024/25", 0), "Listino 2024_25");
        assert_eq!(sheet_name("", 2), "Foglio3");
        assert_eq!(sheet_name(&"x".repeat(40), 0).len(), MAX_SHEET_NAME);
    }
}
