// Spreadsheet import (xlsx, xlsm, xls, ods) into the shared table model
use calamine::{open_workbook_auto, open_workbook_auto_from_rs, Data, Range, Reader, Sheets};
use shared::models::{CellValue, Table, Workbook};
use std::io::{Cursor, Read, Seek};
use std::path::Path;

use crate::error::Result;

pub fn read_workbook(path: &Path) -> Result<Workbook> {
    let mut sheets = open_workbook_auto(path)?;
    let workbook = read_sheets(&mut sheets)?;
    tracing::info!(path = %path.display(), sheets = workbook.tables.len(), "Read spreadsheet");
    Ok(workbook)
}

/// Reads an uploaded file held in memory; the format is sniffed from the content.
pub fn read_workbook_from_bytes(bytes: &[u8]) -> Result<Workbook> {
    let mut sheets = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;
    let workbook = read_sheets(&mut sheets)?;
    tracing::info!(bytes = bytes.len(), sheets = workbook.tables.len(), "Read spreadsheet from memory");
    Ok(workbook)
}

fn read_sheets<RS: Read + Seek>(sheets: &mut Sheets<RS>) -> Result<Workbook> {
    let names = sheets.sheet_names().to_vec();
    let mut tables = Vec::with_capacity(names.len());
    for name in names {
        let range = sheets.worksheet_range(&name)?;
        tables.push(table_from_range(&name, &range));
    }
    Ok(Workbook::new(tables))
}

/// First row is the header. Blank headers become "Unnamed: N"; fully blank rows are dropped.
pub fn table_from_range(name: &str, range: &Range<Data>) -> Table {
    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Table::new(name, Vec::new());
    };

    let columns = header
        .iter()
        .enumerate()
        .map(|(i, cell)| {
            let title = cell_value(cell).to_string().trim().to_string();
            if title.is_empty() {
                format!("Unnamed: {}", i)
            } else {
                title
            }
        })
        .collect();

    let mut table = Table::new(name, columns);
    for row in rows {
        let cells: Vec<CellValue> = row.iter().map(cell_value).collect();
        if cells.iter().all(CellValue::is_empty) {
            continue;
        }
        table.push_row(cells);
    }
    table
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) if s.trim().is_empty() => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => CellValue::Text(dt.to_string()),
        Data::DateTimeIso(s) => CellValue::Text(s.clone()),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => {
            tracing::debug!(error = ?e, "Spreadsheet cell holds an error value; reading it as empty");
            CellValue::Empty
        }
    }
}
