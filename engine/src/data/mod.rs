// Loading and saving price lists: spreadsheet and CSV formats plus the dated archive
pub mod archive;
pub mod csv_parser;
pub mod xlsx_reader;
pub mod xlsx_writer;

use shared::models::{Table, Workbook};
use std::path::Path;

use crate::config::ListinoSettings;
use crate::error::{EngineError, Result};
use crate::models::schema::{ColumnNames, TableSchema};
use crate::table::coerce_text_columns;
use csv_parser::ItalianCsvParser;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpreadsheetFormat {
    Xlsx,
    Xls,
    Ods,
    Csv,
}

impl SpreadsheetFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "xlsx" | "xlsm" => Ok(SpreadsheetFormat::Xlsx),
            "xls" => Ok(SpreadsheetFormat::Xls),
            "ods" => Ok(SpreadsheetFormat::Ods),
            "csv" => Ok(SpreadsheetFormat::Csv),
            _ => Err(EngineError::UnsupportedFormat(path.display().to_string())),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            SpreadsheetFormat::Xlsx => "xlsx",
            SpreadsheetFormat::Xls => "xls",
            SpreadsheetFormat::Ods => "ods",
            SpreadsheetFormat::Csv => "csv",
        }
    }
}

/// Reads a price list from disk and prepares it for the engine.
pub fn load_workbook(path: &Path, settings: &ListinoSettings) -> Result<Workbook> {
    let mut workbook = match SpreadsheetFormat::from_path(path)? {
        SpreadsheetFormat::Csv => Workbook::new(vec![ItalianCsvParser::load_table(path, settings.csv_delimiter_byte())?]),
        _ => xlsx_reader::read_workbook(path)?,
    };
    prepare(&mut workbook, &settings.columns);
    Ok(workbook)
}

/// Same as [`load_workbook`] for an uploaded byte stream.
pub fn load_workbook_from_bytes(bytes: &[u8], format: SpreadsheetFormat, settings: &ListinoSettings) -> Result<Workbook> {
    let mut workbook = match format {
        SpreadsheetFormat::Csv => Workbook::new(vec![ItalianCsvParser::read_table(bytes, "Foglio1", settings.csv_delimiter_byte())?]),
        _ => xlsx_reader::read_workbook_from_bytes(bytes)?,
    };
    prepare(&mut workbook, &settings.columns);
    Ok(workbook)
}

/// Writes one table as xlsx or csv, chosen by the output extension.
pub fn save_table(table: &Table, path: &Path, settings: &ListinoSettings) -> Result<()> {
    match SpreadsheetFormat::from_path(path)? {
        SpreadsheetFormat::Xlsx => xlsx_writer::save_table(table, path, &settings.columns),
        SpreadsheetFormat::Csv => ItalianCsvParser::save_table(table, path, settings.csv_delimiter_byte()),
        other => Err(EngineError::UnsupportedFormat(format!(
            "cannot write .{} files, use .xlsx or .csv",
            other.extension()
        ))),
    }
}

// Text columns become strings and missing columns are reported once per load.
fn prepare(workbook: &mut Workbook, names: &ColumnNames) {
    for table in &mut workbook.tables {
        coerce_text_columns(table, names);
        TableSchema::resolve(table, names).log_mismatches(table, names);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::CellValue;

    #[test]
    fn test_format_from_path() {
        assert_eq!(SpreadsheetFormat::from_path(Path::new("listino.XLSX")).unwrap(), SpreadsheetFormat::Xlsx);
        assert_eq!(SpreadsheetFormat::from_path(Path::new("a/b/listino.xls")).unwrap(), SpreadsheetFormat::Xls);
        assert!(SpreadsheetFormat::from_path(Path::new("listino.pdf")).is_err());
        assert!(SpreadsheetFormat::from_path(Path::new("listino")).is_err());
    }

    #[test]
    fn test_load_csv_coerces_text_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("listino.csv");
        std::fs::write(&path, "Prodotto;Maglia;Grezzo Mq\nGrigliato;30;41.5\n").unwrap();

        let workbook = load_workbook(&path, &ListinoSettings::default()).unwrap();
        let table = workbook.first().unwrap();
        assert_eq!(table.name, "listino");
        assert_eq!(table.cell(0, "Maglia"), Some(&CellValue::text("30")));
        assert_eq!(table.cell(0, "Grezzo Mq"), Some(&CellValue::Number(41.5)));
    }

    #[test]
    fn test_save_and_reload_xlsx() {
        let settings = ListinoSettings::default();
        let mut table = Table::new("Listino", vec!["Prodotto".to_string(), "Grezzo Mq".to_string()]);
        table.push_row(vec![CellValue::text("Grigliato"), CellValue::Number(41.5)]);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("listino_aggiornato.xlsx");
        save_table(&table, &path, &settings).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        let workbook = load_workbook_from_bytes(&bytes, SpreadsheetFormat::Xlsx, &settings).unwrap();
        assert_eq!(workbook.first(), Some(&table));
    }

    #[test]
    fn test_cannot_write_ods() {
        let table = Table::new("Listino", vec![]);
        let err = save_table(&table, Path::new("out.ods"), &ListinoSettings::default()).unwrap_err();
        assert!(matches!(err, EngineError::UnsupportedFormat(_)));
    }
}
