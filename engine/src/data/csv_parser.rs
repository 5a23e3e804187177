use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use shared::models::{CellValue, Table};
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;
use std::str::FromStr;

use crate::error::{EngineError, Result};

pub struct ItalianCsvParser;

impl ItalianCsvParser {
    // Header: Prodotto;Maglia;Piatto;Dimensione;Grezzo Mq;Zincato Mq;Sconto1;Sconto2;Sconto3
    // Example Row: Grigliato elettrosaldato;33x11;25x2;1000x1000;41,50;55,30;0;0;0
    pub fn load_table(file_path: &Path, delimiter: u8) -> Result<Table> {
        let file = File::open(file_path).map_err(|e| {
            EngineError::AnyhowError(anyhow::anyhow!("Failed to open CSV file '{}': {}", file_path.display(), e))
        })?;
        let name = file_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "Foglio1".to_string());
        let table = Self::read_table(BufReader::new(file), &name, delimiter)?;
        tracing::info!(path = %file_path.display(), rows = table.len(), "Read CSV price list");
        Ok(table)
    }

    pub fn read_table<R: Read>(reader: R, name: &str, delimiter: u8) -> Result<Table> {
        let mut rdr = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true) // First row is the header
            .flexible(true)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let columns = headers
            .iter()
            .enumerate()
            .map(|(i, h)| {
                let h = h.trim();
                if h.is_empty() { format!("Unnamed: {}", i) } else { h.to_string() }
            })
            .collect();
        let mut table = Table::new(name, columns);

        for (idx, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| {
                EngineError::AnyhowError(anyhow::anyhow!("Error reading CSV record at line {}: {}", idx + 2, e))
            })?;
            let cells = Self::parse_record(&record);
            if cells.iter().all(CellValue::is_empty) {
                continue;
            }
            table.push_row(cells);
        }
        Ok(table)
    }

    pub fn save_table(table: &Table, file_path: &Path, delimiter: u8) -> Result<()> {
        let file = File::create(file_path)?;
        Self::write_table(table, file, delimiter)?;
        tracing::info!(path = %file_path.display(), rows = table.len(), "Saved CSV price list");
        Ok(())
    }

    pub fn write_table<W: Write>(table: &Table, writer: W, delimiter: u8) -> Result<()> {
        let mut wtr = WriterBuilder::new().delimiter(delimiter).from_writer(writer);
        wtr.write_record(&table.columns)?;
        for row in &table.rows {
            wtr.write_record((0..table.columns.len()).map(|i| row.get(i).to_string()))?;
        }
        wtr.flush()?;
        Ok(())
    }

    // Plain decimals ("41.5") become numbers; Italian ones ("41,50") stay text and
    // are parsed by the engine when a price is needed.
    fn parse_record(record: &StringRecord) -> Vec<CellValue> {
        record
            .iter()
            .map(|field| {
                let field = field.trim();
                if field.is_empty() {
                    return CellValue::Empty;
                }
                match f64::from_str(field) {
                    Ok(n) if n.is_finite() => CellValue::Number(n),
                    _ => CellValue::text(field),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_load_table_valid_data() {
        let csv_content = "\
Prodotto;Maglia;Piatto;Grezzo Mq;Zincato Mq;Sconto1
Grigliato elettrosaldato;33x11;25x2;41.5;55,30;0
Gradino;34x38;30x3;n/d;;10";
        let tmp_file = create_test_csv(csv_content);
        let table = ItalianCsvParser::load_table(tmp_file.path(), b';').unwrap();

        assert_eq!(table.columns.len(), 6);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0].get(3), &CellValue::Number(41.5));
        assert_eq!(table.rows[0].get(4), &CellValue::text("55,30"));
        assert_eq!(table.rows[0].get(4).as_number(), Some(55.3));
        assert_eq!(table.rows[1].get(3), &CellValue::text("n/d"));
        assert_eq!(table.rows[1].get(4), &CellValue::Empty);
        assert_eq!(table.rows[1].get(5), &CellValue::Number(10.0));
    }

    #[test]
    fn test_load_table_empty_file() {
        let tmp_file = create_test_csv("Prodotto;Grezzo Mq"); // Only header
        let table = ItalianCsvParser::load_table(tmp_file.path(), b';').unwrap();
        assert!(table.is_empty());
        assert_eq!(table.columns, vec!["Prodotto", "Grezzo Mq"]);
    }

    #[test]
    fn test_short_records_are_padded() {
        let content = "Prodotto;Maglia;Piatto\nGrigliato;33x11";
        let table = ItalianCsvParser::read_table(content.as_bytes(), "Foglio1", b';').unwrap();
        assert_eq!(table.rows[0].cells.len(), 3);
        assert_eq!(table.rows[0].get(2), &CellValue::Empty);
    }

    #[test]
    fn test_write_then_read_keeps_values() {
        let content = "Prodotto;Grezzo Mq;Prezzo Scontato Mq Grezzo\nGrigliato;41.5;37.35\nGradino;n/d;";
        let table = ItalianCsvParser::read_table(content.as_bytes(), "Foglio1", b';').unwrap();

        let mut buffer = Vec::new();
        ItalianCsvParser::write_table(&table, &mut buffer, b';').unwrap();
        let back = ItalianCsvParser::read_table(buffer.as_slice(), "Foglio1", b';').unwrap();
        assert_eq!(back, table);
    }

    #[test]
    fn test_load_missing_file() {
        let result = ItalianCsvParser::load_table(Path::new("/nonexistent/listino.csv"), b';');
        assert!(result.unwrap_err().to_string().contains("Failed to open CSV file"));
    }
}
