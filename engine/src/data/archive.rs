// Dated copies of every loaded price list, newest reopened by default
use chrono::{Local, NaiveDate};
use std::fs;
use std::path::{Path, PathBuf};

use super::SpreadsheetFormat;
use crate::error::{EngineError, Result};

const FILE_PREFIX: &str = "listino_";

pub struct PriceListArchive {
    dir: PathBuf,
}

impl PriceListArchive {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        PriceListArchive { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes `listino_<YYYY-MM-DD>.<ext>`; a second upload on the same day replaces the first.
    pub fn store(&self, bytes: &[u8], format: SpreadsheetFormat, date: NaiveDate) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let path = self
            .dir
            .join(format!("{}{}.{}", FILE_PREFIX, date.format("%Y-%m-%d"), format.extension()));
        fs::write(&path, bytes)?;
        tracing::info!(path = %path.display(), bytes = bytes.len(), "Stored price list in archive");
        Ok(path)
    }

    pub fn store_today(&self, bytes: &[u8], format: SpreadsheetFormat) -> Result<PathBuf> {
        self.store(bytes, format, Local::now().date_naive())
    }

    /// Copies an existing file into the archive under today's name.
    pub fn store_file(&self, source: &Path) -> Result<PathBuf> {
        let format = SpreadsheetFormat::from_path(source)?;
        let bytes = fs::read(source)?;
        self.store_today(&bytes, format)
    }

    /// Archived spreadsheets, newest name first. A missing folder is an empty archive.
    pub fn entries(&self) -> Result<Vec<PathBuf>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.is_file() && SpreadsheetFormat::from_path(&path).is_ok() {
                entries.push(path);
            }
        }
        entries.sort_by(|a, b| b.file_name().cmp(&a.file_name()));
        Ok(entries)
    }

    pub fn latest(&self) -> Result<Option<PathBuf>> {
        Ok(self.entries()?.into_iter().next())
    }

    pub fn require_latest(&self) -> Result<PathBuf> {
        self.latest()?
            .ok_or_else(|| EngineError::EmptyArchive(self.dir.display().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_store_names_file_by_date() {
        let dir = tempfile::tempdir().unwrap();
        let archive = PriceListArchive::new(dir.path().join("listini_salvati"));
        let path = archive.store(b"xlsx bytes", SpreadsheetFormat::Xlsx, date("2024-03-07")).unwrap();

        assert_eq!(path.file_name().unwrap(), "listino_2024-03-07.xlsx");
        assert_eq!(fs::read(&path).unwrap(), b"xlsx bytes");
    }

    #[test]
    fn test_latest_is_newest_date() {
        let dir = tempfile::tempdir().unwrap();
        let archive = PriceListArchive::new(dir.path());
        archive.store(b"a", SpreadsheetFormat::Xlsx, date("2024-01-15")).unwrap();
        archive.store(b"b", SpreadsheetFormat::Xls, date("2024-11-02")).unwrap();
        archive.store(b"c", SpreadsheetFormat::Xlsx, date("2023-12-31")).unwrap();
        fs::write(dir.path().join("note.txt"), "ignored").unwrap();

        let latest = archive.latest().unwrap().unwrap();
        assert_eq!(latest.file_name().unwrap(), "listino_2024-11-02.xls");
        assert_eq!(archive.entries().unwrap().len(), 3);
    }

    #[test]
    fn test_same_day_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let archive = PriceListArchive::new(dir.path());
        archive.store(b"first", SpreadsheetFormat::Xlsx, date("2024-05-05")).unwrap();
        let path = archive.store(b"second", SpreadsheetFormat::Xlsx, date("2024-05-05")).unwrap();
        assert_eq!(archive.entries().unwrap().len(), 1);
        assert_eq!(fs::read(path).unwrap(), b"second");
    }

    #[test]
    fn test_missing_folder_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let archive = PriceListArchive::new(dir.path().join("mai_creata"));
        assert_eq!(archive.latest().unwrap(), None);
        assert!(matches!(archive.require_latest(), Err(EngineError::EmptyArchive(_))));
    }

    #[test]
    fn test_store_file_keeps_extension() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("fornitore.csv");
        fs::write(&source, "Prodotto;Grezzo Mq\n").unwrap();

        let archive = PriceListArchive::new(dir.path().join("archivio"));
        let stored = archive.store_file(&source).unwrap();
        assert_eq!(stored.extension().unwrap(), "csv");
    }
}
