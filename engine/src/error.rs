use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },

    #[error("Spreadsheet read error: {source}")]
    SpreadsheetReadError {
        #[from]
        source: calamine::Error,
    },

    #[error("Spreadsheet write error: {source}")]
    SpreadsheetWriteError {
        #[from]
        source: rust_xlsxwriter::XlsxError,
    },

    #[error("CSV parsing system error: {source}")]
    CsvSystemError {
        #[from]
        source: csv::Error,
    },

    // Recovered locally: the cell falls back to the empty sentinel.
    #[error("Value '{value}' in column '{column}' is not numeric")]
    ParseError { column: String, value: String },

    // Recovered locally: only the feature that needs the column is disabled.
    #[error("Column '{column}' is missing; {feature} disabled")]
    SchemaMismatch { column: String, feature: &'static str },

    #[error("Sheet '{0}' not found")]
    SheetNotFound(String),

    #[error("No saved price list found in '{0}'")]
    EmptyArchive(String),

    #[error("Row {index} out of range (table has {len} rows)")]
    RowOutOfRange { index: usize, len: usize },

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error(transparent)]
    AnyhowError(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
