//! Error types for Tombola Core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("No participants given")]
    EmptyRoster,

    #[error("Line {line}: every participant needs a name and a department (got {entry:?})")]
    InvalidEntry { line: usize, entry: String },

    #[error("No participants left in the pool")]
    EmptyPool,

    #[error("A draw is already in progress")]
    DrawInProgress,

    #[error("The last winner has not been settled yet")]
    ResultPending,

    #[error("There is no winner waiting for confirmation")]
    NoPendingWinner,

    #[error("Missing event details: {0}")]
    MissingEvent(String),

    #[error("No winners to export")]
    NothingToExport,

    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] rust_xlsxwriter::XlsxError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
