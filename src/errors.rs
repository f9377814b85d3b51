//! Error types for tabular data loading
//!
//! Every failure while turning an input table into graph records carries
//! the column name and, where applicable, the 1-based data row number, so
//! a bad cell can be located without re-reading the file.

use thiserror::Error;

/// Errors raised while loading people or relationship tables
#[derive(Error, Debug)]
pub enum LoadError {
    /// A required header is absent from the input file
    #[error("Missing required column '{column}'")]
    MissingColumn { column: String },

    /// A record is shorter than the resolved load profile expects
    #[error("Row {row}: missing field '{field}'")]
    MissingField { field: &'static str, row: usize },

    /// A numeric field held non-numeric text
    #[error("Row {row}: field '{field}' has non-numeric value '{value}'")]
    InvalidNumber {
        field: &'static str,
        row: usize,
        value: String,
    },

    /// Input file extension does not map to a known delimiter
    #[error("Unsupported file extension: '{0}'")]
    UnsupportedExtension(String),

    /// CSV parsing/reading error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
