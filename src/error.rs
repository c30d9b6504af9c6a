//! Failure kinds for loading trip data and reading operator input.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("No data source registered for city '{city}'")]
    UnknownCity { city: String },

    #[error("Failed to open trip data at {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed trip data: {0}")]
    Csv(#[from] csv::Error),

    #[error("Unparsable {column} timestamp '{value}' in data row {row}")]
    Timestamp {
        column: &'static str,
        row: usize,
        value: String,
    },
}

#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Input closed while waiting for an answer")]
    InputClosed,

    #[error("Console I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
