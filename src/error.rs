//! Error types of the numeric core.

use std::{num::ParseFloatError, path::PathBuf};
use thiserror::Error;

/// Errors returned by the loading and statistics functions.
#[derive(Debug, Error)]
pub enum Error {
    /// The input file is malformed or unreadable.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The output file could not be written.
    #[error("failed to write {path:?}")]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// The input violates a precondition of the operation.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The requested patient row does not exist.
    #[error("patient index {index} is out of range for {n_patients} patients")]
    IndexOutOfRange { index: usize, n_patients: usize },
}

/// Reasons a CSV file could not be turned into a matrix.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read {path:?}")]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("invalid field {field:?} at row {row}, column {col}")]
    Field {
        row: usize,
        col: usize,
        field: String,
        #[source]
        source: ParseFloatError,
    },

    #[error("row {row} has {len} fields, but previous rows have {exp_len}")]
    RowLength {
        row: usize,
        len: usize,
        exp_len: usize,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
