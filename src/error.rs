//! Error taxonomy for the load → extract → assemble → clean → export chain.

use std::path::PathBuf;
use thiserror::Error;

pub type PrepResult<T> = std::result::Result<T, PrepError>;

#[derive(Debug, Error)]
pub enum PrepError {
    /// A line of the input is not valid JSON. `line` is 1-based.
    #[error("line {line}: invalid JSON: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// A strict lookup did not find its key.
    #[error("required key `{path}` is absent")]
    KeyLookup { path: String },

    #[error("column `{column}` has {actual} values, expected {expected}")]
    Shape {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("column `{column}`, row {row}: cannot parse {value:?}")]
    TypeCoercion {
        column: String,
        row: usize,
        value: String,
    },

    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl PrepError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PrepError::Io { path: path.into(), source }
    }
}
