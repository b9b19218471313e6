use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("{}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{}: required column '{column}' not found", path.display())]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error("{}: line {line}: missing value for '{field}'", path.display())]
    MissingField {
        path: PathBuf,
        line: u64,
        field: &'static str,
    },

    #[error("{}: line {line}: invalid value '{value}' for '{field}'", path.display())]
    InvalidField {
        path: PathBuf,
        line: u64,
        field: &'static str,
        value: String,
    },
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type LoadResult<T> = Result<T, LoadError>;
