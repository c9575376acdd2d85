//! Data loading errors

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataError {
    #[error("Failed to open states file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Every row was rejected, or the file held no rows at all
    #[error("No valid rows in {origin} ({rows_failed} rejected)")]
    Empty { origin: String, rows_failed: usize },
}

pub type DataResult<T> = Result<T, DataError>;
