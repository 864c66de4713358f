use std::path::PathBuf;

use crate::writer::WriterError;

/// Errors that can occur while converting track data
#[derive(Debug, thiserror::Error)]
pub enum TrackError {
    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Arrow error
    #[error("Arrow error: {0}")]
    ArrowError(#[from] arrow::error::ArrowError),

    /// Parquet error
    #[error("Parquet error: {0}")]
    ParquetError(#[from] parquet::errors::ParquetError),

    /// Error from the record writer
    #[error("Writer error: {0}")]
    WriterError(#[from] WriterError),

    /// Column not found
    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    /// Column present with an unexpected type or shape
    #[error("Invalid column {column}: {reason}")]
    InvalidColumn {
        /// Column name
        column: String,
        /// What was wrong with it
        reason: String,
    },

    /// Input directory has no track files
    #[error("No .parquet files found in {0}")]
    NoInputFiles(PathBuf),
}
