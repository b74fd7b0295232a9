//! Pipeline error types
//!
//! Only loading can fail. Per-ticket processing absorbs every failure into a
//! sentinel value, so none of these errors is raised while dispatching.

use std::path::PathBuf;

use rescue_domain::DomainError;
use thiserror::Error;

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Errors raised while loading knowledge, resource or ticket tables
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Required input not found: {}", path.display())]
    MissingSource { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing column '{column}' in {table}")]
    MissingColumn { column: String, table: String },

    #[error("Invalid value in {table} row {row}: {reason}")]
    InvalidValue {
        table: String,
        row: usize,
        reason: String,
    },

    #[error("Invalid landmark pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error(transparent)]
    Domain(#[from] DomainError),
}
