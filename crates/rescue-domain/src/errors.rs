//! Domain errors for Rescue Dispatch

use thiserror::Error;

/// Core domain errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid coordinates: {reason}")]
    InvalidCoordinates { reason: String },

    #[error("Unknown need label: {label}")]
    UnknownNeed { label: String },

    #[error("Invalid landmark name: {reason}")]
    InvalidLandmark { reason: String },

    #[error("Invalid capacity for {center}/{need}: {reason}")]
    InvalidCapacity {
        center: String,
        need: String,
        reason: String,
    },

    #[error("Validation error: {field} - {reason}")]
    ValidationError { field: String, reason: String },
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
