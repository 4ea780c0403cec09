//! Error types for the CourseApp API
//!
//! `DomainError` travels through the domain, ports and adapters with `?`.
//! Managers are the only place it is turned into an outcome; nothing above
//! them ever sees it.

use thiserror::Error;

/// Domain layer errors - pure business logic errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// A DTO could not be projected onto its aggregate
    #[error("Mapping error: {0}")]
    Mapping(String),

    /// A flush completed but touched no rows
    #[error("No rows affected")]
    NothingChanged,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl DomainError {
    /// Detail that is safe to show to a caller.
    ///
    /// Storage faults are reported generically; their text
    /// only goes to the log.
    pub fn public_reason(&self) -> Option<&str> {
        match self {
            DomainError::NotFound(reason)
            | DomainError::Validation(reason)
            | DomainError::Mapping(reason)
            | DomainError::Conflict(reason) => Some(reason),
            DomainError::NothingChanged | DomainError::Database(_) => None,
        }
    }
}
