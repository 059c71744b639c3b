//! Unified error type for the travel discount service.
//!
//! Core operations return [`Result`]; the API layer maps each variant onto an
//! HTTP status in `api::error`.

use crate::entities::search::SearchStatus;
use thiserror::Error;

/// Errors produced by configuration loading, persistence and domain rules.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read, parsed or failed validation
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// A referenced record does not exist
    #[error("{entity} {id} not found")]
    NotFound {
        /// Kind of record (e.g. "Search", "Hotel")
        entity: &'static str,
        /// Identifier that was looked up
        id: String,
    },

    /// Caller supplied malformed or out-of-range input
    #[error("Validation error: {message}")]
    Validation {
        /// Human-readable reason
        message: String,
    },

    /// A write would leave a dangling reference
    #[error("Integrity error: {message}")]
    Integrity {
        /// Human-readable reason
        message: String,
    },

    /// Search status change not allowed by the lifecycle
    #[error("Cannot move search from {from} to {to}")]
    InvalidStatusTransition {
        /// Current status
        from: SearchStatus,
        /// Requested status
        to: SearchStatus,
    },

    /// Underlying storage engine failure
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Filesystem failure (config files, database directory)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for a [`Error::Validation`] with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Shorthand for a [`Error::NotFound`].
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
