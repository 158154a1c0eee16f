//! Storage error types for the record/cache store abstraction.

use std::fmt;

use reliefnet_core::CoreError;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A shared-type validation failure (coordinates out of range, ...).
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The requested record was not found.
    #[error("Record not found: {kind}/{id}")]
    NotFound {
        /// The kind of record that was not found ("disaster", "resource", ...).
        kind: String,
        /// The ID of the record that was not found.
        id: String,
    },

    /// The record data is invalid.
    #[error("Invalid record: {message}")]
    InvalidRecord {
        /// Description of why the record is invalid.
        message: String,
    },

    /// Failed to reach the storage backend.
    #[error("Connection error: {message}")]
    Connection {
        /// Description of the connection error.
        message: String,
    },

    /// An error reported by the storage backend, surfaced verbatim.
    #[error("Store error: {message}")]
    Backend {
        /// The backend-reported message.
        message: String,
    },
}

impl StorageError {
    /// Creates a new `NotFound` error.
    #[must_use]
    pub fn not_found(kind: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind: kind.into(),
            id: id.into(),
        }
    }

    /// Creates a new `InvalidRecord` error.
    #[must_use]
    pub fn invalid_record(message: impl Into<String>) -> Self {
        Self::InvalidRecord {
            message: message.into(),
        }
    }

    /// Creates a new `Connection` error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates a new `Backend` error.
    #[must_use]
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    /// Returns `true` if this is a not found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns the error category for logging/monitoring purposes.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::Core(_) | Self::InvalidRecord { .. } => ErrorCategory::Validation,
            Self::Connection { .. } => ErrorCategory::Infrastructure,
            Self::Backend { .. } => ErrorCategory::Backend,
        }
    }
}

/// Categories of storage errors for logging and monitoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Record not found.
    NotFound,
    /// Validation error.
    Validation,
    /// Infrastructure/connection error.
    Infrastructure,
    /// Backend-reported error.
    Backend,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not_found"),
            Self::Validation => write!(f, "validation"),
            Self::Infrastructure => write!(f, "infrastructure"),
            Self::Backend => write!(f, "backend"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StorageError::not_found("disaster", "d1");
        assert_eq!(err.to_string(), "Record not found: disaster/d1");

        let err = StorageError::backend("duplicate key value");
        assert_eq!(err.to_string(), "Store error: duplicate key value");
    }

    #[test]
    fn test_error_predicates() {
        assert!(StorageError::not_found("disaster", "d1").is_not_found());
        assert!(!StorageError::backend("boom").is_not_found());
    }

    #[test]
    fn test_core_error_passes_through() {
        let err = StorageError::from(CoreError::invalid_coordinates(91.0, 0.0));
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(err.to_string().contains("lat=91"));
    }

    #[test]
    fn test_error_category() {
        assert_eq!(
            StorageError::not_found("disaster", "d1").category(),
            ErrorCategory::NotFound
        );
        assert_eq!(
            StorageError::invalid_record("bad tags").category(),
            ErrorCategory::Validation
        );
        assert_eq!(
            StorageError::connection("refused").category(),
            ErrorCategory::Infrastructure
        );
        assert_eq!(
            StorageError::backend("boom").category(),
            ErrorCategory::Backend
        );
    }
}
