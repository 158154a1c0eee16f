use thiserror::Error;

/// Core error types shared across ReliefNet crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid disaster record: {message}")]
    InvalidRecord { message: String },

    #[error("Invalid coordinate pair: lat={lat}, lng={lng}")]
    InvalidCoordinates { lat: f64, lng: f64 },

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl CoreError {
    /// Create a new InvalidRecord error
    pub fn invalid_record(message: impl Into<String>) -> Self {
        Self::InvalidRecord {
            message: message.into(),
        }
    }

    /// Create a new InvalidCoordinates error
    pub fn invalid_coordinates(lat: f64, lng: f64) -> Self {
        Self::InvalidCoordinates { lat, lng }
    }

    /// Create a new Configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Check if this error is a client error (4xx category)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidRecord { .. } | Self::InvalidCoordinates { .. }
        )
    }

    /// Get error category for logging/monitoring
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidRecord { .. } | Self::InvalidCoordinates { .. } => {
                ErrorCategory::Validation
            }
            Self::Configuration(_) => ErrorCategory::Configuration,
        }
    }
}

/// Error categories for monitoring and classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation => write!(f, "validation"),
            Self::Configuration => write!(f, "configuration"),
        }
    }
}

/// Convenience result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_record_error() {
        let err = CoreError::invalid_record("missing title");
        assert_eq!(err.to_string(), "Invalid disaster record: missing title");
        assert!(err.is_client_error());
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[test]
    fn test_invalid_coordinates_error() {
        let err = CoreError::invalid_coordinates(123.4, -200.0);
        assert!(err.to_string().contains("lat=123.4"));
        assert!(err.is_client_error());
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[test]
    fn test_configuration_error() {
        let err = CoreError::configuration("store.url must be set");
        assert_eq!(err.to_string(), "Configuration error: store.url must be set");
        assert!(!err.is_client_error());
        assert_eq!(err.category(), ErrorCategory::Configuration);
    }

    #[test]
    fn test_error_categories_display() {
        assert_eq!(ErrorCategory::Validation.to_string(), "validation");
        assert_eq!(ErrorCategory::Configuration.to_string(), "configuration");
    }
}
