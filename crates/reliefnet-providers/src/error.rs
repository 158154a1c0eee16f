//! Provider error types.

/// Errors from the inference and geocoding adapters.
///
/// A provider response missing expected fields is deliberately *not* in this
/// taxonomy: the inference adapters resolve that to a fallback literal.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Transport-level failure (connect, timeout, TLS).
    #[error("Provider request failed: {message}")]
    Request {
        /// Description of the transport failure.
        message: String,
    },

    /// The provider answered with a non-success status.
    #[error("Provider returned status {status}: {body}")]
    UnexpectedStatus {
        /// HTTP status code.
        status: u16,
        /// Response body, as returned.
        body: String,
    },

    /// The provider answered 2xx but the body could not be decoded.
    #[error("Invalid provider response: {message}")]
    InvalidResponse {
        /// Description of the decode failure.
        message: String,
    },

    /// The geocoding provider returned zero results for the query.
    #[error("No location found for {query:?}")]
    NoLocationFound {
        /// The place name that produced no results.
        query: String,
    },
}

impl ProviderError {
    /// Creates a new `Request` error.
    #[must_use]
    pub fn request(message: impl Into<String>) -> Self {
        Self::Request {
            message: message.into(),
        }
    }

    /// Creates a new `UnexpectedStatus` error.
    #[must_use]
    pub fn unexpected_status(status: u16, body: impl Into<String>) -> Self {
        Self::UnexpectedStatus {
            status,
            body: body.into(),
        }
    }

    /// Creates a new `InvalidResponse` error.
    #[must_use]
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }

    /// Creates a new `NoLocationFound` error.
    #[must_use]
    pub fn no_location_found(query: impl Into<String>) -> Self {
        Self::NoLocationFound {
            query: query.into(),
        }
    }

    /// Returns `true` when the query itself produced no result, as opposed
    /// to the provider failing.
    #[must_use]
    pub fn is_no_location(&self) -> bool {
        matches!(self, Self::NoLocationFound { .. })
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::invalid_response(e.to_string())
        } else {
            Self::request(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ProviderError::unexpected_status(503, "overloaded");
        assert_eq!(err.to_string(), "Provider returned status 503: overloaded");

        let err = ProviderError::no_location_found("Atlantis");
        assert_eq!(err.to_string(), "No location found for \"Atlantis\"");
    }

    #[test]
    fn test_no_location_predicate() {
        assert!(ProviderError::no_location_found("x").is_no_location());
        assert!(!ProviderError::request("timeout").is_no_location());
    }
}
