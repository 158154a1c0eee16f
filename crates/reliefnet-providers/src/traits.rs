//! Provider trait seams.
//!
//! Handlers depend on these traits rather than concrete clients so the HTTP
//! layer can be exercised against stub providers in tests.

use async_trait::async_trait;

use reliefnet_core::GeoPoint;

use crate::error::ProviderError;

/// Extracts a place name from free text.
#[async_trait]
pub trait LocationExtractor: Send + Sync {
    /// Returns the extracted place name, or the literal `"Unknown"` when the
    /// provider response lacks the expected fields.
    async fn extract(&self, text: &str) -> Result<String, ProviderError>;
}

/// Analyzes an image URL for manipulation or disaster context.
#[async_trait]
pub trait ImageVerifier: Send + Sync {
    /// Returns the verification text, or the literal `"No result"` when the
    /// provider response lacks the expected fields.
    async fn verify(&self, image_url: &str) -> Result<String, ProviderError>;
}

/// Resolves a place name to coordinates.
#[async_trait]
pub trait Geolocator: Send + Sync {
    /// Returns the first candidate's coordinates.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::NoLocationFound` when the provider has zero
    /// results for the query.
    async fn resolve(&self, place: &str) -> Result<GeoPoint, ProviderError>;
}

// Ensure traits are object-safe by using them as trait objects
#[cfg(test)]
mod tests {
    use super::*;

    fn _assert_extractor_object_safe(_: &dyn LocationExtractor) {}
    fn _assert_verifier_object_safe(_: &dyn ImageVerifier) {}
    fn _assert_geolocator_object_safe(_: &dyn Geolocator) {}
}
