//! External provider adapters for ReliefNet.
//!
//! Two stateless adapter families, both plain request/response HTTP clients
//! with bounded timeouts:
//!
//! - [`GenAiClient`] proxies a generative-inference API for free-text
//!   location extraction and image verification. A response missing the
//!   expected shape degrades to a documented fallback literal, never an
//!   error.
//! - [`GeocodeClient`] resolves a place name to coordinates, with an
//!   explicit typed failure when the provider returns zero results.
//!
//! The adapters validate nothing about the remote call's semantic quality
//! (whether an image URL is actually retrievable, say); that is delegated to
//! the remote service.

pub mod error;
pub mod geocode;
pub mod inference;
pub mod traits;

pub use error::ProviderError;
pub use geocode::{GeocodeClient, GeocodeConfig};
pub use inference::{GenAiClient, GenAiConfig};
pub use traits::{Geolocator, ImageVerifier, LocationExtractor};
