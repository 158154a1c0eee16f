//! Storage abstraction layer for ReliefNet.
//!
//! Defines the traits every record/cache backend implements, the record
//! types they exchange, and the best-effort memoization wrapper used by the
//! provider-proxy endpoints.

pub mod cache;
pub mod error;
pub mod traits;
pub mod types;

pub use cache::{DEFAULT_TTL, MemoCache};
pub use error::{ErrorCategory, StorageError};
pub use traits::{CacheStore, DisasterStore};
pub use types::{
    AuditEntry, CacheEntry, DisasterRecord, DisasterUpdate, NewDisaster, ResourceRecord,
};
