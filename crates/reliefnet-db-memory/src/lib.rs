//! In-memory storage backend for ReliefNet.
//!
//! Backs both the record store and the TTL cache with concurrent maps. Used
//! by the test suites and for local development without a hosted store.

mod store;

pub use store::InMemoryStore;
