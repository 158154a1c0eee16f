//! Hosted REST storage backend for ReliefNet.
//!
//! Talks to a PostgREST-style HTTP API (the kind hosted Postgres services
//! expose): table endpoints for `disasters` and `cache`, an RPC endpoint for
//! proximity queries. The remote store owns all durable state; this crate is
//! a pass-through adapter that surfaces store-reported errors verbatim.

mod store;

pub use store::{RestStore, RestStoreConfig};
