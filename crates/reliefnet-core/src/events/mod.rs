//! Change-notification event system.
//!
//! Mutating operations (and a couple of read-style observation endpoints)
//! publish `ChangeEvent`s through a shared `EventBroadcaster`. The WebSocket
//! layer subscribes and fans frames out to every connected client. There is
//! no persistence or replay: a subscriber connected after an event was sent
//! never sees it.
//!
//! # Module Structure
//!
//! - [`types`]: `ChangeEvent` and its wire framing
//! - [`broadcaster`]: the tokio broadcast based event bus

pub mod broadcaster;
pub mod types;

pub use broadcaster::EventBroadcaster;
pub use types::ChangeEvent;
