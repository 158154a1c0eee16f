pub mod error;
pub mod events;
pub mod types;

pub use error::{CoreError, Result};
pub use events::{ChangeEvent, EventBroadcaster};
pub use types::GeoPoint;
