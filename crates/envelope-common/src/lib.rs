pub mod errors;
pub mod events;
pub mod id;
pub mod toast;
pub mod types;

pub use errors::{ConfigError, DispatchError, EnvelopeError, PlaybackError, StoreError};
pub use events::{Event, EventBus};
pub use id::new_correlation_id;
pub use toast::{Toast, ToastLevel};
pub use types::{RevealState, TrackingStatus};

pub type Result<T> = std::result::Result<T, EnvelopeError>;
