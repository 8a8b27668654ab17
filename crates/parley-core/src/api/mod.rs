pub mod messages;
pub mod queue;
pub mod subscriptions;
pub mod transport;

pub use queue::{EventCursor, EventQueue, PollOutcome, QueueItem, QueueTransport};
pub use subscriptions::Subscription;
pub use transport::{ChatClient, DEFAULT_TIMEOUT};
