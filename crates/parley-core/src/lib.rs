pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod tracing_setup;

pub use api::{ChatClient, EventCursor, EventQueue, PollOutcome, QueueItem, QueueTransport};
pub use config::Credentials;
pub use error::ClientError;
pub use models::{Message, Recipient};
