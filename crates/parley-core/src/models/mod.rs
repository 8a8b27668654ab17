pub mod content;
pub mod message;

pub use content::html_to_text;
pub use message::{Message, RawEvent, RawMessage, Recipient, LEGACY_EVENT_ID};
