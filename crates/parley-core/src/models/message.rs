use serde::Deserialize;

use crate::error::ClientError;
use crate::models::content::html_to_text;

/// Who a message was addressed to.
///
/// The server sends `display_recipient` either as a channel name or as the
/// ordered list of participants in a private conversation. The list shape
/// is what marks a message as private.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Recipient {
    Channel(String),
    Private(Vec<String>),
}

/// One normalized chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub event_id: i64,
    /// Full display name of the author.
    pub sender: String,
    pub recipient: Recipient,
    /// Topic of a channel message. Empty for private messages.
    pub subject: String,
    /// Message body reduced to plain text.
    pub content: String,
}

impl Message {
    pub fn is_private(&self) -> bool {
        matches!(self.recipient, Recipient::Private(_))
    }
}

/// A raw event payload as the server delivers it.
///
/// Three shapes occur in the wild: the live queue wraps the message object
/// in an event envelope under a `message` key, the history listing returns
/// the message object bare, and very old servers delivered plain strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawEvent {
    Envelope { id: i64, message: RawMessage },
    Bare(RawMessage),
    Legacy(String),
}

/// The message object inside an event. Fields stay optional until
/// normalization validates them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMessage {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub sender_full_name: Option<String>,
    #[serde(default)]
    pub display_recipient: Option<Recipient>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// Id used for legacy string payloads, which carry no ordering information.
pub const LEGACY_EVENT_ID: i64 = -1;

impl RawEvent {
    /// Convert a raw payload into a [`Message`].
    ///
    /// The envelope id wins when present, otherwise the message's own id is
    /// used. A payload missing a required field is an error; the caller is
    /// expected to fail the whole poll cycle rather than yield partial
    /// data.
    pub fn normalize(self) -> Result<Message, ClientError> {
        let (envelope_id, message) = match self {
            RawEvent::Envelope { id, message } => (Some(id), message),
            RawEvent::Bare(message) => (None, message),
            RawEvent::Legacy(text) => {
                return Ok(Message {
                    event_id: LEGACY_EVENT_ID,
                    sender: String::new(),
                    recipient: Recipient::Channel(String::new()),
                    subject: String::new(),
                    content: text,
                });
            }
        };

        let event_id = envelope_id
            .or(message.id)
            .ok_or(ClientError::MalformedEvent("id"))?;
        let sender = message
            .sender_full_name
            .ok_or(ClientError::MalformedEvent("sender_full_name"))?;
        let recipient = message
            .display_recipient
            .ok_or(ClientError::MalformedEvent("display_recipient"))?;
        let subject = message
            .subject
            .ok_or(ClientError::MalformedEvent("subject"))?;
        let content = message
            .content
            .ok_or(ClientError::MalformedEvent("content"))?;

        Ok(Message {
            event_id,
            sender,
            recipient,
            subject,
            content: html_to_text(&content),
        })
    }
}
