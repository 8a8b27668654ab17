use std::collections::VecDeque;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, info};

use crate::api::transport::ChatClient;
use crate::error::ClientError;
use crate::models::{Message, RawEvent};

/// JSON-encoded event-type filter sent at registration.
const EVENT_TYPES_FILTER: &str = r#"["message"]"#;

/// Server-side position in the event stream.
///
/// Exactly one live cursor exists per running client. It is owned by the
/// poll loop and replaced wholesale when the server reports it invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventCursor {
    pub queue_id: String,
    pub last_event_id: i64,
}

/// One pulled item: the next message, or the signal that this poll cycle
/// produced nothing, so the caller can go service input for a while.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueueItem {
    Message(Message),
    Idle,
}

/// What a single poll produced.
#[derive(Debug)]
pub enum PollOutcome {
    /// Raw events in server order, possibly empty.
    Events(Vec<RawEvent>),
    /// The registered queue expired. A normal condition after periods of
    /// inactivity, recovered by re-registering.
    Expired,
}

/// Register/poll seam between the queue state machine and the wire.
#[async_trait]
pub trait QueueTransport {
    async fn register(&self) -> Result<EventCursor, ClientError>;
    async fn poll(&self, cursor: &EventCursor) -> Result<PollOutcome, ClientError>;
}

#[derive(Debug, Deserialize)]
struct RegisterResponse {
    queue_id: String,
    last_event_id: i64,
}

#[derive(Debug, Deserialize)]
struct EventsResponse {
    result: String,
    #[serde(default)]
    events: Vec<RawEvent>,
}

#[async_trait]
impl QueueTransport for ChatClient {
    async fn register(&self) -> Result<EventCursor, ClientError> {
        let response: RegisterResponse = self
            .post_form("register", &[("event_types", EVENT_TYPES_FILTER)])
            .await?;
        info!(queue_id = %response.queue_id, "registered event queue");
        Ok(EventCursor {
            queue_id: response.queue_id,
            last_event_id: response.last_event_id,
        })
    }

    async fn poll(&self, cursor: &EventCursor) -> Result<PollOutcome, ClientError> {
        let query = [
            ("queue_id", cursor.queue_id.clone()),
            ("last_event_id", cursor.last_event_id.to_string()),
            ("dont_block", "true".to_string()),
        ];
        let response: EventsResponse = self.get_json("events", &query).await?;
        if response.result == "error" {
            return Ok(PollOutcome::Expired);
        }
        Ok(PollOutcome::Events(response.events))
    }
}

/// Pull-driven client for the server's event stream.
///
/// [`open`](EventQueue::open) registers a cursor; [`next`](EventQueue::next)
/// performs at most one poll cycle and yields either the next message or
/// [`QueueItem::Idle`]. The sequence ends only when a call returns an
/// error. A single logical reader owns the queue; nothing here is safe to
/// share between tasks.
pub struct EventQueue<T: QueueTransport> {
    transport: T,
    cursor: EventCursor,
    buffered: VecDeque<Message>,
}

impl<T: QueueTransport> EventQueue<T> {
    /// Register a fresh cursor. Registration failure is fatal; the caller
    /// decides whether to abort.
    pub async fn open(transport: T) -> Result<Self, ClientError> {
        let cursor = transport.register().await?;
        Ok(Self {
            transport,
            cursor,
            buffered: VecDeque::new(),
        })
    }

    pub fn cursor(&self) -> &EventCursor {
        &self.cursor
    }

    /// Yield the next item, polling the server when the buffer is empty.
    ///
    /// An expired cursor is replaced by re-registering, and the same poll
    /// is retried with the fresh cursor; the consumer only sees the added
    /// latency. A poll cycle that produced no messages yields `Idle`
    /// exactly once. Pacing between pulls is the caller's job; the queue
    /// tolerates arbitrary delay.
    pub async fn next(&mut self) -> Result<QueueItem, ClientError> {
        if let Some(message) = self.buffered.pop_front() {
            return Ok(self.advance(message));
        }

        let events = loop {
            match self.transport.poll(&self.cursor).await? {
                PollOutcome::Events(events) => break events,
                PollOutcome::Expired => {
                    info!(queue_id = %self.cursor.queue_id, "event queue expired, re-registering");
                    self.cursor = self.transport.register().await?;
                }
            }
        };
        debug!(count = events.len(), "poll cycle complete");

        for raw in events {
            self.buffered.push_back(raw.normalize()?);
        }

        match self.buffered.pop_front() {
            Some(message) => Ok(self.advance(message)),
            None => Ok(QueueItem::Idle),
        }
    }

    fn advance(&mut self, message: Message) -> QueueItem {
        // Legacy payloads carry no id; the cursor never moves backwards.
        self.cursor.last_event_id = self.cursor.last_event_id.max(message.event_id);
        QueueItem::Message(message)
    }
}
