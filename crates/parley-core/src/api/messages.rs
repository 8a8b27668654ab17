use serde::Deserialize;

use crate::api::transport::ChatClient;
use crate::error::ClientError;
use crate::models::{Message, RawEvent};

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    messages: Vec<RawEvent>,
}

impl ChatClient {
    /// Send a private message.
    ///
    /// No local validation and no local echo: the server may reject empty
    /// fields, and an accepted message comes back through the event queue
    /// like any other.
    pub async fn send_private_message(
        &self,
        recipient: &str,
        content: &str,
    ) -> Result<(), ClientError> {
        let form = [("type", "private"), ("to", recipient), ("content", content)];
        let _: serde_json::Value = self.post_form("messages", &form).await?;
        Ok(())
    }

    /// Send a message to a channel under a subject.
    pub async fn send_stream_message(
        &self,
        channel: &str,
        subject: &str,
        content: &str,
    ) -> Result<(), ClientError> {
        let form = [
            ("type", "stream"),
            ("to", channel),
            ("subject", subject),
            ("content", content),
        ];
        let _: serde_json::Value = self.post_form("messages", &form).await?;
        Ok(())
    }

    /// Fetch historical messages around an anchor.
    pub async fn old_messages(
        &self,
        anchor: i64,
        num_before: u32,
        num_after: u32,
    ) -> Result<Vec<Message>, ClientError> {
        let query = [
            ("anchor", anchor.to_string()),
            ("num_before", num_before.to_string()),
            ("num_after", num_after.to_string()),
        ];
        self.fetch_messages(&query).await
    }

    /// Fetch the unread backlog: messages around the first unread anchor.
    /// Used once at startup, before the live loop takes over.
    pub async fn unread_messages(
        &self,
        num_before: u32,
        num_after: u32,
    ) -> Result<Vec<Message>, ClientError> {
        let query = [
            ("anchor", "0".to_string()),
            ("num_before", num_before.to_string()),
            ("num_after", num_after.to_string()),
            ("use_first_unread_anchor", "true".to_string()),
            ("narrow", "[]".to_string()),
        ];
        self.fetch_messages(&query).await
    }

    async fn fetch_messages(&self, query: &[(&str, String)]) -> Result<Vec<Message>, ClientError> {
        let response: MessagesResponse = self.get_json("messages", query).await?;
        response
            .messages
            .into_iter()
            .map(RawEvent::normalize)
            .collect()
    }
}
