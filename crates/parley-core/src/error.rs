use reqwest::StatusCode;
use thiserror::Error;

/// Errors surfaced by the chat client.
///
/// Only the expired-queue condition is recoverable, and it is handled
/// inside the event queue; everything that reaches a caller is fatal for
/// the operation that produced it.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never completed (connect, timeout, decode).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status. The body is the
    /// server's error text, passed through verbatim.
    #[error("server returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// An event payload was missing a field the message model requires.
    /// Partial data cannot be ordered or displayed safely.
    #[error("malformed event payload: missing `{0}`")]
    MalformedEvent(&'static str),

    /// A request body could not be encoded.
    #[error("failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),
}
