use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::Credentials;
use crate::error::ClientError;

/// Default request timeout.
///
/// Polls return immediately server-side (`dont_block`), so this bounds a
/// single round trip, not a long-poll hold.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Authenticated HTTP client for one chat server.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ChatClient {
    http: reqwest::Client,
    credentials: Credentials,
}

impl ChatClient {
    pub fn new(credentials: Credentials) -> Result<Self, ClientError> {
        Self::with_timeout(credentials, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(credentials: Credentials, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, credentials })
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/api/v1/{}",
            self.credentials.server.trim_end_matches('/'),
            path
        )
    }

    /// Authenticated GET, deserializing a JSON response body.
    pub(crate) async fn get_json<T, Q>(&self, path: &str, query: &Q) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let response = self
            .http
            .get(self.endpoint(path))
            .basic_auth(&self.credentials.email, Some(&self.credentials.api_key))
            .query(query)
            .send()
            .await?;
        parse_response(response).await
    }

    /// Authenticated POST with a form-encoded body.
    pub(crate) async fn post_form<T, F>(&self, path: &str, form: &F) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        F: Serialize + ?Sized,
    {
        let response = self
            .http
            .post(self.endpoint(path))
            .basic_auth(&self.credentials.email, Some(&self.credentials.api_key))
            .form(form)
            .send()
            .await?;
        parse_response(response).await
    }
}

/// Deserialize the body on success, or surface the status and the server's
/// error text verbatim.
async fn parse_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ClientError::Status { status, body });
    }
    Ok(response.json().await?)
}
