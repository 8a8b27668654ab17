use serde::{Deserialize, Serialize};

use crate::api::transport::ChatClient;
use crate::error::ClientError;

/// One channel subscription. The server sends more fields; only the name
/// matters here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    pub name: String,
}

#[derive(Debug, Deserialize)]
struct SubscriptionsResponse {
    subscriptions: Vec<Subscription>,
}

impl ChatClient {
    /// Names of the channels the account is subscribed to.
    pub async fn subscriptions(&self) -> Result<Vec<String>, ClientError> {
        let response: SubscriptionsResponse = self
            .get_json("users/me/subscriptions", &[] as &[(&str, &str)])
            .await?;
        Ok(response
            .subscriptions
            .into_iter()
            .map(|subscription| subscription.name)
            .collect())
    }

    /// Subscribe the account to the named channels.
    pub async fn subscribe(&self, channels: &[String]) -> Result<(), ClientError> {
        let list: Vec<Subscription> = channels
            .iter()
            .map(|name| Subscription { name: name.clone() })
            .collect();
        let body = serde_json::to_string(&list)?;
        let form = [("subscriptions", body.as_str())];
        let _: serde_json::Value = self.post_form("subscriptions", &form).await?;
        Ok(())
    }
}
