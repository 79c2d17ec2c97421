use std::time::Duration;

use serde::Serialize;

use super::target::BotTarget;
use super::NotifyError;

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

/// Posts text messages to a chat endpoint. One attempt per call.
pub struct TelegramNotifier {
    client: reqwest::Client,
}

impl TelegramNotifier {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: reqwest::Client::builder().timeout(timeout).build()?,
        })
    }

    pub async fn send(
        &self,
        target: &BotTarget,
        text: &str,
    ) -> Result<serde_json::Value, NotifyError> {
        let resp = self
            .client
            .post(&target.url)
            .header("Content-Type", "application/json")
            .json(&SendMessage {
                chat_id: &target.chat_id,
                text,
            })
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(NotifyError::DeliveryFailed {
                url: target.redacted_url(),
                status: status.as_u16(),
            });
        }

        Ok(resp.json().await.unwrap_or(serde_json::Value::Null))
    }
}
