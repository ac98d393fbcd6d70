//! Thin client for the Telegram Bot API `sendMessage` endpoint.

use serde::Deserialize;
use std::time::Duration;

const API_BASE: &str = "https://api.telegram.org";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Response body returned by `sendMessage`.
#[derive(Debug, Clone, Deserialize)]
pub struct SendMessageResponse {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub description: Option<String>,
}

/// Client for delivering report messages through the Bot API.
pub struct TelegramClient {
    client: reqwest::Client,
}

impl TelegramClient {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent("gram-kit/0.1")
            .build()
            .unwrap_or_default();
        Self { client }
    }

    /// Send `text` to a chat as a markdown-formatted message.
    ///
    /// Returns the decoded response, or `None` when the request or decode
    /// failed at the transport level. Callers treat `None` like a rejected
    /// send; nothing is retried.
    pub async fn send_message(
        &self,
        api_token: &str,
        chat_id: &str,
        text: &str,
    ) -> Option<SendMessageResponse> {
        let url = format!("{}/bot{}/sendMessage", API_BASE, api_token);
        let request = self.client.get(&url).query(&[
            ("text", text),
            ("chat_id", chat_id),
            ("parse_mode", "markdown"),
        ]);

        match request.send().await {
            Ok(response) => match response.json::<SendMessageResponse>().await {
                Ok(decoded) => Some(decoded),
                Err(e) => {
                    tracing::error!("Telegram send error: {}", e);
                    None
                }
            },
            Err(e) => {
                tracing::error!("Telegram send error: {}", e);
                None
            }
        }
    }
}

impl Default for TelegramClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Failure description for a send outcome. `None` means the message went
/// through; otherwise the remote-provided description, or "Unknown error"
/// when the API gave none or the transport failed.
pub fn failure_description(response: Option<&SendMessageResponse>) -> Option<String> {
    match response {
        Some(r) if r.ok => None,
        Some(r) => Some(
            r.description
                .clone()
                .unwrap_or_else(|| "Unknown error".to_string()),
        ),
        None => Some("Unknown error".to_string()),
    }
}
