//! Telegram Bot API notification client

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::{Config, Credentials};
use crate::io::HttpClient;
use crate::notifier::Notifier;

/// Telegram Bot API response envelope
#[derive(Debug, Deserialize)]
struct TelegramResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Telegram notification sender
pub struct TelegramNotifier {
    send_url: String,
    chat_id: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for TelegramNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramNotifier")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

impl TelegramNotifier {
    pub fn new(config: &Config, credentials: &Credentials, http: Arc<dyn HttpClient>) -> Self {
        let send_url = format!(
            "{}/bot{}/sendMessage",
            config.telegram_api_url.trim_end_matches('/'),
            credentials.telegram_token
        );

        tracing::debug!(
            "Created TelegramNotifier for chat '{}'",
            credentials.telegram_chat_id
        );

        Self {
            send_url,
            chat_id: credentials.telegram_chat_id.clone(),
            http,
        }
    }

    async fn deliver(&self, text: &str) -> crate::Result<()> {
        let params = [("chat_id", self.chat_id.as_str()), ("text", text)];
        let response = self.http.post_form(&self.send_url, &params).await?;

        if response.status != 200 {
            return Err(crate::HomeworkBotError::Send(format!(
                "Telegram API returned status {}: {}",
                response.status, response.body
            )));
        }

        let parsed: TelegramResponse = serde_json::from_str(&response.body)?;
        if !parsed.ok {
            return Err(crate::HomeworkBotError::Send(format!(
                "Telegram API rejected the message: {}",
                parsed.description.unwrap_or_default()
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    fn type_name(&self) -> &str {
        "telegram"
    }

    async fn send_message(&self, text: &str) -> crate::Result<()> {
        match self.deliver(text).await {
            Ok(()) => {
                tracing::debug!("Sent message to chat ID {}: {}", self.chat_id, text);
                Ok(())
            }
            Err(e) => {
                let message = format!("Failed to send Telegram message: {}", e);
                tracing::error!("{}", message);
                Err(crate::HomeworkBotError::Send(message))
            }
        }
    }
}
