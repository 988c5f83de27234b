//! Homework status API client

use std::sync::Arc;

use serde_json::Value;

use crate::config::{Config, Credentials};
use crate::io::HttpClient;
use crate::notifier::NotifierFactory;

/// Client for the homework status endpoint
pub struct PracticumClient {
    endpoint: String,
    authorization: String,
    http: Arc<dyn HttpClient>,
    report_to: NotifierFactory,
}

impl std::fmt::Debug for PracticumClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PracticumClient")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl PracticumClient {
    pub fn new(
        config: &Config,
        credentials: &Credentials,
        http: Arc<dyn HttpClient>,
        report_to: NotifierFactory,
    ) -> Self {
        tracing::debug!("Created PracticumClient for {}", config.endpoint);

        Self {
            endpoint: config.endpoint.clone(),
            authorization: format!("OAuth {}", credentials.practicum_token),
            http,
            report_to,
        }
    }

    /// Fetch homework statuses changed since `timestamp`.
    ///
    /// Never fails: transport and parse problems are reported through a
    /// fresh notifier and degrade to `None`. A non-200 answer is reported
    /// too, but its body is still returned when it parses.
    pub async fn get_api_answer(&self, timestamp: u64) -> Option<Value> {
        let from_date = timestamp.to_string();
        let response = match self
            .http
            .get(
                &self.endpoint,
                &[("Authorization", self.authorization.as_str())],
                &[("from_date", from_date.as_str())],
            )
            .await
        {
            Ok(response) => response,
            Err(e) => {
                self.report(&e.to_string()).await;
                return None;
            }
        };

        let parsed = serde_json::from_str::<Value>(&response.body);
        match &parsed {
            Ok(value) => tracing::debug!("Response from API: {}", value),
            Err(e) => tracing::debug!("Failed to parse API response: {}", e),
        }

        if response.status != 200 {
            self.report(&format!("Ошибка при запросе к API: {}", response.status))
                .await;
        } else if let Err(e) = &parsed {
            self.report(&format!("Не удалось разобрать ответ API: {}", e)).await;
        }

        parsed.ok()
    }

    async fn report(&self, message: &str) {
        tracing::warn!("Status fetch failed: {}", message);
        let notifier = (self.report_to)();
        if let Err(e) = notifier.send_message(message).await {
            tracing::warn!("Could not report fetch failure: {}", e);
        }
    }
}
