//! Engine: the fetch, validate, translate, notify loop

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::homework::{check_response, parse_status};
use crate::notifier::Notifier;
use crate::practicum::PracticumClient;

/// The engine drives one status source and one notifier
pub struct Engine {
    client: PracticumClient,
    notifier: Arc<dyn Notifier>,
    from_date: u64,
    retry_period: Duration,
    cancel: CancellationToken,
}

impl Engine {
    pub fn new(
        client: PracticumClient,
        notifier: Arc<dyn Notifier>,
        from_date: u64,
        retry_period: Duration,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            client,
            notifier,
            from_date,
            retry_period,
            cancel,
        }
    }

    /// Run one pass. Returns the number of notifications sent.
    pub async fn run_cycle(&self) -> crate::Result<usize> {
        let Some(response) = self.client.get_api_answer(self.from_date).await else {
            return Ok(0);
        };
        if is_empty(&response) {
            return Ok(0);
        }

        let response = check_response(&response)?;
        tracing::debug!("Received {} homework(s)", response.homeworks.len());

        let mut sent = 0;
        for homework in &response.homeworks {
            let message = parse_status(homework)?;
            self.notifier.send_message(&message).await?;
            sent += 1;
        }
        Ok(sent)
    }

    /// Poll until the cancellation token is triggered.
    pub async fn run(&self) {
        loop {
            match self.run_cycle().await {
                Ok(sent) => tracing::debug!("Cycle finished, {} notification(s) sent", sent),
                Err(e) => tracing::error!("Program failure: {}", e),
            }

            tokio::select! {
                _ = tokio::time::sleep(self.retry_period) => {}
                _ = self.cancel.cancelled() => {
                    tracing::debug!("Polling loop cancelled");
                    break;
                }
            }
        }
    }
}

/// Falsy payloads are skipped without validation
fn is_empty(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => true,
        serde_json::Value::Bool(b) => !b,
        serde_json::Value::Object(map) => map.is_empty(),
        serde_json::Value::Array(items) => items.is_empty(),
        serde_json::Value::String(s) => s.is_empty(),
        serde_json::Value::Number(n) => n.as_f64() == Some(0.0),
    }
}
