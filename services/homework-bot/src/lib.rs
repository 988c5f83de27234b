//! Homework bot - review status watcher
//!
//! Polls the homework status API on a fixed interval and relays every
//! returned status as a Telegram message.

pub mod config;
pub mod engine;
pub mod error;
pub mod homework;
pub mod io;
pub mod notifier;
pub mod practicum;
pub mod telegram;

pub use config::{check_tokens, load_config, Config, Credentials, Secrets};
pub use error::{HomeworkBotError, Result};

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::engine::Engine;
use crate::io::{HttpClient, ReqwestHttpClient};
use crate::notifier::{Notifier, NotifierFactory};
use crate::practicum::PracticumClient;
use crate::telegram::TelegramNotifier;

/// Run the bot with the given configuration until Ctrl-C
pub async fn run(config: Config, credentials: Credentials) -> Result<()> {
    let http: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::new());
    let cancel = CancellationToken::new();

    let notifier: Arc<dyn Notifier> = Arc::new(TelegramNotifier::new(
        &config,
        &credentials,
        Arc::clone(&http),
    ));

    let report_to: NotifierFactory = {
        let config = config.clone();
        let credentials = credentials.clone();
        let http = Arc::clone(&http);
        Arc::new(move || {
            Arc::new(TelegramNotifier::new(&config, &credentials, Arc::clone(&http)))
                as Arc<dyn Notifier>
        })
    };

    let client = PracticumClient::new(&config, &credentials, Arc::clone(&http), report_to);
    let from_date = config.from_date_or_now();
    let retry_period = Duration::from_secs(config.retry_period_seconds);

    let engine = Engine::new(client, notifier, from_date, retry_period, cancel.clone());

    // Setup shutdown handler
    let cancel_for_signal = cancel.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to listen for ctrl-c");
        tracing::info!("Shutdown signal received");
        cancel_for_signal.cancel();
    });

    tracing::info!(
        "Homework bot started (from_date={}, retry period {:?})",
        from_date,
        retry_period
    );

    // Blocks until cancelled
    engine.run().await;
    tracing::info!("Homework bot stopped");

    Ok(())
}
