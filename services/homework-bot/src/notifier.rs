//! Notifier trait for delivering messages

use std::sync::Arc;

use async_trait::async_trait;

/// Trait for sending text notifications to the configured chat
#[async_trait]
pub trait Notifier: Send + Sync + std::fmt::Debug {
    /// Get the notifier type name (e.g. "telegram")
    fn type_name(&self) -> &str;

    /// Send a message
    async fn send_message(&self, text: &str) -> crate::Result<()>;
}

/// Builds a fresh notifier, used when reporting fetch failures
pub type NotifierFactory = Arc<dyn Fn() -> Arc<dyn Notifier> + Send + Sync>;
