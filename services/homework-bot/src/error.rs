//! Error types for the homework bot

/// Errors that can occur in the homework bot
#[derive(Debug, thiserror::Error)]
pub enum HomeworkBotError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unexpected API response structure: {0}")]
    Structure(String),

    #[error("Missing key: {0}")]
    MissingKey(String),

    #[error("Undocumented status: {0}")]
    UndocumentedStatus(String),

    #[error("Send error: {0}")]
    Send(String),
}

/// Result type alias for homework bot operations
pub type Result<T> = std::result::Result<T, HomeworkBotError>;
