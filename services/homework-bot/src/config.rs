//! Configuration types for the homework bot

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

pub const PRACTICUM_TOKEN: &str = "PRACTICUM_TOKEN";
pub const TELEGRAM_TOKEN: &str = "TELEGRAM_TOKEN";
pub const TELEGRAM_CHAT_ID: &str = "TELEGRAM_CHAT_ID";

/// Non-secret settings, loaded from an optional JSON file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_telegram_api_url")]
    pub telegram_api_url: String,
    #[serde(default = "default_retry_period")]
    pub retry_period_seconds: u64,
    /// Lower bound for the status query; process start time when unset
    #[serde(default)]
    pub from_date: Option<u64>,
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            telegram_api_url: default_telegram_api_url(),
            retry_period_seconds: default_retry_period(),
            from_date: None,
            log_file: default_log_file(),
        }
    }
}

impl Config {
    /// The `from_date` to query with, falling back to the current time
    pub fn from_date_or_now(&self) -> u64 {
        self.from_date.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_secs()
        })
    }
}

fn default_endpoint() -> String {
    "https://practicum.yandex.ru/api/user_api/homework_statuses/".to_string()
}

fn default_telegram_api_url() -> String {
    "https://api.telegram.org".to_string()
}

fn default_retry_period() -> u64 {
    600
}

fn default_log_file() -> PathBuf {
    PathBuf::from("homework_bot.log")
}

/// Load configuration from a JSON file
pub fn load_config(path: &Path) -> crate::Result<Config> {
    tracing::debug!("Reading configuration from {:?}", path);
    let content = std::fs::read_to_string(path)?;
    let config: Config = serde_json::from_str(&content)?;
    Ok(config)
}

/// Raw secrets as found in the environment, possibly missing or empty
#[derive(Clone, Default)]
pub struct Secrets {
    pub practicum_token: Option<String>,
    pub telegram_token: Option<String>,
    pub telegram_chat_id: Option<String>,
}

impl std::fmt::Debug for Secrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secrets")
            .field("missing", &missing_tokens(self))
            .finish()
    }
}

impl Secrets {
    /// Read the three secrets from the process environment
    pub fn from_env() -> Self {
        Self {
            practicum_token: std::env::var(PRACTICUM_TOKEN).ok(),
            telegram_token: std::env::var(TELEGRAM_TOKEN).ok(),
            telegram_chat_id: std::env::var(TELEGRAM_CHAT_ID).ok(),
        }
    }
}

/// Names of the secrets that are absent or empty, in declaration order
pub fn missing_tokens(secrets: &Secrets) -> Vec<&'static str> {
    [
        (PRACTICUM_TOKEN, &secrets.practicum_token),
        (TELEGRAM_TOKEN, &secrets.telegram_token),
        (TELEGRAM_CHAT_ID, &secrets.telegram_chat_id),
    ]
    .into_iter()
    .filter(|(_, value)| value.as_deref().is_none_or(str::is_empty))
    .map(|(name, _)| name)
    .collect()
}

/// Log every missing secret. Returns true only when all three are present.
pub fn check_tokens(secrets: &Secrets) -> bool {
    let missing = missing_tokens(secrets);
    for name in &missing {
        tracing::error!("Environment variable is missing or empty: {}", name);
    }
    missing.is_empty()
}

/// Validated secrets
#[derive(Clone)]
pub struct Credentials {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .finish_non_exhaustive()
    }
}

impl TryFrom<Secrets> for Credentials {
    type Error = crate::HomeworkBotError;

    fn try_from(secrets: Secrets) -> crate::Result<Self> {
        if !check_tokens(&secrets) {
            return Err(crate::HomeworkBotError::Config(format!(
                "Missing required tokens: {}",
                missing_tokens(&secrets).join(", ")
            )));
        }
        Ok(Self {
            practicum_token: secrets.practicum_token.unwrap_or_default(),
            telegram_token: secrets.telegram_token.unwrap_or_default(),
            telegram_chat_id: secrets.telegram_chat_id.unwrap_or_default(),
        })
    }
}
