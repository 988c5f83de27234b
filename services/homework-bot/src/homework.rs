//! Status API payload types, response validation, and verdict translation

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Status value the API uses for "no documented status"
const UNKNOWN_STATUS: &str = "unknown";

/// Validated status API response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub homeworks: Vec<Value>,
}

/// Review status of a single homework
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
    Unrecognized(String),
}

impl HomeworkStatus {
    pub fn parse(code: &str) -> Self {
        match code {
            "approved" => HomeworkStatus::Approved,
            "reviewing" => HomeworkStatus::Reviewing,
            "rejected" => HomeworkStatus::Rejected,
            other => HomeworkStatus::Unrecognized(other.to_string()),
        }
    }

    /// Localized verdict text for this status
    pub fn verdict(&self) -> String {
        match self {
            HomeworkStatus::Approved => {
                "Работа проверена: ревьюеру всё понравилось. Ура!".to_string()
            }
            HomeworkStatus::Reviewing => "Работа взята на проверку ревьюером.".to_string(),
            HomeworkStatus::Rejected => "Работа проверена: у ревьюера есть замечания.".to_string(),
            HomeworkStatus::Unrecognized(code) => format!("Неизвестный статус: {}", code),
        }
    }
}

impl fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HomeworkStatus::Approved => write!(f, "approved"),
            HomeworkStatus::Reviewing => write!(f, "reviewing"),
            HomeworkStatus::Rejected => write!(f, "rejected"),
            HomeworkStatus::Unrecognized(code) => write!(f, "{}", code),
        }
    }
}

/// A single homework entry from the status API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Homework {
    pub name: String,
    pub status: HomeworkStatus,
}

impl TryFrom<&Value> for Homework {
    type Error = crate::HomeworkBotError;

    fn try_from(item: &Value) -> crate::Result<Self> {
        let name = item
            .as_object()
            .and_then(|fields| fields.get("homework_name"))
            .ok_or_else(|| {
                crate::HomeworkBotError::MissingKey(
                    "homework_name is absent from the homework API response".to_string(),
                )
            })?;
        let name = match name {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };

        let status = match item.get("status") {
            None | Some(Value::Null) => {
                return Err(crate::HomeworkBotError::UndocumentedStatus(
                    "None".to_string(),
                ))
            }
            Some(Value::String(code)) if code == UNKNOWN_STATUS => {
                return Err(crate::HomeworkBotError::UndocumentedStatus(
                    code.clone(),
                ))
            }
            Some(Value::String(code)) => HomeworkStatus::parse(code),
            Some(other) => HomeworkStatus::Unrecognized(other.to_string()),
        };

        Ok(Self { name, status })
    }
}

impl Homework {
    /// Notification sentence for this homework
    pub fn message(&self) -> String {
        format!(
            "Изменился статус проверки работы \"{}\". {}",
            self.name,
            self.status.verdict()
        )
    }
}

/// Check that the API payload is an object carrying a `homeworks` list
pub fn check_response(response: &Value) -> crate::Result<StatusResponse> {
    match response.get("homeworks") {
        Some(Value::Array(homeworks)) => Ok(StatusResponse {
            homeworks: homeworks.clone(),
        }),
        _ => Err(crate::HomeworkBotError::Structure(
            "expected an object with a `homeworks` list".to_string(),
        )),
    }
}

/// Translate one homework entry into its notification text
pub fn parse_status(item: &Value) -> crate::Result<String> {
    Homework::try_from(item).map(|homework| homework.message())
}
