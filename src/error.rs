use chrono::{NaiveDate, Weekday};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    #[error("Invalid cycle start: {date} is a {actual}, cycles must start on a {expected}")]
    InvalidCycleStart {
        date: NaiveDate,
        actual: Weekday,
        expected: Weekday,
    },

    #[error("Ledger event hours must not be zero")]
    ZeroHoursEvent,

    #[error("Project cycle not found: {id}")]
    MissingCycle { id: Uuid },

    #[error("Participant not found: {id}")]
    MissingParticipant { id: Uuid },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Conflict: {message}")]
    Conflict {
        message: String,
        field: Option<String>,
        code: Option<String>,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    pub fn conflict_with_code(
        message: impl Into<String>,
        field: Option<String>,
        code: impl Into<String>,
    ) -> Self {
        Self::Conflict {
            message: message.into(),
            field,
            code: Some(code.into()),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Stable machine-readable code, used by the CLI when reporting failures.
    pub fn code(&self) -> &str {
        match self {
            AppError::InvalidCycleStart { .. } => "INVALID_CYCLE_START",
            AppError::ZeroHoursEvent => "ZERO_HOURS_EVENT",
            AppError::MissingCycle { .. } => "MISSING_CYCLE",
            AppError::MissingParticipant { .. } => "MISSING_PARTICIPANT",
            AppError::Validation { .. } => "VALIDATION_ERROR",
            AppError::NotFound { .. } => "NOT_FOUND",
            AppError::Conflict { code, .. } => code.as_deref().unwrap_or("CONFLICT"),
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Store(_) => "STORE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Validation {
            message: format!("Invalid JSON: {}", e),
        }
    }
}
