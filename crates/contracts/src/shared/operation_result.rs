//! Единый конверт ошибки API

use serde::{Deserialize, Serialize};

/// Код ошибки в конверте `OperationResult`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Запись не найдена
    NotFound,
    /// Любая другая ошибка операции
    Failure,
}

impl ErrorCode {
    pub fn as_i32(&self) -> i32 {
        match self {
            ErrorCode::NotFound => 10000,
            ErrorCode::Failure => 10001,
        }
    }

    pub fn from_i32(code: i32) -> Option<Self> {
        match code {
            10000 => Some(ErrorCode::NotFound),
            10001 => Some(ErrorCode::Failure),
            _ => None,
        }
    }
}

/// Сообщения для пользователя
pub mod messages {
    pub const NOT_FOUND: &str = "The requested record does not exist.";
    pub const DUPLICATE_CODE: &str = "The code already exists. Please enter another code.";
    pub const INVALID_DATA: &str = "The submitted data is invalid.";
    pub const OTHER: &str = "An error occurred. Please contact support.";
}

/// Конверт ошибки, который API возвращает вместе с HTTP 400
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub struct OperationResult {
    pub error_code: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dev_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub more_info: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl OperationResult {
    pub fn new(code: ErrorCode, user_message: impl Into<String>) -> Self {
        Self {
            error_code: code.as_i32(),
            user_message: Some(user_message.into()),
            ..Default::default()
        }
    }

    pub fn not_found() -> Self {
        Self::new(ErrorCode::NotFound, messages::NOT_FOUND)
    }

    pub fn failure(user_message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Failure, user_message)
    }

    pub fn with_dev_message(mut self, message: impl Into<String>) -> Self {
        self.dev_message = Some(message.into());
        self
    }

    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }

    pub fn with_errors(mut self, errors: Vec<String>) -> Self {
        self.errors = Some(errors);
        self
    }

    pub fn code(&self) -> Option<ErrorCode> {
        ErrorCode::from_i32(self.error_code)
    }

    pub fn is_not_found(&self) -> bool {
        self.code() == Some(ErrorCode::NotFound)
    }
}

impl std::fmt::Display for OperationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] {}",
            self.error_code,
            self.user_message.as_deref().unwrap_or(messages::OTHER)
        )
    }
}

impl std::error::Error for OperationResult {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_envelope() {
        let result = OperationResult::not_found().with_trace_id("abc");
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["ErrorCode"], 10000);
        assert_eq!(value["UserMessage"], messages::NOT_FOUND);
        assert_eq!(value["TraceId"], "abc");
        assert!(value.get("DevMessage").is_none());
        assert!(result.is_not_found());
    }

    #[test]
    fn test_failure_codes_are_distinct() {
        assert_ne!(ErrorCode::NotFound.as_i32(), ErrorCode::Failure.as_i32());
        let result = OperationResult::failure(messages::OTHER);
        assert_eq!(result.code(), Some(ErrorCode::Failure));
        assert!(!result.is_not_found());
    }

    #[test]
    fn test_parses_sparse_body() {
        let result: OperationResult =
            serde_json::from_str(r#"{"ErrorCode":10001,"UserMessage":"x"}"#).unwrap();
        assert_eq!(result.to_string(), "[10001] x");
        assert!(result.errors.is_none());
    }
}
