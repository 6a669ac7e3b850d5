use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use contracts::shared::operation_result::{messages, OperationResult};
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

/// Ошибки сервисного слоя
///
/// На границе HTTP любая ошибка превращается в HTTP 400 с телом
/// `OperationResult`; детали БД и внутренние ошибки только логируются.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("record not found: {0}")]
    NotFound(String),

    #[error("code already exists: {0}")]
    DuplicateCode(String),

    #[error("validation failed: {}", .0.join("; "))]
    Invalid(Vec<String>),

    #[error("path id {path} does not match body id {body}")]
    IdMismatch { path: Uuid, body: Uuid },

    #[error("malformed request: {0}")]
    Malformed(String),

    #[error("database error: {0}")]
    Database(#[from] DbErr),

    #[error("internal error: {0}")]
    Internal(anyhow::Error),
}

impl From<anyhow::Error> for ServiceError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<DbErr>() {
            Ok(db) => ServiceError::Database(db),
            Err(other) => ServiceError::Internal(other),
        }
    }
}

impl ServiceError {
    /// Конверт для клиента (без trace id)
    pub fn to_operation_result(&self) -> OperationResult {
        match self {
            ServiceError::NotFound(detail) => {
                OperationResult::not_found().with_dev_message(detail.clone())
            }
            ServiceError::DuplicateCode(_) => {
                OperationResult::failure(messages::DUPLICATE_CODE).with_dev_message(self.to_string())
            }
            ServiceError::Invalid(errors) => OperationResult::failure(messages::INVALID_DATA)
                .with_dev_message("validation failed")
                .with_errors(errors.clone()),
            ServiceError::IdMismatch { .. } | ServiceError::Malformed(_) => {
                OperationResult::failure(messages::INVALID_DATA).with_dev_message(self.to_string())
            }
            ServiceError::Database(_) => {
                OperationResult::failure(messages::OTHER).with_dev_message("database error")
            }
            ServiceError::Internal(_) => {
                OperationResult::failure(messages::OTHER).with_dev_message("internal error")
            }
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let trace_id = Uuid::new_v4().to_string();
        match &self {
            ServiceError::Database(_) | ServiceError::Internal(_) => {
                tracing::error!(trace_id = %trace_id, "{}", self);
            }
            _ => {
                tracing::warn!(trace_id = %trace_id, "{}", self);
            }
        }
        let body = self.to_operation_result().with_trace_id(trace_id);
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::operation_result::ErrorCode;

    #[test]
    fn test_not_found_maps_to_not_found_code() {
        let result = ServiceError::NotFound("D99".into()).to_operation_result();
        assert_eq!(result.code(), Some(ErrorCode::NotFound));
        assert_eq!(result.dev_message.as_deref(), Some("D99"));
    }

    #[test]
    fn test_database_details_are_not_leaked() {
        let err = ServiceError::Database(DbErr::Custom("UNIQUE constraint failed: secret".into()));
        let result = err.to_operation_result();
        assert_eq!(result.code(), Some(ErrorCode::Failure));
        assert_eq!(result.dev_message.as_deref(), Some("database error"));
        assert_eq!(result.user_message.as_deref(), Some(messages::OTHER));
    }

    #[test]
    fn test_anyhow_db_error_is_classified() {
        let err: ServiceError = anyhow::Error::new(DbErr::Custom("boom".into())).into();
        assert!(matches!(err, ServiceError::Database(_)));
        let err: ServiceError = anyhow::anyhow!("bad row").into();
        assert!(matches!(err, ServiceError::Internal(_)));
    }

    #[test]
    fn test_validation_errors_are_listed() {
        let result =
            ServiceError::Invalid(vec!["DepartmentCode is required".into()]).to_operation_result();
        assert_eq!(result.errors, Some(vec!["DepartmentCode is required".to_string()]));
        assert_eq!(result.user_message.as_deref(), Some(messages::INVALID_DATA));
    }
}
