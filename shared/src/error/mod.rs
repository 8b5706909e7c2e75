use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    UnprocessableEntity(String),
    #[error("{0}")]
    ResourceConflict(String),
    #[error("{0}")]
    EntityNotFound(String),
    #[error("{0}")]
    ValidationError(#[from] garde::Report),
    #[error("transaction error")]
    TransactionError(#[source] sqlx::Error),
    #[error("database operation failed")]
    SpecificOperationError(#[source] sqlx::Error),
    #[error("no rows affected: {0}")]
    NoRowsAffectedError(String),
    #[error("key value store error")]
    KeyValueStoreError(#[from] redis::RedisError),
    #[error("{0}")]
    ConvertToUuidError(#[from] uuid::Error),
    #[error("{0}")]
    ConversionEntityError(String),
    #[error("{0}")]
    ExternalServiceError(String),
    #[error("authentication required")]
    UnauthenticatedError,
    #[error("invalid authorization credentials")]
    UnauthorizedError,
    #[error("operation not permitted for this role")]
    ForbiddenOperation,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status_code = match &self {
            AppError::UnprocessableEntity(_)
            | AppError::ResourceConflict(_)
            | AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::EntityNotFound(_) => StatusCode::NOT_FOUND,
            AppError::UnauthenticatedError | AppError::UnauthorizedError => {
                StatusCode::UNAUTHORIZED
            }
            AppError::ForbiddenOperation => StatusCode::FORBIDDEN,
            e @ (AppError::TransactionError(_)
            | AppError::SpecificOperationError(_)
            | AppError::NoRowsAffectedError(_)
            | AppError::KeyValueStoreError(_)
            | AppError::ConvertToUuidError(_)
            | AppError::ConversionEntityError(_)
            | AppError::ExternalServiceError(_)) => {
                tracing::error!(
                    error.cause_chain = ?e,
                    error.message = %e,
                    "unexpected error happened"
                );
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        // 5xx detail stays in the log; the caller only sees a generic message.
        let message = if status_code == StatusCode::INTERNAL_SERVER_ERROR {
            "internal server error".to_string()
        } else {
            self.to_string()
        };

        (
            status_code,
            Json(json!({ "success": false, "error": message })),
        )
            .into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
