use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
///
/// Every variant aborts the whole recommendation call; no partial results
/// are ever returned.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Artifact unavailable: {0}")]
    ArtifactUnavailable(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Data gateway timed out: {0}")]
    GatewayTimeout(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::UserNotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::InvalidProfile(_) => (StatusCode::UNPROCESSABLE_ENTITY, self.to_string()),
            AppError::ArtifactUnavailable(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, self.to_string())
            }
            AppError::GatewayTimeout(_) => (StatusCode::GATEWAY_TIMEOUT, self.to_string()),
            AppError::Database(_) | AppError::Internal(_) => {
                tracing::error!(error = %self, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = vec![
            (AppError::UserNotFound("u1".to_string()), StatusCode::NOT_FOUND),
            (AppError::InvalidInput("n".to_string()), StatusCode::BAD_REQUEST),
            (
                AppError::InvalidProfile("birth date".to_string()),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                AppError::ArtifactUnavailable("model".to_string()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                AppError::GatewayTimeout("fetch_user".to_string()),
                StatusCode::GATEWAY_TIMEOUT,
            ),
            (
                AppError::Database(sqlx::Error::RowNotFound),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[test]
    fn test_user_not_found_message() {
        let error = AppError::UserNotFound("abc".to_string());
        assert_eq!(error.to_string(), "User not found: abc");
    }
}
