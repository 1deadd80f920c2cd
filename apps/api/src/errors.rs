use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::api::ApiResponse;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`;
/// every variant renders the `{success: false, data: null, error}` envelope.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// An upstream generation step failed. `message` is the generic text shown
    /// to callers; `details` carries the underlying error.
    #[error("{message}: {details}")]
    Generation { message: String, details: String },

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn generation(message: impl Into<String>, source: impl std::fmt::Display) -> Self {
        AppError::Generation {
            message: message.into(),
            details: source.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, details) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg, None),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg, None),
            AppError::Generation { message, details } => {
                tracing::error!("{message}: {details}");
                (StatusCode::INTERNAL_SERVER_ERROR, message, Some(details))
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred".to_string(),
                    None,
                )
            }
        };

        (status, Json(ApiResponse::failure(message, details))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    async fn render(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_not_found_renders_404_envelope() {
        let (status, body) = render(AppError::NotFound("Item 'x' not found".into())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["data"], Value::Null);
        assert_eq!(body["error"]["message"], json!("Item 'x' not found"));
    }

    #[tokio::test]
    async fn test_generation_keeps_generic_message_and_details() {
        let err = AppError::generation("Failed to generate item detail", "HTTP error: timed out");
        let (status, body) = render(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["message"], json!("Failed to generate item detail"));
        assert_eq!(body["error"]["details"], json!("HTTP error: timed out"));
    }

    #[tokio::test]
    async fn test_internal_hides_cause() {
        let (status, body) = render(AppError::Internal(anyhow::anyhow!("disk on fire"))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["message"], json!("An internal server error occurred"));
        assert_eq!(body["error"]["details"], Value::Null);
    }

    #[tokio::test]
    async fn test_unauthorized_is_401() {
        let (status, _) = render(AppError::Unauthorized("Invalid admin token".into())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
