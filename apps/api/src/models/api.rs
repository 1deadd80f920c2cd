use axum::Json;
use serde::Serialize;

/// Error body carried inside the envelope. `details` holds the underlying
/// error text when there is one.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorDetail {
    pub message: String,
    pub details: Option<String>,
}

/// Standard response envelope: `{success, data, error}`.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ErrorDetail>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data: Some(data),
            error: None,
        })
    }
}

impl ApiResponse<()> {
    pub fn failure(message: impl Into<String>, details: Option<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ErrorDetail {
                message: message.into(),
                details,
            }),
        }
    }
}
