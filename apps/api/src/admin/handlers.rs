use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::admin::auth::{admin_token, password_matches};
use crate::errors::AppError;
use crate::models::api::ApiResponse;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct AdminLoginRequest {
    pub password: String,
}

#[derive(Serialize)]
pub struct AdminLoginResponse {
    pub token: String,
}

/// POST /api/v1/admin/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(req): Json<AdminLoginRequest>,
) -> Result<Json<ApiResponse<AdminLoginResponse>>, AppError> {
    if !password_matches(&state.config, &req.password) {
        warn!("Admin login rejected");
        return Err(AppError::Unauthorized("Incorrect password".to_string()));
    }
    info!("Admin login accepted");
    Ok(ApiResponse::ok(AdminLoginResponse {
        token: admin_token(&state.config),
    }))
}
