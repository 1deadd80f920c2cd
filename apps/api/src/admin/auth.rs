//! Admin bearer tokens.
//!
//! The token is hex(HMAC-SHA256(key = token secret, message = admin password)):
//! stateless, stable across restarts, and invalidated by changing either value.

use axum::{async_trait, extract::FromRequestParts, http::header, http::request::Parts};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::warn;

use crate::config::Config;
use crate::errors::AppError;
use crate::state::AppState;

type HmacSha256 = Hmac<Sha256>;

fn keyed_mac(secret: &str, message: &str) -> HmacSha256 {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .unwrap_or_else(|_| unreachable!("HMAC accepts keys of any length"));
    mac.update(message.as_bytes());
    mac
}

/// The token handed out on a successful login.
pub fn admin_token(config: &Config) -> String {
    let mac = keyed_mac(&config.admin_token_secret, &config.admin_password);
    hex::encode(mac.finalize().into_bytes())
}

/// Constant-time check of a login password.
pub fn password_matches(config: &Config, candidate: &str) -> bool {
    let expected = keyed_mac(&config.admin_token_secret, &config.admin_password)
        .finalize()
        .into_bytes();
    keyed_mac(&config.admin_token_secret, candidate)
        .verify_slice(&expected)
        .is_ok()
}

/// Constant-time check of a presented bearer token.
pub fn token_matches(config: &Config, token: &str) -> bool {
    let Ok(presented) = hex::decode(token) else {
        return false;
    };
    keyed_mac(&config.admin_token_secret, &config.admin_password)
        .verify_slice(&presented)
        .is_ok()
}

/// Extractor guarding admin routes: requires `Authorization: Bearer <token>`.
pub struct RequireAdmin;

#[async_trait]
impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|val| val.to_str().ok());

        match auth_header.and_then(|h| h.strip_prefix("Bearer ")) {
            Some(token) if token_matches(&state.config, token) => Ok(RequireAdmin),
            Some(_) => {
                warn!("Rejected admin request with an invalid token");
                Err(AppError::Unauthorized("Invalid admin token".to_string()))
            }
            None => {
                warn!("Missing or malformed Authorization header on admin route");
                Err(AppError::Unauthorized(
                    "Invalid authorization header".to_string(),
                ))
            }
        }
    }
}
