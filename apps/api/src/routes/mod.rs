pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::admin::handlers as admin;
use crate::articles::handlers as articles;
use crate::careers::handlers as careers;
use crate::catalog::handlers as catalog;
use crate::errors::AppError;
use crate::state::AppState;

async fn route_not_found() -> AppError {
    AppError::NotFound("Route not found".to_string())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Security catalog
        .route("/api/v1/categories", get(catalog::handle_list_categories))
        .route("/api/v1/items", get(catalog::handle_list_items))
        .route("/api/v1/items/:id", get(catalog::handle_get_item_detail))
        // Career counselor
        .route("/api/v1/careers", get(careers::handle_list_careers))
        .route(
            "/api/v1/careers/transitions",
            get(careers::handle_transition_graph),
        )
        .route("/api/v1/careers/:id", get(careers::handle_get_career_detail))
        .route(
            "/api/v1/careers/:id/image",
            get(careers::handle_get_career_image),
        )
        .route("/api/v1/careers/:id/chat", post(careers::handle_career_chat))
        .route(
            "/api/v1/careers/:id/transition/:to",
            get(careers::handle_get_transition_plan),
        )
        // Admin
        .route("/api/v1/admin/login", post(admin::handle_login))
        .route(
            "/api/v1/admin/articles/generate",
            post(articles::handle_generate_article),
        )
        .route("/api/v1/admin/articles", get(articles::handle_list_articles))
        .route(
            "/api/v1/admin/articles/:id",
            get(articles::handle_get_article),
        )
        .fallback(route_not_found)
        .with_state(state)
}
