use axum::{
    extract::{Path, State},
    Json,
};

use crate::admin::RequireAdmin;
use crate::articles::generator::ArticleTopic;
use crate::articles::models::{Article, ArticleGenerateRequest, ArticleSummary};
use crate::errors::AppError;
use crate::models::api::ApiResponse;
use crate::state::AppState;

/// POST /api/v1/admin/articles/generate
pub async fn handle_generate_article(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Json(req): Json<ArticleGenerateRequest>,
) -> Result<Json<ApiResponse<Article>>, AppError> {
    let topic = ArticleTopic::new(&req.topic).map_err(AppError::Validation)?;
    let article = state
        .articles
        .get_or_generate(&topic)
        .await
        .map_err(|e| AppError::generation("Failed to generate article", e))?;
    Ok(ApiResponse::ok(article))
}

/// GET /api/v1/admin/articles
pub async fn handle_list_articles(
    _admin: RequireAdmin,
    State(state): State<AppState>,
) -> Json<ApiResponse<Vec<ArticleSummary>>> {
    ApiResponse::ok(state.articles.list_articles().await)
}

/// GET /api/v1/admin/articles/:id
pub async fn handle_get_article(
    _admin: RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Article>>, AppError> {
    let article = state
        .articles
        .get_article(&id)
        .await
        .map_err(anyhow::Error::from)?
        .ok_or_else(|| AppError::NotFound(format!("Article '{id}' not found")))?;
    Ok(ApiResponse::ok(article))
}
